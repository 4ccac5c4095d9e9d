use tokio::task::JoinHandle;
use tracing::{error, info};

/// Handles of the running checker tasks
#[derive(Debug, Default)]
pub struct CheckerTasks {
	handles: Vec<(String, JoinHandle<()>)>,
}

impl CheckerTasks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, network: String, handle: JoinHandle<()>) {
		self.handles.push((network, handle));
	}

	pub fn len(&self) -> usize {
		self.handles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}

	/// Waits for every checker task to exit, returning how many of them failed.
	///
	/// Callers must have signalled shutdown first or this never returns.
	pub async fn join_all(self) -> usize {
		let mut failed = 0;
		for (network, handle) in self.handles {
			if let Err(e) = handle.await {
				error!(network = %network, error = %e, "Checker task failed");
				failed += 1;
			}
		}
		info!("All checker tasks stopped");
		failed
	}
}
