//! Operator command interface.
//!
//! Inbound commands (`get-balance`, `get-ids`, `set-timeout`) are parsed into a closed set of
//! [`Command`] variants, executed against the [`CheckerRegistry`](crate::services::checker::CheckerRegistry)
//! and answered through the alert sink. The HTTP layer only forwards requests into the
//! [`CommandInterface`] task through a [`CommandSender`].

mod error;
mod handler;
pub mod http;
mod interface;
mod parser;

pub use error::CommandError;
pub use handler::CommandHandler;
pub use interface::{CommandInterface, CommandRequest, CommandSender};
pub use parser::Command;
