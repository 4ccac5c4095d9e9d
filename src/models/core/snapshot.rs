use crate::models::IdentifierSet;

/// Point-in-time copy of a checker's observed state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerSnapshot {
	pub network: String,
	/// Last observed balance, `None` until the first successful balance fetch
	pub balance: Option<i64>,
	pub denom: String,
	pub relayer_address: String,
	pub contract_address: String,
	pub identifiers: IdentifierSet,
}

impl CheckerSnapshot {
	/// Balance rendered with its denomination, e.g. `15000ujuno`
	pub fn display_balance(&self) -> String {
		match self.balance {
			Some(amount) => format!("{}{}", amount, self.denom),
			None => format!("unknown {}", self.denom),
		}
	}
}
