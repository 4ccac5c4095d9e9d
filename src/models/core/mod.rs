mod alert;
mod identifier;
mod network;
mod snapshot;

pub use alert::{Alert, AlertField, AlertKind, Severity};
pub use identifier::{IdentifierKind, IdentifierSet, QueryPayload};
pub use network::Network;
pub use snapshot::CheckerSnapshot;
