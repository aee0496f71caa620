//! Registry domain: validator records, the active set and snapshots.

pub mod active_set;
pub mod snapshot;
pub mod validator;

pub use active_set::ActiveSet;
pub use snapshot::ActiveSetSnapshot;
pub use validator::{Validator, ValidatorStatus};
