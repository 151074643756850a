//! Request body builders for the CQL binary protocol.

mod execute;
mod query;
mod startup;

pub use execute::ExecuteMessage;
pub use query::{PrepareMessage, QueryMessage};
pub use startup::{CredentialsMessage, OptionsMessage, StartupMessage};
