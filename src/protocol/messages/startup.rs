//! STARTUP, CREDENTIALS and OPTIONS request bodies.

use crate::error::Result;
use crate::protocol::constants::*;
use crate::protocol::message::{string_wire_size, Message, WriteExt};

/// STARTUP request body: a string map of startup options.
///
/// The only mandatory option is `CQL_VERSION`.
pub struct StartupMessage<'a> {
    /// Requested CQL version string.
    pub cql_version: &'a str,
}

impl StartupMessage<'_> {
    /// Create a STARTUP message for the default CQL version.
    pub fn new() -> Self {
        Self {
            cql_version: CQL_VERSION_STRING,
        }
    }
}

impl Default for StartupMessage<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Message for StartupMessage<'_> {
    fn wire_size(&self) -> usize {
        2 + string_wire_size(STARTUP_OPTION_CQL_VERSION.len())
            + string_wire_size(self.cql_version.len())
    }

    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.write_string_map(&[(STARTUP_OPTION_CQL_VERSION, self.cql_version)]);
        Ok(())
    }
}

/// CREDENTIALS request body: a string map with `username` and `password`
/// entries, in that insertion order.
pub struct CredentialsMessage<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl Message for CredentialsMessage<'_> {
    fn wire_size(&self) -> usize {
        2 + string_wire_size(CREDENTIALS_KEY_USERNAME.len())
            + string_wire_size(self.username.len())
            + string_wire_size(CREDENTIALS_KEY_PASSWORD.len())
            + string_wire_size(self.password.len())
    }

    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.write_string_map(&[
            (CREDENTIALS_KEY_USERNAME, self.username),
            (CREDENTIALS_KEY_PASSWORD, self.password),
        ]);
        Ok(())
    }
}

/// OPTIONS request body (empty).
pub struct OptionsMessage;

impl Message for OptionsMessage {
    fn wire_size(&self) -> usize {
        0
    }

    fn write_to(&self, _buf: &mut Vec<u8>) -> Result<()> {
        Ok(())
    }
}
