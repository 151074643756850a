//! CQL binary protocol implementation.

pub mod buffer;
pub mod codec;
pub mod constants;
pub mod frame;
pub mod handshake;
pub mod message;
pub mod messages;
pub mod result;
pub mod types;

pub use buffer::{ReadBuffer, WriteBuffer};
pub use frame::{Frame, FrameStream};
pub use message::{Message, WriteExt};
pub use messages::{
    CredentialsMessage, ExecuteMessage, OptionsMessage, PrepareMessage, QueryMessage,
    StartupMessage,
};
pub use result::{QueryOutcome, QueryResult};
pub use types::{ColumnInfo, ColumnSpec, CqlType, CqlValue, Row, RowsMetadata};
