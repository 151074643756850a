//! CQL binary protocol constants (protocol version 1).
//!
//! The numeric identities here are fixed by the protocol specification.

// Frame header version byte
pub const CQL_VERSION_REQUEST: u8 = 0x01;
pub const CQL_VERSION_RESPONSE: u8 = 0x81;
pub const CQL_DIRECTION_MASK: u8 = 0x80;

// Opcodes
pub const OPCODE_ERROR: u8 = 0x00;
pub const OPCODE_STARTUP: u8 = 0x01;
pub const OPCODE_READY: u8 = 0x02;
pub const OPCODE_AUTHENTICATE: u8 = 0x03;
pub const OPCODE_CREDENTIALS: u8 = 0x04;
pub const OPCODE_OPTIONS: u8 = 0x05;
pub const OPCODE_SUPPORTED: u8 = 0x06;
pub const OPCODE_QUERY: u8 = 0x07;
pub const OPCODE_RESULT: u8 = 0x08;
pub const OPCODE_PREPARE: u8 = 0x09;
pub const OPCODE_EXECUTE: u8 = 0x0A;
pub const OPCODE_REGISTER: u8 = 0x0B;
pub const OPCODE_EVENT: u8 = 0x0C;
pub const OPCODE_BATCH: u8 = 0x0D;
pub const OPCODE_AUTH_CHALLENGE: u8 = 0x0E;
pub const OPCODE_AUTH_RESPONSE: u8 = 0x0F;
pub const OPCODE_AUTH_SUCCESS: u8 = 0x10;

// Consistency levels
pub const CONSISTENCY_ANY: u16 = 0;
pub const CONSISTENCY_ONE: u16 = 1;
pub const CONSISTENCY_TWO: u16 = 2;
pub const CONSISTENCY_THREE: u16 = 3;
pub const CONSISTENCY_QUORUM: u16 = 4;
pub const CONSISTENCY_ALL: u16 = 5;
pub const CONSISTENCY_LOCAL_QUORUM: u16 = 6;
pub const CONSISTENCY_EACH_QUORUM: u16 = 7;
pub const CONSISTENCY_LOCAL_ONE: u16 = 10;

// Column type tags
pub const TYPE_CUSTOM: u16 = 0x0000;
pub const TYPE_ASCII: u16 = 0x0001;
pub const TYPE_BIGINT: u16 = 0x0002;
pub const TYPE_BLOB: u16 = 0x0003;
pub const TYPE_BOOLEAN: u16 = 0x0004;
pub const TYPE_COUNTER: u16 = 0x0005;
pub const TYPE_DECIMAL: u16 = 0x0006;
pub const TYPE_DOUBLE: u16 = 0x0007;
pub const TYPE_FLOAT: u16 = 0x0008;
pub const TYPE_INT: u16 = 0x0009;
pub const TYPE_TEXT: u16 = 0x000A;
pub const TYPE_TIMESTAMP: u16 = 0x000B;
pub const TYPE_UUID: u16 = 0x000C;
pub const TYPE_VARCHAR: u16 = 0x000D;
pub const TYPE_VARINT: u16 = 0x000E;
pub const TYPE_TIMEUUID: u16 = 0x000F;
pub const TYPE_INET: u16 = 0x0010;
pub const TYPE_LIST: u16 = 0x0020;
pub const TYPE_MAP: u16 = 0x0021;
pub const TYPE_SET: u16 = 0x0022;

// RESULT body kinds
pub const RESULT_KIND_VOID: i32 = 0x0001;
pub const RESULT_KIND_ROWS: i32 = 0x0002;
pub const RESULT_KIND_SET_KEYSPACE: i32 = 0x0003;
pub const RESULT_KIND_PREPARED: i32 = 0x0004;
pub const RESULT_KIND_SCHEMA_CHANGE: i32 = 0x0005;

// Rows metadata flags
pub const ROWS_FLAG_GLOBAL_TABLES_SPEC: i32 = 0x0001;

// Null sentinels
pub const BYTES_NULL_LENGTH: i32 = -1;
pub const STRING_NULL_LENGTH: u16 = 0xFFFF;

// Startup options
pub const STARTUP_OPTION_CQL_VERSION: &str = "CQL_VERSION";
pub const CQL_VERSION_STRING: &str = "3.0.0";

// Credentials map keys
pub const CREDENTIALS_KEY_USERNAME: &str = "username";
pub const CREDENTIALS_KEY_PASSWORD: &str = "password";

// Connection defaults
pub const CQL_DEFAULT_PORT: u16 = 9042;
