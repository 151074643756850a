//! CQL column type enum with parametric collection types.
//!
//! Scalar tags are in the range 0x0000-0x0010; collection tags (0x0020
//! list, 0x0021 map, 0x0022 set) carry nested element types read
//! recursively from the metadata stream.

use crate::error::{Error, Result};
use crate::protocol::buffer::ReadBuffer;
use crate::protocol::constants::*;

/// CQL column data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CqlType {
    /// Custom type identified by a fully-qualified class name.
    Custom(String),
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Int,
    Text,
    Timestamp,
    Uuid,
    Varchar,
    Varint,
    Timeuuid,
    Inet,
    /// `list<T>`.
    List(Box<CqlType>),
    /// `map<K, V>`.
    Map(Box<CqlType>, Box<CqlType>),
    /// `set<T>`.
    Set(Box<CqlType>),
}

impl CqlType {
    /// Parse a type from metadata: a `[short]` tag, followed by a class
    /// name for Custom and nested types for collections.
    pub fn parse(buf: &mut ReadBuffer) -> Result<Self> {
        let tag = buf.read_short()?;
        match tag {
            TYPE_CUSTOM => {
                let name = buf.read_string()?.unwrap_or_default();
                Ok(CqlType::Custom(name))
            }
            TYPE_ASCII => Ok(CqlType::Ascii),
            TYPE_BIGINT => Ok(CqlType::Bigint),
            TYPE_BLOB => Ok(CqlType::Blob),
            TYPE_BOOLEAN => Ok(CqlType::Boolean),
            TYPE_COUNTER => Ok(CqlType::Counter),
            TYPE_DECIMAL => Ok(CqlType::Decimal),
            TYPE_DOUBLE => Ok(CqlType::Double),
            TYPE_FLOAT => Ok(CqlType::Float),
            TYPE_INT => Ok(CqlType::Int),
            TYPE_TEXT => Ok(CqlType::Text),
            TYPE_TIMESTAMP => Ok(CqlType::Timestamp),
            TYPE_UUID => Ok(CqlType::Uuid),
            TYPE_VARCHAR => Ok(CqlType::Varchar),
            TYPE_VARINT => Ok(CqlType::Varint),
            TYPE_TIMEUUID => Ok(CqlType::Timeuuid),
            TYPE_INET => Ok(CqlType::Inet),
            TYPE_LIST => Ok(CqlType::List(Box::new(CqlType::parse(buf)?))),
            TYPE_MAP => {
                let key = CqlType::parse(buf)?;
                let value = CqlType::parse(buf)?;
                Ok(CqlType::Map(Box::new(key), Box::new(value)))
            }
            TYPE_SET => Ok(CqlType::Set(Box::new(CqlType::parse(buf)?))),
            _ => Err(Error::UnsupportedType { tag }),
        }
    }

    /// Get the wire tag for this type.
    pub fn tag(&self) -> u16 {
        match self {
            CqlType::Custom(_) => TYPE_CUSTOM,
            CqlType::Ascii => TYPE_ASCII,
            CqlType::Bigint => TYPE_BIGINT,
            CqlType::Blob => TYPE_BLOB,
            CqlType::Boolean => TYPE_BOOLEAN,
            CqlType::Counter => TYPE_COUNTER,
            CqlType::Decimal => TYPE_DECIMAL,
            CqlType::Double => TYPE_DOUBLE,
            CqlType::Float => TYPE_FLOAT,
            CqlType::Int => TYPE_INT,
            CqlType::Text => TYPE_TEXT,
            CqlType::Timestamp => TYPE_TIMESTAMP,
            CqlType::Uuid => TYPE_UUID,
            CqlType::Varchar => TYPE_VARCHAR,
            CqlType::Varint => TYPE_VARINT,
            CqlType::Timeuuid => TYPE_TIMEUUID,
            CqlType::Inet => TYPE_INET,
            CqlType::List(_) => TYPE_LIST,
            CqlType::Map(_, _) => TYPE_MAP,
            CqlType::Set(_) => TYPE_SET,
        }
    }

    /// Whether this is a collection type.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            CqlType::List(_) | CqlType::Map(_, _) | CqlType::Set(_)
        )
    }
}

impl std::fmt::Display for CqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CqlType::Custom(name) => write!(f, "custom({})", name),
            CqlType::Ascii => write!(f, "ascii"),
            CqlType::Bigint => write!(f, "bigint"),
            CqlType::Blob => write!(f, "blob"),
            CqlType::Boolean => write!(f, "boolean"),
            CqlType::Counter => write!(f, "counter"),
            CqlType::Decimal => write!(f, "decimal"),
            CqlType::Double => write!(f, "double"),
            CqlType::Float => write!(f, "float"),
            CqlType::Int => write!(f, "int"),
            CqlType::Text => write!(f, "text"),
            CqlType::Timestamp => write!(f, "timestamp"),
            CqlType::Uuid => write!(f, "uuid"),
            CqlType::Varchar => write!(f, "varchar"),
            CqlType::Varint => write!(f, "varint"),
            CqlType::Timeuuid => write!(f, "timeuuid"),
            CqlType::Inet => write!(f, "inet"),
            CqlType::List(elem) => write!(f, "list<{}>", elem),
            CqlType::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            CqlType::Set(elem) => write!(f, "set<{}>", elem),
        }
    }
}
