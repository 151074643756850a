//! CQL value types for query results and bind parameters.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::net::IpAddr;
use uuid::Uuid;

/// CQL value enum representing a single column value.
///
/// This is the tagged union over the column type domain: every decodable
/// column maps to exactly one variant, and bind values are dispatched by
/// the declared column type at encode time.
#[derive(Debug, Clone, PartialEq)]
pub enum CqlValue {
    /// NULL value.
    Null,
    /// Text value (ascii, text, varchar).
    Text(String),
    /// Binary value (blob, custom).
    Blob(Vec<u8>),
    /// Boolean value.
    Boolean(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer (bigint, counter).
    Bigint(i64),
    /// Single-precision float.
    Float(f32),
    /// Double-precision float.
    Double(f64),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    /// UUID (uuid, timeuuid).
    Uuid(Uuid),
    /// Arbitrary-precision integer, within the i128 range.
    Varint(i128),
    /// Arbitrary-precision decimal: unscaled * 10^(-scale).
    Decimal { unscaled: i128, scale: i32 },
    /// IPv4 or IPv6 address.
    Inet(IpAddr),
    /// Ordered list of values.
    List(Vec<CqlValue>),
    /// Set of values (order as received).
    Set(Vec<CqlValue>),
    /// Map of key/value pairs (order as received).
    Map(Vec<(CqlValue, CqlValue)>),
}

impl CqlValue {
    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, CqlValue::Null)
    }

    /// Try to get the value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CqlValue::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Try to convert to i64.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            CqlValue::Int(v) => Some(*v as i64),
            CqlValue::Bigint(v) => Some(*v),
            CqlValue::Timestamp(v) => Some(*v),
            CqlValue::Varint(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert to f64.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CqlValue::Float(v) => Some(*v as f64),
            CqlValue::Double(v) => Some(*v),
            CqlValue::Int(v) => Some(*v as f64),
            CqlValue::Bigint(v) => Some(*v as f64),
            CqlValue::Varint(v) => Some(*v as f64),
            CqlValue::Decimal { unscaled, scale } => {
                Some(*unscaled as f64 * 10f64.powi(-scale))
            }
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CqlValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a UUID.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            CqlValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Try to get the value as an IP address.
    pub fn as_inet(&self) -> Option<IpAddr> {
        match self {
            CqlValue::Inet(ip) => Some(*ip),
            _ => None,
        }
    }

    /// Interpret a timestamp value as a UTC datetime.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            CqlValue::Timestamp(millis) => Utc.timestamp_millis_opt(*millis).single(),
            _ => None,
        }
    }

    /// Try to get the value as a list or set of values.
    pub fn as_list(&self) -> Option<&[CqlValue]> {
        match self {
            CqlValue::List(v) | CqlValue::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get the value as map entries.
    pub fn as_map(&self) -> Option<&[(CqlValue, CqlValue)]> {
        match self {
            CqlValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "0x")?;
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

impl fmt::Display for CqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CqlValue::Null => write!(f, "NULL"),
            CqlValue::Text(s) => write!(f, "{}", s),
            CqlValue::Blob(b) if b.is_empty() => Ok(()),
            CqlValue::Blob(b) => write_hex(f, b),
            CqlValue::Boolean(b) => write!(f, "{}", b),
            CqlValue::Int(v) => write!(f, "{}", v),
            CqlValue::Bigint(v) => write!(f, "{}", v),
            CqlValue::Float(v) => write!(f, "{}", v),
            CqlValue::Double(v) => write!(f, "{}", v),
            CqlValue::Timestamp(v) => write!(f, "{}", v),
            CqlValue::Uuid(u) => write!(f, "{}", u),
            CqlValue::Varint(v) => write!(f, "{}", v),
            CqlValue::Decimal { unscaled, scale } => {
                write!(f, "{}", *unscaled as f64 * 10f64.powi(-scale))
            }
            CqlValue::Inet(ip) => write!(f, "{}", ip),
            CqlValue::List(items) | CqlValue::Set(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            CqlValue::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
