//! Typed value codec: CQL values to and from their wire payloads.
//!
//! `encode_value` produces the element payload only; the caller frames it
//! (`[bytes]` for top-level values, `[string]` for collection elements).
//! `decode_value` is the inverse; a null payload short-circuits to
//! `CqlValue::Null` regardless of the declared type.

mod varint;

pub use varint::{decode_varint, encode_varint, MAX_VARINT_BYTES};

use crate::error::{Error, Result};
use crate::protocol::buffer::ReadBuffer;
use crate::protocol::message::WriteExt;
use crate::protocol::types::{CqlType, CqlValue};
use bytes::Bytes;
use std::net::IpAddr;
use uuid::Uuid;

fn mismatch(value: &CqlValue, ty: &CqlType) -> Error {
    Error::TypeMismatch {
        expected: ty.to_string(),
        value: value.to_string(),
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err(Error::type_conversion("hex string has odd length"));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|_| Error::type_conversion(format!("invalid hex digit in '{}'", s)))
        })
        .collect()
}

/// Encode a value as the payload for the declared column type.
///
/// Returns `None` for null; the caller writes the -1 length sentinel.
/// A value that does not fit the declared type fails with `TypeMismatch`.
pub fn encode_value(value: &CqlValue, ty: &CqlType) -> Result<Option<Vec<u8>>> {
    if value.is_null() {
        return Ok(None);
    }
    let payload = match ty {
        CqlType::Ascii | CqlType::Text | CqlType::Varchar => match value {
            CqlValue::Text(s) => s.as_bytes().to_vec(),
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Blob | CqlType::Custom(_) => match value {
            CqlValue::Blob(b) => b.clone(),
            // Hex input of the form 0x... decodes to binary.
            CqlValue::Text(s) => match s.strip_prefix("0x") {
                Some(hex) => decode_hex(hex)?,
                None => s.as_bytes().to_vec(),
            },
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Bigint | CqlType::Counter | CqlType::Timestamp => {
            let v = match value {
                CqlValue::Bigint(v) => *v,
                CqlValue::Timestamp(v) => *v,
                CqlValue::Int(v) => *v as i64,
                _ => return Err(mismatch(value, ty)),
            };
            v.to_be_bytes().to_vec()
        }
        CqlType::Int => match value {
            CqlValue::Int(v) => v.to_be_bytes().to_vec(),
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Boolean => match value {
            CqlValue::Boolean(b) => vec![u8::from(*b)],
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Float => match value {
            CqlValue::Float(v) => v.to_be_bytes().to_vec(),
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Double => match value {
            CqlValue::Double(v) => v.to_be_bytes().to_vec(),
            CqlValue::Float(v) => (*v as f64).to_be_bytes().to_vec(),
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Uuid | CqlType::Timeuuid => match value {
            CqlValue::Uuid(u) => u.as_bytes().to_vec(),
            CqlValue::Text(s) => Uuid::parse_str(s)
                .map_err(|e| Error::type_conversion(e.to_string()))?
                .as_bytes()
                .to_vec(),
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Varint => {
            let v = match value {
                CqlValue::Varint(v) => *v,
                CqlValue::Bigint(v) => *v as i128,
                CqlValue::Int(v) => *v as i128,
                _ => return Err(mismatch(value, ty)),
            };
            encode_varint(v)
        }
        CqlType::Decimal => match value {
            CqlValue::Decimal { unscaled, scale } => {
                let mut buf = Vec::new();
                buf.write_int(*scale);
                buf.write_raw(&encode_varint(*unscaled));
                buf
            }
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Inet => {
            let ip = match value {
                CqlValue::Inet(ip) => *ip,
                CqlValue::Text(s) => s
                    .parse::<IpAddr>()
                    .map_err(|e| Error::type_conversion(e.to_string()))?,
                _ => return Err(mismatch(value, ty)),
            };
            match ip {
                IpAddr::V4(v4) => v4.octets().to_vec(),
                IpAddr::V6(v6) => v6.octets().to_vec(),
            }
        }
        CqlType::List(elem) | CqlType::Set(elem) => match value {
            CqlValue::List(items) | CqlValue::Set(items) => {
                encode_collection_elements(items.iter(), elem, ty)?
            }
            _ => return Err(mismatch(value, ty)),
        },
        CqlType::Map(key_ty, value_ty) => match value {
            CqlValue::Map(entries) => {
                let mut buf = Vec::new();
                buf.write_short(entries.len() as u16);
                for (key, val) in entries {
                    write_element(&mut buf, key, key_ty, ty)?;
                    write_element(&mut buf, val, value_ty, ty)?;
                }
                buf
            }
            _ => return Err(mismatch(value, ty)),
        },
    };
    Ok(Some(payload))
}

fn encode_collection_elements<'a>(
    items: impl ExactSizeIterator<Item = &'a CqlValue>,
    elem_ty: &CqlType,
    collection_ty: &CqlType,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.write_short(items.len() as u16);
    for item in items {
        write_element(&mut buf, item, elem_ty, collection_ty)?;
    }
    Ok(buf)
}

/// Write one collection element with its 2-byte length framing.
fn write_element(
    buf: &mut Vec<u8>,
    value: &CqlValue,
    elem_ty: &CqlType,
    collection_ty: &CqlType,
) -> Result<()> {
    let payload = encode_value(value, elem_ty)?
        .ok_or_else(|| mismatch(&CqlValue::Null, collection_ty))?;
    if payload.len() > u16::MAX as usize {
        return Err(Error::type_conversion(format!(
            "collection element of {} bytes exceeds the 2-byte framing",
            payload.len()
        )));
    }
    buf.write_string(&payload);
    Ok(())
}

/// Decode a `[bytes]` payload as the declared column type.
///
/// `None` (wire length -1) decodes to `CqlValue::Null` for every type.
pub fn decode_value(content: Option<&[u8]>, ty: &CqlType) -> Result<CqlValue> {
    let bytes = match content {
        Some(b) => b,
        None => return Ok(CqlValue::Null),
    };
    match ty {
        CqlType::Ascii | CqlType::Text | CqlType::Varchar => {
            Ok(CqlValue::Text(String::from_utf8_lossy(bytes).to_string()))
        }
        CqlType::Blob | CqlType::Custom(_) => Ok(CqlValue::Blob(bytes.to_vec())),
        CqlType::Bigint | CqlType::Counter => Ok(CqlValue::Bigint(decode_i64(bytes, ty)?)),
        CqlType::Timestamp => Ok(CqlValue::Timestamp(decode_i64(bytes, ty)?)),
        CqlType::Int => {
            let arr = fixed::<4>(bytes, ty)?;
            Ok(CqlValue::Int(i32::from_be_bytes(arr)))
        }
        CqlType::Boolean => Ok(match bytes {
            [0x00] => CqlValue::Boolean(false),
            [0x01] => CqlValue::Boolean(true),
            // Anything else decodes to null.
            _ => CqlValue::Null,
        }),
        CqlType::Float => {
            let arr = fixed::<4>(bytes, ty)?;
            Ok(CqlValue::Float(f32::from_be_bytes(arr)))
        }
        CqlType::Double => {
            let arr = fixed::<8>(bytes, ty)?;
            Ok(CqlValue::Double(f64::from_be_bytes(arr)))
        }
        CqlType::Uuid | CqlType::Timeuuid => {
            let uuid =
                Uuid::from_slice(bytes).map_err(|e| Error::type_conversion(e.to_string()))?;
            Ok(CqlValue::Uuid(uuid))
        }
        CqlType::Varint => Ok(CqlValue::Varint(decode_varint(bytes)?)),
        CqlType::Decimal => {
            // Anything shorter than scale + one unscaled byte is zero.
            if bytes.len() < 5 {
                return Ok(CqlValue::Decimal {
                    unscaled: 0,
                    scale: 0,
                });
            }
            let scale = i32::from_be_bytes(fixed::<4>(&bytes[..4], ty)?);
            let unscaled = decode_varint(&bytes[4..])?;
            Ok(CqlValue::Decimal { unscaled, scale })
        }
        CqlType::Inet => match bytes.len() {
            4 => {
                let arr = fixed::<4>(bytes, ty)?;
                Ok(CqlValue::Inet(IpAddr::from(arr)))
            }
            16 => {
                let arr = fixed::<16>(bytes, ty)?;
                Ok(CqlValue::Inet(IpAddr::from(arr)))
            }
            n => Err(Error::protocol(format!(
                "inet value of {} bytes is neither IPv4 nor IPv6",
                n
            ))),
        },
        CqlType::List(elem) => Ok(CqlValue::List(decode_elements(bytes, elem)?)),
        CqlType::Set(elem) => Ok(CqlValue::Set(decode_elements(bytes, elem)?)),
        CqlType::Map(key_ty, value_ty) => {
            let mut buf = ReadBuffer::new(Bytes::copy_from_slice(bytes));
            let count = buf.read_short()? as usize;
            let mut entries = Vec::with_capacity(count);
            for _ in 0..count {
                let key = read_element(&mut buf, key_ty)?;
                let value = read_element(&mut buf, value_ty)?;
                entries.push((key, value));
            }
            Ok(CqlValue::Map(entries))
        }
    }
}

fn decode_elements(bytes: &[u8], elem_ty: &CqlType) -> Result<Vec<CqlValue>> {
    let mut buf = ReadBuffer::new(Bytes::copy_from_slice(bytes));
    let count = buf.read_short()? as usize;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(read_element(&mut buf, elem_ty)?);
    }
    Ok(items)
}

/// Read one collection element from its 2-byte length framing.
fn read_element(buf: &mut ReadBuffer, elem_ty: &CqlType) -> Result<CqlValue> {
    let payload = buf.read_string_bytes()?;
    decode_value(payload.as_deref(), elem_ty)
}

fn fixed<const N: usize>(bytes: &[u8], ty: &CqlType) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| {
        Error::type_conversion(format!(
            "expected {} bytes for {}, got {}",
            N,
            ty,
            bytes.len()
        ))
    })
}

fn decode_i64(bytes: &[u8], ty: &CqlType) -> Result<i64> {
    Ok(i64::from_be_bytes(fixed::<8>(bytes, ty)?))
}
