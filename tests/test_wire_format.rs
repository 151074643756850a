//! Wire format assertions with literal bytes, exercised through the
//! public protocol API.

use cassandra_thin_rs::protocol::buffer::{ReadBuffer, WriteBuffer};
use cassandra_thin_rs::protocol::codec::{decode_value, encode_value};
use cassandra_thin_rs::protocol::constants::*;
use cassandra_thin_rs::protocol::frame::{write_frame_header, HEADER_SIZE};
use cassandra_thin_rs::protocol::message::Message;
use cassandra_thin_rs::protocol::messages::{QueryMessage, StartupMessage};
use cassandra_thin_rs::{CqlType, CqlValue};
use bytes::Bytes;

#[test]
fn startup_frame_literal_bytes() {
    let msg = StartupMessage::new();
    let mut frame = Vec::with_capacity(HEADER_SIZE + msg.wire_size());
    write_frame_header(&mut frame, OPCODE_STARTUP, msg.wire_size());
    msg.write_to(&mut frame).unwrap();

    let expected: Vec<u8> = vec![
        0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x16, 0x00, 0x01, 0x00, 0x0B, 0x43, 0x51,
        0x4C, 0x5F, 0x56, 0x45, 0x52, 0x53, 0x49, 0x4F, 0x4E, 0x00, 0x05, 0x33, 0x2E, 0x30,
        0x2E, 0x30,
    ];
    assert_eq!(frame, expected);
}

#[test]
fn use_keyspace_query_body() {
    let msg = QueryMessage {
        cql: "USE demo",
        consistency: CONSISTENCY_ALL,
    };
    let mut body = Vec::with_capacity(msg.wire_size());
    msg.write_to(&mut body).unwrap();
    let expected: Vec<u8> = vec![
        0x00, 0x00, 0x00, 0x08, 0x55, 0x53, 0x45, 0x20, 0x64, 0x65, 0x6D, 0x6F, 0x00, 0x05,
    ];
    assert_eq!(body, expected);
}

#[test]
fn int_encoding_literal_bytes() {
    assert_eq!(
        encode_value(&CqlValue::Int(-1), &CqlType::Int).unwrap().unwrap(),
        vec![0xFF, 0xFF, 0xFF, 0xFF]
    );
    assert_eq!(
        decode_value(Some(&[0xFF, 0xFF, 0xFF, 0xFF]), &CqlType::Int).unwrap(),
        CqlValue::Int(-1)
    );
    assert_eq!(
        encode_value(&CqlValue::Int(2147483647), &CqlType::Int)
            .unwrap()
            .unwrap(),
        vec![0x7F, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn uuid_encoding_literal_bytes() {
    let encoded = encode_value(
        &CqlValue::Text("550e8400-e29b-41d4-a716-446655440000".to_string()),
        &CqlType::Uuid,
    )
    .unwrap()
    .unwrap();
    assert_eq!(
        encoded,
        vec![
            0x55, 0x0E, 0x84, 0x00, 0xE2, 0x9B, 0x41, 0xD4, 0xA7, 0x16, 0x44, 0x66, 0x55, 0x44,
            0x00, 0x00
        ]
    );

    let decoded = decode_value(Some(&encoded), &CqlType::Uuid).unwrap();
    assert_eq!(
        decoded.as_uuid().unwrap().to_string(),
        "550e8400-e29b-41d4-a716-446655440000"
    );
}

#[test]
fn list_of_int_literal_bytes() {
    let list = CqlValue::List(vec![CqlValue::Int(1), CqlValue::Int(2), CqlValue::Int(3)]);
    let ty = CqlType::List(Box::new(CqlType::Int));
    let encoded = encode_value(&list, &ty).unwrap().unwrap();
    assert_eq!(
        encoded,
        vec![
            0x00, 0x03, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x04, 0x00, 0x00, 0x00, 0x02,
            0x00, 0x04, 0x00, 0x00, 0x00, 0x03
        ]
    );
    assert_eq!(decode_value(Some(&encoded), &ty).unwrap(), list);
}

#[test]
fn decimal_literal_bytes() {
    let dec = CqlValue::Decimal {
        unscaled: 1234,
        scale: 2,
    };
    let encoded = encode_value(&dec, &CqlType::Decimal).unwrap().unwrap();
    assert_eq!(encoded, vec![0x00, 0x00, 0x00, 0x02, 0x04, 0xD2]);

    let decoded = decode_value(Some(&encoded), &CqlType::Decimal).unwrap();
    assert!((decoded.to_f64().unwrap() - 12.34).abs() < 1e-9);
}

#[test]
fn null_bytes_preserved_for_every_type() {
    let types = [
        CqlType::Text,
        CqlType::Int,
        CqlType::Bigint,
        CqlType::Boolean,
        CqlType::Float,
        CqlType::Double,
        CqlType::Uuid,
        CqlType::Varint,
        CqlType::Decimal,
        CqlType::Inet,
        CqlType::Blob,
        CqlType::List(Box::new(CqlType::Int)),
        CqlType::Map(Box::new(CqlType::Text), Box::new(CqlType::Int)),
        CqlType::Set(Box::new(CqlType::Text)),
    ];
    for ty in &types {
        assert_eq!(decode_value(None, ty).unwrap(), CqlValue::Null, "{}", ty);
        assert_eq!(encode_value(&CqlValue::Null, ty).unwrap(), None, "{}", ty);
    }

    // Encoding null through [bytes] produces the -1 sentinel.
    let mut buf = WriteBuffer::new();
    buf.put_bytes(None);
    assert_eq!(buf.as_bytes(), &[0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn primitive_framing_laws() {
    // get_string(put_string(s)) == s for a sample of lengths
    for len in [0usize, 1, 255, 256, 65534] {
        let payload = vec![0x41u8; len];
        let mut buf = WriteBuffer::new();
        buf.put_string(&payload);
        let mut rd = ReadBuffer::new(buf.freeze());
        let out = rd.read_string_bytes().unwrap().unwrap();
        assert_eq!(out.as_ref(), payload.as_slice(), "length {}", len);
    }

    // Analogously for long string
    let payload = vec![0x42u8; 70_000];
    let mut buf = WriteBuffer::new();
    buf.put_long_string(&payload);
    let mut rd = ReadBuffer::new(buf.freeze());
    assert_eq!(
        rd.read_long_string().unwrap().unwrap().as_ref(),
        payload.as_slice()
    );
}

#[test]
fn frame_header_symmetry() {
    let body = b"some body";
    let mut frame = Vec::new();
    write_frame_header(&mut frame, OPCODE_RESULT, body.len());
    frame.extend_from_slice(body);

    let mut rd = ReadBuffer::new(Bytes::from(frame));
    let version = rd.read_u8().unwrap();
    let _flags = rd.read_u8().unwrap();
    let _stream = rd.read_u8().unwrap();
    let opcode = rd.read_u8().unwrap();
    let length = rd.read_int().unwrap();

    assert_eq!(version, CQL_VERSION_REQUEST);
    assert_eq!(opcode, OPCODE_RESULT);
    assert_eq!(length as usize, body.len());
    assert_eq!(rd.read_raw(length as usize).unwrap().as_ref(), body);
}

#[test]
fn boolean_wire_contract() {
    assert_eq!(
        encode_value(&CqlValue::Boolean(true), &CqlType::Boolean)
            .unwrap()
            .unwrap(),
        vec![0x01]
    );
    assert_eq!(
        encode_value(&CqlValue::Boolean(false), &CqlType::Boolean)
            .unwrap()
            .unwrap(),
        vec![0x00]
    );
    // Other byte values decode to null.
    assert_eq!(
        decode_value(Some(&[0x7F]), &CqlType::Boolean).unwrap(),
        CqlValue::Null
    );
}
