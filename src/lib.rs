//! This codec is designed around the idea that a _schema_, a specification
//! for what values are permitted and how they're encoded as protobuf bytes,
//! is a data structure that can be manipulated programmatically at runtime.
//! There is no code generation step and no compile-time knowledge of the
//! types being moved: a server can hand its peers the schemas for its
//! messages at connection time, a key/value store can keep the schemas for
//! its keys and values on disk next to the data, and either side can encode
//! and decode against them directly.
//!
//! Typical usage pattern:
//!
//! - build a [`Schema`] (the [`schema!`] macro gives construction sugar)
//! - to encode a value: pass `&Schema` and `&Value` to [`encode`] and get
//!   the value's complete wire bytes
//! - to decode: pass `&Schema` and the bytes to [`decode`]
//! - when bytes arrive in chunks of arbitrary size, make a [`StreamDecoder`]
//!   with [`decoder`], `feed` it chunks as they arrive, and `finish` it at
//!   end of input; whole values are emitted as soon as they complete
//!
//! The data model supports:
//!
//! - unit, bool, the signed integers up to 64 bits, `f32` and `f64`, `char`
//! - utf8 string, byte string, big integer and big decimal (as canonical
//!   decimal text)
//! - the calendar and clock types of [`chrono`], textual on the wire via a
//!   per-schema [`TimeFormat`]
//! - sequence, record, enumeration (tagged union), 2-tuple, option
//! - transform: an invertible, possibly-failing view of another schema
//! - fail: a schema that refuses both directions, for unrepresentable cases
//!
//! The wire format is ordinary protobuf: record fields and enumeration
//! cases take their 1-based declaration position as field number, sequences
//! of fixed-width numerics are packed, everything else is length-delimited.
//! Fields may arrive in any order, unknown fields are skipped, and absent
//! fields decode to their schema's default, so schemas can grow new fields
//! without breaking old readers.

pub mod error;

mod schema;
mod value;
mod wire;
mod encoder;
mod decoder;
mod stream;

pub use crate::{
    schema::{
        Schema,
        StandardType,
        TemporalUnit,
        TimeFormat,
        TransformSchema,
        TransformFn,
        RecordField,
        EnumCase,
    },
    value::{
        Value,
        PrimitiveValue,
        FieldValue,
        CaseValue,
    },
    stream::{
        StreamEncoder,
        StreamDecoder,
    },
};

use crate::error::Result;


/// Encode a value under a schema into its complete wire bytes.
pub fn encode(schema: &Schema, value: &Value) -> Result<Vec<u8>> {
    encoder::encode(schema, value)
}

/// Decode a value under a schema from a byte slice.
pub fn decode(schema: &Schema, bytes: &[u8]) -> Result<Value> {
    decoder::decode(schema, bytes)
}

/// Construct a streaming encoder for the schema.
pub fn encoder(schema: &Schema) -> StreamEncoder<'_> {
    StreamEncoder::new(schema)
}

/// Construct a streaming decoder for the schema.
pub fn decoder(schema: &Schema) -> StreamDecoder<'_> {
    StreamDecoder::new(schema)
}
