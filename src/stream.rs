//! Streaming adapters that turn the encoder and decoder into incremental
//! byte-chunk transducers.
//!
//! The encoder side is stateless: each fed value becomes its complete,
//! self-contained encoding. The decoder side owns a growable buffer so that
//! byte chunks may arrive split at arbitrary boundaries; a frame that ends
//! mid-key or mid-payload is retained until more input arrives. Each
//! instance is a single-owner object and never performs I/O of its own.

use crate::{
    decoder,
    encoder,
    error::{
        Result,
        ErrorKind,
        ensure,
        error,
        bail,
    },
    schema::Schema,
    value::Value,
};
use tracing::trace;


/// Streaming encoder for one schema.
#[derive(Debug)]
pub struct StreamEncoder<'a> {
    schema: &'a Schema,
}

impl<'a> StreamEncoder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        StreamEncoder { schema }
    }

    /// Encode one value. Concatenating the outputs of successive calls
    /// yields the same bytes as encoding each value separately.
    pub fn feed(&mut self, value: &Value) -> Result<Vec<u8>> {
        encoder::encode(self.schema, value)
    }
}

/// Streaming decoder for one schema.
///
/// Feed it byte chunks as they arrive; whole values are emitted as soon as
/// the buffered bytes form a complete frame. Call [`StreamDecoder::finish`]
/// at end of input to surface a dangling partial frame.
#[derive(Debug)]
pub struct StreamDecoder<'a> {
    schema: &'a Schema,
    buffer: Vec<u8>,
    failed: bool,
}

impl<'a> StreamDecoder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        StreamDecoder {
            schema,
            buffer: Vec::new(),
            failed: false,
        }
    }

    /// Buffer a chunk and emit every value that completes.
    ///
    /// A truncation failure means the buffered bytes are a valid but
    /// incomplete frame; they are retained and the call yields whatever
    /// values completed before it. Any other failure is terminal: the
    /// stream is dead and further feeding is a usage error.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Value>> {
        ensure!(!self.failed, Usage, None, "feed after stream failure");
        self.buffer.extend_from_slice(chunk);
        let mut values = Vec::new();
        while !self.buffer.is_empty() {
            match decoder::decode(self.schema, &self.buffer) {
                Ok(value) => {
                    trace!(consumed = self.buffer.len(), "frame complete");
                    values.push(value);
                    // the top-level frame runs to the end of its input, so
                    // a successful decode consumed the whole buffer
                    self.buffer.clear();
                }
                Err(e) if e.kind() == ErrorKind::Truncation => {
                    trace!(buffered = self.buffer.len(), "retaining partial frame");
                    break;
                }
                Err(e) => {
                    self.failed = true;
                    self.buffer.clear();
                    return Err(e);
                }
            }
        }
        Ok(values)
    }

    /// Signal end of input. An empty buffer is a clean end of stream (even
    /// if no value was ever emitted); leftover bytes are a truncated frame.
    pub fn finish(&self) -> Result<()> {
        ensure!(
            self.buffer.is_empty(),
            Truncation,
            None,
            "unexpected end of chunk",
        );
        Ok(())
    }
}

#[cfg(test)]
use crate::{
    encoder::encode,
    schema::schema,
    value::PrimitiveValue,
};

#[cfg(test)]
fn int(n: i32) -> Value {
    Value::Primitive(PrimitiveValue::Int(n))
}

#[cfg(test)]
fn string(s: &str) -> Value {
    Value::Primitive(PrimitiveValue::String(s.to_owned()))
}

#[test]
fn test_stream_encoder_matches_encode() {
    let schema = schema!(record { (name: string), (count: int) });
    let value = Value::record([("name", string("Foo")), ("count", int(123))]);
    let mut enc = StreamEncoder::new(&schema);
    assert_eq!(enc.feed(&value).unwrap(), encode(&schema, &value).unwrap());
}

#[test]
fn test_stream_decode_single_chunk() {
    let schema = schema!(record { (value: int) });
    let mut dec = StreamDecoder::new(&schema);
    let values = dec.feed(&[0x08, 0x96, 0x01]).unwrap();
    assert_eq!(values, vec![Value::record([("value", int(150))])]);
    dec.finish().unwrap();
}

#[test]
fn test_stream_decode_all_split_points() {
    let schema = schema!(seq(int));
    let bytes = [0x0A, 0x06, 0x03, 0x8E, 0x02, 0x9E, 0xA7, 0x05];
    let expected = Value::Sequence(vec![int(3), int(270), int(86942)]);
    for split in 0..=bytes.len() {
        let mut dec = StreamDecoder::new(&schema);
        let mut values = dec.feed(&bytes[..split]).unwrap();
        values.extend(dec.feed(&bytes[split..]).unwrap());
        assert_eq!(values, vec![expected.clone()], "split at {}", split);
        dec.finish().unwrap();
    }
}

#[test]
fn test_stream_decode_byte_at_a_time() {
    let schema = schema!(record { (value: string) });
    let bytes = [0x0A, 0x07, 0x74, 0x65, 0x73, 0x74, 0x69, 0x6E, 0x67];
    let mut dec = StreamDecoder::new(&schema);
    let mut values = Vec::new();
    for byte in bytes {
        values.extend(dec.feed(&[byte]).unwrap());
    }
    assert_eq!(values, vec![Value::record([("value", string("testing"))])]);
    dec.finish().unwrap();
}

#[test]
fn test_stream_decode_multiple_values() {
    let schema = schema!(record { (value: int) });
    let mut dec = StreamDecoder::new(&schema);
    let first = dec.feed(&encode(&schema, &Value::record([("value", int(150))])).unwrap());
    assert_eq!(first.unwrap(), vec![Value::record([("value", int(150))])]);
    let second = dec.feed(&encode(&schema, &Value::record([("value", int(270))])).unwrap());
    assert_eq!(second.unwrap(), vec![Value::record([("value", int(270))])]);
    dec.finish().unwrap();
}

#[test]
fn test_stream_decode_empty_input() {
    // the streaming path yields an empty sequence where the plain
    // decode of no bytes is an error
    let schema = schema!(int);
    let mut dec = StreamDecoder::new(&schema);
    assert_eq!(dec.feed(&[]).unwrap(), Vec::<Value>::new());
    dec.finish().unwrap();
}

#[test]
fn test_stream_decode_partial_frame_at_finish() {
    let schema = schema!(record { (value: string) });
    let mut dec = StreamDecoder::new(&schema);
    assert_eq!(dec.feed(&[0x0A, 0x03, 0x46]).unwrap(), Vec::<Value>::new());
    let e = dec.finish().unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Truncation);
    assert!(e.to_string().contains("unexpected end of chunk"));
}

#[test]
fn test_stream_decode_error_terminates() {
    let schema = schema!(record { (value: int) });
    let mut dec = StreamDecoder::new(&schema);
    let e = dec.feed(&[0x0F]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::KeyDecode);
    let e = dec.feed(&[0x08, 0x01]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Usage);
}
