//! Schema-walking encoder: turns a (schema, value) pair into protobuf
//! bytes.
//!
//! An encode call emits a record-like frame. Records, enumerations, tuples
//! and optionals are already field-tagged and write their fields directly;
//! any other schema is wrapped as the single field number 1 of an implicit
//! record, which keeps the output self-describing for the decoder.

use crate::{
    error::{
        Error,
        Result,
        error,
        ensure,
        bail,
    },
    schema::{
        Schema,
        StandardType,
        RecordField,
        EnumCase,
        TransformSchema,
    },
    value::{
        Value,
        PrimitiveValue,
        FieldValue,
        CaseValue,
    },
    wire::{
        WireType,
        put_key,
        put_varint,
        put_len_prefixed,
        zigzag,
    },
};
use chrono::format::{
    DelayedFormat,
    StrftimeItems,
};


/// Encode a value under a schema into a fresh byte buffer.
pub fn encode(schema: &Schema, value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_message(schema, value, &mut buf)?;
    Ok(buf)
}

/// Encode one whole message: the field-tagged form of `value`, with the
/// top-level framing rule applied.
pub(crate) fn encode_message(
    schema: &Schema,
    value: &Value,
    buf: &mut Vec<u8>,
) -> Result<()> {
    match (schema, value) {
        (&Schema::Record(ref fields), &Value::Record(ref values)) =>
            encode_record(schema, fields, values, buf),
        (&Schema::Enumeration(ref cases), &Value::Enumeration(ref case_value)) =>
            encode_enum_case(schema, cases, case_value, buf),
        (&Schema::Tuple(ref a, ref b), &Value::Tuple(ref va, ref vb)) => {
            encode_field(1, a, va, buf)?;
            encode_field(2, b, vb, buf)
        }
        (&Schema::Optional(ref inner), &Value::Optional(ref opt)) => match opt {
            // someness is presence of field 1, so a present inner value is
            // never omitted as a default
            &Some(ref inner_value) => encode_field_present(1, inner, inner_value, buf),
            &None => Ok(()),
        },
        (&Schema::Transform(ref t), _) => {
            let inner_value = apply_reverse(t, schema, value)?;
            encode_message(&t.inner, &inner_value, buf)
        }
        (&Schema::Fail(_), _) => Ok(()),
        (&Schema::Record(..), _)
        | (&Schema::Enumeration(..), _)
        | (&Schema::Tuple(..), _)
        | (&Schema::Optional(_), _) => Err(non_conformance(schema, value)),
        _ => encode_field(1, schema, value, buf),
    }
}

fn encode_record(
    schema: &Schema,
    fields: &[RecordField],
    values: &[FieldValue],
    buf: &mut Vec<u8>,
) -> Result<()> {
    ensure!(
        fields.len() == values.len(),
        SchemaNonConformance,
        Some(schema),
        "record of {} fields, got {} field values",
        fields.len(),
        values.len(),
    );
    for (i, (field, field_value)) in fields.iter().zip(values).enumerate() {
        ensure!(
            field.name == field_value.name,
            SchemaNonConformance,
            Some(schema),
            "need record field {:?}, got record field {:?}",
            field.name,
            field_value.name,
        );
        encode_field(i as u64 + 1, &field.inner, &field_value.value, buf)?;
    }
    Ok(())
}

fn encode_enum_case(
    schema: &Schema,
    cases: &[EnumCase],
    case_value: &CaseValue,
    buf: &mut Vec<u8>,
) -> Result<()> {
    let case = match cases.get(case_value.case_ord) {
        Some(case) => case,
        None => bail!(
            SchemaNonConformance,
            Some(schema),
            "enumeration case ordinal {} out of range 0..{}",
            case_value.case_ord,
            cases.len(),
        ),
    };
    ensure!(
        case.name == case_value.case_name,
        SchemaNonConformance,
        Some(schema),
        "case at ordinal {} is named {:?}, got {:?}",
        case_value.case_ord,
        case.name,
        case_value.case_name,
    );
    // presence of the key is what selects the case, so the payload is
    // emitted even when it holds the case schema's default
    encode_field_present(
        case_value.case_ord as u64 + 1,
        &case.inner,
        &case_value.value,
        buf,
    )
}

/// Encode one record field, omitting it entirely when the value is the
/// schema's default.
fn encode_field(
    field_number: u64,
    schema: &Schema,
    value: &Value,
    buf: &mut Vec<u8>,
) -> Result<()> {
    if is_default_at(schema, value) {
        return Ok(());
    }
    encode_field_present(field_number, schema, value, buf)
}

fn is_default_at(schema: &Schema, value: &Value) -> bool {
    match (schema, value) {
        (&Schema::Primitive(ref st), &Value::Primitive(ref pv)) => st.is_default(pv),
        (&Schema::Optional(_), &Value::Optional(None)) => true,
        (&Schema::Sequence(_), &Value::Sequence(ref elems)) => elems.is_empty(),
        _ => false,
    }
}

fn encode_field_present(
    field_number: u64,
    schema: &Schema,
    value: &Value,
    buf: &mut Vec<u8>,
) -> Result<()> {
    match (schema, value) {
        (&Schema::Primitive(ref st), &Value::Primitive(ref pv)) => {
            match st.wire_type() {
                None => {
                    ensure!(
                        matches!(pv, &PrimitiveValue::Unit),
                        SchemaNonConformance,
                        Some(schema),
                        "need unit, got {:?}",
                        pv,
                    );
                    // a forced unit field (an enumeration case or a present
                    // optional) is an empty length-delimited frame
                    put_key(buf, field_number, WireType::LengthDelimited);
                    put_varint(buf, 0);
                    Ok(())
                }
                Some(WireType::Varint) => {
                    let n = varint_repr(st, pv)?;
                    put_key(buf, field_number, WireType::Varint);
                    put_varint(buf, n);
                    Ok(())
                }
                Some(WireType::Fixed32) => {
                    let bytes = fixed32_repr(st, pv)?;
                    put_key(buf, field_number, WireType::Fixed32);
                    buf.extend_from_slice(&bytes);
                    Ok(())
                }
                Some(WireType::Fixed64) => {
                    let bytes = fixed64_repr(st, pv)?;
                    put_key(buf, field_number, WireType::Fixed64);
                    buf.extend_from_slice(&bytes);
                    Ok(())
                }
                Some(WireType::LengthDelimited) => {
                    let payload = len_payload(st, pv)?;
                    put_key(buf, field_number, WireType::LengthDelimited);
                    put_len_prefixed(buf, &payload);
                    Ok(())
                }
            }
        }
        (&Schema::Sequence(ref elem), &Value::Sequence(ref elems)) =>
            encode_sequence(field_number, elem, elems, buf),
        (&Schema::Transform(ref t), _) => {
            let inner_value = apply_reverse(t, schema, value)?;
            encode_field_present(field_number, &t.inner, &inner_value, buf)
        }
        (&Schema::Fail(_), _) => Ok(()),
        (&Schema::Record(..), _)
        | (&Schema::Enumeration(..), _)
        | (&Schema::Tuple(..), _)
        | (&Schema::Optional(_), _) => {
            let mut frame = Vec::new();
            encode_message(schema, value, &mut frame)?;
            put_key(buf, field_number, WireType::LengthDelimited);
            put_len_prefixed(buf, &frame);
            Ok(())
        }
        _ => Err(non_conformance(schema, value)),
    }
}

fn encode_sequence(
    field_number: u64,
    elem: &Schema,
    elems: &[Value],
    buf: &mut Vec<u8>,
) -> Result<()> {
    if elems.is_empty() {
        return Ok(());
    }
    match elem.wire_type() {
        Some(WireType::Varint) | Some(WireType::Fixed32) | Some(WireType::Fixed64) => {
            // packed: one frame of concatenated payloads, no per-element keys
            let mut frame = Vec::new();
            for value in elems {
                encode_packed_elem(elem, value, &mut frame)?;
            }
            put_key(buf, field_number, WireType::LengthDelimited);
            put_len_prefixed(buf, &frame);
            Ok(())
        }
        Some(WireType::LengthDelimited) => {
            for value in elems {
                encode_unpacked_elem(field_number, elem, value, buf)?;
            }
            Ok(())
        }
        // unit or fail elements carry no bytes at all
        None => Ok(()),
    }
}

fn encode_packed_elem(
    schema: &Schema,
    value: &Value,
    frame: &mut Vec<u8>,
) -> Result<()> {
    match (schema, value) {
        (&Schema::Transform(ref t), _) => {
            let inner_value = apply_reverse(t, schema, value)?;
            encode_packed_elem(&t.inner, &inner_value, frame)
        }
        (&Schema::Primitive(ref st), &Value::Primitive(ref pv)) => {
            match st.wire_type() {
                Some(WireType::Varint) => put_varint(frame, varint_repr(st, pv)?),
                Some(WireType::Fixed32) =>
                    frame.extend_from_slice(&fixed32_repr(st, pv)?),
                Some(WireType::Fixed64) =>
                    frame.extend_from_slice(&fixed64_repr(st, pv)?),
                _ => return Err(non_conformance(schema, value)),
            }
            Ok(())
        }
        _ => Err(non_conformance(schema, value)),
    }
}

fn encode_unpacked_elem(
    field_number: u64,
    schema: &Schema,
    value: &Value,
    buf: &mut Vec<u8>,
) -> Result<()> {
    match (schema, value) {
        (&Schema::Transform(ref t), _) => {
            let inner_value = apply_reverse(t, schema, value)?;
            encode_unpacked_elem(field_number, &t.inner, &inner_value, buf)
        }
        (&Schema::Primitive(ref st), &Value::Primitive(ref pv)) => {
            let payload = len_payload(st, pv)?;
            put_key(buf, field_number, WireType::LengthDelimited);
            put_len_prefixed(buf, &payload);
            Ok(())
        }
        (&Schema::Sequence(_), _)
        | (&Schema::Record(..), _)
        | (&Schema::Enumeration(..), _)
        | (&Schema::Tuple(..), _)
        | (&Schema::Optional(_), _) => {
            // the element is itself message-shaped; frame its own message
            // encoding at the enclosing field number
            let mut frame = Vec::new();
            encode_message(schema, value, &mut frame)?;
            put_key(buf, field_number, WireType::LengthDelimited);
            put_len_prefixed(buf, &frame);
            Ok(())
        }
        _ => Err(non_conformance(schema, value)),
    }
}

fn apply_reverse(
    t: &TransformSchema,
    schema: &Schema,
    value: &Value,
) -> Result<Value> {
    (t.reverse)(value.clone())
        .map_err(|msg| error!(Transformation, Some(schema), "{}", msg))
}

fn non_conformance(schema: &Schema, value: &Value) -> Error {
    error!(
        SchemaNonConformance,
        Some(schema),
        "need {}, got {:?}",
        schema.display_str(),
        value,
    )
}

fn varint_repr(st: &StandardType, pv: &PrimitiveValue) -> Result<u64> {
    Ok(match (st, pv) {
        (&StandardType::Bool, &PrimitiveValue::Bool(b)) => b as u64,
        (&StandardType::Byte, &PrimitiveValue::Byte(n)) => n as i64 as u64,
        (&StandardType::Short, &PrimitiveValue::Short(n)) => n as i64 as u64,
        (&StandardType::Int, &PrimitiveValue::Int(n)) => n as i64 as u64,
        (&StandardType::Long, &PrimitiveValue::Long(n)) => n as u64,
        (&StandardType::Char, &PrimitiveValue::Char(c)) => c as u64,
        _ => bail!(
            SchemaNonConformance,
            None,
            "need {}, got {:?}",
            st.display_str(),
            pv,
        ),
    })
}

fn fixed32_repr(st: &StandardType, pv: &PrimitiveValue) -> Result<[u8; 4]> {
    match (st, pv) {
        (&StandardType::Float, &PrimitiveValue::Float(n)) => Ok(n.to_le_bytes()),
        _ => bail!(
            SchemaNonConformance,
            None,
            "need {}, got {:?}",
            st.display_str(),
            pv,
        ),
    }
}

fn fixed64_repr(st: &StandardType, pv: &PrimitiveValue) -> Result<[u8; 8]> {
    match (st, pv) {
        (&StandardType::Double, &PrimitiveValue::Double(n)) => Ok(n.to_le_bytes()),
        _ => bail!(
            SchemaNonConformance,
            None,
            "need {}, got {:?}",
            st.display_str(),
            pv,
        ),
    }
}

/// Payload bytes of a length-delimited primitive.
fn len_payload(st: &StandardType, pv: &PrimitiveValue) -> Result<Vec<u8>> {
    Ok(match (st, pv) {
        (&StandardType::String, &PrimitiveValue::String(ref s)) =>
            s.as_bytes().to_vec(),
        (&StandardType::Binary, &PrimitiveValue::Binary(ref b)) => b.clone(),
        (&StandardType::BigInteger, &PrimitiveValue::BigInteger(ref n)) =>
            n.to_string().into_bytes(),
        (&StandardType::BigDecimal, &PrimitiveValue::BigDecimal(ref n)) =>
            n.to_string().into_bytes(),
        (&StandardType::ZoneId, &PrimitiveValue::ZoneId(ref id)) =>
            id.as_bytes().to_vec(),
        (&StandardType::DayOfWeek, &PrimitiveValue::DayOfWeek(ref day)) => {
            let mut payload = Vec::new();
            put_varint(&mut payload, day.number_from_monday() as u64);
            payload
        }
        (&StandardType::Month, &PrimitiveValue::Month(ref month)) => {
            let mut payload = Vec::new();
            put_varint(&mut payload, month.number_from_month() as u64);
            payload
        }
        (&StandardType::Year, &PrimitiveValue::Year(year)) => {
            let mut payload = Vec::new();
            put_varint(&mut payload, zigzag(year as i64));
            payload
        }
        (&StandardType::ZoneOffset, &PrimitiveValue::ZoneOffset(ref offset)) => {
            let mut payload = Vec::new();
            put_varint(&mut payload, zigzag(offset.local_minus_utc() as i64));
            payload
        }
        (&StandardType::Duration(_), &PrimitiveValue::Duration(ref d)) => {
            let mut payload = Vec::new();
            put_varint(&mut payload, zigzag(d.num_seconds()));
            put_varint(&mut payload, zigzag(d.subsec_nanos() as i64));
            payload
        }
        (&StandardType::MonthDay, &PrimitiveValue::MonthDay { month, day }) => {
            let mut payload = Vec::new();
            put_int_field(&mut payload, 1, month as i64);
            put_int_field(&mut payload, 2, day as i64);
            payload
        }
        (&StandardType::YearMonth, &PrimitiveValue::YearMonth { year, month }) => {
            let mut payload = Vec::new();
            put_int_field(&mut payload, 1, year as i64);
            put_int_field(&mut payload, 2, month as i64);
            payload
        }
        (&StandardType::Period, &PrimitiveValue::Period { years, months, days }) => {
            let mut payload = Vec::new();
            put_int_field(&mut payload, 1, years as i64);
            put_int_field(&mut payload, 2, months as i64);
            put_int_field(&mut payload, 3, days as i64);
            payload
        }
        (&StandardType::Instant(ref fmt), &PrimitiveValue::Instant(ref t)) =>
            format_temporal(t.format(fmt.pattern()))?.into_bytes(),
        (&StandardType::LocalDate(ref fmt), &PrimitiveValue::LocalDate(ref d)) =>
            format_temporal(d.format(fmt.pattern()))?.into_bytes(),
        (&StandardType::LocalTime(ref fmt), &PrimitiveValue::LocalTime(ref t)) =>
            format_temporal(t.format(fmt.pattern()))?.into_bytes(),
        (&StandardType::LocalDateTime(ref fmt), &PrimitiveValue::LocalDateTime(ref t)) =>
            format_temporal(t.format(fmt.pattern()))?.into_bytes(),
        (&StandardType::OffsetTime(ref fmt), &PrimitiveValue::OffsetTime(ref time, ref offset)) =>
            format_temporal(DelayedFormat::new_with_offset(
                None,
                Some(*time),
                offset,
                StrftimeItems::new(fmt.pattern()),
            ))?.into_bytes(),
        (&StandardType::OffsetDateTime(ref fmt), &PrimitiveValue::OffsetDateTime(ref t)) =>
            format_temporal(t.format(fmt.pattern()))?.into_bytes(),
        (&StandardType::ZonedDateTime(ref fmt), &PrimitiveValue::ZonedDateTime(ref t)) =>
            format_temporal(t.format(fmt.pattern()))?.into_bytes(),
        _ => bail!(
            SchemaNonConformance,
            None,
            "need {}, got {:?}",
            st.display_str(),
            pv,
        ),
    })
}

/// Write a varint field of a nested numeric record (month/day pairs and the
/// like), omitting zeroes the same way outer record defaults are omitted.
fn put_int_field(buf: &mut Vec<u8>, field_number: u64, n: i64) {
    if n == 0 {
        return;
    }
    put_key(buf, field_number, WireType::Varint);
    put_varint(buf, n as u64);
}

fn format_temporal<I>(formatted: DelayedFormat<I>) -> Result<String>
where
    DelayedFormat<I>: std::fmt::Display,
{
    use std::fmt::Write;
    let mut s = String::new();
    write!(&mut s, "{}", formatted)
        .map_err(|_| error!(Payload, None, "time format failed for value"))?;
    Ok(s)
}

#[cfg(test)]
use crate::{
    error::ErrorKind,
    schema::schema,
};
#[cfg(test)]
use chrono::{
    NaiveDate,
    TimeDelta,
};
#[cfg(test)]
use num_bigint::BigInt;

#[cfg(test)]
fn int(n: i32) -> Value {
    Value::Primitive(PrimitiveValue::Int(n))
}

#[cfg(test)]
fn string(s: &str) -> Value {
    Value::Primitive(PrimitiveValue::String(s.to_owned()))
}

#[cfg(test)]
fn float(n: f32) -> Value {
    Value::Primitive(PrimitiveValue::Float(n))
}

#[cfg(test)]
fn double(n: f64) -> Value {
    Value::Primitive(PrimitiveValue::Double(n))
}

#[test]
fn test_encode_basic_int() {
    let schema = schema!(record { (value: int) });
    let value = Value::record([("value", int(150))]);
    assert_eq!(encode(&schema, &value).unwrap(), [0x08, 0x96, 0x01]);
}

#[test]
fn test_encode_basic_string() {
    let schema = schema!(record { (value: string) });
    let value = Value::record([("value", string("testing"))]);
    assert_eq!(
        encode(&schema, &value).unwrap(),
        [0x0A, 0x07, 0x74, 0x65, 0x73, 0x74, 0x69, 0x6E, 0x67],
    );
}

#[test]
fn test_encode_basic_float() {
    let schema = schema!(record { (value: float) });
    let value = Value::record([("value", float(0.001))]);
    assert_eq!(encode(&schema, &value).unwrap(), [0x0D, 0x6F, 0x12, 0x83, 0x3A]);
}

#[test]
fn test_encode_basic_double() {
    let schema = schema!(record { (value: double) });
    let value = Value::record([("value", double(0.001))]);
    assert_eq!(
        encode(&schema, &value).unwrap(),
        [0x09, 0xFC, 0xA9, 0xF1, 0xD2, 0x4D, 0x62, 0x50, 0x3F],
    );
}

#[test]
fn test_encode_embedded_record() {
    let schema = schema!(record { (embedded: record { (value: int) }) });
    let value = Value::record([
        ("embedded", Value::record([("value", int(150))])),
    ]);
    assert_eq!(encode(&schema, &value).unwrap(), [0x0A, 0x03, 0x08, 0x96, 0x01]);
}

#[test]
fn test_encode_packed_list() {
    let schema = schema!(record { (value: seq(int)) });
    let value = Value::record([
        ("value", Value::Sequence(vec![int(3), int(270), int(86942)])),
    ]);
    assert_eq!(
        encode(&schema, &value).unwrap(),
        [0x0A, 0x06, 0x03, 0x8E, 0x02, 0x9E, 0xA7, 0x05],
    );
}

#[test]
fn test_encode_unpacked_list() {
    let schema = schema!(record { (value: seq(string)) });
    let value = Value::record([
        ("value", Value::Sequence(vec![
            string("foo"),
            string("bar"),
            string("baz"),
        ])),
    ]);
    assert_eq!(
        encode(&schema, &value).unwrap(),
        [
            0x0A, 0x03, 0x66, 0x6F, 0x6F,
            0x0A, 0x03, 0x62, 0x61, 0x72,
            0x0A, 0x03, 0x62, 0x61, 0x7A,
        ],
    );
}

#[test]
fn test_encode_two_field_record() {
    let schema = schema!(record { (name: string), (count: int) });
    let value = Value::record([("name", string("Foo")), ("count", int(123))]);
    assert_eq!(
        encode(&schema, &value).unwrap(),
        [0x0A, 0x03, 0x46, 0x6F, 0x6F, 0x10, 0x7B],
    );
}

#[test]
fn test_encode_default_fields_omitted() {
    let schema = schema!(record { (name: string), (count: int) });
    let value = Value::record([("name", string("")), ("count", int(123))]);
    assert_eq!(encode(&schema, &value).unwrap(), [0x10, 0x7B]);
    let value = Value::record([("name", string("")), ("count", int(0))]);
    assert_eq!(encode(&schema, &value).unwrap(), [0u8; 0]);
}

#[test]
fn test_encode_enumeration() {
    let schema = schema!(enum {
        StringValue(string),
        IntValue(int),
        BoolValue(bool),
    });
    let value = Value::case(1, "IntValue", int(482));
    assert_eq!(encode(&schema, &value).unwrap(), [0x10, 0xE2, 0x03]);
}

#[test]
fn test_encode_enumeration_keeps_default_payload() {
    let schema = schema!(enum { StringValue(string), IntValue(int) });
    let value = Value::case(1, "IntValue", int(0));
    assert_eq!(encode(&schema, &value).unwrap(), [0x10, 0x00]);
}

#[test]
fn test_encode_optional_field() {
    let schema = schema!(record { (opt: option(int)) });
    let some = Value::record([("opt", Value::some(int(150)))]);
    assert_eq!(encode(&schema, &some).unwrap(), [0x0A, 0x03, 0x08, 0x96, 0x01]);
    let none = Value::record([("opt", Value::none())]);
    assert_eq!(encode(&schema, &none).unwrap(), [0u8; 0]);
}

#[test]
fn test_encode_optional_some_of_default() {
    let schema = schema!(record { (opt: option(int)) });
    let value = Value::record([("opt", Value::some(int(0)))]);
    assert_eq!(encode(&schema, &value).unwrap(), [0x0A, 0x02, 0x08, 0x00]);
}

#[test]
fn test_encode_top_level_framing() {
    assert_eq!(
        encode(&schema!(int), &int(150)).unwrap(),
        [0x08, 0x96, 0x01],
    );
    assert_eq!(
        encode(&schema!(option(int)), &Value::some(int(150))).unwrap(),
        [0x08, 0x96, 0x01],
    );
    assert_eq!(
        encode(&schema!(option(int)), &Value::none()).unwrap(),
        [0u8; 0],
    );
    assert_eq!(
        encode(
            &schema!(seq(int)),
            &Value::Sequence(vec![int(3), int(270), int(86942)]),
        ).unwrap(),
        [0x0A, 0x06, 0x03, 0x8E, 0x02, 0x9E, 0xA7, 0x05],
    );
}

#[test]
fn test_encode_tuple() {
    let schema = schema!(tuple((int), (string)));
    let value = Value::tuple(int(123), string("foo"));
    assert_eq!(
        encode(&schema, &value).unwrap(),
        [0x08, 0x7B, 0x12, 0x03, 0x66, 0x6F, 0x6F],
    );
}

#[test]
fn test_encode_fail_is_empty() {
    let schema = schema!(fail("failing schema"));
    assert_eq!(encode(&schema, &int(1)).unwrap(), [0u8; 0]);
}

#[test]
fn test_encode_transform() {
    // outer representation is decimal text, inner is an int
    let schema = Schema::transform(
        schema!(int),
        |inner| match inner {
            Value::Primitive(PrimitiveValue::Int(n)) =>
                Ok(Value::Primitive(PrimitiveValue::String(n.to_string()))),
            other => Err(format!("unexpected inner value {:?}", other)),
        },
        |outer| match outer {
            Value::Primitive(PrimitiveValue::String(s)) => s
                .parse()
                .map(|n| Value::Primitive(PrimitiveValue::Int(n)))
                .map_err(|e| format!("not a number: {}", e)),
            other => Err(format!("unexpected outer value {:?}", other)),
        },
    );
    assert_eq!(encode(&schema, &string("150")).unwrap(), [0x08, 0x96, 0x01]);

    let e = encode(&schema, &string("not a number")).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Transformation);
    assert!(e.to_string().contains("not a number"));
}

#[test]
fn test_encode_packed_floats() {
    let schema = schema!(record { (value: seq(float)) });
    let value = Value::record([
        ("value", Value::Sequence(vec![float(1.0), float(0.5)])),
    ]);
    assert_eq!(
        encode(&schema, &value).unwrap(),
        [0x0A, 0x08, 0x00, 0x00, 0x80, 0x3F, 0x00, 0x00, 0x00, 0x3F],
    );
}

#[test]
fn test_encode_char_code_point() {
    let schema = schema!(record { (c: char) });
    let value = Value::record([("c", Value::Primitive(PrimitiveValue::Char('A')))]);
    assert_eq!(encode(&schema, &value).unwrap(), [0x08, 0x41]);
}

#[test]
fn test_encode_negative_int_sign_extends() {
    let schema = schema!(record { (value: int) });
    let value = Value::record([("value", int(-1))]);
    assert_eq!(
        encode(&schema, &value).unwrap(),
        [
            0x08, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0x01,
        ],
    );
}

#[test]
fn test_encode_unit_field_emits_nothing() {
    let schema = schema!(record { (u: unit) });
    let value = Value::record([("u", Value::Primitive(PrimitiveValue::Unit))]);
    assert_eq!(encode(&schema, &value).unwrap(), [0u8; 0]);
}

#[test]
fn test_encode_local_date_text() {
    let schema = schema!(record { (d: local_date) });
    let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
    let value = Value::record([("d", Value::Primitive(PrimitiveValue::LocalDate(date)))]);
    let mut expected = vec![0x0A, 0x0A];
    expected.extend_from_slice(b"2021-03-04");
    assert_eq!(encode(&schema, &value).unwrap(), expected);
}

#[test]
fn test_encode_duration_pair() {
    let schema = schema!(record { (d: duration) });
    let delta = TimeDelta::new(3, 500).unwrap();
    let value = Value::record([("d", Value::Primitive(PrimitiveValue::Duration(delta)))]);
    // zigzag(3) = 6, zigzag(500) = 1000
    assert_eq!(encode(&schema, &value).unwrap(), [0x0A, 0x03, 0x06, 0xE8, 0x07]);
}

#[test]
fn test_encode_big_integer_text() {
    let schema = schema!(record { (n: bigint) });
    let n: BigInt = "12345678901234567890".parse().unwrap();
    let value = Value::record([("n", Value::Primitive(PrimitiveValue::BigInteger(n)))]);
    let mut expected = vec![0x0A, 0x14];
    expected.extend_from_slice(b"12345678901234567890");
    assert_eq!(encode(&schema, &value).unwrap(), expected);
}

#[test]
fn test_encode_value_shape_mismatch() {
    let schema = schema!(record { (value: int) });
    let e = encode(&schema, &int(150)).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::SchemaNonConformance);

    let schema = schema!(record { (value: int) });
    let value = Value::record([("value", string("150"))]);
    let e = encode(&schema, &value).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::SchemaNonConformance);
}
