//! Schema-walking decoder: turns protobuf bytes back into a value under a
//! schema.
//!
//! A frame is decoded as a loop over field keys. Fields may arrive in any
//! order, unknown field numbers are skipped by wire type, duplicate
//! non-repeated fields resolve to the last occurrence, and repeated
//! occurrences of a sequence field concatenate. Fields never seen decode to
//! their schema's default value. Nested frames are bounded by their length
//! prefix; the top-level frame runs until the input is drained.

use crate::{
    error::{
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
        TimeFormat,
    },
    value::{
        Value,
        PrimitiveValue,
        FieldValue,
        CaseValue,
    },
    wire::{
        WireType,
        get_key,
        get_varint,
        get_exact,
        get_len_prefixed,
        skip_field,
        unzigzag,
    },
};
use chrono::{
    DateTime,
    FixedOffset,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    TimeDelta,
    Utc,
    Weekday,
};


/// Decode a value under a schema from a byte slice.
pub fn decode(schema: &Schema, bytes: &[u8]) -> Result<Value> {
    if let &Schema::Fail(ref msg) = schema {
        bail!(SchemaFail, Some(schema), "{}", msg);
    }
    ensure!(!bytes.is_empty(), Truncation, Some(schema), "no bytes to decode");
    let mut bytes = bytes;
    decode_message(schema, &mut bytes)
}

/// Decode one whole message with the top-level framing rule applied,
/// running until `bytes` is drained.
fn decode_message(schema: &Schema, bytes: &mut &[u8]) -> Result<Value> {
    match schema {
        &Schema::Record(ref fields) => decode_record(fields, bytes),
        &Schema::Enumeration(ref cases) => decode_enumeration(schema, cases, bytes),
        &Schema::Tuple(ref a, ref b) => {
            let mut slots = decode_slots(&[&**a, &**b], bytes)?;
            let vb = fill_slot(slots.pop().unwrap(), b)?;
            let va = fill_slot(slots.pop().unwrap(), a)?;
            Ok(Value::Tuple(Box::new(va), Box::new(vb)))
        }
        &Schema::Optional(ref inner) => {
            let mut slots = decode_slots(&[&**inner], bytes)?;
            Ok(Value::Optional(slots.pop().unwrap().map(Box::new)))
        }
        &Schema::Transform(ref t) => {
            let inner = decode_message(&t.inner, bytes)?;
            (t.forward)(inner)
                .map_err(|msg| error!(Transformation, Some(schema), "{}", msg))
        }
        &Schema::Fail(ref msg) => bail!(SchemaFail, Some(schema), "{}", msg),
        // primitives and sequences sit in an implicit single-field record
        _ => {
            let mut slots = decode_slots(&[schema], bytes)?;
            fill_slot(slots.pop().unwrap(), schema)
        }
    }
}

/// An absent field resolves to its schema's default.
fn fill_slot(slot: Option<Value>, schema: &Schema) -> Result<Value> {
    match slot {
        Some(value) => Ok(value),
        None => schema.default_value(),
    }
}

/// Core frame loop: decode key-tagged fields into one slot per schema until
/// the input is drained.
fn decode_slots(
    schemas: &[&Schema],
    bytes: &mut &[u8],
) -> Result<Vec<Option<Value>>> {
    let mut slots: Vec<Option<Value>> = schemas.iter().map(|_| None).collect();
    while !bytes.is_empty() {
        let (field_number, wire_type) = get_key(bytes)?;
        match schemas.get((field_number - 1) as usize) {
            None => skip_field(bytes, wire_type)?,
            Some(&field_schema) => {
                let decoded = decode_field_payload(field_schema, wire_type, bytes)?;
                merge_slot(&mut slots[(field_number - 1) as usize], decoded);
            }
        }
    }
    Ok(slots)
}

/// Last write wins, except sequence batches, which concatenate.
fn merge_slot(slot: &mut Option<Value>, decoded: Value) {
    match (slot, decoded) {
        (&mut Some(Value::Sequence(ref mut have)), Value::Sequence(batch)) =>
            have.extend(batch),
        (slot, decoded) => *slot = Some(decoded),
    }
}

fn decode_record(fields: &[RecordField], bytes: &mut &[u8]) -> Result<Value> {
    let schemas: Vec<&Schema> = fields.iter().map(|field| &field.inner).collect();
    let slots = decode_slots(&schemas, bytes)?;
    let mut out = Vec::with_capacity(fields.len());
    for (field, slot) in fields.iter().zip(slots) {
        out.push(FieldValue {
            name: field.name.clone(),
            value: fill_slot(slot, &field.inner)?,
        });
    }
    Ok(Value::Record(out))
}

fn decode_enumeration(
    schema: &Schema,
    cases: &[EnumCase],
    bytes: &mut &[u8],
) -> Result<Value> {
    let mut selected: Option<(usize, Value)> = None;
    while !bytes.is_empty() {
        let (field_number, wire_type) = get_key(bytes)?;
        match cases.get((field_number - 1) as usize) {
            None => skip_field(bytes, wire_type)?,
            Some(case) => {
                let value = decode_field_payload(&case.inner, wire_type, bytes)?;
                selected = Some(((field_number - 1) as usize, value));
            }
        }
    }
    match selected {
        Some((case_ord, value)) => Ok(Value::Enumeration(CaseValue {
            case_ord,
            case_name: cases[case_ord].name.clone(),
            value: Box::new(value),
        })),
        None => bail!(Structural, Some(schema), "missing enumeration case"),
    }
}

/// Decode the payload following a key, dispatched by the expected field
/// schema.
fn decode_field_payload(
    schema: &Schema,
    wire_type: WireType,
    bytes: &mut &[u8],
) -> Result<Value> {
    match schema {
        &Schema::Transform(ref t) => {
            let inner = decode_field_payload(&t.inner, wire_type, bytes)?;
            (t.forward)(inner)
                .map_err(|msg| error!(Transformation, Some(schema), "{}", msg))
        }
        &Schema::Fail(ref msg) => bail!(SchemaFail, Some(schema), "{}", msg),
        &Schema::Primitive(ref st) => decode_primitive_payload(st, wire_type, bytes),
        &Schema::Sequence(ref elem) => decode_sequence_occurrence(elem, wire_type, bytes),
        &Schema::Record(_)
        | &Schema::Enumeration(_)
        | &Schema::Tuple(..)
        | &Schema::Optional(_) => {
            let mut frame = expect_frame(schema, wire_type, bytes)?;
            decode_message(schema, &mut frame)
        }
    }
}

fn expect_frame<'a>(
    schema: &Schema,
    wire_type: WireType,
    bytes: &mut &'a [u8],
) -> Result<&'a [u8]> {
    ensure!(
        wire_type == WireType::LengthDelimited,
        Payload,
        Some(schema),
        "wire type {:?} cannot carry {}",
        wire_type,
        schema.display_str(),
    );
    get_len_prefixed(bytes)
}

/// One occurrence of a sequence field: a packed frame when the element wire
/// type is primitive-fixed and the payload is length-delimited, a single
/// element otherwise. Either way the result is a batch the caller
/// concatenates onto the field's slot.
fn decode_sequence_occurrence(
    elem: &Schema,
    wire_type: WireType,
    bytes: &mut &[u8],
) -> Result<Value> {
    match elem.wire_type() {
        Some(
            elem_wire @ (WireType::Varint | WireType::Fixed32 | WireType::Fixed64),
        ) if wire_type == WireType::LengthDelimited => {
            let mut frame = get_len_prefixed(bytes)?;
            let mut elems = Vec::new();
            while !frame.is_empty() {
                elems.push(decode_field_payload(elem, elem_wire, &mut frame)?);
            }
            Ok(Value::Sequence(elems))
        }
        _ => {
            let value = decode_unpacked_elem(elem, wire_type, bytes)?;
            Ok(Value::Sequence(vec![value]))
        }
    }
}

fn decode_unpacked_elem(
    elem: &Schema,
    wire_type: WireType,
    bytes: &mut &[u8],
) -> Result<Value> {
    match elem {
        &Schema::Transform(ref t) => {
            let inner = decode_unpacked_elem(&t.inner, wire_type, bytes)?;
            (t.forward)(inner)
                .map_err(|msg| error!(Transformation, Some(elem), "{}", msg))
        }
        &Schema::Fail(ref msg) => bail!(SchemaFail, Some(elem), "{}", msg),
        &Schema::Primitive(ref st) => decode_primitive_payload(st, wire_type, bytes),
        // message-shaped elements (including nested sequences) arrive as one
        // frame per element
        &Schema::Sequence(_)
        | &Schema::Record(_)
        | &Schema::Enumeration(_)
        | &Schema::Tuple(..)
        | &Schema::Optional(_) => {
            let mut frame = expect_frame(elem, wire_type, bytes)?;
            decode_message(elem, &mut frame)
        }
    }
}

fn decode_primitive_payload(
    st: &StandardType,
    wire_type: WireType,
    bytes: &mut &[u8],
) -> Result<Value> {
    let expected = match st.wire_type() {
        Some(expected) => expected,
        None => {
            // a unit field carries no payload of its own; consume whatever
            // frame carried it
            skip_field(bytes, wire_type)?;
            return Ok(Value::Primitive(PrimitiveValue::Unit));
        }
    };
    ensure!(
        wire_type == expected,
        Payload,
        None,
        "wire type {:?} cannot carry {}",
        wire_type,
        st.display_str(),
    );
    let pv = match expected {
        WireType::Varint => {
            let n = get_varint(bytes)?;
            varint_value(st, n)?
        }
        WireType::Fixed32 => {
            let raw = get_exact(bytes, 4)?;
            PrimitiveValue::Float(f32::from_le_bytes(raw.try_into().unwrap()))
        }
        WireType::Fixed64 => {
            let raw = get_exact(bytes, 8)?;
            PrimitiveValue::Double(f64::from_le_bytes(raw.try_into().unwrap()))
        }
        WireType::LengthDelimited => {
            let frame = get_len_prefixed(bytes)?;
            len_value(st, frame)?
        }
    };
    Ok(Value::Primitive(pv))
}

fn varint_value(st: &StandardType, n: u64) -> Result<PrimitiveValue> {
    Ok(match st {
        StandardType::Bool => PrimitiveValue::Bool(n != 0),
        StandardType::Byte => PrimitiveValue::Byte(narrow(n as i64)?),
        StandardType::Short => PrimitiveValue::Short(narrow(n as i64)?),
        StandardType::Int => PrimitiveValue::Int(narrow(n as i64)?),
        StandardType::Long => PrimitiveValue::Long(n as i64),
        StandardType::Char => {
            let code = u32::try_from(n)
                .map_err(|_| error!(Payload, None, "integer overflow: {} as code point", n))?;
            PrimitiveValue::Char(char::from_u32(code).ok_or_else(|| error!(
                Payload,
                None,
                "{} is not a valid code point",
                code,
            ))?)
        }
        _ => bail!(Payload, None, "varint cannot carry {}", st.display_str()),
    })
}

fn narrow<T: TryFrom<i64>>(n: i64) -> Result<T> {
    T::try_from(n).map_err(|_| error!(Payload, None, "integer overflow: {}", n))
}

/// Interpret the payload of a length-delimited primitive.
fn len_value(st: &StandardType, frame: &[u8]) -> Result<PrimitiveValue> {
    Ok(match st {
        StandardType::String => PrimitiveValue::String(utf8(frame)?.to_owned()),
        StandardType::Binary => PrimitiveValue::Binary(frame.to_vec()),
        StandardType::BigInteger => PrimitiveValue::BigInteger(
            utf8(frame)?
                .parse()
                .map_err(|e| error!(Payload, None, "malformed big integer: {}", e))?,
        ),
        StandardType::BigDecimal => PrimitiveValue::BigDecimal(
            utf8(frame)?
                .parse()
                .map_err(|e| error!(Payload, None, "malformed big decimal: {}", e))?,
        ),
        StandardType::ZoneId => PrimitiveValue::ZoneId(utf8(frame)?.to_owned()),
        StandardType::DayOfWeek => {
            let mut cursor = frame;
            let n = get_varint(&mut cursor)?;
            ensure!(
                (1..=7).contains(&n),
                Payload,
                None,
                "{} is not a day of week",
                n,
            );
            PrimitiveValue::DayOfWeek(Weekday::try_from((n - 1) as u8).unwrap())
        }
        StandardType::Month => {
            let mut cursor = frame;
            let n = get_varint(&mut cursor)?;
            let month = u8::try_from(n)
                .ok()
                .and_then(|n| chrono::Month::try_from(n).ok())
                .ok_or_else(|| error!(Payload, None, "{} is not a month", n))?;
            PrimitiveValue::Month(month)
        }
        StandardType::Year => {
            let mut cursor = frame;
            let n = unzigzag(get_varint(&mut cursor)?);
            PrimitiveValue::Year(narrow(n)?)
        }
        StandardType::ZoneOffset => {
            let mut cursor = frame;
            let seconds: i32 = narrow(unzigzag(get_varint(&mut cursor)?))?;
            PrimitiveValue::ZoneOffset(FixedOffset::east_opt(seconds).ok_or_else(
                || error!(Payload, None, "zone offset {}s out of range", seconds),
            )?)
        }
        StandardType::Duration(_) => {
            let mut cursor = frame;
            let seconds = unzigzag(get_varint(&mut cursor)?);
            let nanos = unzigzag(get_varint(&mut cursor)?);
            let delta = TimeDelta::try_seconds(seconds)
                .and_then(|d| d.checked_add(&TimeDelta::nanoseconds(nanos)))
                .ok_or_else(|| error!(
                    Payload,
                    None,
                    "duration {}s {}ns out of range",
                    seconds,
                    nanos,
                ))?;
            PrimitiveValue::Duration(delta)
        }
        StandardType::MonthDay => {
            let [month, day] = int_fields(frame)?;
            PrimitiveValue::MonthDay {
                month: narrow(month)?,
                day: narrow(day)?,
            }
        }
        StandardType::YearMonth => {
            let [year, month] = int_fields(frame)?;
            PrimitiveValue::YearMonth {
                year: narrow(year)?,
                month: narrow(month)?,
            }
        }
        StandardType::Period => {
            let [years, months, days] = int_fields(frame)?;
            PrimitiveValue::Period {
                years: narrow(years)?,
                months: narrow(months)?,
                days: narrow(days)?,
            }
        }
        StandardType::Instant(ref fmt) => PrimitiveValue::Instant(
            parse_with_offset(utf8(frame)?, fmt, st)?.with_timezone(&Utc),
        ),
        StandardType::LocalDate(ref fmt) => PrimitiveValue::LocalDate(
            NaiveDate::parse_from_str(utf8(frame)?, fmt.pattern())
                .map_err(|e| parse_error(st, e))?,
        ),
        StandardType::LocalTime(ref fmt) => PrimitiveValue::LocalTime(
            NaiveTime::parse_from_str(utf8(frame)?, fmt.pattern())
                .map_err(|e| parse_error(st, e))?,
        ),
        StandardType::LocalDateTime(ref fmt) => PrimitiveValue::LocalDateTime(
            NaiveDateTime::parse_from_str(utf8(frame)?, fmt.pattern())
                .map_err(|e| parse_error(st, e))?,
        ),
        StandardType::OffsetTime(ref fmt) => {
            use chrono::format::{parse, Parsed, StrftimeItems};
            let mut parsed = Parsed::new();
            parse(&mut parsed, utf8(frame)?, StrftimeItems::new(fmt.pattern()))
                .map_err(|e| parse_error(st, e))?;
            let time = parsed.to_naive_time().map_err(|e| parse_error(st, e))?;
            let offset = parsed.to_fixed_offset().map_err(|e| parse_error(st, e))?;
            PrimitiveValue::OffsetTime(time, offset)
        }
        StandardType::OffsetDateTime(ref fmt) =>
            PrimitiveValue::OffsetDateTime(parse_with_offset(utf8(frame)?, fmt, st)?),
        StandardType::ZonedDateTime(ref fmt) =>
            PrimitiveValue::ZonedDateTime(parse_with_offset(utf8(frame)?, fmt, st)?),
        _ => bail!(
            Payload,
            None,
            "length-delimited payload cannot carry {}",
            st.display_str(),
        ),
    })
}

fn utf8(frame: &[u8]) -> Result<&str> {
    std::str::from_utf8(frame).map_err(|_| error!(Payload, None, "malformed utf8"))
}

fn parse_with_offset(
    text: &str,
    fmt: &TimeFormat,
    st: &StandardType,
) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, fmt.pattern()).map_err(|e| parse_error(st, e))
}

fn parse_error(st: &StandardType, e: chrono::format::ParseError) -> crate::error::Error {
    error!(Payload, None, "malformed {}: {}", st.display_str(), e)
}

/// Decode the varint fields numbered 1..=N of a nested numeric record
/// (month/day pairs and the like). Absent fields are zero.
fn int_fields<const N: usize>(frame: &[u8]) -> Result<[i64; N]> {
    let mut out = [0i64; N];
    let mut frame = frame;
    while !frame.is_empty() {
        let (field_number, wire_type) = get_key(&mut frame)?;
        match out.get_mut((field_number - 1) as usize) {
            Some(slot) if wire_type == WireType::Varint => {
                *slot = get_varint(&mut frame)? as i64;
            }
            _ => skip_field(&mut frame, wire_type)?,
        }
    }
    Ok(out)
}

#[cfg(test)]
use crate::{
    encoder::encode,
    error::ErrorKind,
    schema::schema,
    wire::put_varint,
};
#[cfg(test)]
use bigdecimal::BigDecimal;
#[cfg(test)]
use chrono::TimeZone;
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
fn two_field_record() -> Schema {
    schema!(record { (name: string), (count: int) })
}

#[test]
fn test_decode_basic_int() {
    let schema = schema!(record { (value: int) });
    assert_eq!(
        decode(&schema, &[0x08, 0x96, 0x01]).unwrap(),
        Value::record([("value", int(150))]),
    );
}

#[test]
fn test_decode_default_fill() {
    assert_eq!(
        decode(&two_field_record(), &[0x10, 0x7B]).unwrap(),
        Value::record([("name", string("")), ("count", int(123))]),
    );
}

#[test]
fn test_decode_tuple_default_fill() {
    let schema = schema!(tuple((int), (string)));
    assert_eq!(
        decode(&schema, &[0x08, 0x7B]).unwrap(),
        Value::tuple(int(123), string("")),
    );
}

#[test]
fn test_decode_fields_any_order() {
    let bytes = [0x10, 0x7B, 0x0A, 0x03, 0x46, 0x6F, 0x6F];
    assert_eq!(
        decode(&two_field_record(), &bytes).unwrap(),
        Value::record([("name", string("Foo")), ("count", int(123))]),
    );
}

#[test]
fn test_decode_duplicate_field_last_wins() {
    let schema = schema!(record { (value: int) });
    assert_eq!(
        decode(&schema, &[0x08, 0x01, 0x08, 0x02]).unwrap(),
        Value::record([("value", int(2))]),
    );
}

#[test]
fn test_decode_unknown_wire_type() {
    let e = decode(&two_field_record(), &[0x0F]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::KeyDecode);
    assert!(e.to_string().contains("unknown wire type"));
}

#[test]
fn test_decode_invalid_field_number() {
    let e = decode(&two_field_record(), &[0x00]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::KeyDecode);
    assert!(e.to_string().contains("invalid field number"));
}

#[test]
fn test_decode_truncated_payload() {
    let e = decode(&two_field_record(), &[0x0A, 0x03, 0x46]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Truncation);
    assert!(e.to_string().contains("unexpected end of chunk"));
}

#[test]
fn test_decode_empty_input() {
    let e = decode(&schema!(int), &[]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Truncation);
    assert!(e.to_string().contains("no bytes to decode"));
}

#[test]
fn test_decode_fail_schema() {
    let e = decode(&schema!(fail("failing schema")), &[0x08, 0x01]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::SchemaFail);
    assert!(e.to_string().contains("failing schema"));
    // fails before reading any bytes, so empty input fails the same way
    let e = decode(&schema!(fail("failing schema")), &[]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::SchemaFail);
}

#[test]
fn test_decode_unknown_field_tolerance() {
    let extended = schema!(record {
        (name: string),
        (count: int),
        (extra: seq(string)),
        (more: double),
    });
    let value = Value::record([
        ("name", string("Foo")),
        ("count", int(123)),
        ("extra", Value::Sequence(vec![string("x"), string("y")])),
        ("more", Value::Primitive(PrimitiveValue::Double(2.5))),
    ]);
    let bytes = encode(&extended, &value).unwrap();
    assert_eq!(
        decode(&two_field_record(), &bytes).unwrap(),
        Value::record([("name", string("Foo")), ("count", int(123))]),
    );
}

#[test]
fn test_decode_packed_list() {
    let schema = schema!(seq(int));
    assert_eq!(
        decode(&schema, &[0x0A, 0x06, 0x03, 0x8E, 0x02, 0x9E, 0xA7, 0x05]).unwrap(),
        Value::Sequence(vec![int(3), int(270), int(86942)]),
    );
}

#[test]
fn test_decode_packed_field_accepts_unpacked() {
    let schema = schema!(seq(int));
    assert_eq!(
        decode(&schema, &[0x08, 0x03, 0x08, 0x8E, 0x02]).unwrap(),
        Value::Sequence(vec![int(3), int(270)]),
    );
}

#[test]
fn test_decode_unpacked_list() {
    let schema = schema!(record { (value: seq(string)) });
    let bytes = [
        0x0A, 0x03, 0x66, 0x6F, 0x6F,
        0x0A, 0x03, 0x62, 0x61, 0x72,
        0x0A, 0x03, 0x62, 0x61, 0x7A,
    ];
    assert_eq!(
        decode(&schema, &bytes).unwrap(),
        Value::record([("value", Value::Sequence(vec![
            string("foo"),
            string("bar"),
            string("baz"),
        ]))]),
    );
}

#[test]
fn test_decode_enumeration() {
    let schema = schema!(enum {
        StringValue(string),
        IntValue(int),
        BoolValue(bool),
    });
    assert_eq!(
        decode(&schema, &[0x10, 0xE2, 0x03]).unwrap(),
        Value::case(1, "IntValue", int(482)),
    );
}

#[test]
fn test_decode_enumeration_last_wins() {
    let schema = schema!(enum { StringValue(string), IntValue(int) });
    let bytes = [0x10, 0xE2, 0x03, 0x0A, 0x03, 0x66, 0x6F, 0x6F];
    assert_eq!(
        decode(&schema, &bytes).unwrap(),
        Value::case(0, "StringValue", string("foo")),
    );
}

#[test]
fn test_decode_missing_enumeration_case() {
    let schema = schema!(enum { StringValue(string), IntValue(int) });
    // only an unknown field number, which is skipped
    let e = decode(&schema, &[0x20, 0x01]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Structural);
    assert!(e.to_string().contains("missing enumeration case"));
}

#[test]
fn test_decode_integer_overflow() {
    let schema = schema!(record { (value: int) });
    let mut bytes = vec![0x08];
    put_varint(&mut bytes, 1 << 40);
    let e = decode(&schema, &bytes).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Payload);
    assert!(e.to_string().contains("integer overflow"));
}

#[test]
fn test_decode_malformed_utf8() {
    let schema = schema!(record { (value: string) });
    let e = decode(&schema, &[0x0A, 0x02, 0xC3, 0x28]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Payload);
    assert!(e.to_string().contains("malformed utf8"));
}

#[test]
fn test_decode_bool_accepts_any_varint() {
    let schema = schema!(record { (flag: bool) });
    assert_eq!(
        decode(&schema, &[0x08, 0x05]).unwrap(),
        Value::record([("flag", Value::Primitive(PrimitiveValue::Bool(true)))]),
    );
    assert_eq!(
        decode(&schema, &[0x08, 0x00]).unwrap(),
        Value::record([("flag", Value::Primitive(PrimitiveValue::Bool(false)))]),
    );
}

#[test]
fn test_decode_nested_record_defaults() {
    let schema = schema!(record { (inner: record { (a: int), (b: string) }) });
    let expected = Value::record([
        ("inner", Value::record([("a", int(0)), ("b", string(""))])),
    ]);
    // present but empty nested frame
    assert_eq!(decode(&schema, &[0x0A, 0x00]).unwrap(), expected);
}

#[test]
fn test_decode_optional_frames() {
    let schema = schema!(record { (opt: option(int)) });
    assert_eq!(
        decode(&schema, &[0x0A, 0x03, 0x08, 0x96, 0x01]).unwrap(),
        Value::record([("opt", Value::some(int(150)))]),
    );
    assert_eq!(
        decode(&schema, &[0x0A, 0x02, 0x08, 0x00]).unwrap(),
        Value::record([("opt", Value::some(int(0)))]),
    );
    // an empty optional frame holds no field 1, so it is none
    assert_eq!(
        decode(&schema, &[0x0A, 0x00]).unwrap(),
        Value::record([("opt", Value::none())]),
    );
}

#[test]
fn test_decode_transform_forward() {
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
    assert_eq!(
        decode(&schema, &[0x08, 0x96, 0x01]).unwrap(),
        string("150"),
    );
}

#[test]
fn test_decode_transform_forward_error() {
    let schema = Schema::transform(
        schema!(int),
        |_| Err("rejected by view".to_owned()),
        |outer| Ok(outer),
    );
    let e = decode(&schema, &[0x08, 0x96, 0x01]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Transformation);
    assert!(e.to_string().contains("rejected by view"));
}

#[test]
fn test_round_trip_scalars() {
    let schema = schema!(record {
        (flag: bool),
        (b: byte),
        (s: short),
        (i: int),
        (l: long),
        (f: float),
        (d: double),
        (c: char),
        (text: string),
        (blob: binary),
    });
    let value = Value::record([
        ("flag", Value::Primitive(PrimitiveValue::Bool(true))),
        ("b", Value::Primitive(PrimitiveValue::Byte(-3))),
        ("s", Value::Primitive(PrimitiveValue::Short(-257))),
        ("i", int(-70000)),
        ("l", Value::Primitive(PrimitiveValue::Long(i64::MIN))),
        ("f", Value::Primitive(PrimitiveValue::Float(0.001))),
        ("d", Value::Primitive(PrimitiveValue::Double(-0.5))),
        ("c", Value::Primitive(PrimitiveValue::Char('λ'))),
        ("text", string("testing")),
        ("blob", Value::Primitive(PrimitiveValue::Binary(vec![0, 1, 2, 255]))),
    ]);
    let bytes = encode(&schema, &value).unwrap();
    assert_eq!(decode(&schema, &bytes).unwrap(), value);
}

#[test]
fn test_round_trip_big_numbers() {
    let schema = schema!(record { (n: bigint), (d: bigdecimal) });
    let n: BigInt = "-123456789012345678901234567890".parse().unwrap();
    let d: BigDecimal = "3.14159265358979323846".parse().unwrap();
    let value = Value::record([
        ("n", Value::Primitive(PrimitiveValue::BigInteger(n))),
        ("d", Value::Primitive(PrimitiveValue::BigDecimal(d))),
    ]);
    let bytes = encode(&schema, &value).unwrap();
    assert_eq!(decode(&schema, &bytes).unwrap(), value);
}

#[test]
fn test_round_trip_temporals() {
    let schema = schema!(record {
        (dow: day_of_week),
        (m: month),
        (md: month_day),
        (p: period),
        (y: year),
        (ym: year_month),
        (zid: zone_id),
        (zoff: zone_offset),
        (dur: duration),
        (at: instant),
        (ld: local_date),
        (lt: local_time),
        (ldt: local_datetime),
        (ot: offset_time),
        (odt: offset_datetime),
        (zdt: zoned_datetime),
    });
    let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
    let value = Value::record([
        ("dow", Value::Primitive(PrimitiveValue::DayOfWeek(Weekday::Thu))),
        ("m", Value::Primitive(PrimitiveValue::Month(chrono::Month::September))),
        ("md", Value::Primitive(PrimitiveValue::MonthDay { month: 2, day: 29 })),
        ("p", Value::Primitive(PrimitiveValue::Period {
            years: 1,
            months: 2,
            days: 3,
        })),
        ("y", Value::Primitive(PrimitiveValue::Year(-44))),
        ("ym", Value::Primitive(PrimitiveValue::YearMonth {
            year: 2021,
            month: 3,
        })),
        ("zid", Value::Primitive(PrimitiveValue::ZoneId("Europe/Paris".to_owned()))),
        ("zoff", Value::Primitive(PrimitiveValue::ZoneOffset(offset))),
        ("dur", Value::Primitive(PrimitiveValue::Duration(
            TimeDelta::new(-90061, 250_000_000).unwrap(),
        ))),
        ("at", Value::Primitive(PrimitiveValue::Instant(
            Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap(),
        ))),
        ("ld", Value::Primitive(PrimitiveValue::LocalDate(
            NaiveDate::from_ymd_opt(2021, 3, 4).unwrap(),
        ))),
        ("lt", Value::Primitive(PrimitiveValue::LocalTime(
            NaiveTime::from_hms_milli_opt(5, 6, 7, 250).unwrap(),
        ))),
        ("ldt", Value::Primitive(PrimitiveValue::LocalDateTime(
            NaiveDate::from_ymd_opt(2021, 3, 4)
                .unwrap()
                .and_hms_opt(5, 6, 7)
                .unwrap(),
        ))),
        ("ot", Value::Primitive(PrimitiveValue::OffsetTime(
            NaiveTime::from_hms_opt(5, 6, 7).unwrap(),
            offset,
        ))),
        ("odt", Value::Primitive(PrimitiveValue::OffsetDateTime(
            offset.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap(),
        ))),
        ("zdt", Value::Primitive(PrimitiveValue::ZonedDateTime(
            offset.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap(),
        ))),
    ]);
    let bytes = encode(&schema, &value).unwrap();
    assert_eq!(decode(&schema, &bytes).unwrap(), value);
}

#[test]
fn test_round_trip_composites() {
    let schema = schema!(record {
        (id: long),
        (tags: seq(string)),
        (scores: seq(int)),
        (inner: record { (a: int), (b: string) }),
        (pair: tuple((int), (string))),
        (choice: enum { StringValue(string), IntValue(int) }),
        (maybe: option(string)),
        (matrix: seq(seq(int))),
    });
    let value = Value::record([
        ("id", Value::Primitive(PrimitiveValue::Long(7))),
        ("tags", Value::Sequence(vec![string("a"), string(""), string("b")])),
        ("scores", Value::Sequence(vec![int(1), int(0), int(-1)])),
        ("inner", Value::record([("a", int(5)), ("b", string("x"))])),
        ("pair", Value::tuple(int(9), string("nine"))),
        ("choice", Value::case(1, "IntValue", int(0))),
        ("maybe", Value::some(string(""))),
        ("matrix", Value::Sequence(vec![
            Value::Sequence(vec![int(1), int(2)]),
            Value::Sequence(vec![int(3)]),
        ])),
    ]);
    let bytes = encode(&schema, &value).unwrap();
    assert_eq!(decode(&schema, &bytes).unwrap(), value);
}

#[test]
fn test_round_trip_defaults_fill_back() {
    let schema = schema!(record {
        (name: string),
        (count: int),
        (tags: seq(string)),
        (maybe: option(int)),
    });
    let value = Value::record([
        ("name", string("")),
        ("count", int(0)),
        ("tags", Value::Sequence(vec![])),
        ("maybe", Value::none()),
    ]);
    let bytes = encode(&schema, &value).unwrap();
    assert_eq!(bytes, [0u8; 0]);
    // nothing on the wire, but a sibling field forces a decodable frame
    let schema2 = schema!(record {
        (name: string),
        (count: int),
        (tags: seq(string)),
        (maybe: option(int)),
        (seen: bool),
    });
    let value2 = Value::record([
        ("name", string("")),
        ("count", int(0)),
        ("tags", Value::Sequence(vec![])),
        ("maybe", Value::none()),
        ("seen", Value::Primitive(PrimitiveValue::Bool(true))),
    ]);
    let bytes2 = encode(&schema2, &value2).unwrap();
    assert_eq!(decode(&schema2, &bytes2).unwrap(), value2);
}
