//! Data types for representing a schema, and the macro for constructing them
//! with syntactic sugar.

use crate::{
    error::{
        Result,
        error,
        bail,
    },
    value::{
        Value,
        PrimitiveValue,
        FieldValue,
    },
    wire::WireType,
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
use num_bigint::BigInt;
use bigdecimal::BigDecimal;
use sha2::{
    Digest,
    Sha256,
};
use std::{
    fmt::{self, Formatter, Debug},
    sync::Arc,
};


/// Description of how a dynamic value maps onto the protobuf wire format.
///
/// A schema is an immutable tree of variants, built at runtime and borrowed
/// by the codec for the duration of one encode or decode call. The position
/// of a record field or enumeration case in its declaration list fixes its
/// 1-based protobuf field number, so these lists are ordered, never maps.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Some atomic data type.
    Primitive(StandardType),
    /// Homogenous variable-length sequence.
    Sequence(Box<Schema>),
    /// Fields with names and ordinals.
    Record(Vec<RecordField>),
    /// Tagged union of cases with names and ordinals.
    Enumeration(Vec<EnumCase>),
    /// 2-arity product. On the wire this is a record with fields at numbers
    /// 1 and 2.
    Tuple(Box<Schema>, Box<Schema>),
    /// A value that may be absent. On the wire this is a record with a
    /// single optional field at number 1.
    Optional(Box<Schema>),
    /// An invertible view of an inner schema through a pair of fallible
    /// maps.
    Transform(TransformSchema),
    /// A schema that refuses to encode or decode, carrying the message it
    /// fails with.
    Fail(String),
}

/// Fallible value-to-value map carried by [`Schema::Transform`].
pub type TransformFn =
    dyn Fn(Value) -> std::result::Result<Value, String> + Send + Sync;

/// Value in `Schema::Transform`.
///
/// `forward` maps a decoded inner value outward; `reverse` maps an outer
/// value back to the inner representation before encoding. Either side may
/// reject a value with a message.
#[derive(Clone)]
pub struct TransformSchema {
    pub inner: Box<Schema>,
    pub forward: Arc<TransformFn>,
    pub reverse: Arc<TransformFn>,
}

impl Debug for TransformSchema {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("TransformSchema")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Item in `Schema::Record`.
#[derive(Debug, Clone)]
pub struct RecordField {
    pub name: String,
    pub inner: Schema,
}

impl<S: Into<String>> From<(S, Schema)> for RecordField {
    fn from((name, inner): (S, Schema)) -> Self {
        RecordField {
            name: name.into(),
            inner,
        }
    }
}

/// Item in `Schema::Enumeration`.
#[derive(Debug, Clone)]
pub struct EnumCase {
    pub name: String,
    pub inner: Schema,
}

impl<S: Into<String>> From<(S, Schema)> for EnumCase {
    fn from((name, inner): (S, Schema)) -> Self {
        EnumCase {
            name: name.into(),
            inner,
        }
    }
}

impl Schema {
    /// Construct a transform schema from an inner schema and a pair of
    /// closures.
    pub fn transform<F, R>(inner: Schema, forward: F, reverse: R) -> Self
    where
        F: Fn(Value) -> std::result::Result<Value, String> + Send + Sync + 'static,
        R: Fn(Value) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        Schema::Transform(TransformSchema {
            inner: Box::new(inner),
            forward: Arc::new(forward),
            reverse: Arc::new(reverse),
        })
    }

    pub(crate) fn display_str(&self) -> &'static str {
        match self {
            Schema::Primitive(st) => st.display_str(),
            Schema::Sequence(_) => "sequence(..)",
            Schema::Record(_) => "record {..}",
            Schema::Enumeration(_) => "enumeration {..}",
            Schema::Tuple(..) => "tuple(..)",
            Schema::Optional(_) => "optional(..)",
            Schema::Transform(_) => "transform(..)",
            Schema::Fail(_) => "fail(..)",
        }
    }

    /// Wire type a field of this schema carries, or `None` if the schema
    /// never puts a payload on the wire by itself (`Unit`, `Fail`).
    pub(crate) fn wire_type(&self) -> Option<WireType> {
        match self {
            &Schema::Primitive(ref st) => st.wire_type(),
            &Schema::Transform(ref t) => t.inner.wire_type(),
            &Schema::Fail(_) => None,
            _ => Some(WireType::LengthDelimited),
        }
    }

    /// The value an absent field of this schema decodes to.
    ///
    /// Resolved from the schema alone. Enumerations have no default (an
    /// enumeration frame must select a case), and `Fail` has no values at
    /// all; both fail here, which is what makes an absent field of either
    /// schema a decode error.
    pub fn default_value(&self) -> Result<Value> {
        Ok(match self {
            &Schema::Primitive(ref st) => Value::Primitive(st.default_value()),
            &Schema::Sequence(_) => Value::Sequence(Vec::new()),
            &Schema::Record(ref fields) => {
                let mut defaults = Vec::with_capacity(fields.len());
                for field in fields {
                    defaults.push(FieldValue {
                        name: field.name.clone(),
                        value: field.inner.default_value()?,
                    });
                }
                Value::Record(defaults)
            }
            &Schema::Enumeration(_) => bail!(
                Structural,
                Some(self),
                "missing enumeration case",
            ),
            &Schema::Tuple(ref a, ref b) => Value::Tuple(
                Box::new(a.default_value()?),
                Box::new(b.default_value()?),
            ),
            &Schema::Optional(_) => Value::Optional(None),
            &Schema::Transform(ref t) => {
                let inner = t.inner.default_value()?;
                (t.forward)(inner)
                    .map_err(|msg| error!(Transformation, Some(self), "{}", msg))?
            }
            &Schema::Fail(ref msg) => bail!(SchemaFail, Some(self), "{}", msg),
        })
    }

    /// Fingerprint of the schema's structure, for change detection and
    /// protocol handshakes. Transform maps are opaque closures; two
    /// transforms over the same inner schema fingerprint identically.
    pub fn sha256(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        self.hash_into(&mut hasher);
        hasher.finalize().into()
    }

    fn hash_into(&self, hasher: &mut Sha256) {
        fn hash_str(hasher: &mut Sha256, s: &str) {
            hasher.update((s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }
        match self {
            &Schema::Primitive(ref st) => {
                hasher.update([0]);
                st.hash_into(hasher);
            }
            &Schema::Sequence(ref inner) => {
                hasher.update([1]);
                inner.hash_into(hasher);
            }
            &Schema::Record(ref fields) => {
                hasher.update([2]);
                hasher.update((fields.len() as u64).to_le_bytes());
                for field in fields {
                    hash_str(hasher, &field.name);
                    field.inner.hash_into(hasher);
                }
            }
            &Schema::Enumeration(ref cases) => {
                hasher.update([3]);
                hasher.update((cases.len() as u64).to_le_bytes());
                for case in cases {
                    hash_str(hasher, &case.name);
                    case.inner.hash_into(hasher);
                }
            }
            &Schema::Tuple(ref a, ref b) => {
                hasher.update([4]);
                a.hash_into(hasher);
                b.hash_into(hasher);
            }
            &Schema::Optional(ref inner) => {
                hasher.update([5]);
                inner.hash_into(hasher);
            }
            &Schema::Transform(ref t) => {
                hasher.update([6]);
                t.inner.hash_into(hasher);
            }
            &Schema::Fail(ref msg) => {
                hasher.update([7]);
                hash_str(hasher, msg);
            }
        }
    }
}


/// An atomic data type.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum StandardType {
    /// Carries no data, encodes to zero bytes.
    Unit,
    /// Encoded as a 0/1 varint; any nonzero varint decodes to true.
    Bool,
    /// Encoded as a sign-extended varint.
    Byte,
    /// Encoded as a sign-extended varint.
    Short,
    /// Encoded as a sign-extended varint.
    Int,
    /// Encoded as a sign-extended varint.
    Long,
    /// Encoded as four little-endian bytes.
    Float,
    /// Encoded as eight little-endian bytes.
    Double,
    /// Encoded as a code point varint.
    Char,
    /// Length-delimited UTF-8 bytes.
    String,
    /// Length-delimited raw bytes.
    Binary,
    /// Length-delimited canonical decimal text.
    BigInteger,
    /// Length-delimited canonical decimal text.
    BigDecimal,
    /// Length-delimited varint of the ISO number, Monday = 1.
    DayOfWeek,
    /// Length-delimited varint of the month number, January = 1.
    Month,
    /// Length-delimited record of (month, day) at field numbers 1, 2.
    MonthDay,
    /// Length-delimited record of (years, months, days) at field numbers
    /// 1, 2, 3.
    Period,
    /// Length-delimited zigzag varint.
    Year,
    /// Length-delimited record of (year, month) at field numbers 1, 2.
    YearMonth,
    /// Length-delimited textual zone id.
    ZoneId,
    /// Length-delimited zigzag varint of the total seconds east of UTC.
    ZoneOffset,
    /// Length-delimited pair of zigzag varints (seconds, nanos). The unit
    /// describes the caller's preferred granularity and does not affect the
    /// wire form.
    Duration(TemporalUnit),
    /// Length-delimited formatter text.
    Instant(TimeFormat),
    /// Length-delimited formatter text.
    LocalDate(TimeFormat),
    /// Length-delimited formatter text.
    LocalTime(TimeFormat),
    /// Length-delimited formatter text.
    LocalDateTime(TimeFormat),
    /// Length-delimited formatter text.
    OffsetTime(TimeFormat),
    /// Length-delimited formatter text.
    OffsetDateTime(TimeFormat),
    /// Length-delimited formatter text.
    ZonedDateTime(TimeFormat),
}

impl StandardType {
    pub(crate) fn display_str(&self) -> &'static str {
        match self {
            StandardType::Unit => "unit",
            StandardType::Bool => "bool",
            StandardType::Byte => "byte",
            StandardType::Short => "short",
            StandardType::Int => "int",
            StandardType::Long => "long",
            StandardType::Float => "float",
            StandardType::Double => "double",
            StandardType::Char => "char",
            StandardType::String => "string",
            StandardType::Binary => "binary",
            StandardType::BigInteger => "big integer",
            StandardType::BigDecimal => "big decimal",
            StandardType::DayOfWeek => "day of week",
            StandardType::Month => "month",
            StandardType::MonthDay => "month day",
            StandardType::Period => "period",
            StandardType::Year => "year",
            StandardType::YearMonth => "year month",
            StandardType::ZoneId => "zone id",
            StandardType::ZoneOffset => "zone offset",
            StandardType::Duration(_) => "duration",
            StandardType::Instant(_) => "instant",
            StandardType::LocalDate(_) => "local date",
            StandardType::LocalTime(_) => "local time",
            StandardType::LocalDateTime(_) => "local date time",
            StandardType::OffsetTime(_) => "offset time",
            StandardType::OffsetDateTime(_) => "offset date time",
            StandardType::ZonedDateTime(_) => "zoned date time",
        }
    }

    pub(crate) fn wire_type(&self) -> Option<WireType> {
        match self {
            StandardType::Unit => None,
            StandardType::Bool
            | StandardType::Byte
            | StandardType::Short
            | StandardType::Int
            | StandardType::Long
            | StandardType::Char => Some(WireType::Varint),
            StandardType::Float => Some(WireType::Fixed32),
            StandardType::Double => Some(WireType::Fixed64),
            _ => Some(WireType::LengthDelimited),
        }
    }

    pub(crate) fn default_value(&self) -> PrimitiveValue {
        match self {
            StandardType::Unit => PrimitiveValue::Unit,
            StandardType::Bool => PrimitiveValue::Bool(false),
            StandardType::Byte => PrimitiveValue::Byte(0),
            StandardType::Short => PrimitiveValue::Short(0),
            StandardType::Int => PrimitiveValue::Int(0),
            StandardType::Long => PrimitiveValue::Long(0),
            StandardType::Float => PrimitiveValue::Float(0.0),
            StandardType::Double => PrimitiveValue::Double(0.0),
            StandardType::Char => PrimitiveValue::Char('\0'),
            StandardType::String => PrimitiveValue::String(String::new()),
            StandardType::Binary => PrimitiveValue::Binary(Vec::new()),
            StandardType::BigInteger => PrimitiveValue::BigInteger(BigInt::from(0)),
            StandardType::BigDecimal => PrimitiveValue::BigDecimal(BigDecimal::from(0)),
            StandardType::DayOfWeek => PrimitiveValue::DayOfWeek(Weekday::Mon),
            StandardType::Month => PrimitiveValue::Month(chrono::Month::January),
            StandardType::MonthDay => PrimitiveValue::MonthDay { month: 1, day: 1 },
            StandardType::Period => PrimitiveValue::Period {
                years: 0,
                months: 0,
                days: 0,
            },
            StandardType::Year => PrimitiveValue::Year(0),
            StandardType::YearMonth => PrimitiveValue::YearMonth { year: 0, month: 1 },
            StandardType::ZoneId => PrimitiveValue::ZoneId("UTC".to_owned()),
            StandardType::ZoneOffset => {
                PrimitiveValue::ZoneOffset(FixedOffset::east_opt(0).unwrap())
            }
            StandardType::Duration(_) => PrimitiveValue::Duration(TimeDelta::zero()),
            StandardType::Instant(_) => {
                PrimitiveValue::Instant(DateTime::<Utc>::UNIX_EPOCH)
            }
            StandardType::LocalDate(_) => PrimitiveValue::LocalDate(NaiveDate::default()),
            StandardType::LocalTime(_) => PrimitiveValue::LocalTime(NaiveTime::default()),
            StandardType::LocalDateTime(_) => {
                PrimitiveValue::LocalDateTime(NaiveDateTime::default())
            }
            StandardType::OffsetTime(_) => PrimitiveValue::OffsetTime(
                NaiveTime::default(),
                FixedOffset::east_opt(0).unwrap(),
            ),
            StandardType::OffsetDateTime(_) => {
                PrimitiveValue::OffsetDateTime(DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
            }
            StandardType::ZonedDateTime(_) => {
                PrimitiveValue::ZonedDateTime(DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
            }
        }
    }

    pub(crate) fn is_default(&self, value: &PrimitiveValue) -> bool {
        *value == self.default_value()
    }

    fn hash_into(&self, hasher: &mut Sha256) {
        let (tag, detail): (u8, &str) = match self {
            StandardType::Unit => (0, ""),
            StandardType::Bool => (1, ""),
            StandardType::Byte => (2, ""),
            StandardType::Short => (3, ""),
            StandardType::Int => (4, ""),
            StandardType::Long => (5, ""),
            StandardType::Float => (6, ""),
            StandardType::Double => (7, ""),
            StandardType::Char => (8, ""),
            StandardType::String => (9, ""),
            StandardType::Binary => (10, ""),
            StandardType::BigInteger => (11, ""),
            StandardType::BigDecimal => (12, ""),
            StandardType::DayOfWeek => (13, ""),
            StandardType::Month => (14, ""),
            StandardType::MonthDay => (15, ""),
            StandardType::Period => (16, ""),
            StandardType::Year => (17, ""),
            StandardType::YearMonth => (18, ""),
            StandardType::ZoneId => (19, ""),
            StandardType::ZoneOffset => (20, ""),
            StandardType::Duration(_) => (21, ""),
            StandardType::Instant(ref f) => (22, f.pattern()),
            StandardType::LocalDate(ref f) => (23, f.pattern()),
            StandardType::LocalTime(ref f) => (24, f.pattern()),
            StandardType::LocalDateTime(ref f) => (25, f.pattern()),
            StandardType::OffsetTime(ref f) => (26, f.pattern()),
            StandardType::OffsetDateTime(ref f) => (27, f.pattern()),
            StandardType::ZonedDateTime(ref f) => (28, f.pattern()),
        };
        hasher.update([tag]);
        hasher.update((detail.len() as u64).to_le_bytes());
        hasher.update(detail.as_bytes());
    }
}


/// Granularity hint carried by [`StandardType::Duration`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TemporalUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
}

/// A strftime-style pattern used to write and read the textual form of a
/// date/time standard type. The same pattern drives both directions.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimeFormat {
    pattern: String,
}

impl TimeFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        TimeFormat {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// RFC 3339 date-time with offset, e.g. `2021-03-04T05:06:07+00:00`.
    pub fn rfc3339() -> Self {
        TimeFormat::new("%+")
    }

    /// ISO 8601 calendar date, e.g. `2021-03-04`.
    pub fn date() -> Self {
        TimeFormat::new("%Y-%m-%d")
    }

    /// Time of day with optional fraction, e.g. `05:06:07.250`.
    pub fn time() -> Self {
        TimeFormat::new("%H:%M:%S%.f")
    }

    /// Date and time of day without offset.
    pub fn date_time() -> Self {
        TimeFormat::new("%Y-%m-%dT%H:%M:%S%.f")
    }

    /// Time of day with offset, e.g. `05:06:07+01:00`.
    pub fn offset_time() -> Self {
        TimeFormat::new("%H:%M:%S%.f%:z")
    }
}


#[macro_export]
macro_rules! schema {
    (unit)=>{ $crate::Schema::Primitive($crate::StandardType::Unit) };
    (bool)=>{ $crate::Schema::Primitive($crate::StandardType::Bool) };
    (byte)=>{ $crate::Schema::Primitive($crate::StandardType::Byte) };
    (short)=>{ $crate::Schema::Primitive($crate::StandardType::Short) };
    (int)=>{ $crate::Schema::Primitive($crate::StandardType::Int) };
    (long)=>{ $crate::Schema::Primitive($crate::StandardType::Long) };
    (float)=>{ $crate::Schema::Primitive($crate::StandardType::Float) };
    (double)=>{ $crate::Schema::Primitive($crate::StandardType::Double) };
    (char)=>{ $crate::Schema::Primitive($crate::StandardType::Char) };
    (string)=>{ $crate::Schema::Primitive($crate::StandardType::String) };
    (binary)=>{ $crate::Schema::Primitive($crate::StandardType::Binary) };
    (bigint)=>{ $crate::Schema::Primitive($crate::StandardType::BigInteger) };
    (bigdecimal)=>{ $crate::Schema::Primitive($crate::StandardType::BigDecimal) };
    (day_of_week)=>{ $crate::Schema::Primitive($crate::StandardType::DayOfWeek) };
    (month)=>{ $crate::Schema::Primitive($crate::StandardType::Month) };
    (month_day)=>{ $crate::Schema::Primitive($crate::StandardType::MonthDay) };
    (period)=>{ $crate::Schema::Primitive($crate::StandardType::Period) };
    (year)=>{ $crate::Schema::Primitive($crate::StandardType::Year) };
    (year_month)=>{ $crate::Schema::Primitive($crate::StandardType::YearMonth) };
    (zone_id)=>{ $crate::Schema::Primitive($crate::StandardType::ZoneId) };
    (zone_offset)=>{ $crate::Schema::Primitive($crate::StandardType::ZoneOffset) };
    (duration)=>{ $crate::Schema::Primitive($crate::StandardType::Duration($crate::TemporalUnit::Seconds)) };
    (duration($unit:expr))=>{ $crate::Schema::Primitive($crate::StandardType::Duration($unit)) };
    (instant)=>{ $crate::Schema::Primitive($crate::StandardType::Instant($crate::TimeFormat::rfc3339())) };
    (instant($fmt:expr))=>{ $crate::Schema::Primitive($crate::StandardType::Instant($crate::TimeFormat::new($fmt))) };
    (local_date)=>{ $crate::Schema::Primitive($crate::StandardType::LocalDate($crate::TimeFormat::date())) };
    (local_date($fmt:expr))=>{ $crate::Schema::Primitive($crate::StandardType::LocalDate($crate::TimeFormat::new($fmt))) };
    (local_time)=>{ $crate::Schema::Primitive($crate::StandardType::LocalTime($crate::TimeFormat::time())) };
    (local_time($fmt:expr))=>{ $crate::Schema::Primitive($crate::StandardType::LocalTime($crate::TimeFormat::new($fmt))) };
    (local_datetime)=>{ $crate::Schema::Primitive($crate::StandardType::LocalDateTime($crate::TimeFormat::date_time())) };
    (local_datetime($fmt:expr))=>{ $crate::Schema::Primitive($crate::StandardType::LocalDateTime($crate::TimeFormat::new($fmt))) };
    (offset_time)=>{ $crate::Schema::Primitive($crate::StandardType::OffsetTime($crate::TimeFormat::offset_time())) };
    (offset_time($fmt:expr))=>{ $crate::Schema::Primitive($crate::StandardType::OffsetTime($crate::TimeFormat::new($fmt))) };
    (offset_datetime)=>{ $crate::Schema::Primitive($crate::StandardType::OffsetDateTime($crate::TimeFormat::rfc3339())) };
    (offset_datetime($fmt:expr))=>{ $crate::Schema::Primitive($crate::StandardType::OffsetDateTime($crate::TimeFormat::new($fmt))) };
    (zoned_datetime)=>{ $crate::Schema::Primitive($crate::StandardType::ZonedDateTime($crate::TimeFormat::rfc3339())) };
    (zoned_datetime($fmt:expr))=>{ $crate::Schema::Primitive($crate::StandardType::ZonedDateTime($crate::TimeFormat::new($fmt))) };
    (option($($inner:tt)*))=>{ $crate::Schema::Optional(::std::boxed::Box::new($crate::schema!($($inner)*))) };
    (seq($($inner:tt)*))=>{ $crate::Schema::Sequence(::std::boxed::Box::new($crate::schema!($($inner)*))) };
    (tuple(($($a:tt)*), ($($b:tt)*)))=>{ $crate::Schema::Tuple(::std::boxed::Box::new($crate::schema!($($a)*)), ::std::boxed::Box::new($crate::schema!($($b)*))) };
    (record { $(($name:ident: $($field:tt)*)),*$(,)? })=>{ $crate::Schema::Record(::std::vec![$( $crate::RecordField { name: ::std::string::String::from(::core::stringify!($name)), inner: $crate::schema!($($field)*) }, )*]) };
    (enum { $($name:ident($($case:tt)*)),*$(,)? })=>{ $crate::Schema::Enumeration(::std::vec![$( $crate::EnumCase { name: ::std::string::String::from(::core::stringify!($name)), inner: $crate::schema!($($case)*) }, )*]) };
    (fail($msg:expr))=>{ $crate::Schema::Fail(::std::string::String::from($msg)) };
    (%$schema:expr)=>{ $schema };
}

pub use schema;


#[cfg(test)]
use crate::error::ErrorKind;

#[test]
fn test_default_values() {
    assert_eq!(
        schema!(int).default_value().unwrap(),
        Value::Primitive(PrimitiveValue::Int(0)),
    );
    assert_eq!(
        schema!(string).default_value().unwrap(),
        Value::Primitive(PrimitiveValue::String(String::new())),
    );
    assert_eq!(
        schema!(option(int)).default_value().unwrap(),
        Value::Optional(None),
    );
    assert_eq!(
        schema!(seq(string)).default_value().unwrap(),
        Value::Sequence(Vec::new()),
    );
    assert_eq!(
        schema!(record { (name: string), (count: int) }).default_value().unwrap(),
        Value::Record(vec![
            FieldValue {
                name: "name".to_owned(),
                value: Value::Primitive(PrimitiveValue::String(String::new())),
            },
            FieldValue {
                name: "count".to_owned(),
                value: Value::Primitive(PrimitiveValue::Int(0)),
            },
        ]),
    );
}

#[test]
fn test_default_value_enumeration_fails() {
    let e = schema!(enum { IntValue(int) }).default_value().unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Structural);
    assert!(e.to_string().contains("missing enumeration case"));
}

#[test]
fn test_default_value_fail_fails() {
    let e = schema!(fail("boom")).default_value().unwrap_err();
    assert_eq!(e.kind(), ErrorKind::SchemaFail);
    assert!(e.to_string().contains("boom"));
}

#[test]
fn test_fingerprint_distinguishes() {
    let a = schema!(record { (value: int) });
    let b = schema!(record { (value: string) });
    let c = schema!(record { (other: int) });
    assert_ne!(a.sha256(), b.sha256());
    assert_ne!(a.sha256(), c.sha256());
    assert_eq!(a.sha256(), schema!(record { (value: int) }).sha256());
}

#[test]
fn test_schema_macro_shapes() {
    match schema!(record { (name: string), (count: int) }) {
        Schema::Record(fields) => {
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0].name, "name");
            assert_eq!(fields[1].name, "count");
        }
        other => panic!("unexpected schema: {:?}", other),
    }
    match schema!(enum { StringValue(string), IntValue(int) }) {
        Schema::Enumeration(cases) => {
            assert_eq!(cases.len(), 2);
            assert_eq!(cases[1].name, "IntValue");
        }
        other => panic!("unexpected schema: {:?}", other),
    }
    match schema!(tuple((int), (string))) {
        Schema::Tuple(a, b) => {
            assert!(matches!(*a, Schema::Primitive(StandardType::Int)));
            assert!(matches!(*b, Schema::Primitive(StandardType::String)));
        }
        other => panic!("unexpected schema: {:?}", other),
    }
}
