//! Dynamic representation of data within the codec's data model, analogous
//! to `serde_json::Value`.
//!
//! Values are what the codec produces when decoding and consumes when
//! encoding; which variants are permitted where is decided entirely by the
//! schema the codec is walking.

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


#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Primitive(PrimitiveValue),
    Sequence(Vec<Value>),
    Record(Vec<FieldValue>),
    Enumeration(CaseValue),
    Tuple(Box<Value>, Box<Value>),
    Optional(Option<Box<Value>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Unit,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    Binary(Vec<u8>),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
    DayOfWeek(Weekday),
    Month(chrono::Month),
    MonthDay { month: u32, day: u32 },
    Period { years: i32, months: i32, days: i32 },
    Year(i32),
    YearMonth { year: i32, month: u32 },
    ZoneId(String),
    ZoneOffset(FixedOffset),
    Duration(TimeDelta),
    Instant(DateTime<Utc>),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    OffsetTime(NaiveTime, FixedOffset),
    OffsetDateTime(DateTime<FixedOffset>),
    ZonedDateTime(DateTime<FixedOffset>),
}

/// Item in `Value::Record`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

impl<S: Into<String>> From<(S, Value)> for FieldValue {
    fn from((name, value): (S, Value)) -> Self {
        FieldValue {
            name: name.into(),
            value,
        }
    }
}

/// Item in `Value::Enumeration`: the selected case and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseValue {
    pub case_ord: usize,
    pub case_name: String,
    pub value: Box<Value>,
}

impl Value {
    /// Build a record value from `(name, value)` pairs.
    pub fn record<S, I>(fields: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Value)>,
    {
        Value::Record(fields.into_iter().map(FieldValue::from).collect())
    }

    /// Build an enumeration value selecting the case at `case_ord`.
    pub fn case(case_ord: usize, case_name: impl Into<String>, value: Value) -> Self {
        Value::Enumeration(CaseValue {
            case_ord,
            case_name: case_name.into(),
            value: Box::new(value),
        })
    }

    pub fn tuple(a: Value, b: Value) -> Self {
        Value::Tuple(Box::new(a), Box::new(b))
    }

    pub fn some(inner: Value) -> Self {
        Value::Optional(Some(Box::new(inner)))
    }

    pub fn none() -> Self {
        Value::Optional(None)
    }
}
