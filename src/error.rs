//! Error types.

use crate::schema::Schema;
use std::fmt::{self, Formatter, Display};


pub type Result<I> = std::result::Result<I, Error>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    error: Box<dyn std::error::Error + Send + Sync>,
    schema: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ErrorKind {
    /// A field key could not be decoded: the wire type bits name a wire type
    /// this codec does not read (3, 4, 6, 7), or the field number is zero.
    KeyDecode,

    /// The input ended in the middle of a varint, a fixed-width value, or a
    /// length-delimited payload, or there was no input at all.
    ///
    /// This is the one error kind the streaming decoder recovers from, by
    /// buffering the partial frame until more bytes arrive.
    Truncation,

    /// A varint ran past its maximum encoded width.
    Varint,

    /// A payload was read but could not be interpreted under its field
    /// schema: a narrowing integer overflowed, string bytes were not UTF-8,
    /// a textual date/time or big-number failed to parse, or the wire type
    /// cannot carry the expected schema.
    Payload,

    /// The frame shape itself is wrong for the schema, e.g. an enumeration
    /// frame that selects no case.
    Structural,

    /// A schema transform's forward or reverse map rejected a value. Carries
    /// the message returned by the map.
    Transformation,

    /// A `Schema::Fail` node was asked to decode (or a value was resolved
    /// through one). Carries the message of the `Fail` node.
    SchemaFail,

    /// (Only when encoding) the shape of the value handed to the encoder is
    /// not valid for the given schema.
    SchemaNonConformance,

    /// The user of this library performed a sequence of API calls that would
    /// never be valid, such as feeding a streaming decoder that has already
    /// failed.
    Usage,
}

impl Error {
    pub fn new<E>(
        kind: ErrorKind,
        error: E,
        schema: Option<&Schema>,
    ) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error {
            kind,
            error: error.into(),
            schema: schema.map(|schema| schema.display_str().to_owned()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.error
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.error
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            ErrorKind::KeyDecode => "failed decoding key",
            ErrorKind::Truncation => "truncated input",
            ErrorKind::Varint => "malformed varint",
            ErrorKind::Payload => "malformed payload",
            ErrorKind::Structural => "malformed structure",
            ErrorKind::Transformation => "transformation error",
            ErrorKind::SchemaFail => "failing schema",
            ErrorKind::SchemaNonConformance => "schema non-conformance",
            ErrorKind::Usage => "API usage error",
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.kind, f)?;
        f.write_str(": ")?;
        Display::fmt(&self.error, f)?;
        if let Some(ref schema) = self.schema {
            f.write_str("\nschema: ")?;
            f.write_str(schema)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner())
    }
}


macro_rules! error {
    ($k:ident, $schema:expr, $($e:tt)*)=>{
        $crate::error::Error::new(
            $crate::error::ErrorKind::$k,
            format!($($e)*),
            $schema,
        )
    };
}

macro_rules! bail {
    ($($e:tt)*)=>{ return Err(error!($($e)*)) };
}

macro_rules! ensure {
    ($c:expr, $($e:tt)*)=>{
        if !$c {
            bail!($($e)*);
        }
    };
}

pub(crate) use error;
pub(crate) use bail;
pub(crate) use ensure;
