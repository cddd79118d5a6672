use std::{
    fmt,
    io::Error as IoError,
    num::{ParseFloatError, ParseIntError},
};

use thiserror::Error;

/// `Result<_, ParseError>`
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that could go wrong while reading a [`Beatmap`](crate::Beatmap).
///
/// Malformed lines never abort parsing, they are reported as [`ParseWarning`]
/// instead. Only failures of the underlying reader end up here.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error")]
    IoError(#[from] IoError),
}

/// A line that was skipped, or only partially understood, while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number.
    pub line: usize,
    /// Content of the line, trailing whitespace removed.
    pub content: String,
    pub kind: ParseWarningKind,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line, self.kind, self.content)
    }
}

/// Reason for a [`ParseWarning`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseWarningKind {
    #[error("invalid integer")]
    InvalidInteger(#[from] ParseIntError),
    #[error("invalid floating point number")]
    InvalidFloat(#[from] ParseFloatError),
    #[error("number is not finite")]
    NonFiniteNumber,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("expected `key:value` pair")]
    BadLine,
    #[error("slider has no spans")]
    NoSliderSpans,
    #[error("hitobject type {0} is out of range")]
    InvalidObjectType(i64),
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
    #[error("trailing values were ignored")]
    TrailingValues,
}
