use serde::{de, ser};
use std::borrow::Cow;
use std::{error, fmt};

/// The kind of an [`Error`].
///
/// Kinds are split between the two halves of the crate; see [`ErrorKind::is_deserialization`] and
/// [`ErrorKind::is_serialization`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A lexeme could not be classified as any token.
    TokenizerFailed,
    /// A value appeared without an owning identifier or array.
    ExpectedIdentifier,
    /// A structural symbol appeared in a context that does not accept it.
    UnexpectedReservedSymbol,
    /// An identifier followed another identifier, or appeared outside of a composite.
    UnexpectedIdentifier,
    /// The binary data blob marker appeared in a document without binary literals.
    UnexpectedBinaryBlob,
    /// A binary literal was malformed, reversed, or pointed past the end of the blob.
    InvalidBinaryLiteral,
    /// A numeric literal did not fit its type.
    InvalidNumber,
    /// Two array elements were not separated by a comma.
    ExpectedComma,
    /// The input ended after an identifier but before its value.
    EofWhileParsingValue,
    /// The input ended inside of a string literal.
    EofWhileParsingString,
    /// The input ended inside of an array.
    EofWhileParsingArray,
    /// The input ended inside of a composite.
    EofWhileParsingComposite,
    /// The document contains binary literals but no binary data blob.
    MissingBinaryBlob,
    /// Text handed to a Serde visitor was not valid UTF-8.
    InvalidUtf8,
    /// A value outside of an array was written without a name.
    NoNameProvided,
    /// A name is not a valid identifier.
    InvalidName,
    /// A value was required but none was provided.
    NoValueProvided,
    /// A value could not be converted to its textual form.
    UnableToConvertValue,
    /// A string value contains a character that cannot be represented.
    InvalidString,
    /// An array was ended while the writer was not directly inside of one.
    UnableToEndArray,
    /// A composite was ended while the writer was not directly inside of one.
    UnableToEndComposite,
    /// The writer was finished with arrays or composites still open.
    UnfinishedArrayOrComposite,
    /// A map key was not a string.
    KeyMustBeAString,
    /// A free-form error raised by a Serde implementation.
    Custom,
}

impl ErrorKind {
    /// Returns `true` if this kind is produced while reading a document.
    pub fn is_deserialization(self) -> bool {
        matches!(
            self,
            ErrorKind::TokenizerFailed
                | ErrorKind::ExpectedIdentifier
                | ErrorKind::UnexpectedReservedSymbol
                | ErrorKind::UnexpectedIdentifier
                | ErrorKind::UnexpectedBinaryBlob
                | ErrorKind::InvalidBinaryLiteral
                | ErrorKind::InvalidNumber
                | ErrorKind::ExpectedComma
                | ErrorKind::EofWhileParsingValue
                | ErrorKind::EofWhileParsingString
                | ErrorKind::EofWhileParsingArray
                | ErrorKind::EofWhileParsingComposite
                | ErrorKind::MissingBinaryBlob
                | ErrorKind::InvalidUtf8
        )
    }

    /// Returns `true` if this kind is produced while writing a document.
    pub fn is_serialization(self) -> bool {
        matches!(
            self,
            ErrorKind::NoNameProvided
                | ErrorKind::InvalidName
                | ErrorKind::NoValueProvided
                | ErrorKind::UnableToConvertValue
                | ErrorKind::InvalidString
                | ErrorKind::UnableToEndArray
                | ErrorKind::UnableToEndComposite
                | ErrorKind::UnfinishedArrayOrComposite
                | ErrorKind::KeyMustBeAString
        )
    }

    fn description(self) -> &'static str {
        match self {
            ErrorKind::TokenizerFailed => "tokenizer failed",
            ErrorKind::ExpectedIdentifier => "expected identifier",
            ErrorKind::UnexpectedReservedSymbol => "unexpected reserved symbol",
            ErrorKind::UnexpectedIdentifier => "unexpected identifier",
            ErrorKind::UnexpectedBinaryBlob => "unexpected binary data blob",
            ErrorKind::InvalidBinaryLiteral => "invalid binary literal",
            ErrorKind::InvalidNumber => "invalid number",
            ErrorKind::ExpectedComma => "expected ','",
            ErrorKind::EofWhileParsingValue => "EOF while parsing a value",
            ErrorKind::EofWhileParsingString => "EOF while parsing a string",
            ErrorKind::EofWhileParsingArray => "EOF while parsing an array",
            ErrorKind::EofWhileParsingComposite => "EOF while parsing a composite",
            ErrorKind::MissingBinaryBlob => "missing binary data blob",
            ErrorKind::InvalidUtf8 => "invalid UTF-8",
            ErrorKind::NoNameProvided => "no name provided",
            ErrorKind::InvalidName => "invalid name",
            ErrorKind::NoValueProvided => "no value provided",
            ErrorKind::UnableToConvertValue => "unable to convert value to string",
            ErrorKind::InvalidString => "invalid string",
            ErrorKind::UnableToEndArray => "unable to end array",
            ErrorKind::UnableToEndComposite => "unable to end composite",
            ErrorKind::UnfinishedArrayOrComposite => "unfinished array or composite values",
            ErrorKind::KeyMustBeAString => "key must be a string",
            ErrorKind::Custom => "custom error",
        }
    }
}

#[derive(Debug)]
struct ErrorImpl {
    kind: ErrorKind,
    offset: Option<usize>,
    detail: Option<Cow<'static, str>>,
}

/// An error encountered when serializing or deserializing to or from sdsf.
#[derive(Debug)]
pub struct Error(Box<ErrorImpl>);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.0.kind, &self.0.detail) {
            (ErrorKind::Custom, Some(detail)) => f.write_str(detail)?,
            (kind, Some(detail)) => write!(f, "{} - {}", kind.description(), detail)?,
            (kind, None) => f.write_str(kind.description())?,
        }
        if let Some(offset) = self.0.offset {
            write!(f, " at offset {}", offset)?;
        }
        Ok(())
    }
}

impl error::Error for Error {}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Error::new(ErrorKind::Custom, None, Some(Cow::Owned(msg.to_string())))
    }
}

impl de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Error::new(ErrorKind::Custom, None, Some(Cow::Owned(msg.to_string())))
    }
}

impl Error {
    fn new(kind: ErrorKind, offset: Option<usize>, detail: Option<Cow<'static, str>>) -> Self {
        Error(Box::new(ErrorImpl {
            kind,
            offset,
            detail,
        }))
    }

    fn at(kind: ErrorKind, offset: usize, detail: &'static str) -> Self {
        Error::new(kind, Some(offset), Some(Cow::Borrowed(detail)))
    }

    fn with(kind: ErrorKind, detail: &'static str) -> Self {
        Error::new(kind, None, Some(Cow::Borrowed(detail)))
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.0.kind
    }

    /// Returns the byte offset into the input at which a deserialization error was detected, if known.
    pub fn offset(&self) -> Option<usize> {
        self.0.offset
    }

    /// Returns `true` if this error was produced while reading a document.
    pub fn is_deserialization(&self) -> bool {
        self.0.kind.is_deserialization()
    }

    /// Returns `true` if this error was produced while writing a document.
    pub fn is_serialization(&self) -> bool {
        self.0.kind.is_serialization()
    }

    pub(crate) fn tokenizer_failed(offset: usize, detail: &'static str) -> Self {
        Error::at(ErrorKind::TokenizerFailed, offset, detail)
    }

    pub(crate) fn expected_identifier(offset: usize, detail: &'static str) -> Self {
        Error::at(ErrorKind::ExpectedIdentifier, offset, detail)
    }

    pub(crate) fn unexpected_reserved_symbol(offset: usize, detail: &'static str) -> Self {
        Error::at(ErrorKind::UnexpectedReservedSymbol, offset, detail)
    }

    pub(crate) fn unexpected_identifier(offset: usize, detail: &'static str) -> Self {
        Error::at(ErrorKind::UnexpectedIdentifier, offset, detail)
    }

    pub(crate) fn unexpected_binary_blob(offset: usize) -> Self {
        Error::at(
            ErrorKind::UnexpectedBinaryBlob,
            offset,
            "no binary literals were used",
        )
    }

    pub(crate) fn invalid_binary_literal(offset: Option<usize>, detail: &'static str) -> Self {
        Error::new(
            ErrorKind::InvalidBinaryLiteral,
            offset,
            Some(Cow::Borrowed(detail)),
        )
    }

    pub(crate) fn invalid_number(offset: usize, detail: &'static str) -> Self {
        Error::at(ErrorKind::InvalidNumber, offset, detail)
    }

    pub(crate) fn expected_comma(offset: usize) -> Self {
        Error::at(
            ErrorKind::ExpectedComma,
            offset,
            "array members must be separated by commas",
        )
    }

    pub(crate) fn eof_while_parsing_value() -> Self {
        Error::new(ErrorKind::EofWhileParsingValue, None, None)
    }

    pub(crate) fn eof_while_parsing_string(offset: usize) -> Self {
        Error::new(ErrorKind::EofWhileParsingString, Some(offset), None)
    }

    pub(crate) fn eof_while_parsing_array() -> Self {
        Error::new(ErrorKind::EofWhileParsingArray, None, None)
    }

    pub(crate) fn eof_while_parsing_composite() -> Self {
        Error::new(ErrorKind::EofWhileParsingComposite, None, None)
    }

    pub(crate) fn missing_binary_blob() -> Self {
        Error::with(
            ErrorKind::MissingBinaryBlob,
            "binary literals were used but the document has no '@' section",
        )
    }

    pub(crate) fn invalid_utf8() -> Self {
        Error::new(ErrorKind::InvalidUtf8, None, None)
    }

    pub(crate) fn no_name_provided() -> Self {
        Error::with(
            ErrorKind::NoNameProvided,
            "only arrays can have unnamed children",
        )
    }

    pub(crate) fn invalid_name(detail: &'static str) -> Self {
        Error::with(ErrorKind::InvalidName, detail)
    }

    pub(crate) fn no_value_provided() -> Self {
        Error::with(
            ErrorKind::NoValueProvided,
            "array members can't be null or unit",
        )
    }

    pub(crate) fn unable_to_convert_value(detail: &'static str) -> Self {
        Error::with(ErrorKind::UnableToConvertValue, detail)
    }

    pub(crate) fn invalid_string() -> Self {
        Error::with(
            ErrorKind::InvalidString,
            "strings can't contain '\"' characters",
        )
    }

    pub(crate) fn unable_to_end_array() -> Self {
        Error::with(
            ErrorKind::UnableToEndArray,
            "the writer is not directly inside of an array",
        )
    }

    pub(crate) fn unable_to_end_composite() -> Self {
        Error::with(
            ErrorKind::UnableToEndComposite,
            "the writer is not directly inside of a composite",
        )
    }

    pub(crate) fn unfinished_array_or_composite() -> Self {
        Error::with(
            ErrorKind::UnfinishedArrayOrComposite,
            "not all composites and arrays were finished",
        )
    }

    pub(crate) fn key_must_be_a_string() -> Self {
        Error::new(ErrorKind::KeyMustBeAString, None, None)
    }
}
