use crate::buffer::Buffer;
use crate::syntax::{check_identifier, INDENT, NEWLINE};
use crate::Error;
use log::debug;
use std::fmt::Write as _;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Entry {
    Array,
    Composite,
}

/// A builder to configure a [`Writer`].
#[derive(Clone, Debug)]
pub struct Builder {
    main_buffer_capacity: usize,
    binary_buffer_capacity: usize,
    stack_capacity: usize,
    staging_capacity: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            main_buffer_capacity: 2048,
            binary_buffer_capacity: 128,
            stack_capacity: 32,
            staging_capacity: 128,
        }
    }
}

impl Builder {
    /// Sets the initial capacity, in bytes, of the text output.
    ///
    /// Defaults to 2048.
    pub fn main_buffer_capacity(&mut self, main_buffer_capacity: usize) -> &mut Self {
        self.main_buffer_capacity = main_buffer_capacity;
        self
    }

    /// Sets the initial capacity, in bytes, of the binary data blob.
    ///
    /// Defaults to 128.
    pub fn binary_buffer_capacity(&mut self, binary_buffer_capacity: usize) -> &mut Self {
        self.binary_buffer_capacity = binary_buffer_capacity;
        self
    }

    /// Sets the initial nesting depth capacity.
    ///
    /// Defaults to 32.
    pub fn stack_capacity(&mut self, stack_capacity: usize) -> &mut Self {
        self.stack_capacity = stack_capacity;
        self
    }

    /// Sets the size of the scratch space used to convert numbers and binary literals to text.
    ///
    /// Values whose textual form does not fit are rejected with [`ErrorKind::UnableToConvertValue`].
    ///
    /// Defaults to 128.
    ///
    /// [`ErrorKind::UnableToConvertValue`]: crate::ErrorKind::UnableToConvertValue
    pub fn staging_capacity(&mut self, staging_capacity: usize) -> &mut Self {
        self.staging_capacity = staging_capacity;
        self
    }

    /// Creates a new [`Writer`].
    pub fn build(&self) -> Writer {
        Writer {
            main: Buffer::with_capacity(self.main_buffer_capacity),
            binary: Buffer::with_capacity(self.binary_buffer_capacity),
            stack: Buffer::with_capacity(self.stack_capacity),
            staging: String::with_capacity(self.staging_capacity),
            staging_capacity: self.staging_capacity,
            has_binary: false,
        }
    }
}

/// A structure for emitting sdsf documents one value at a time.
///
/// Every value outside of an array needs a name; inside of an array names are ignored. A call that fails leaves the
/// writer exactly as it was, so the caller may carry on with other values.
///
/// ```rust
/// use serde_sdsf::Writer;
///
/// # fn main() -> Result<(), serde_sdsf::Error> {
/// let mut writer = Writer::new();
/// writer.write_int(Some("count"), 3)?;
/// writer.begin_array(Some("list"))?;
/// writer.write_bool(None, true)?;
/// writer.write_str(None, "x")?;
/// writer.end_array()?;
///
/// let out = writer.finish()?;
/// assert_eq!(out, b"count 3\r\nlist [\r\n    t,\r\n    \"x\"\r\n]\r\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Writer {
    main: Buffer<u8>,
    binary: Buffer<u8>,
    stack: Buffer<Entry>,
    staging: String,
    staging_capacity: usize,
    has_binary: bool,
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new()
    }
}

impl Writer {
    /// Creates a new `Writer` with default capacities.
    pub fn new() -> Self {
        Writer::builder().build()
    }

    /// Returns a builder used to configure a `Writer`.
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn in_array(&self) -> bool {
        self.stack.last() == Some(&Entry::Array)
    }

    fn check_name(&self, name: Option<&str>) -> Result<(), Error> {
        if self.in_array() {
            return Ok(());
        }

        let name = name.ok_or_else(Error::no_name_provided)?;
        check_identifier(name)
    }

    fn check_staged(&self) -> Result<(), Error> {
        if self.staging.len() > self.staging_capacity {
            return Err(Error::unable_to_convert_value(
                "converted value exceeds the staging capacity",
            ));
        }
        Ok(())
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.main.extend_from_slice(INDENT);
        }
    }

    // must only be called after check_name
    fn begin_value(&mut self, name: Option<&str>) {
        self.indent(self.stack.len());
        if !self.in_array() {
            if let Some(name) = name {
                self.main.extend_from_slice(name.as_bytes());
                self.main.push(b' ');
            }
        }
    }

    fn end_value(&mut self) {
        if self.in_array() {
            self.main.push(b',');
        }
        self.main.extend_from_slice(NEWLINE);
    }

    fn write_staged(&mut self, name: Option<&str>) -> Result<(), Error> {
        self.check_staged()?;
        self.check_name(name)?;

        self.begin_value(name);
        self.main.extend_from_slice(self.staging.as_bytes());
        self.end_value();
        Ok(())
    }

    /// Writes a boolean value.
    pub fn write_bool(&mut self, name: Option<&str>, v: bool) -> Result<(), Error> {
        self.check_name(name)?;

        self.begin_value(name);
        self.main.push(if v { b't' } else { b'f' });
        self.end_value();
        Ok(())
    }

    /// Writes an integer value.
    pub fn write_int(&mut self, name: Option<&str>, v: i32) -> Result<(), Error> {
        let mut buf = itoa::Buffer::new();
        self.staging.clear();
        self.staging.push_str(buf.format(v));

        self.write_staged(name)
    }

    /// Writes a floating point value.
    ///
    /// The value is written in its shortest form that parses back to the same `f32`, always including a decimal
    /// point. Infinities and NaN can't be represented.
    pub fn write_float(&mut self, name: Option<&str>, v: f32) -> Result<(), Error> {
        if !v.is_finite() {
            return Err(Error::unable_to_convert_value(
                "infinite and NaN floats can't be represented",
            ));
        }

        self.staging.clear();
        write!(self.staging, "{}", v)
            .map_err(|_| Error::unable_to_convert_value("float formatting failed"))?;
        if !self.staging.contains('.') {
            self.staging.push_str(".0");
        }

        self.write_staged(name)
    }

    /// Writes a string value.
    ///
    /// Strings are written verbatim and so can't contain `"`.
    pub fn write_str<S>(&mut self, name: Option<&str>, v: S) -> Result<(), Error>
    where
        S: AsRef<[u8]>,
    {
        let v = v.as_ref();
        if memchr::memchr(b'"', v).is_some() {
            return Err(Error::invalid_string());
        }
        self.check_name(name)?;

        self.begin_value(name);
        self.main.push(b'"');
        self.main.extend_from_slice(v);
        self.main.push(b'"');
        self.end_value();
        Ok(())
    }

    /// Writes a binary value.
    ///
    /// The bytes are appended to the binary data blob written at the end of the document, and the value refers to
    /// them by range.
    pub fn write_binary(&mut self, name: Option<&str>, v: &[u8]) -> Result<(), Error> {
        let from = self.binary.len();
        let to = from + v.len();

        let mut buf = itoa::Buffer::new();
        self.staging.clear();
        self.staging.push('b');
        self.staging.push_str(buf.format(from));
        self.staging.push('-');
        self.staging.push_str(buf.format(to));

        self.write_staged(name)?;
        self.binary.extend_from_slice(v);
        self.has_binary = true;
        Ok(())
    }

    /// Begins an array value.
    pub fn begin_array(&mut self, name: Option<&str>) -> Result<(), Error> {
        self.check_name(name)?;

        self.begin_value(name);
        self.main.push(b'[');
        self.main.extend_from_slice(NEWLINE);
        self.stack.push(Entry::Array);
        Ok(())
    }

    /// Ends the innermost array value.
    pub fn end_array(&mut self) -> Result<(), Error> {
        if self.stack.last() != Some(&Entry::Array) {
            return Err(Error::unable_to_end_array());
        }
        self.stack.truncate(self.stack.len() - 1);

        // the last member doesn't get a separator
        if self.main.ends_with(b",\r\n") {
            self.main.truncate(self.main.len() - 3);
            self.main.extend_from_slice(NEWLINE);
        }

        self.indent(self.stack.len());
        self.main.push(b']');
        self.end_value();
        Ok(())
    }

    /// Begins a composite value.
    pub fn begin_composite(&mut self, name: Option<&str>) -> Result<(), Error> {
        self.check_name(name)?;

        self.begin_value(name);
        self.main.push(b'{');
        self.main.extend_from_slice(NEWLINE);
        self.stack.push(Entry::Composite);
        Ok(())
    }

    /// Ends the innermost composite value.
    pub fn end_composite(&mut self) -> Result<(), Error> {
        if self.stack.last() != Some(&Entry::Composite) {
            return Err(Error::unable_to_end_composite());
        }
        self.stack.truncate(self.stack.len() - 1);

        self.indent(self.stack.len());
        self.main.push(b'}');
        self.end_value();
        Ok(())
    }

    /// Consumes the `Writer`, returning the finished document.
    ///
    /// Fails if an array or composite is still open.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        if !self.stack.is_empty() {
            return Err(Error::unfinished_array_or_composite());
        }

        let mut main = self.main;
        if self.has_binary {
            main.extend_from_slice(b"\r\n@");
            main.extend_from_slice(&self.binary);
        }

        debug!(
            "finished sdsf document: {} bytes, {} bytes of binary data",
            main.len(),
            self.binary.len()
        );
        Ok(main.into_vec())
    }
}
