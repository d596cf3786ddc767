//! Serialize a Rust data structure into sdsf data.
use crate::ser::compound::{Compound, End};
pub use crate::ser::writer::{Builder, Writer};
use crate::Error;
use serde::Serialize;
use std::convert::TryFrom;

mod compound;
mod key_serializer;
mod writer;

/// Serializes the given data structure to an sdsf byte vector using default writer settings.
///
/// The value must be a struct or map (or a newtype, option or enum variant wrapping one); its fields become the
/// top-level values of the document.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, Error>
where
    T: Serialize + ?Sized,
{
    let mut writer = Writer::new();
    value.serialize(Serializer::new(&mut writer))?;
    writer.finish()
}

/// A structure for serializing Rust values into a [`Writer`].
///
/// Structs and maps serialized without a name outside of any array are written as top-level values rather than as a
/// composite.
pub struct Serializer<'w, 'n> {
    writer: &'w mut Writer,
    name: Option<&'n str>,
}

impl<'w> Serializer<'w, 'static> {
    /// Creates a new `Serializer` writing unnamed values.
    pub fn new(writer: &'w mut Writer) -> Self {
        Serializer { writer, name: None }
    }
}

impl<'w, 'n> Serializer<'w, 'n> {
    /// Creates a new `Serializer` writing a single value with the given name.
    pub fn named(writer: &'w mut Writer, name: &'n str) -> Self {
        Serializer {
            writer,
            name: Some(name),
        }
    }

    // unnamed values outside of arrays only exist at the top level
    fn is_top_level(&self) -> bool {
        self.name.is_none() && !self.writer.in_array()
    }

    fn serialize_int<I>(self, v: I) -> Result<(), Error>
    where
        i32: TryFrom<I>,
    {
        let v = i32::try_from(v)
            .map_err(|_| Error::unable_to_convert_value("integer out of range of i32"))?;
        self.writer.write_int(self.name, v)
    }

    fn begin_variant(self, variant: &'static str) -> Result<Serializer<'w, 'static>, Error> {
        if !self.is_top_level() {
            self.writer.begin_composite(self.name)?;
        }
        Ok(Serializer {
            writer: self.writer,
            name: Some(variant),
        })
    }
}

impl<'w, 'n> serde::Serializer for Serializer<'w, 'n> {
    type Ok = ();

    type Error = Error;

    type SerializeSeq = Compound<'w>;

    type SerializeTuple = Compound<'w>;

    type SerializeTupleStruct = Compound<'w>;

    type SerializeTupleVariant = Compound<'w>;

    type SerializeMap = Compound<'w>;

    type SerializeStruct = Compound<'w>;

    type SerializeStructVariant = Compound<'w>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
        self.writer.write_bool(self.name, v)
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
        self.writer.write_int(self.name, v)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok, Self::Error> {
        self.serialize_int(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        self.writer.write_float(self.name, v)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        self.writer.write_float(self.name, v as f32)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
        self.serialize_str(v.encode_utf8(&mut [0; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        self.writer.write_str(self.name, v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        self.writer.write_binary(self.name, v)
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        // there's no null literal, so named empty values are left out entirely
        if self.writer.in_array() {
            return Err(Error::no_value_provided());
        }
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let top_level = self.is_top_level();
        let Serializer { writer, name } = self.begin_variant(variant)?;
        value.serialize(Serializer {
            writer: &mut *writer,
            name,
        })?;
        if !top_level {
            writer.end_composite()?;
        }
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        self.writer.begin_array(self.name)?;
        Ok(Compound::new(self.writer, End::Array))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        let end = if self.is_top_level() {
            End::Array
        } else {
            End::VariantArray
        };
        let ser = self.begin_variant(variant)?;
        ser.writer.begin_array(ser.name)?;
        Ok(Compound::new(ser.writer, end))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        if self.is_top_level() {
            return Ok(Compound::new(self.writer, End::Nothing));
        }

        self.writer.begin_composite(self.name)?;
        Ok(Compound::new(self.writer, End::Composite))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        let end = if self.is_top_level() {
            End::Composite
        } else {
            End::VariantComposite
        };
        let ser = self.begin_variant(variant)?;
        ser.writer.begin_composite(ser.name)?;
        Ok(Compound::new(ser.writer, end))
    }

    fn is_human_readable(&self) -> bool {
        true
    }
}
