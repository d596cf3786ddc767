use crate::ser::key_serializer::KeySerializer;
use crate::ser::{Serializer, Writer};
use crate::Error;
use serde::ser::{
    SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant, SerializeTuple,
    SerializeTupleStruct, SerializeTupleVariant,
};
use serde::Serialize;

/// What to close once all members are written.
pub enum End {
    /// Members were written directly to the top level.
    Nothing,
    Array,
    Composite,
    /// An array wrapped in a composite named after the variant's owner.
    VariantArray,
    VariantComposite,
}

pub struct Compound<'w> {
    writer: &'w mut Writer,
    end: End,
    key: Option<String>,
}

impl<'w> Compound<'w> {
    pub fn new(writer: &'w mut Writer, end: End) -> Self {
        Compound {
            writer,
            end,
            key: None,
        }
    }

    fn close(self) -> Result<(), Error> {
        match self.end {
            End::Nothing => Ok(()),
            End::Array => self.writer.end_array(),
            End::Composite => self.writer.end_composite(),
            End::VariantArray => {
                self.writer.end_array()?;
                self.writer.end_composite()
            }
            End::VariantComposite => {
                self.writer.end_composite()?;
                self.writer.end_composite()
            }
        }
    }
}

impl<'w> SerializeSeq for Compound<'w> {
    type Ok = ();

    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(Serializer::new(&mut *self.writer))
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.close()
    }
}

impl<'w> SerializeTuple for Compound<'w> {
    type Ok = ();

    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.close()
    }
}

impl<'w> SerializeTupleStruct for Compound<'w> {
    type Ok = ();

    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.close()
    }
}

impl<'w> SerializeTupleVariant for Compound<'w> {
    type Ok = ();

    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.close()
    }
}

impl<'w> SerializeMap for Compound<'w> {
    type Ok = ();

    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| <Error as serde::ser::Error>::custom("value serialized before its key"))?;
        value.serialize(Serializer::named(&mut *self.writer, &key))
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.close()
    }
}

impl<'w> SerializeStruct for Compound<'w> {
    type Ok = ();

    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(Serializer::named(&mut *self.writer, key))
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.close()
    }
}

impl<'w> SerializeStructVariant for Compound<'w> {
    type Ok = ();

    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.close()
    }
}
