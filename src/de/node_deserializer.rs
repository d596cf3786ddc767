use crate::value::{Children, Document, NodeRef, Value};
use crate::Error;
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, Deserialize, Visitor};
use serde::forward_to_deserialize_any;
use std::str;

fn str_of(bytes: &[u8]) -> Result<&str, Error> {
    str::from_utf8(bytes).map_err(|_| Error::invalid_utf8())
}

fn name_of<'a>(node: &NodeRef<'a>) -> Result<&'a str, Error> {
    match node.name() {
        Some(name) => str_of(name),
        None => Ok(""),
    }
}

/// Presents the top level of a document as a map of its named values.
pub(crate) struct DocumentDeserializer<'a> {
    doc: &'a Document,
}

impl<'a> DocumentDeserializer<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        DocumentDeserializer { doc }
    }
}

impl<'de> de::Deserializer<'de> for DocumentDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(MapAccess::new(self.doc.roots()))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let mut roots = self.doc.roots();
        match (roots.next(), roots.len()) {
            (Some(node), 0) => visitor.visit_enum(VariantAccess::new(node)?),
            _ => Err(de::Error::invalid_length(
                self.doc.roots().len(),
                &"a single top-level value",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }

    fn is_human_readable(&self) -> bool {
        true
    }
}

pub(crate) struct NodeDeserializer<'a> {
    node: NodeRef<'a>,
}

impl<'de> de::Deserializer<'de> for NodeDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.node.value() {
            Value::Bool(v) => visitor.visit_bool(v),
            Value::Int(v) => visitor.visit_i32(v),
            Value::Float(v) => visitor.visit_f32(v),
            Value::String(v) => visitor.visit_borrowed_str(str_of(v)?),
            Value::Binary(_) => {
                visitor.visit_borrowed_bytes(self.node.as_bytes().unwrap_or_default())
            }
            Value::Array(children) => visitor.visit_seq(SeqAccess { children }),
            Value::Composite(children) => visitor.visit_map(MapAccess::new(children)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        // absent values are omitted from the document entirely
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.node.value() {
            Value::String(v) => visitor.visit_enum(UnitVariantAccess {
                variant: str_of(v)?,
            }),
            Value::Composite(mut children) if children.len() == 1 => {
                match children.next() {
                    Some(node) => visitor.visit_enum(VariantAccess::new(node)?),
                    None => Err(de::Error::invalid_length(0, &"a single-member composite")),
                }
            }
            _ => Err(de::Error::invalid_type(
                de::Unexpected::Other("non-variant value"),
                &"a string or a single-member composite",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }

    fn is_human_readable(&self) -> bool {
        true
    }
}

struct SeqAccess<'a> {
    children: Children<'a>,
}

impl<'de> de::SeqAccess<'de> for SeqAccess<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.children.next() {
            Some(node) => seed.deserialize(NodeDeserializer { node }).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.children.len())
    }
}

struct MapAccess<'a> {
    children: Children<'a>,
    value: Option<NodeRef<'a>>,
}

impl<'a> MapAccess<'a> {
    fn new(children: Children<'a>) -> Self {
        MapAccess {
            children,
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: de::DeserializeSeed<'de>,
    {
        let node = match self.children.next() {
            Some(node) => node,
            None => return Ok(None),
        };
        self.value = Some(node);

        seed.deserialize(BorrowedStrDeserializer::<Error>::new(name_of(&node)?))
            .map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(node) => seed.deserialize(NodeDeserializer { node }),
            None => Err(de::Error::custom("value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.children.len())
    }
}

/// A variant stored as a composite member, named after the variant.
struct VariantAccess<'a> {
    variant: &'a str,
    node: NodeRef<'a>,
}

impl<'a> VariantAccess<'a> {
    fn new(node: NodeRef<'a>) -> Result<Self, Error> {
        Ok(VariantAccess {
            variant: name_of(&node)?,
            node,
        })
    }
}

impl<'de> de::EnumAccess<'de> for VariantAccess<'de> {
    type Error = Error;

    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant), Self::Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((variant, self))
    }
}

impl<'de> de::VariantAccess<'de> for VariantAccess<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Self::Error> {
        de::IgnoredAny::deserialize(NodeDeserializer { node: self.node })?;
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Self::Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(NodeDeserializer { node: self.node })
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(NodeDeserializer { node: self.node }, visitor)
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_map(NodeDeserializer { node: self.node }, visitor)
    }
}

/// A unit variant stored as a string value.
struct UnitVariantAccess<'a> {
    variant: &'a str,
}

impl<'de> de::EnumAccess<'de> for UnitVariantAccess<'de> {
    type Error = Error;

    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant), Self::Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((variant, self))
    }
}

impl<'de> de::VariantAccess<'de> for UnitVariantAccess<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, _seed: T) -> Result<T::Value, Self::Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        Err(de::Error::invalid_type(
            de::Unexpected::UnitVariant,
            &"newtype variant",
        ))
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        Err(de::Error::invalid_type(
            de::Unexpected::UnitVariant,
            &"tuple variant",
        ))
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        Err(de::Error::invalid_type(
            de::Unexpected::UnitVariant,
            &"struct variant",
        ))
    }
}
