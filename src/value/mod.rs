//! The tree of values produced by parsing an sdsf document.
use crate::buffer::Buffer;
use crate::de::arena::{Span, StringArena};
use crate::Error;
use bstr::{BStr, ByteSlice};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::slice;

/// The index of a node within a [`Document`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the position of the node in document order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A range of the binary data blob trailing a document.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Binary {
    /// The offset of the first byte of the value.
    pub offset: u64,
    /// The length of the value in bytes.
    pub size: u64,
}

#[derive(Debug)]
pub(crate) enum Slot {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(Span),
    Binary(Binary),
    Array(Buffer<NodeId>),
    Composite(Buffer<NodeId>),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) name: Option<Span>,
    // None until the parser has seen the node's content
    pub(crate) slot: Option<Slot>,
}

/// A parsed sdsf document.
///
/// The document owns every node, the text of all names and string values, and the binary data blob. Nodes are
/// addressed by [`NodeId`] and viewed through [`NodeRef`].
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: Buffer<Node>,
    pub(crate) roots: Buffer<NodeId>,
    pub(crate) strings: StringArena,
    pub(crate) blob: Option<Vec<u8>>,
}

impl Document {
    /// Parses a document using default capacities.
    pub fn parse(input: &[u8]) -> Result<Document, Error> {
        Document::builder().parse(input)
    }

    /// Returns a builder used to configure the parser's initial capacities.
    pub fn builder() -> crate::de::Builder {
        crate::de::Builder::default()
    }

    /// Returns an iterator over the top-level values in document order.
    pub fn roots(&self) -> Children<'_> {
        Children {
            doc: self,
            ids: self.roots.iter(),
        }
    }

    /// Returns the first top-level value with the given name.
    pub fn get<N>(&self, name: N) -> Option<NodeRef<'_>>
    where
        N: AsRef<[u8]>,
    {
        self.roots().find(|n| n.name() == Some(BStr::new(name.as_ref())))
    }

    /// Returns the node with the given ID.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if id.0 < self.nodes.len() {
            Some(NodeRef { doc: self, id })
        } else {
            None
        }
    }

    /// Returns the binary data blob, if the document has one.
    pub fn blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }

    /// Returns the total number of values in the document, at any depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the document contains no values.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn binary(&self, binary: Binary) -> &[u8] {
        let start = binary.offset as usize;
        let end = start + binary.size as usize;
        self.blob
            .as_deref()
            .and_then(|blob| blob.get(start..end))
            .unwrap_or_default()
    }
}

/// A borrowed view of a value.
#[derive(Clone, Debug)]
pub enum Value<'a> {
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i32),
    /// A floating point value.
    Float(f32),
    /// A string value.
    String(&'a BStr),
    /// A binary value, pointing into the document's blob.
    Binary(Binary),
    /// An array of unnamed values.
    Array(Children<'a>),
    /// A composite of named values.
    Composite(Children<'a>),
}

/// A reference to a node within a [`Document`].
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.doc.nodes[self.id.0]
    }

    fn slot(&self) -> &'a Slot {
        match &self.node().slot {
            Some(slot) => slot,
            None => unreachable!("unresolved node in a parsed document"),
        }
    }

    fn children_of(&self, ids: &'a [NodeId]) -> Children<'a> {
        Children {
            doc: self.doc,
            ids: ids.iter(),
        }
    }

    /// Returns the node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's name, or `None` for array members.
    pub fn name(&self) -> Option<&'a BStr> {
        self.node().name.map(|span| self.doc.strings.get(span))
    }

    /// Returns the node's value.
    pub fn value(&self) -> Value<'a> {
        match self.slot() {
            Slot::Bool(v) => Value::Bool(*v),
            Slot::Int(v) => Value::Int(*v),
            Slot::Float(v) => Value::Float(*v),
            Slot::String(span) => Value::String(self.doc.strings.get(*span)),
            Slot::Binary(v) => Value::Binary(*v),
            Slot::Array(ids) => Value::Array(self.children_of(ids)),
            Slot::Composite(ids) => Value::Composite(self.children_of(ids)),
        }
    }

    /// Returns the enclosing array or composite, or `None` for top-level values.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef { doc: self.doc, id })
    }

    /// Returns the members of an array or composite.
    ///
    /// The iterator is empty for scalar values.
    pub fn children(&self) -> Children<'a> {
        match self.slot() {
            Slot::Array(ids) | Slot::Composite(ids) => self.children_of(ids),
            _ => self.children_of(&[]),
        }
    }

    /// Returns the first member of a composite with the given name.
    pub fn get<N>(&self, name: N) -> Option<NodeRef<'a>>
    where
        N: AsRef<[u8]>,
    {
        match self.slot() {
            Slot::Composite(ids) => self
                .children_of(ids)
                .find(|n| n.name() == Some(BStr::new(name.as_ref()))),
            _ => None,
        }
    }

    /// Returns the value if it is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self.slot() {
            Slot::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value if it is an integer.
    pub fn as_int(&self) -> Option<i32> {
        match self.slot() {
            Slot::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value if it is a float.
    pub fn as_float(&self) -> Option<f32> {
        match self.slot() {
            Slot::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value if it is a string.
    pub fn as_str(&self) -> Option<&'a BStr> {
        match self.slot() {
            Slot::String(span) => Some(self.doc.strings.get(*span)),
            _ => None,
        }
    }

    /// Returns the referenced bytes of the blob if the value is binary.
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self.slot() {
            Slot::Binary(v) => Some(self.doc.binary(*v)),
            _ => None,
        }
    }
}

/// An iterator over the members of an array, a composite, or the top level of a [`Document`].
#[derive(Clone, Debug)]
pub struct Children<'a> {
    doc: &'a Document,
    ids: slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        self.ids.next().map(|&id| NodeRef { doc: self.doc, id })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.roots.len()))?;
        for node in self.roots() {
            let name = node.name().map_or_else(Default::default, |n| n.to_str_lossy());
            map.serialize_entry(&*name, &node)?;
        }
        map.end()
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.value() {
            Value::Bool(v) => serializer.serialize_bool(v),
            Value::Int(v) => serializer.serialize_i32(v),
            Value::Float(v) => serializer.serialize_f32(v),
            Value::String(v) => serializer.serialize_str(&v.to_str_lossy()),
            Value::Binary(v) => serde_bytes::Bytes::new(self.doc.binary(v)).serialize(serializer),
            Value::Array(children) => serializer.collect_seq(children),
            Value::Composite(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for node in children {
                    let name = node.name().map_or_else(Default::default, |n| n.to_str_lossy());
                    map.serialize_entry(&*name, &node)?;
                }
                map.end()
            }
        }
    }
}
