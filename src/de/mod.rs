//! Deserialize sdsf data into a document tree or a Rust data structure.
use crate::buffer::Buffer;
use crate::de::arena::{Span, StringArena};
use crate::de::node_deserializer::DocumentDeserializer;
use crate::de::tokenizer::{Token, TokenKind, Tokenizer};
use crate::value::{Binary, Document, Node, NodeId, Slot};
use crate::Error;
use log::debug;
use serde::de::{Deserialize, DeserializeOwned};
use std::str;

pub(crate) mod arena;
mod node_deserializer;
mod tokenizer;

/// Parses a slice of sdsf data into a [`Document`] using default capacities.
pub fn from_bytes(input: &[u8]) -> Result<Document, Error> {
    Document::parse(input)
}

/// Deserializes an instance of type `T` from a slice of sdsf data.
///
/// The top level of the document is presented to `T` as a map of its named values.
pub fn from_slice<T>(slice: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let doc = Document::parse(slice)?;
    from_document(&doc)
}

/// Deserializes an instance of type `T` from a parsed document.
///
/// Strings and binary values can be borrowed from the document.
pub fn from_document<'a, T>(doc: &'a Document) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    T::deserialize(DocumentDeserializer::new(doc))
}

/// A builder to configure the parser's initial capacities.
///
/// All storage grows on demand; the capacities only control the initial allocations.
#[derive(Clone, Debug)]
pub struct Builder {
    values_capacity: usize,
    children_capacity: usize,
    strings_capacity: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            values_capacity: 1024,
            children_capacity: 8,
            strings_capacity: 2048,
        }
    }
}

impl Builder {
    /// Sets the initial capacity of the value store.
    ///
    /// Defaults to 1024.
    pub fn values_capacity(&mut self, values_capacity: usize) -> &mut Self {
        self.values_capacity = values_capacity;
        self
    }

    /// Sets the initial capacity of the member list of each array and composite.
    ///
    /// Defaults to 8.
    pub fn children_capacity(&mut self, children_capacity: usize) -> &mut Self {
        self.children_capacity = children_capacity;
        self
    }

    /// Sets the initial capacity, in bytes, of the store for names and string values.
    ///
    /// Defaults to 2048.
    pub fn strings_capacity(&mut self, strings_capacity: usize) -> &mut Self {
        self.strings_capacity = strings_capacity;
        self
    }

    /// Parses a slice of sdsf data into a [`Document`].
    pub fn parse(&self, input: &[u8]) -> Result<Document, Error> {
        Parser::new(self, input).parse()
    }
}

#[derive(Copy, Clone)]
enum Context {
    TopLevel,
    Unresolved(NodeId),
    Array { id: NodeId, empty: bool },
    Composite(NodeId),
}

struct Parser<'de, 'b> {
    builder: &'b Builder,
    tokenizer: Tokenizer<'de>,
    doc: Document,
    current: Option<NodeId>,
    after_comma: bool,
    expects_blob: bool,
    // furthest binary literal end and the offset of its literal
    binary_end: u64,
    binary_end_offset: usize,
}

impl<'de, 'b> Parser<'de, 'b> {
    fn new(builder: &'b Builder, input: &'de [u8]) -> Self {
        Parser {
            builder,
            tokenizer: Tokenizer::new(input),
            doc: Document {
                nodes: Buffer::with_capacity(builder.values_capacity),
                roots: Buffer::with_capacity(builder.children_capacity),
                strings: StringArena::with_capacity(builder.strings_capacity),
                blob: None,
            },
            current: None,
            after_comma: false,
            expects_blob: false,
            binary_end: 0,
            binary_end_offset: 0,
        }
    }

    fn parse(mut self) -> Result<Document, Error> {
        while let Some(token) = self.tokenizer.next_token()? {
            match token.kind {
                TokenKind::Identifier => self.identifier(token)?,
                TokenKind::ReservedSymbol if token.text == b"@" => {
                    self.blob(token)?;
                    break;
                }
                TokenKind::ReservedSymbol => self.reserved_symbol(token)?,
                _ => self.literal(token)?,
            }
        }

        self.end()
    }

    fn context(&self) -> Context {
        let id = match self.current {
            Some(id) => id,
            None => return Context::TopLevel,
        };

        match &self.doc.nodes[id.0].slot {
            None => Context::Unresolved(id),
            Some(Slot::Array(children)) => Context::Array {
                id,
                empty: children.is_empty(),
            },
            Some(Slot::Composite(_)) => Context::Composite(id),
            Some(_) => unreachable!("scalar values are never open"),
        }
    }

    fn push_node(&mut self, parent: Option<NodeId>, name: Option<Span>, slot: Option<Slot>) -> NodeId {
        let id = NodeId(self.doc.nodes.len());

        let siblings = match parent {
            Some(parent) => match self.doc.nodes.get_mut(parent.0).and_then(|n| n.slot.as_mut()) {
                Some(Slot::Array(children)) | Some(Slot::Composite(children)) => children,
                _ => unreachable!("values can only be added to arrays and composites"),
            },
            None => &mut self.doc.roots,
        };
        siblings.push(id);

        self.doc.nodes.push(Node { parent, name, slot });
        id
    }

    fn resolve(&mut self, id: NodeId, slot: Slot) {
        if let Some(node) = self.doc.nodes.get_mut(id.0) {
            node.slot = Some(slot);
        }
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.doc.nodes[id.0].parent
    }

    fn identifier(&mut self, token: Token<'de>) -> Result<(), Error> {
        let parent = match self.context() {
            Context::TopLevel => None,
            Context::Composite(id) => Some(id),
            Context::Unresolved(_) => {
                return Err(Error::unexpected_identifier(
                    token.offset,
                    "expected a value after the previous identifier",
                ))
            }
            Context::Array { .. } => {
                return Err(Error::unexpected_identifier(
                    token.offset,
                    "array members can't be named",
                ))
            }
        };

        let name = self.doc.strings.save(token.text);
        let id = self.push_node(parent, Some(name), None);
        self.current = Some(id);
        self.after_comma = false;
        Ok(())
    }

    fn reserved_symbol(&mut self, token: Token<'de>) -> Result<(), Error> {
        match token.text[0] {
            // the quotes around a string literal have no structural meaning
            b'"' => return Ok(()),
            b',' => match self.context() {
                Context::Array { empty: false, .. } if !self.after_comma => {}
                _ => {
                    return Err(Error::unexpected_reserved_symbol(
                        token.offset,
                        "',' must separate two array members",
                    ))
                }
            },
            b']' => match self.context() {
                Context::Array { id, .. } if !self.after_comma => self.current = self.parent(id),
                Context::Array { .. } => {
                    return Err(Error::unexpected_reserved_symbol(
                        token.offset,
                        "trailing ',' in array",
                    ))
                }
                _ => {
                    return Err(Error::unexpected_reserved_symbol(
                        token.offset,
                        "']' outside of an array",
                    ))
                }
            },
            b'}' => match self.context() {
                Context::Composite(id) => self.current = self.parent(id),
                _ => {
                    return Err(Error::unexpected_reserved_symbol(
                        token.offset,
                        "'}' outside of a composite",
                    ))
                }
            },
            b'[' => self.open(token, Slot::Array(self.children()))?,
            b'{' => self.open(token, Slot::Composite(self.children()))?,
            _ => {
                return Err(Error::unexpected_reserved_symbol(
                    token.offset,
                    "unexpected symbol",
                ))
            }
        }

        self.after_comma = token.text[0] == b',';
        Ok(())
    }

    fn children(&self) -> Buffer<NodeId> {
        Buffer::with_capacity(self.builder.children_capacity)
    }

    fn open(&mut self, token: Token<'de>, slot: Slot) -> Result<(), Error> {
        match self.context() {
            Context::Unresolved(id) => self.resolve(id, slot),
            Context::Array { id, empty } => {
                self.check_separated(token, empty)?;
                let child = self.push_node(Some(id), None, Some(slot));
                self.current = Some(child);
            }
            Context::TopLevel => {
                return Err(Error::unexpected_reserved_symbol(
                    token.offset,
                    "top-level values must be named",
                ))
            }
            Context::Composite(_) => {
                return Err(Error::unexpected_reserved_symbol(
                    token.offset,
                    "composite members must be named",
                ))
            }
        }

        Ok(())
    }

    fn check_separated(&self, token: Token<'de>, empty: bool) -> Result<(), Error> {
        if empty || self.after_comma {
            Ok(())
        } else {
            Err(Error::expected_comma(token.offset))
        }
    }

    fn literal(&mut self, token: Token<'de>) -> Result<(), Error> {
        let context = self.context();
        match context {
            Context::Unresolved(_) | Context::Array { .. } => {}
            Context::TopLevel => {
                return Err(Error::expected_identifier(
                    token.offset,
                    "top-level values must be named",
                ))
            }
            Context::Composite(_) => {
                return Err(Error::expected_identifier(
                    token.offset,
                    "composite members must be named",
                ))
            }
        }

        let slot = self.parse_literal(token)?;

        match context {
            Context::Unresolved(id) => {
                self.resolve(id, slot);
                self.current = self.parent(id);
            }
            Context::Array { id, empty } => {
                self.check_separated(token, empty)?;
                self.push_node(Some(id), None, Some(slot));
            }
            Context::TopLevel | Context::Composite(_) => {}
        }

        self.after_comma = false;
        Ok(())
    }

    fn parse_literal(&mut self, token: Token<'de>) -> Result<Slot, Error> {
        match token.kind {
            TokenKind::BoolLiteral => Ok(Slot::Bool(token.text == b"t")),
            TokenKind::IntLiteral => parse_number(token).map(Slot::Int),
            TokenKind::FloatLiteral => {
                let v = parse_number::<f32>(token)?;
                if !v.is_finite() {
                    return Err(Error::invalid_number(token.offset, "float out of range"));
                }
                Ok(Slot::Float(v))
            }
            TokenKind::StringLiteral => Ok(Slot::String(self.doc.strings.save(token.text))),
            TokenKind::BinaryLiteral => {
                let binary = parse_binary(token)?;
                let end = binary.offset + binary.size;
                if !self.expects_blob || end > self.binary_end {
                    self.binary_end = end;
                    self.binary_end_offset = token.offset;
                }
                self.expects_blob = true;
                Ok(Slot::Binary(binary))
            }
            TokenKind::Identifier | TokenKind::ReservedSymbol => {
                unreachable!("not a literal token")
            }
        }
    }

    fn blob(&mut self, token: Token<'de>) -> Result<(), Error> {
        if !self.expects_blob {
            return Err(Error::unexpected_binary_blob(token.offset));
        }

        self.doc.blob = Some(self.tokenizer.remaining().to_vec());
        Ok(())
    }

    fn end(self) -> Result<Document, Error> {
        match self.context() {
            Context::TopLevel => {}
            Context::Unresolved(_) => return Err(Error::eof_while_parsing_value()),
            Context::Array { .. } => return Err(Error::eof_while_parsing_array()),
            Context::Composite(_) => return Err(Error::eof_while_parsing_composite()),
        }

        if self.expects_blob {
            let blob = self.doc.blob.as_ref().ok_or_else(Error::missing_binary_blob)?;
            if self.binary_end > blob.len() as u64 {
                return Err(Error::invalid_binary_literal(
                    Some(self.binary_end_offset),
                    "range extends past the end of the binary data blob",
                ));
            }
        }

        debug!(
            "parsed sdsf document: {} values, {} top-level, {} bytes of text, {} bytes of binary data",
            self.doc.nodes.len(),
            self.doc.roots.len(),
            self.doc.strings.len(),
            self.doc.blob.as_ref().map_or(0, Vec::len),
        );
        Ok(self.doc)
    }
}

fn parse_number<T>(token: Token<'_>) -> Result<T, Error>
where
    T: str::FromStr,
{
    str::from_utf8(token.text)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::invalid_number(token.offset, "malformed or out of range"))
}

fn parse_binary(token: Token<'_>) -> Result<Binary, Error> {
    let invalid = |detail| Error::invalid_binary_literal(Some(token.offset), detail);

    let range = &token.text[1..];
    let dash = memchr::memchr(b'-', range).ok_or_else(|| invalid("expected 'b<from>-<to>'"))?;
    let (from, to) = (&range[..dash], &range[dash + 1..]);
    if from.is_empty() || to.is_empty() {
        return Err(invalid("expected 'b<from>-<to>'"));
    }

    let from = parse_offset(from).ok_or_else(|| invalid("offset out of range"))?;
    let to = parse_offset(to).ok_or_else(|| invalid("offset out of range"))?;
    if to < from {
        return Err(invalid("range ends before it starts"));
    }

    Ok(Binary {
        offset: from,
        size: to - from,
    })
}

fn parse_offset(digits: &[u8]) -> Option<u64> {
    str::from_utf8(digits).ok()?.parse().ok()
}
