//! An implementation of the simple data storage format (sdsf), with Serde support.
//!
//! sdsf is a small text-based hierarchical format. A document is a sequence of named values:
//!
//! ```text
//! flag t
//! count 228
//! ratio 0.5
//! text "String string string!"
//! list [1, 2, 3]
//! point {
//!     x 1
//!     y -2
//! }
//! payload b0-2
//!
//! @hi
//! ```
//!
//! * Booleans are `t` and `f`, integers are 32 bit and floats are 32 bit with a mandatory `.`.
//! * Strings are delimited by `"` and taken verbatim; there are no escape sequences, so a string can't contain `"`.
//! * Arrays hold unnamed, comma separated values. Composites hold named values without separators.
//! * Binary values are written as `b<from>-<to>`, a byte range of the binary data blob which follows the `@` at the
//!     end of the document.
//!
//! # Document Trees
//!
//! [`Document::parse`] reads a document into a tree which can be navigated by name:
//!
//! ```rust
//! use serde_sdsf::value::Value;
//! use serde_sdsf::{Document, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let doc = Document::parse(b"root {a 1 b [1,2,{c 3}] }")?;
//!
//!     let root = doc.get("root").expect("root is present");
//!     assert_eq!(root.get("a").and_then(|a| a.as_int()), Some(1));
//!
//!     let b = root.get("b").expect("b is present");
//!     match b.value() {
//!         Value::Array(members) => assert_eq!(members.len(), 3),
//!         _ => panic!("b is an array"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Documents are written with a [`Writer`], which tracks nesting and validates names as values are emitted.
//!
//! # Serde
//!
//! The top level of a document maps to a Rust struct or map. Nested structs and maps become composites, sequences and
//! tuples become arrays, and byte buffers (see [`serde_bytes`]) become binary values. `None` fields are left out of
//! the document.
//!
//! Serialize a Rust object into sdsf:
//! ```rust
//! use serde::Serialize;
//! use serde_sdsf::Error;
//!
//! #[derive(Serialize)]
//! struct Address {
//!     number: u32,
//!     street: String,
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let address = Address {
//!         number: 1600,
//!         street: "Pennsylvania Avenue".to_string(),
//!     };
//!
//!     let value = serde_sdsf::to_vec(&address)?;
//!     assert_eq!(value, b"number 1600\r\nstreet \"Pennsylvania Avenue\"\r\n");
//!
//!     Ok(())
//! }
//! ```
//!
//! Deserialize sdsf into a Rust object:
//! ```rust
//! use serde::Deserialize;
//! use serde_sdsf::Error;
//!
//! #[derive(Deserialize)]
//! struct Address {
//!     number: u32,
//!     street: String,
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let sdsf = b"number 1600 street \"Pennsylvania Avenue\"";
//!
//!     let address: Address = serde_sdsf::from_slice(sdsf)?;
//!
//!     println!("{} {}", address.number, address.street);
//!
//!     Ok(())
//! }
//! ```
//!
//! [`serde_bytes`]: https://docs.rs/serde_bytes
#![warn(missing_docs)]

#[doc(inline)]
pub use de::{from_bytes, from_document, from_slice};
#[doc(inline)]
pub use error::{Error, ErrorKind};
#[doc(inline)]
pub use ser::{to_vec, Serializer, Writer};
#[doc(inline)]
pub use value::Document;

mod buffer;
pub mod de;
mod error;
pub mod ser;
mod syntax;
#[cfg(test)]
mod test;
pub mod value;
