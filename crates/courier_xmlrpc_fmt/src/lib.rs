//! Wire format for XML-RPC.
//!
//! This crate converts between the dynamically typed [`Value`] model and the XML documents
//! exchanged by XML-RPC peers. It does no I/O of its own: [`Call::to_xml`] produces a
//! `methodCall` document and [`parse::response`] turns a `methodResponse` body back into a
//! [`Response`].

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;

mod de;
mod error;
mod fault;
pub mod parse;
mod ser;
pub mod value;

pub use de::{from_params, from_value};
pub use error::{Error, ErrorKind, Result};
pub use fault::Fault;
pub use ser::{into_params, into_value};
pub use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Serialize};
pub use value::{Call, Members, ToXml, Value};

/// The ordered parameter list of a method call.
pub type Params = Vec<Value>;

/// The outcome of a method call: either the single return value or the fault reported by the
/// remote peer.
pub type Response = std::result::Result<Value, Fault>;
