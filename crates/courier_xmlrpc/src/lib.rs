//! An asynchronous XML-RPC client.
//!
//! A [`Client`] owns the endpoint of a remote XML-RPC service. Every call encodes its
//! parameters, performs exactly one HTTP POST through a [`Transport`] and decodes the response
//! into either a return value or a [`Fault`]. Outcomes are delivered to the caller and broadcast
//! to every [`Subscription`].

#[macro_use]
extern crate failure;
#[macro_use]
extern crate tracing;

mod args;
mod client;
mod error;
mod events;
mod transport;

pub use args::ClientArgs;
pub use client::{CallHandle, Client};
pub use error::CallError;
pub use events::{ClientEvent, Subscription};
pub use hyper::Uri;
pub use transport::{HyperTransport, Transport, TransportRequest, TransportResponse};
pub use xmlrpc_fmt::{
    from_params, from_value, into_params, into_value, Fault, Members, Params, Response, Value,
};
