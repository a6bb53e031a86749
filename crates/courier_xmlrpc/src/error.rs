use failure::SyncFailure;

/// The ways a call can fail to produce a `Response`.
///
/// A fault reported by the remote peer is not an error: it is delivered as the `Err` side of a
/// successfully decoded `Response`.
#[derive(Debug, Fail)]
pub enum CallError {
    /// The transport could not deliver the request or read the answer.
    #[fail(display = "failed to perform call to {}: {}", endpoint, error)]
    Transport {
        endpoint: String,
        error: failure::Error,
    },

    /// The answer of the peer is not an XML document.
    #[fail(display = "{}", _0)]
    MalformedDocument(#[cause] SyncFailure<xmlrpc_fmt::Error>),

    /// The task that performed the call ended without reporting an outcome.
    #[fail(display = "call task terminated before completion")]
    Interrupted,
}

impl CallError {
    pub fn is_malformed_document(&self) -> bool {
        match *self {
            CallError::MalformedDocument(_) => true,
            _ => false,
        }
    }
}
