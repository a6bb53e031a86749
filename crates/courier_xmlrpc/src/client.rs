use crate::args::ClientArgs;
use crate::error::CallError;
use crate::events::{ClientEvent, Subscribers, Subscription};
use crate::transport::{HyperTransport, Transport, TransportRequest};
use crossbeam::sync::ShardedLock;
use failure::SyncFailure;
use futures::channel::oneshot;
use hyper::header::{HeaderMap, HeaderValue, CONNECTION, CONTENT_TYPE, USER_AGENT};
use hyper::Uri;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing_futures::Instrument;
use xmlrpc_fmt::{Call, DeserializeOwned, Fault, Params, Response, Serialize, ToXml, Value};

static NEXT_CLIENT_ID: AtomicUsize = AtomicUsize::new(1);

/// An XML-RPC client.
///
/// The client is a cheap handle: clones share the endpoint, the configuration and the
/// subscriptions. Calls capture the endpoint when they are issued, so changing it never affects a
/// call that is already in flight.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    id: u64,
    endpoint: ShardedLock<Uri>,
    user_agent: HeaderValue,
    debug: bool,
    transport: Box<dyn Transport>,
    subscribers: Subscribers,
}

impl Client {
    /// Constructs a client for the given endpoint using the default configuration.
    pub fn new<S: AsRef<str>>(endpoint: S) -> Result<Client, failure::Error> {
        Client::with_args(ClientArgs::new(&endpoint).set_endpoint(endpoint))
    }

    /// Constructs a client that performs its calls over HTTP with hyper.
    pub fn with_args(args: ClientArgs) -> Result<Client, failure::Error> {
        Client::with_transport(args, HyperTransport::default())
    }

    /// Constructs a client that performs its calls through the given transport.
    pub fn with_transport<T: Transport>(
        args: ClientArgs,
        transport: T,
    ) -> Result<Client, failure::Error> {
        let endpoint: Uri = args.endpoint().parse()?;
        let user_agent = HeaderValue::from_str(args.user_agent())?;
        let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed) as u64;
        debug!(client_id = id, endpoint = %endpoint, "constructed xmlrpc client");

        Ok(Client {
            inner: Arc::new(Inner {
                id,
                endpoint: ShardedLock::new(endpoint),
                user_agent,
                debug: args.debug(),
                transport: Box::new(transport),
                subscribers: Subscribers::default(),
            }),
        })
    }

    /// A process-wide unique number identifying this client in logs.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Returns the endpoint that the next call will be sent to.
    pub fn endpoint(&self) -> Uri {
        self.inner
            .endpoint
            .read()
            .expect("Could not acquire read lock on endpoint")
            .clone()
    }

    /// Replaces the endpoint and notifies all subscribers.
    pub fn set_endpoint(&self, endpoint: Uri) {
        {
            let mut current = self
                .inner
                .endpoint
                .write()
                .expect("Could not acquire write lock on endpoint");
            *current = endpoint.clone();
        }
        info!(client_id = self.inner.id, endpoint = %endpoint, "endpoint changed");
        self.inner
            .subscribers
            .notify(ClientEvent::EndpointChanged(endpoint));
    }

    /// Subscribes to the successes, faults and endpoint changes of this client.
    pub fn subscribe(&self) -> Subscription {
        self.inner.subscribers.subscribe()
    }

    /// Performs a call and waits for its outcome.
    pub async fn request<N: Into<String>>(
        &self,
        name: N,
        params: Params,
    ) -> Result<Response, CallError> {
        let name = name.into();
        let endpoint = self.endpoint();
        let span = self.call_span(&name, &endpoint);
        self.dispatch(endpoint, name, params).instrument(span).await
    }

    /// Issues a call without waiting for it. The call runs on the tokio runtime; the returned
    /// handle resolves to its outcome, but it does not need to be polled for the call to complete.
    pub fn call<N: Into<String>>(&self, name: N, params: Params) -> CallHandle {
        let (tx, rx) = oneshot::channel();
        self.spawn(name.into(), params, move |outcome| {
            // The handle may have been dropped, the outcome was broadcast regardless.
            let _ = tx.send(outcome);
        });
        CallHandle(rx)
    }

    /// Issues a call without waiting for it and hands the decoded value to `callback`.
    ///
    /// The callback receives the value whether the call succeeded or the peer returned a fault; a
    /// fault arrives as its `faultCode`/`faultString` struct. Use `Fault::from_value` or the
    /// subscription events to tell them apart.
    pub fn call_with_callback<N, F>(&self, name: N, params: Params, callback: F)
    where
        N: Into<String>,
        F: FnOnce(Result<Value, CallError>) + Send + 'static,
    {
        self.spawn(name.into(), params, move |outcome| {
            callback(outcome.map(|response| response.unwrap_or_else(Fault::into_value)))
        });
    }

    /// Performs a call with serializable parameters and deserializes the return value.
    ///
    /// Tuples are spread into one parameter per element.
    pub async fn call_typed<N, S, D>(
        &self,
        name: N,
        params: &S,
    ) -> Result<Result<D, Fault>, failure::Error>
    where
        N: Into<String>,
        S: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        let params = xmlrpc_fmt::into_params(params).map_err(SyncFailure::new)?;
        match self.request(name, params).await? {
            Ok(value) => Ok(Ok(xmlrpc_fmt::from_value(value).map_err(SyncFailure::new)?)),
            Err(fault) => Ok(Err(fault)),
        }
    }

    fn spawn<F>(&self, name: String, params: Params, on_complete: F)
    where
        F: FnOnce(Result<Response, CallError>) + Send + 'static,
    {
        let client = self.clone();
        let endpoint = self.endpoint();
        let span = self.call_span(&name, &endpoint);
        tokio::spawn(
            async move {
                let outcome = client.dispatch(endpoint, name, params).await;
                on_complete(outcome);
            }
            .instrument(span),
        );
    }

    fn call_span(&self, name: &str, endpoint: &Uri) -> tracing::Span {
        info_span!("xmlrpc_call", client_id = self.inner.id, method = name, endpoint = %endpoint)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml"));
        headers.insert(USER_AGENT, self.inner.user_agent.clone());
        headers
    }

    /// Encodes the call, posts it once and routes the decoded outcome to the subscribers.
    async fn dispatch(
        &self,
        endpoint: Uri,
        name: String,
        params: Params,
    ) -> Result<Response, CallError> {
        let body = Call { name, params }.to_xml();
        info!("calling remote method");
        if self.inner.debug {
            debug!(body = body.as_str(), "sending xmlrpc request");
        }

        let request = TransportRequest {
            uri: endpoint.clone(),
            headers: self.headers(),
            body: body.into_bytes(),
        };
        let response = self
            .inner
            .transport
            .post(request)
            .await
            .map_err(|error| CallError::Transport {
                endpoint: endpoint.to_string(),
                error,
            })?;

        info!(status = response.status.as_u16(), "received response");
        if self.inner.debug {
            debug!(
                body = %String::from_utf8_lossy(&response.body),
                "received xmlrpc response"
            );
        }

        let outcome = xmlrpc_fmt::parse::response_from_slice(&response.body).map_err(|err| {
            error!(error = %err, "could not decode response");
            CallError::MalformedDocument(SyncFailure::new(err))
        })?;

        match outcome {
            Ok(ref value) => self
                .inner
                .subscribers
                .notify(ClientEvent::Success(value.clone())),
            Err(ref fault) => {
                info!(code = fault.code(), message = fault.message(), "received fault");
                self.inner
                    .subscribers
                    .notify(ClientEvent::Fault(fault.clone()))
            }
        }

        Ok(outcome)
    }
}

/// Resolves to the outcome of a call issued with [`Client::call`].
#[must_use = "the call runs regardless, but its outcome is only available through the handle"]
pub struct CallHandle(oneshot::Receiver<Result<Response, CallError>>);

impl Future for CallHandle {
    type Output = Result<Response, CallError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or(Err(CallError::Interrupted)))
    }
}
