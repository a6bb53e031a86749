use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use hyper::client::HttpConnector;
use hyper::header::HeaderMap;
use hyper::{Body, Client as HyperClient, Method, Request, StatusCode, Uri};

/// An HTTP POST that carries an encoded method call.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// The raw answer of the remote peer.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Sends requests to a remote peer.
///
/// The client calls `post` exactly once per method call. Connection management, redirects,
/// timeouts and TLS are the responsibility of the implementation; any failure it reports is
/// handed to the caller unchanged.
pub trait Transport: Send + Sync + 'static {
    fn post(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'static, Result<TransportResponse, failure::Error>>;
}

/// The default transport, backed by a hyper client.
#[derive(Clone, Default)]
pub struct HyperTransport {
    hyper_client: HyperClient<HttpConnector>,
}

impl HyperTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HyperTransport {
    fn post(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'static, Result<TransportResponse, failure::Error>> {
        let hyper_client = self.hyper_client.clone();
        async move {
            let mut req = Request::builder()
                .method(Method::POST)
                .uri(request.uri)
                .body(Body::from(request.body))?;
            *req.headers_mut() = request.headers;

            let response = hyper_client.request(req).await?;
            let status = response.status();
            let body = hyper::body::to_bytes(response.into_body()).await?;
            Ok::<_, failure::Error>(TransportResponse { status, body })
        }
        .boxed()
    }
}
