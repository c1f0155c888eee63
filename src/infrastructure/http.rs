use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request, StatusCode};
use hyper_rustls::HttpsConnector;
use tracing::debug;

use crate::error::Error;

/// Hyper client able to reach both `https://` nodes and plain `http://` hosts
pub type HttpClient = Client<HttpsConnector<HttpConnector>>;

pub fn http_client() -> HttpClient {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder().build(connector)
}

/// POST a JSON body and collect the full response
///
/// Non-2xx statuses are returned to the caller, which knows how to word the failure.
pub async fn post_json(
    client: &HttpClient,
    url: &str,
    body: String,
) -> Result<(StatusCode, Bytes), Error> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(url)
        .header("content-type", "application/json")
        .body(Body::from(body))?;

    let response = client.request(request).await?;
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await?;

    debug!(%url, %status, len = bytes.len(), "HTTP response");
    Ok((status, bytes))
}
