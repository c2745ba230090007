//! HTTP clients for the kart cart store.
//!
//! Provides a small async fetch API over a pluggable [`Transport`], and
//! [`InventoryApi`], which serves the store's stock and catalog lookups
//! from a REST backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use kart_data::{FetchClient, InventoryApi};
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3333");
//! let stock: StockInfo = client.get("/stock/1").accept_json().send().await?.json()?;
//!
//! // Or plug the whole API into the store
//! let inventory = Arc::new(InventoryApi::new(client));
//! ```

mod error;
mod inventory;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::FetchError;
pub use inventory::InventoryApi;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// HTTP client for outbound requests.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a client backed by [`ReqwestTransport`].
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Create a client that sends through `transport`.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Prepend `base_url` to every relative request URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !is_absolute(&url) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            transport: Arc::clone(&self.transport),
            builder,
        }
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    transport: Arc<dyn Transport>,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Ask for a JSON response.
    pub fn accept_json(mut self) -> Self {
        self.builder = self.builder.accept("application/json");
        self
    }

    /// Send the request.
    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::debug!(
            method = self.builder.method().as_str(),
            url = self.builder.url(),
            "sending request"
        );
        self.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ClientRequestBuilder, FetchClient, FetchError, InventoryApi, Method, RequestBuilder,
        Response, Transport,
    };
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Canned-response transport that records every request it sees.
    #[derive(Default)]
    pub struct MockTransport {
        routes: Mutex<HashMap<String, (u16, String)>>,
        pub seen: Mutex<Vec<RequestBuilder>>,
    }

    impl MockTransport {
        pub fn route(self, url: &str, status: u16, body: &str) -> Self {
            self.routes
                .lock()
                .unwrap()
                .insert(url.to_string(), (status, body.to_string()));
            self
        }
    }

    #[async_trait]
    impl Transport for Arc<MockTransport> {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            let route = self.routes.lock().unwrap().get(request.url()).cloned();
            self.seen.lock().unwrap().push(request);
            match route {
                Some((status, body)) => Ok(Response::new(status, body.into_bytes())),
                None => Err(FetchError::RequestError("connection refused".into())),
            }
        }
    }
}
