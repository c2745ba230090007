//! REST-backed stock and catalog lookups.

use async_trait::async_trait;
use kart_commerce::catalog::{Product, StockInfo};
use kart_commerce::ports::{CatalogSource, StockSource};
use kart_commerce::{LookupError, ProductId};
use serde::de::DeserializeOwned;

use crate::{FetchClient, FetchError};

/// Stock and catalog lookups against the storefront API.
///
/// Reads `GET /stock/{id}` and `GET /products/{id}` relative to the
/// client's base URL. A 404 maps to [`LookupError::NotFound`]; every other
/// failure (transport, non-2xx, malformed body) is
/// [`LookupError::Unavailable`].
#[derive(Clone)]
pub struct InventoryApi {
    client: FetchClient,
}

impl InventoryApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: String,
        product_id: ProductId,
    ) -> Result<T, LookupError> {
        let result: Result<T, FetchError> = async {
            self.client
                .get(path)
                .accept_json()
                .send()
                .await?
                .error_for_status()?
                .json()
        }
        .await;
        result.map_err(|e| {
            tracing::debug!(%product_id, error = %e, "inventory lookup failed");
            e.into_lookup_error(product_id)
        })
    }
}

#[async_trait]
impl StockSource for InventoryApi {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, LookupError> {
        self.fetch(format!("/stock/{}", product_id), product_id)
            .await
    }
}

#[async_trait]
impl CatalogSource for InventoryApi {
    async fn product(&self, product_id: ProductId) -> Result<Product, LookupError> {
        self.fetch(format!("/products/{}", product_id), product_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::MockTransport;

    const BASE: &str = "http://localhost:3333";

    fn api(mock: &Arc<MockTransport>) -> InventoryApi {
        InventoryApi::new(FetchClient::with_transport(Arc::clone(mock)).with_base_url(BASE))
    }

    #[tokio::test]
    async fn test_stock_lookup() {
        let mock = Arc::new(MockTransport::default().route(
            "http://localhost:3333/stock/1",
            200,
            r#"{"id": 1, "amount": 3}"#,
        ));

        let stock = api(&mock).stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock, StockInfo::new(ProductId::new(1), 3));
        assert_eq!(
            mock.seen.lock().unwrap()[0].header_value("Accept"),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let mock = Arc::new(MockTransport::default().route(
            "http://localhost:3333/products/2",
            200,
            r#"{"id": 2, "title": "Tênis Nike", "price": 139.9, "image": "https://img/2.jpg"}"#,
        ));

        let product = api(&mock).product(ProductId::new(2)).await.unwrap();
        assert_eq!(product.id, ProductId::new(2));
        assert_eq!(product.title, "Tênis Nike");
        assert_eq!(product.price, 139.9);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let mock = Arc::new(MockTransport::default().route(
            "http://localhost:3333/products/9",
            404,
            "{}",
        ));

        let err = api(&mock).product(ProductId::new(9)).await.unwrap_err();
        assert_eq!(err, LookupError::NotFound(ProductId::new(9)));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mock = Arc::new(MockTransport::default().route(
            "http://localhost:3333/stock/1",
            500,
            "boom",
        ));

        let err = api(&mock).stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, LookupError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_unavailable() {
        let mock = Arc::new(MockTransport::default().route(
            "http://localhost:3333/stock/1",
            200,
            "not json",
        ));

        let err = api(&mock).stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, LookupError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let mock = Arc::new(MockTransport::default());

        let err = api(&mock).stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, LookupError::Unavailable(_)));
    }
}
