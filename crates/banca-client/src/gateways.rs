//! # Gateway Implementations
//!
//! Binds the port traits to the remote endpoints:
//!
//! | port                         | endpoint                        |
//! |------------------------------|---------------------------------|
//! | `SaleGateway::create_sale`   | `POST /sales`                   |
//! | `CatalogGateway::list_products` | `GET /products?page&per_page` |
//! | `SettingsGateway::public_settings` | `GET /public/settings`    |
//! | `CustomerGateway::search`    | `GET /customers?q=`             |
//! | `CustomerGateway::create`    | `POST /customers`               |
//!
//! The backend is inconsistent about envelopes: some responses arrive as
//! `{data, meta}`, some as `{data: ...}`, some bare. Every parser here
//! accepts both the enveloped and the plain shape.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use banca_checkout::ports::{
    CatalogGateway, CustomerGateway, GatewayError, GatewayResult, SaleGateway, SettingsGateway,
};
use banca_core::{Customer, NewCustomer, Page, PageMeta, Product, Sale, SaleDraft, SettingsMap};

use crate::http::ApiClient;

// =============================================================================
// Envelope-Lenient Parsing
// =============================================================================

/// Unwraps a `{"data": ...}` envelope when present.
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn parse<T: DeserializeOwned>(value: Value) -> GatewayResult<T> {
    serde_json::from_value(value).map_err(|e| GatewayError::Unexpected {
        status: None,
        detail: format!("undecodable response: {}", e),
    })
}

/// Parses a catalog listing: a full `{data, meta}` page, or a bare array /
/// `{data: [...]}` fallback for older deployments.
fn parse_page(value: Value) -> GatewayResult<Page<Product>> {
    let is_enveloped = value.get("meta").is_some() && value.get("data").is_some();
    if is_enveloped {
        return parse(value);
    }

    let data: Vec<Product> = parse(unwrap_data(value))?;
    let total = data.len() as u64;
    Ok(Page {
        meta: PageMeta {
            page: 1,
            per_page: data.len() as u32,
            total,
            last_page: 1,
        },
        data,
    })
}

// =============================================================================
// Port Implementations
// =============================================================================

impl SaleGateway for ApiClient {
    async fn create_sale(&self, draft: &SaleDraft) -> GatewayResult<Sale> {
        let value = self.post_json("sales", draft).await?;
        let sale: Sale = parse(unwrap_data(value))?;
        debug!(sale_id = %sale.id, "sale accepted by remote");
        Ok(sale)
    }
}

impl CatalogGateway for ApiClient {
    async fn list_products(&self, page: u32, per_page: u32) -> GatewayResult<Page<Product>> {
        let value = self
            .get_json(
                "products",
                &[
                    ("page", page.to_string()),
                    ("per_page", per_page.to_string()),
                ],
            )
            .await?;
        parse_page(value)
    }
}

impl SettingsGateway for ApiClient {
    async fn public_settings(&self) -> GatewayResult<SettingsMap> {
        let value = self.get_json("public/settings", &[]).await?;
        parse(unwrap_data(value))
    }
}

impl CustomerGateway for ApiClient {
    async fn search(&self, query: &str) -> GatewayResult<Vec<Customer>> {
        let value = self
            .get_json("customers", &[("q", query.to_string())])
            .await?;
        parse(unwrap_data(value))
    }

    async fn create(&self, customer: &NewCustomer) -> GatewayResult<Customer> {
        let value = self.post_json("customers", customer).await?;
        parse(unwrap_data(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_enveloped_page() {
        let value = json!({
            "data": [
                {"id": "p1", "name": "Router", "price_in_cents": 2500, "stock": 4, "category": "Redes"}
            ],
            "meta": {"page": 2, "per_page": 10, "total": 11, "last_page": 2}
        });

        let page = parse_page(value).unwrap();
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.last_page, 2);
        assert_eq!(page.data[0].price.cents(), 2500);
    }

    #[test]
    fn test_parse_bare_array_page_synthesizes_meta() {
        let value = json!([
            {"id": "p1", "name": "Router", "price_in_cents": 2500},
            {"id": "p2", "name": "Cabo", "price_in_cents": 300}
        ]);

        let page = parse_page(value).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.meta.page, 1);
        assert_eq!(page.meta.total, 2);
        assert_eq!(page.meta.last_page, 1);
    }

    #[test]
    fn test_parse_data_wrapped_array_page() {
        let value = json!({"data": [{"id": "p1", "name": "Router", "price_in_cents": 2500}]});
        let page = parse_page(value).unwrap();
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn test_settings_accept_plain_and_enveloped_maps() {
        let plain = json!({"company_name": "Banca Central", "contact_phone": "+244 923 000 000"});
        let map: SettingsMap = parse(unwrap_data(plain)).unwrap();
        assert_eq!(map.get("company_name").unwrap(), "Banca Central");

        let enveloped = json!({"data": {"company_name": "Banca Central"}});
        let map: SettingsMap = parse(unwrap_data(enveloped)).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_sale_response_accepts_envelope() {
        let value = json!({
            "data": {
                "id": "s-9",
                "total": "150.00",
                "date": "2024-05-04T10:30:00Z",
                "items": []
            }
        });
        let sale: Sale = parse(unwrap_data(value)).unwrap();
        assert_eq!(sale.id, "s-9");
        assert_eq!(sale.total.cents(), 15000);
    }

    #[test]
    fn test_undecodable_response_is_unexpected() {
        let err = parse::<Sale>(json!({"nonsense": true})).unwrap_err();
        assert!(matches!(err, GatewayError::Unexpected { status: None, .. }));
    }
}
