//! # Collaborator Ports
//!
//! Trait seams for every remote collaborator the checkout core talks to.
//! The production adapter lives in `banca-client`; tests substitute fakes.
//!
//! ## Error Classification
//! ```text
//! HTTP 401                    → GatewayError::AuthExpired
//! HTTP 4xx with message body  → GatewayError::Rejected { messages }
//! transport failure           → GatewayError::Network
//! anything else               → GatewayError::Unexpected
//! ```
//! Every class is terminal from this crate's point of view: no retry logic
//! exists here or below. `AuthExpired` is the one class the (out-of-scope)
//! session layer may retry after re-authenticating; the cart is preserved
//! across all of them so the operator never loses work.

// Callers are generic over these traits; no trait objects, so the futures
// need no explicit Send bounds.
#![allow(async_fn_in_trait)]

use thiserror::Error;

use banca_core::{Customer, NewCustomer, Page, Product, Sale, SaleDraft, SettingsMap};

/// Failures reported by a remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The bearer credential was rejected (HTTP 401). Retryable only after
    /// the session layer re-authenticates.
    #[error("authentication expired")]
    AuthExpired,

    /// The collaborator rejected the request with structured validation
    /// messages (e.g. insufficient stock). Shown to the operator verbatim.
    #[error("request rejected: {}", messages.join("; "))]
    Rejected { messages: Vec<String> },

    /// Transport-level failure (connection refused, timeout, DNS, ...).
    #[error("network failure: {0}")]
    Network(String),

    /// Anything else: unexpected status codes, undecodable bodies.
    #[error("unexpected response{}: {detail}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Unexpected { status: Option<u16>, detail: String },
}

impl GatewayError {
    /// The messages an operator should see for this failure.
    pub fn operator_messages(&self) -> Vec<String> {
        match self {
            GatewayError::Rejected { messages } => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Convenience alias for gateway results.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Submits finalized sales. The collaborator decrements stock on acceptance;
/// this core never does.
pub trait SaleGateway {
    /// Creates a sale from a draft. The response is guaranteed to carry
    /// `id`, `date`, `items` and `total`; display fields are best-effort.
    async fn create_sale(&self, draft: &SaleDraft) -> GatewayResult<Sale>;
}

/// Read access to the product catalog.
pub trait CatalogGateway {
    async fn list_products(&self, page: u32, per_page: u32) -> GatewayResult<Page<Product>>;
}

/// Public merchant settings (company name, tagline, address, ...).
pub trait SettingsGateway {
    async fn public_settings(&self) -> GatewayResult<SettingsMap>;
}

/// Customer lookup and registration from the POS screen.
pub trait CustomerGateway {
    async fn search(&self, query: &str) -> GatewayResult<Vec<Customer>>;

    async fn create(&self, customer: &NewCustomer) -> GatewayResult<Customer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_display() {
        let err = GatewayError::Rejected {
            messages: vec![
                "Estoque insuficiente para Teclado".to_string(),
                "Quantidade inválida".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "request rejected: Estoque insuficiente para Teclado; Quantidade inválida"
        );
        assert_eq!(err.operator_messages().len(), 2);
    }

    #[test]
    fn test_unexpected_display_with_and_without_status() {
        let with = GatewayError::Unexpected {
            status: Some(500),
            detail: "internal".to_string(),
        };
        assert_eq!(with.to_string(), "unexpected response (500): internal");

        let without = GatewayError::Unexpected {
            status: None,
            detail: "bad json".to_string(),
        };
        assert_eq!(without.to_string(), "unexpected response: bad json");
    }
}
