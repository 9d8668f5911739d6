//! # Customer Selection Helpers
//!
//! Thin orchestration over the customer gateway: local validation runs
//! first, and a request that fails it never reaches the collaborator.

use tracing::debug;

use banca_core::validation::{validate_new_customer, validate_search_query};
use banca_core::{Customer, NewCustomer};

use crate::ports::CustomerGateway;
use crate::session::CheckoutError;

/// Searches customers by name, NIF or phone.
pub async fn search_customers<G: CustomerGateway>(
    gateway: &G,
    query: &str,
) -> Result<Vec<Customer>, CheckoutError> {
    let query = validate_search_query(query)?;
    debug!(query = %query, "searching customers");
    Ok(gateway.search(&query).await?)
}

/// Registers a customer from the POS screen. Only the name is mandatory.
pub async fn register_customer<G: CustomerGateway>(
    gateway: &G,
    customer: &NewCustomer,
) -> Result<Customer, CheckoutError> {
    validate_new_customer(customer)?;
    Ok(gateway.create(customer).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use banca_core::ValidationError;

    use crate::ports::GatewayResult;

    struct FakeCustomers {
        calls: AtomicUsize,
    }

    impl CustomerGateway for FakeCustomers {
        async fn search(&self, query: &str) -> GatewayResult<Vec<Customer>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(query, "maria");
            Ok(vec![])
        }

        async fn create(&self, customer: &NewCustomer) -> GatewayResult<Customer> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Customer {
                id: "c-1".to_string(),
                name: customer.name.clone(),
                nif: customer.nif.clone(),
                phone: None,
                email: None,
                address: None,
            })
        }
    }

    #[tokio::test]
    async fn test_search_trims_before_calling() {
        let gateway = FakeCustomers {
            calls: AtomicUsize::new(0),
        };
        search_customers(&gateway, "  maria ").await.unwrap();
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_register_requires_name_without_remote_call() {
        let gateway = FakeCustomers {
            calls: AtomicUsize::new(0),
        };
        let err = register_customer(&gateway, &NewCustomer::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::Validation(ValidationError::Required { field: "name" })
        );
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_passes_through_on_valid_input() {
        let gateway = FakeCustomers {
            calls: AtomicUsize::new(0),
        };
        let created = register_customer(
            &gateway,
            &NewCustomer {
                name: "Ana Paula".to_string(),
                nif: Some("0012345678".to_string()),
                ..NewCustomer::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(created.name, "Ana Paula");
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }
}
