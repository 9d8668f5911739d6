//! # Validation Module
//!
//! Input validation applied before anything leaves the client.
//!
//! ## Validation Strategy
//! Validation here is the first line of defense; the backend re-validates
//! everything it receives. The rule enforced across the workspace: a request
//! that fails local validation must never reach a remote collaborator.

use crate::error::{ValidationError, ValidationResult};
use crate::types::NewCustomer;

/// Validates a customer search query, returning the trimmed form.
///
/// An empty query is fine (the backend returns a default listing).
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query",
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates customer registration fields. Only the name is mandatory.
pub fn validate_new_customer(customer: &NewCustomer) -> ValidationResult<()> {
    if customer.name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if customer.name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 200,
        });
    }

    Ok(())
}
