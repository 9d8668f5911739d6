//! # Domain Types
//!
//! Wire-facing domain types shared with the remote API.
//!
//! ## Conventions
//! - Catalog/customer payloads use the backend's snake_case field names
//!   (`price_in_cents`, `image_url`); sale payloads use camelCase
//!   (`sellerId`, `paymentMethod`), mirroring what the remote service
//!   actually sends.
//! - Deserialization is deliberately lenient where the backend is known to
//!   be inconsistent: category may be a bare string or an object, sale
//!   amounts may be numbers or strings, and most display fields are
//!   best-effort `Option`s.
//!
//! ## Snapshot Pattern
//! `SaleItem` freezes the product name and unit price at submission time.
//! Later stock or price changes to the underlying product never retroactively
//! alter a cart line or a finalized sale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::money::{lenient_major, Money};

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
///
/// The wire values are the backend's enumerated codes; anything the backend
/// invents beyond `CASH`/`CARD` lands on [`PaymentMethod::Other`] instead of
/// failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Multicaixa card terminal.
    Card,
    /// Any other method the backend reports.
    Other,
}

// Manual impl: `#[serde(other)]` only works on tagged enums, and the wire
// format here is a bare string.
impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(match code.as_str() {
            "CASH" => PaymentMethod::Cash,
            "CARD" => PaymentMethod::Card,
            _ => PaymentMethod::Other,
        })
    }
}

impl PaymentMethod {
    /// Human label shown on receipts. Shared by both document layouts so the
    /// thermal receipt and the A4 invoice can never disagree.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Card => "Multicaixa",
            PaymentMethod::Other => "Outro",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A product available for sale. Read-only from the checkout core's
/// perspective; the stock decrement after a sale is the backend's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    /// Display name shown to the operator and on receipts.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Unit price in cents.
    #[serde(rename = "price_in_cents")]
    pub price: Money,

    /// Current stock level (display-only here; not enforced by the cart).
    #[serde(default)]
    pub stock: i64,

    /// Category label. The backend sometimes expands this to an object, so
    /// deserialization accepts `"Phones"` and `{"name": "Phones"}` alike.
    #[serde(default, deserialize_with = "category_label")]
    pub category: String,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Serial/IMEI for tracked hardware items.
    #[serde(default)]
    pub imei: Option<String>,
}

fn category_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Category {
        Label(String),
        Object { name: String },
    }

    Ok(match Option::<Category>::deserialize(deserializer)? {
        Some(Category::Label(label)) => label,
        Some(Category::Object { name }) => name,
        None => String::new(),
    })
}

/// Pagination metadata for catalog listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

// =============================================================================
// People
// =============================================================================

/// The authenticated operator running the sale session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    pub name: String,
}

/// A registered customer. Everything beyond the name is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// Tax identifier (NIF).
    #[serde(default)]
    pub nif: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Fields for registering a customer from the POS screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nif: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A line item on a sale, frozen at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Product reference. Best-effort on responses.
    #[serde(rename = "id", default)]
    pub product_id: Option<String>,

    /// Product name at time of sale (frozen).
    pub name: String,

    pub quantity: i64,

    /// Unit price at time of sale (frozen). Decimal major units on the wire.
    #[serde(rename = "price", with = "lenient_major")]
    pub unit_price: Money,
}

impl SaleItem {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A finalized sale as returned by the remote collaborator.
///
/// ## Authority
/// `id`, `date`, `items` and `total` are always server-confirmed and must
/// never be rewritten locally. The remaining display fields are best-effort:
/// the backend may omit them on creation responses, in which case the
/// checkout session fills them from locally known state (fill-only; a field
/// the backend DID return is authoritative).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,

    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,

    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_nif: Option<String>,

    #[serde(with = "lenient_major")]
    pub total: Money,

    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,

    pub date: DateTime<Utc>,

    #[serde(default)]
    pub items: Vec<SaleItem>,
}

/// The checkout request submitted to the remote collaborator.
///
/// Item names and prices are snapshotted from the cart at submission time,
/// not re-fetched from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub seller_id: String,
    pub seller_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub items: Vec<SaleItem>,
    #[serde(with = "lenient_major")]
    pub total: Money,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Settings
// =============================================================================

/// Merchant settings supplied by the settings collaborator. Every key is
/// optional; consumers apply documented defaults when a key is absent.
pub type SettingsMap = HashMap<String, String>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_values() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"CASH\""
        );
        assert_eq!(
            serde_json::from_str::<PaymentMethod>("\"CARD\"").unwrap(),
            PaymentMethod::Card
        );
        // Unknown codes degrade to Other instead of failing.
        assert_eq!(
            serde_json::from_str::<PaymentMethod>("\"TRANSFER\"").unwrap(),
            PaymentMethod::Other
        );
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Cash.label(), "Dinheiro");
        assert_eq!(PaymentMethod::Card.label(), "Multicaixa");
        assert_eq!(PaymentMethod::Other.label(), "Outro");
    }

    #[test]
    fn test_product_category_accepts_both_shapes() {
        let bare: Product = serde_json::from_str(
            r#"{"id":"p1","name":"Router","price_in_cents":2500,"stock":4,"category":"Networking"}"#,
        )
        .unwrap();
        assert_eq!(bare.category, "Networking");
        assert_eq!(bare.price.cents(), 2500);

        let expanded: Product = serde_json::from_str(
            r#"{"id":"p2","name":"Cable","price_in_cents":300,"category":{"name":"Acessórios"}}"#,
        )
        .unwrap();
        assert_eq!(expanded.category, "Acessórios");
        assert_eq!(expanded.stock, 0);
    }

    #[test]
    fn test_sale_minimal_echo() {
        // A creation response carrying only the authoritative fields.
        let sale: Sale = serde_json::from_str(
            r#"{
                "id": "s-1",
                "total": "250.00",
                "date": "2024-05-04T10:30:00Z",
                "items": [{"id": "p1", "name": "A", "price": 100, "quantity": 2}]
            }"#,
        )
        .unwrap();

        assert_eq!(sale.total.cents(), 25000);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].line_total().cents(), 20000);
        assert!(sale.seller_name.is_none());
        assert!(sale.payment_method.is_none());
        assert!(sale.customer_name.is_none());
    }

    #[test]
    fn test_sale_draft_wire_shape() {
        let draft = SaleDraft {
            seller_id: "u1".to_string(),
            seller_name: "Maria".to_string(),
            customer_id: None,
            items: vec![SaleItem {
                product_id: Some("p1".to_string()),
                name: "Teclado".to_string(),
                quantity: 1,
                unit_price: Money::from_cents(4550),
            }],
            total: Money::from_cents(4550),
            payment_method: PaymentMethod::Cash,
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["sellerId"], "u1");
        assert_eq!(json["paymentMethod"], "CASH");
        assert_eq!(json["total"], 45.5);
        assert_eq!(json["items"][0]["price"], 45.5);
        // Absent customer is omitted entirely, not sent as null.
        assert!(json.get("customerId").is_none());
    }
}
