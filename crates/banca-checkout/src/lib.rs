//! # banca-checkout: Sale Session & Checkout Orchestration
//!
//! The stateful middle of the workspace: a [`SaleSession`] owns the cart for
//! one seller session and drives the checkout phase machine against the
//! remote collaborators, which are reached exclusively through the port
//! traits in [`ports`].
//!
//! ## Checkout Phase Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            add/update/remove items, pick customer & payment             │
//! │                 ┌────────┐                                              │
//! │                 │  Idle  │◄──────────────────────┐                      │
//! │                 └───┬────┘                       │ failure              │
//! │        checkout()   │                            │ (cart preserved,     │
//! │   (validations pass)▼                            │  error surfaced)     │
//! │                 ┌────────────┐───────────────────┘                      │
//! │                 │ Submitting │  cart locked, no resubmission            │
//! │                 └───┬────────┘                                          │
//! │             success │ (response enriched, cart cleared)                 │
//! │                     ▼                                                   │
//! │                 ┌───────────┐      new_sale()                           │
//! │                 │ Completed │──────────────────► Idle                   │
//! │                 └───────────┘                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no automatic retry anywhere in this crate: a failed checkout is
//! always surfaced to the operator, because silently retrying a financial
//! transaction risks duplicate sales.

pub mod bootstrap;
pub mod customers;
pub mod ports;
pub mod session;

pub use bootstrap::{load_pos_data, PosData, CATALOG_PAGE_SIZE};
pub use customers::{register_customer, search_customers};
pub use ports::{
    CatalogGateway, CustomerGateway, GatewayError, GatewayResult, SaleGateway, SettingsGateway,
};
pub use session::{CheckoutError, CheckoutPhase, SaleSession};
