//! # Sale Session
//!
//! One live cart per seller session, driven through the checkout phase
//! machine. All state lives in one explicit object: mutations go through
//! guarded methods, and UI layers subscribe to phase changes over a watch
//! channel instead of polling.
//!
//! ## Single-Writer Rule
//! The session is `&mut self` for every mutation, so safe Rust already
//! forbids concurrent cart edits. The phase guard exists on top of that for
//! the cross-await window: while `checkout()` is parked on the network call
//! the phase is `Submitting`, and after completion it is `Completed`. In
//! both states every cart mutation fails with [`CheckoutError::CartLocked`]
//! until `new_sale()` returns the session to `Idle`.

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use banca_core::{
    Cart, Customer, PaymentMethod, Product, Sale, SaleDraft, Seller, ValidationError,
};

use crate::ports::{GatewayError, SaleGateway};

// =============================================================================
// Errors
// =============================================================================

/// Failures surfaced by the sale session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// Local precondition failed; no remote call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote collaborator failed; the cart is preserved unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Mutation or resubmission attempted outside the `Idle` phase.
    #[error("cart is locked while a sale is submitting or finalized")]
    CartLocked,
}

// =============================================================================
// Phase Machine
// =============================================================================

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    /// Cart editable; checkout may be attempted.
    #[default]
    Idle,
    /// Submission in flight; cart locked, resubmission refused.
    Submitting,
    /// Sale finalized; cart cleared and locked until `new_sale()`.
    Completed,
}

// =============================================================================
// Session
// =============================================================================

/// The state for one POS sale session.
pub struct SaleSession {
    seller: Option<Seller>,
    cart: Cart,
    customer: Option<Customer>,
    payment_method: PaymentMethod,
    phase: CheckoutPhase,
    last_sale: Option<Sale>,
    phase_tx: watch::Sender<CheckoutPhase>,
}

impl SaleSession {
    /// Creates an idle session with an empty cart.
    ///
    /// The seller may be absent (not yet authenticated); checkout will then
    /// fail validation before touching the network.
    pub fn new(seller: Option<Seller>) -> Self {
        let (phase_tx, _) = watch::channel(CheckoutPhase::Idle);
        SaleSession {
            seller,
            cart: Cart::new(),
            customer: None,
            payment_method: PaymentMethod::default(),
            phase: CheckoutPhase::Idle,
            last_sale: None,
            phase_tx,
        }
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The finalized sale from the current `Completed` phase, if any.
    pub fn last_sale(&self) -> Option<&Sale> {
        self.last_sale.as_ref()
    }

    /// Subscribes to phase changes. The receiver always observes the latest
    /// phase; UI layers use this instead of polling.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutPhase> {
        self.phase_tx.subscribe()
    }

    fn set_phase(&mut self, phase: CheckoutPhase) {
        self.phase = phase;
        // send_replace never fails, with or without live receivers.
        self.phase_tx.send_replace(phase);
    }

    fn ensure_editable(&self) -> Result<(), CheckoutError> {
        match self.phase {
            CheckoutPhase::Idle => Ok(()),
            _ => Err(CheckoutError::CartLocked),
        }
    }

    // -------------------------------------------------------------------------
    // Cart Mutation (Idle only)
    // -------------------------------------------------------------------------

    /// Adds a product to the cart (or increments its quantity).
    pub fn add_item(&mut self, product: &Product) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.cart.add_item(product);
        Ok(())
    }

    /// Sets the exact quantity of a cart line; non-positive removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.cart.update_quantity(product_id, quantity);
        Ok(())
    }

    /// Removes a cart line.
    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.cart.remove_item(product_id);
        Ok(())
    }

    /// Empties the cart without touching customer or payment selection.
    pub fn clear_cart(&mut self) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.cart.clear();
        Ok(())
    }

    /// Attaches a customer to the upcoming sale.
    pub fn select_customer(&mut self, customer: Customer) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.customer = Some(customer);
        Ok(())
    }

    pub fn clear_customer(&mut self) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.customer = None;
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.payment_method = method;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Submits the cart as a sale.
    ///
    /// ## Contract
    /// - Preconditions (seller present, cart non-empty) are checked BEFORE
    ///   the gateway is invoked; a validation failure issues no remote call.
    /// - On success the response is enriched with locally known display
    ///   fields (fill-only), the cart is cleared and the phase becomes
    ///   `Completed`.
    /// - On failure the phase returns to `Idle` with the cart untouched, so
    ///   the operator can retry the same cart explicitly. Nothing retries
    ///   automatically.
    pub async fn checkout<G: SaleGateway>(&mut self, gateway: &G) -> Result<Sale, CheckoutError> {
        self.ensure_editable()?;

        let seller = self
            .seller
            .as_ref()
            .ok_or(ValidationError::MissingSeller)?
            .clone();
        if self.cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let draft = SaleDraft {
            seller_id: seller.id,
            seller_name: seller.name,
            customer_id: self.customer.as_ref().map(|c| c.id.clone()),
            items: self.cart.to_sale_items(),
            total: self.cart.total(),
            payment_method: self.payment_method,
        };

        debug!(
            items = draft.items.len(),
            total = %draft.total,
            method = ?draft.payment_method,
            "submitting sale"
        );
        self.set_phase(CheckoutPhase::Submitting);

        match gateway.create_sale(&draft).await {
            Ok(mut sale) => {
                enrich_display_fields(&mut sale, &draft, self.customer.as_ref());
                self.cart.clear();
                self.last_sale = Some(sale.clone());
                self.set_phase(CheckoutPhase::Completed);
                info!(sale_id = %sale.id, total = %sale.total, "sale completed");
                Ok(sale)
            }
            Err(err) => {
                self.set_phase(CheckoutPhase::Idle);
                warn!(error = %err, "checkout failed; cart preserved");
                Err(err.into())
            }
        }
    }

    /// Leaves the post-sale review state and starts a fresh sale.
    pub fn new_sale(&mut self) {
        self.last_sale = None;
        self.customer = None;
        self.set_phase(CheckoutPhase::Idle);
    }
}

// =============================================================================
// Enrichment
// =============================================================================

/// Overlays locally known display fields onto a creation response.
///
/// The backend's creation response is not guaranteed to echo every display
/// field, so the receipt would otherwise render blanks the operator just
/// saw on screen. Strictly fill-only: a field the backend DID return is
/// authoritative and is never overwritten; `id`, `total`, `items` and
/// `date` are never touched at all.
pub fn enrich_display_fields(sale: &mut Sale, draft: &SaleDraft, customer: Option<&Customer>) {
    if sale.seller_name.is_none() {
        sale.seller_name = Some(draft.seller_name.clone());
    }
    if sale.payment_method.is_none() {
        sale.payment_method = Some(draft.payment_method);
    }
    if let Some(customer) = customer {
        if sale.customer_name.is_none() {
            sale.customer_name = Some(customer.name.clone());
        }
        if sale.customer_nif.is_none() {
            sale.customer_nif = customer.nif.clone();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
