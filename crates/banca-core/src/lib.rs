//! # banca-core: Pure Business Logic for Banca POS
//!
//! This crate is the heart of the checkout core. It contains the domain
//! types, money arithmetic, the cart model, and input validation, all as
//! pure, deterministic code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Banca POS Workspace                              │
//! │                                                                         │
//! │  ┌──────────────────┐      ┌──────────────────┐                        │
//! │  │  banca-client    │      │  banca-receipt   │   I/O edges            │
//! │  │  (REST adapter)  │      │  (render/export) │                        │
//! │  └────────┬─────────┘      └────────┬─────────┘                        │
//! │           │                         │                                   │
//! │  ┌────────▼─────────────────────────▼─────────┐                        │
//! │  │              banca-checkout                │   session + ports      │
//! │  └────────────────────┬───────────────────────┘                        │
//! │                       │                                                 │
//! │  ┌────────────────────▼───────────────────────┐                        │
//! │  │        ★ banca-core (THIS CRATE) ★         │                        │
//! │  │                                            │                        │
//! │  │   money  │  types  │  cart  │  validation  │                        │
//! │  │                                            │                        │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS     │                        │
//! │  └────────────────────────────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: all monetary values are cents (i64), never floats.
//!    The remote API is sloppy about this (totals arrive as JSON numbers or
//!    strings in major units); normalization happens at the serde boundary.
//! 2. **Snapshot pattern**: cart items and sale items freeze the product name
//!    and price at the moment of adding, so later catalog edits never change
//!    a cart line or a finalized sale.
//! 3. **Explicit errors**: every failure is a typed enum variant.

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartItem};
pub use error::{ValidationError, ValidationResult};
pub use money::{CurrencyFormat, Money};
pub use types::*;
