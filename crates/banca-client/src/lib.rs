//! # banca-client: REST Adapter
//!
//! Production implementation of the collaborator ports: a thin JSON/HTTPS
//! client with bearer-token auth, strict error classification and lenient
//! payload parsing.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SaleSession / bootstrap                                                │
//! │        │  (port traits from banca-checkout)                             │
//! │        ▼                                                                │
//! │  ApiClient ── reads TokenStore ── Authorization: Bearer <token>         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  remote service (JSON over HTTPS)                                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  classify: 2xx → parse (envelope-lenient)                               │
//! │            401 → GatewayError::AuthExpired                              │
//! │            4xx → GatewayError::Rejected { messages from body }          │
//! │            i/o → GatewayError::Network                                  │
//! │            else → GatewayError::Unexpected                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod gateways;
pub mod http;

pub use http::{ApiClient, ApiConfig, TokenStore};
