//! Clients for the shop REST API.
//!
//! Each client is a thin request builder bound to its endpoints and a fixed
//! header set. Clients never assert and never retry.

mod cart;
mod catalog;
mod client;
mod identity;
pub mod models;
mod search;

pub use cart::CartApi;
pub use catalog::CatalogApi;
pub use client::{ApiClient, ApiResponse, AuthContext};
pub use identity::IdentityApi;
pub use models::{CartDetails, CartLine, CartSummary, ProductAttributes, ProductId, QuantityUpdate, SearchResults};
pub use search::{normalize, SearchApi};
