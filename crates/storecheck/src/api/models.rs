//! Typed views of the shop API responses.
//!
//! Only the fields the checks read are modelled; everything else in the
//! payloads is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Product identifier; the API uses numbers but tolerates strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id
    Number(i64),
    /// Textual id
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

/// Body of "add to cart"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddItem<'a> {
    /// Product to add
    pub id: &'a ProductId,
}

/// One element of a "set quantity" replacement list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    /// Cart line id
    pub id: ProductId,
    /// New quantity
    pub quantity: i64,
}

/// Short cart view: `{"data": {"quantity": n}}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartSummary {
    data: CartSummaryData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct CartSummaryData {
    quantity: i64,
}

impl CartSummary {
    /// Total number of units in the cart
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.data.quantity
    }
}

/// Full cart view: `{"products": [{"id": .., "quantity": ..}, ..]}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartDetails {
    /// Cart lines in display order
    #[serde(default)]
    pub products: Vec<CartLine>,
}

/// One cart line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartLine {
    /// Cart line id
    pub id: ProductId,
    /// Units of the product
    pub quantity: i64,
}

impl CartDetails {
    /// Number of cart lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.products.len()
    }

    /// First cart line, if any
    #[must_use]
    pub fn first(&self) -> Option<&CartLine> {
        self.products.first()
    }
}

/// Search result document: `{"included": [{"attributes": {"title": ..}}, ..]}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResults {
    /// Matched entities
    #[serde(default)]
    pub included: Vec<Included>,
}

/// One matched entity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Included {
    /// Entity attributes
    pub attributes: IncludedAttributes,
}

/// Attributes of a matched entity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IncludedAttributes {
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
}

impl SearchResults {
    /// Title of the first match
    #[must_use]
    pub fn first_title(&self) -> Option<&str> {
        self.included.first()?.attributes.title.as_deref()
    }
}

/// Catalog listing: `{"data": [{"attributes": {..}}, ..]}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct CatalogPage {
    #[serde(default)]
    pub data: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct CatalogEntry {
    pub attributes: ProductAttributes,
}

/// Attributes of a catalog product
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductAttributes {
    /// Product id, used for cart operations
    pub id: ProductId,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Remaining attributes, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
