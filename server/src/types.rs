//! Domain value types shared across the backend.
//!
//! Money is integer cents end-to-end; no floating point touches an amount.
//! The cart/order polymorphism over products and events is expressed as
//! real types here ([`CartItemKind`], [`OrderLineRef`]) and flattened to
//! the stored text/smallint encodings only at the persistence boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Money
// ============================================================================

/// A monetary amount in cents.
///
/// Serialized (JSON and database) as a plain integer of cents.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Create an amount from cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply a unit price by a quantity, saturating on overflow.
    #[must_use]
    pub const fn times(self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

// ============================================================================
// Cart item kind
// ============================================================================

/// What a cart row points at: a product or an event.
///
/// Stored as the lowercase text the original wire format used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartItemKind {
    /// The row references a product.
    Product,
    /// The row references an event.
    Event,
}

impl CartItemKind {
    /// The stored text encoding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Event => "event",
        }
    }

    /// Parse the stored text encoding.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "product" => Some(Self::Product),
            "event" => Some(Self::Event),
            _ => None,
        }
    }
}

impl fmt::Display for CartItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Order line reference
// ============================================================================

/// Tagged reference from an order line to the thing that was bought.
///
/// Persisted as an (item id, kind discriminant) pair where 1 = product and
/// 2 = event; this type is the only place that encoding lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum OrderLineRef {
    /// A purchased product.
    Product(i64),
    /// A purchased event.
    Event(i64),
}

impl OrderLineRef {
    /// Storage discriminant for products.
    pub const PRODUCT_KIND: i16 = 1;
    /// Storage discriminant for events.
    pub const EVENT_KIND: i16 = 2;

    /// The stored kind discriminant.
    #[must_use]
    pub const fn kind_code(self) -> i16 {
        match self {
            Self::Product(_) => Self::PRODUCT_KIND,
            Self::Event(_) => Self::EVENT_KIND,
        }
    }

    /// The referenced product or event id.
    #[must_use]
    pub const fn item_id(self) -> i64 {
        match self {
            Self::Product(id) | Self::Event(id) => id,
        }
    }

    /// Rebuild from the stored (kind, item id) pair.
    #[must_use]
    pub const fn from_parts(kind: i16, item_id: i64) -> Option<Self> {
        match kind {
            Self::PRODUCT_KIND => Some(Self::Product(item_id)),
            Self::EVENT_KIND => Some(Self::Event(item_id)),
            _ => None,
        }
    }
}

// ============================================================================
// External references
// ============================================================================

/// Mint an externally-visible order reference.
///
/// Random, collision-resistant: twelve hex characters from a v4 UUID.
#[must_use]
pub fn mint_order_ref() -> String {
    format!("ORD-{}", short_token())
}

/// Mint an externally-visible payment reference.
#[must_use]
pub fn mint_payment_ref() -> String {
    format!("PAY-{}", short_token())
}

fn short_token() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    simple[..12].to_uppercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn money_sums_and_displays() {
        let total: Money = [Money::from_cents(4000), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 4250);
        assert_eq!(total.to_string(), "$42.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
    }

    #[test]
    fn money_times_quantity() {
        assert_eq!(Money::from_cents(2000).times(2).cents(), 4000);
    }

    #[test]
    fn cart_kind_round_trips_its_text_encoding() {
        assert_eq!(CartItemKind::Product.as_str(), "product");
        assert_eq!(CartItemKind::from_str_opt("event"), Some(CartItemKind::Event));
        assert_eq!(CartItemKind::from_str_opt("service"), None);
    }

    #[test]
    fn order_line_ref_encodes_one_as_product_two_as_event() {
        assert_eq!(OrderLineRef::Product(7).kind_code(), 1);
        assert_eq!(OrderLineRef::Event(9).kind_code(), 2);
        assert_eq!(OrderLineRef::from_parts(1, 7), Some(OrderLineRef::Product(7)));
        assert_eq!(OrderLineRef::from_parts(2, 9), Some(OrderLineRef::Event(9)));
        assert_eq!(OrderLineRef::from_parts(3, 1), None);
    }

    #[test]
    fn references_are_prefixed_and_unique() {
        let a = mint_order_ref();
        let b = mint_order_ref();
        assert!(a.starts_with("ORD-"));
        assert_eq!(a.len(), "ORD-".len() + 12);
        assert_ne!(a, b);
        assert!(mint_payment_ref().starts_with("PAY-"));
    }
}
