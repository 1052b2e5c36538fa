//! Shared primitive types used across the whole analysis.

/// Identifier of the customer that owns a card.
pub type CustomerId = String;

/// ISO 4217 currency code, e.g. "USD".
pub type CurrencyCode = String;

/// Hour of day, 0..=23.
pub type Hour = u32;
