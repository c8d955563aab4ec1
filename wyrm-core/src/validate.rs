//! Name validation and fee classification.
//!
//! [`classify`] is the single entry point: it normalizes the raw input,
//! rejects malformed names, and prices the result. Pure function of the
//! input, no side effects.

use crate::error::Result;
use crate::types::{Name, Quote, Tier};

/// Validates a candidate name and computes its price quote.
///
/// Normalization (trim + ASCII lowercase) happens here, before any caller
/// checks uniqueness, so every later lookup operates on the same key.
///
/// Lengths 1 and 2 are valid and price at the premium tier: the published
/// pricing table starts at 3, and anything shorter is scarcer still, so the
/// top fee applies without breaking monotonicity.
pub fn classify(raw: &str) -> Result<(Name, Quote)> {
    let name = Name::parse(raw)?;
    let quote = quote_for(&name);
    Ok((name, quote))
}

/// Prices an already-validated name.
pub fn quote_for(name: &Name) -> Quote {
    let tier = Tier::for_len(name.len());
    Quote {
        tier,
        required_fee: tier.fee(),
    }
}
