//! Brand tags attached to every domain resource.
//!
//! Three independently branded businesses share one database and API: the
//! ANAIS cosmetics store, the EVOLVE men's grooming store, and the POPULO
//! restaurant. Every brand-scoped resource carries exactly one brand; brand
//! is immutable after creation except in operations explicitly permitted to
//! super-administrators.

use serde::{Deserialize, Serialize};

/// Closed set of deployed brands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Brand {
    /// Cosmetics store.
    Anais,
    /// Men's grooming store.
    Evolve,
    /// Restaurant.
    Populo,
}

impl Brand {
    /// All deployed brands, in declaration order.
    pub const ALL: [Self; 3] = [Self::Anais, Self::Evolve, Self::Populo];

    /// Canonical wire/storage identifier for the brand.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anais => "ANAIS",
            Self::Evolve => "EVOLVE",
            Self::Populo => "POPULO",
        }
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a brand identifier is not in the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown brand: {value}")]
pub struct UnknownBrand {
    /// The rejected identifier.
    pub value: String,
}

impl std::str::FromStr for Brand {
    type Err = UnknownBrand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANAIS" => Ok(Self::Anais),
            "EVOLVE" => Ok(Self::Evolve),
            "POPULO" => Ok(Self::Populo),
            other => Err(UnknownBrand {
                value: other.to_owned(),
            }),
        }
    }
}

/// Brand constraint applied to list queries.
///
/// Produced by the access policy, never directly from caller input: a
/// brand-scoped manager is always narrowed to their own brand regardless of
/// the brand they requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandFilter {
    /// No brand constraint (super-administrator listing everything).
    All,
    /// Restrict to a single brand.
    Only(Brand),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ANAIS", Brand::Anais)]
    #[case("EVOLVE", Brand::Evolve)]
    #[case("POPULO", Brand::Populo)]
    fn parses_canonical_identifiers(#[case] raw: &str, #[case] expected: Brand) {
        assert_eq!(raw.parse::<Brand>().expect("valid brand"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("anais")]
    #[case("POPULO ")]
    #[case("")]
    fn rejects_unknown_identifiers(#[case] raw: &str) {
        let err = raw.parse::<Brand>().expect_err("invalid brand");
        assert_eq!(err.value, raw);
    }
}
