//! Administrative roles and their brand scope.
//!
//! Role codes are stored by an external provisioning process and carried
//! through this subsystem verbatim as [`RoleCode`]. Resolution to the closed
//! [`AdminRole`] set happens at policy-evaluation time and fails closed:
//! an unrecognized code resolves to `None` and is denied everywhere.

use serde::{Deserialize, Serialize};

use super::brand::Brand;

/// Raw role code exactly as provisioned (e.g. `MANAGER_ANAIS`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCode(String);

impl RoleCode {
    /// Wrap a provisioned role code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for RoleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AdminRole> for RoleCode {
    fn from(role: AdminRole) -> Self {
        Self::new(role.code())
    }
}

/// Brands a role may read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandScope {
    /// The role satisfies any brand check.
    AllBrands,
    /// The role is bound to exactly one brand.
    Only(Brand),
}

impl BrandScope {
    /// Whether the scope covers `brand`.
    #[must_use]
    pub fn covers(&self, brand: Brand) -> bool {
        match self {
            Self::AllBrands => true,
            Self::Only(only) => *only == brand,
        }
    }
}

/// Closed set of recognized administrative roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRole {
    /// Full access to every brand, including brand reassignment.
    SuperAdmin,
    /// Manager of the ANAIS cosmetics store.
    ManagerAnais,
    /// Manager of the EVOLVE grooming store.
    ManagerEvolve,
    /// Manager of the POPULO restaurant.
    ManagerPopulo,
    /// POPULO floor staff; restaurant orders only.
    StaffPopulo,
}

impl AdminRole {
    /// Resolve a provisioned code, returning `None` for unrecognized codes.
    #[must_use]
    pub fn from_code(code: &RoleCode) -> Option<Self> {
        match code.as_str() {
            "SUPER_ADMIN" => Some(Self::SuperAdmin),
            "MANAGER_ANAIS" => Some(Self::ManagerAnais),
            "MANAGER_EVOLVE" => Some(Self::ManagerEvolve),
            "MANAGER_POPULO" => Some(Self::ManagerPopulo),
            "STAFF_POPULO" => Some(Self::StaffPopulo),
            _ => None,
        }
    }

    /// Canonical code for the role.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::ManagerAnais => "MANAGER_ANAIS",
            Self::ManagerEvolve => "MANAGER_EVOLVE",
            Self::ManagerPopulo => "MANAGER_POPULO",
            Self::StaffPopulo => "STAFF_POPULO",
        }
    }

    /// Brands this role may touch. A manager role maps to exactly one brand.
    #[must_use]
    pub const fn brand_scope(&self) -> BrandScope {
        match self {
            Self::SuperAdmin => BrandScope::AllBrands,
            Self::ManagerAnais => BrandScope::Only(Brand::Anais),
            Self::ManagerEvolve => BrandScope::Only(Brand::Evolve),
            Self::ManagerPopulo | Self::StaffPopulo => BrandScope::Only(Brand::Populo),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(AdminRole::SuperAdmin)]
    #[case(AdminRole::ManagerAnais)]
    #[case(AdminRole::ManagerEvolve)]
    #[case(AdminRole::ManagerPopulo)]
    #[case(AdminRole::StaffPopulo)]
    fn codes_round_trip(#[case] role: AdminRole) {
        let code = RoleCode::new(role.code());
        assert_eq!(AdminRole::from_code(&code), Some(role));
    }

    #[rstest]
    #[case("ADMIN")]
    #[case("manager_anais")]
    #[case("")]
    fn unrecognized_codes_fail_closed(#[case] raw: &str) {
        assert_eq!(AdminRole::from_code(&RoleCode::new(raw)), None);
    }

    #[test]
    fn manager_scope_is_a_single_brand() {
        for role in [
            AdminRole::ManagerAnais,
            AdminRole::ManagerEvolve,
            AdminRole::ManagerPopulo,
            AdminRole::StaffPopulo,
        ] {
            assert!(matches!(role.brand_scope(), BrandScope::Only(_)));
        }
        assert_eq!(AdminRole::SuperAdmin.brand_scope(), BrandScope::AllBrands);
    }
}
