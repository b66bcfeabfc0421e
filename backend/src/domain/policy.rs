//! Brand access policy: the single parametrized module every orchestrator
//! consults.
//!
//! The policy resolves three questions for a caller's role code:
//!
//! 1. May this role operate on this resource type at all (allow-list)?
//! 2. May this role touch a resource of this brand (`can_access`)?
//! 3. Which brand constraint applies when listing
//!    (`effective_brand_filter`)?
//!
//! Every answer fails closed for unrecognized role codes. A brand-scoped
//! role can never widen its scope through a query parameter: the requested
//! brand is ignored and the role's own brand is forced.

use super::admin::AdminContext;
use super::brand::{Brand, BrandFilter};
use super::error::Error;
use super::role::{AdminRole, BrandScope, RoleCode};

/// Resource types gated by the per-resource role allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Retail products and menu items.
    Products,
    /// Bookable salon/grooming service offerings.
    Offerings,
    /// Customer bookings.
    Bookings,
    /// Brand-scoped retail orders.
    Orders,
    /// Restaurant orders (POPULO only).
    RestaurantOrders,
}

impl ResourceKind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Offerings => "offerings",
            Self::Bookings => "bookings",
            Self::Orders => "orders",
            Self::RestaurantOrders => "restaurant orders",
        }
    }
}

/// Whether `role` may operate on `resource` at all.
///
/// Floor staff are allow-listed for restaurant orders only, and the
/// restaurant queue itself is limited to the super-administrator and the
/// two Populo roles.
#[must_use]
pub fn may_operate(role: &RoleCode, resource: ResourceKind) -> bool {
    match AdminRole::from_code(role) {
        Some(AdminRole::StaffPopulo) => matches!(resource, ResourceKind::RestaurantOrders),
        Some(AdminRole::ManagerAnais | AdminRole::ManagerEvolve) => {
            !matches!(resource, ResourceKind::RestaurantOrders)
        }
        Some(AdminRole::SuperAdmin | AdminRole::ManagerPopulo) => true,
        None => false,
    }
}

/// Whether `role` may read or write a resource carrying `brand`.
#[must_use]
pub fn can_access(role: &RoleCode, brand: Brand) -> bool {
    AdminRole::from_code(role).is_some_and(|resolved| resolved.brand_scope().covers(brand))
}

/// Brand constraint to apply when listing resources.
///
/// The super-administrator's requested brand is honoured (including "no
/// filter"); any other recognized role is forced onto its own brand
/// regardless of `requested`. Unrecognized roles get no filter at all
/// (`None`), which callers must treat as denial.
#[must_use]
pub fn effective_brand_filter(role: &RoleCode, requested: Option<Brand>) -> Option<BrandFilter> {
    match AdminRole::from_code(role)?.brand_scope() {
        BrandScope::AllBrands => Some(requested.map_or(BrandFilter::All, BrandFilter::Only)),
        BrandScope::Only(brand) => Some(BrandFilter::Only(brand)),
    }
}

/// Whether `role` is the super-administrator (the only role permitted to
/// reassign a resource's brand).
#[must_use]
pub fn is_super_admin(role: &RoleCode) -> bool {
    AdminRole::from_code(role) == Some(AdminRole::SuperAdmin)
}

/// Gate 3: fail with `Forbidden` unless the caller's role is allow-listed
/// for the resource type.
pub fn require_operate(caller: &AdminContext, resource: ResourceKind) -> Result<(), Error> {
    if may_operate(caller.role(), resource) {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "role is not permitted to manage {}",
            resource.name()
        )))
    }
}

/// Gate 4: fail with `Forbidden` unless the caller's role covers `brand`.
pub fn require_brand_access(caller: &AdminContext, brand: Brand) -> Result<(), Error> {
    if can_access(caller.role(), brand) {
        Ok(())
    } else {
        Err(Error::forbidden("brand not permitted for this role"))
    }
}

/// Resolve the list-time brand filter, failing closed for unrecognized
/// roles.
pub fn resolve_brand_filter(
    caller: &AdminContext,
    requested: Option<Brand>,
) -> Result<BrandFilter, Error> {
    effective_brand_filter(caller.role(), requested)
        .ok_or_else(|| Error::forbidden("role is not recognized"))
}
