//! Shared builders for domain service tests.

use uuid::Uuid;

use crate::domain::{AdminContext, AdminProfile, AdminRole, RoleCode, VerifiedIdentity};

/// Build an authenticated caller holding the given role.
pub fn admin_context(role: AdminRole) -> AdminContext {
    let id = Uuid::new_v4();
    AdminContext {
        identity: VerifiedIdentity {
            id,
            email: "admin@example.com".to_owned(),
        },
        profile: AdminProfile {
            id,
            display_name: "Test Administrator".to_owned(),
            role: RoleCode::from(role),
        },
    }
}

/// Build an authenticated super-administrator caller.
pub fn super_admin_context() -> AdminContext {
    admin_context(AdminRole::SuperAdmin)
}

/// Build a caller whose role code is not in the recognized set.
pub fn unknown_role_context() -> AdminContext {
    let id = Uuid::new_v4();
    AdminContext {
        identity: VerifiedIdentity {
            id,
            email: "admin@example.com".to_owned(),
        },
        profile: AdminProfile {
            id,
            display_name: "Test Administrator".to_owned(),
            role: RoleCode::new("AUDITOR"),
        },
    }
}
