//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or names an unknown enum/status value.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The status machine rejected the requested lifecycle transition.
    #[schema(rename = "illegal_transition")]
    IllegalTransition,
    /// The external data store failed.
    #[schema(rename = "storage_error")]
    StorageError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "forbidden")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "brand not permitted for this role")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Brand`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Brand)]
pub enum BrandSchema {
    /// Cosmetics store.
    #[schema(rename = "ANAIS")]
    Anais,
    /// Men's grooming store.
    #[schema(rename = "EVOLVE")]
    Evolve,
    /// Restaurant.
    #[schema(rename = "POPULO")]
    Populo,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "illegal_transition",
            "storage_error",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn brand_schema_variants_match_domain() {
        let schema_json = schema_to_json::<BrandSchema>();
        for brand in ["ANAIS", "EVOLVE", "POPULO"] {
            assert!(schema_json.contains(brand), "missing {brand}");
        }
    }

    #[test]
    fn error_schema_contains_the_payload_fields() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("message"));
        assert!(schema_json.contains("trace_id"));
    }
}
