use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

/// A single field-level problem reported by request validation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Application-level error type for HTTP handlers.
///
/// Every handler returns this; `IntoResponse` turns it into a consistent
/// JSON body of the shape `{"message", "code", "issues"?}`. Database errors
/// are classified here, once, instead of in each handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        issues: Vec<FieldIssue>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn validation(issues: Vec<FieldIssue>) -> Self {
        Self::Validation {
            message: "Request validation failed".to_string(),
            issues,
        }
    }

    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{what} not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, issues) = match self {
            ApiError::Validation { message, issues } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, issues)
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message, Vec::new())
            }
            ApiError::Conflict(message) => {
                (StatusCode::CONFLICT, "CONFLICT", message, Vec::new())
            }
            ApiError::Database(err) => {
                let (status, code, message) = classify_sqlx_error(&err);
                (status, code, message, Vec::new())
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    Vec::new(),
                )
            }
        };

        let mut body = json!({
            "message": message,
            "code": code,
        });
        if !issues.is_empty() {
            body["issues"] = json!(issues);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (Postgres 23505) map to 409.
/// - Foreign-key violations (Postgres 23503) map to 404, attributed to the
///   referenced entity via the constraint name.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => (
                StatusCode::CONFLICT,
                "CONFLICT",
                unique_violation_message(db_err.constraint()),
            ),
            Some("23503") => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                missing_reference_message(db_err.constraint()),
            ),
            _ => {
                tracing::error!(error = %db_err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        },
        other => {
            tracing::error!(error = %other, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn unique_violation_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("uq_athletes_email") => "Email already registered".to_string(),
        Some(c) => format!("Duplicate value violates unique constraint {c}"),
        None => "Duplicate value".to_string(),
    }
}

fn missing_reference_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("fk_food_items_meal_plan") => "Meal plan not found",
        Some("fk_daily_log_entries_athlete") => "Athlete not found",
        Some("fk_athlete_meal_plans_athlete") | Some("fk_athlete_meal_plans_meal_plan") => {
            "Athlete or meal plan not found"
        }
        _ => "Referenced entity not found",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::validation(vec![FieldIssue::new("email", "Invalid email")]);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::not_found("Athlete");
        assert_eq!(err.to_string(), "Athlete not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = ApiError::Conflict("Email already registered".to_string());
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_maps_to_500() {
        let err = ApiError::Internal("boom".to_string());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unique_violation_messages() {
        assert_eq!(
            unique_violation_message(Some("uq_athletes_email")),
            "Email already registered"
        );
        assert!(unique_violation_message(Some("uq_other")).contains("uq_other"));
    }

    #[test]
    fn missing_reference_messages() {
        assert_eq!(
            missing_reference_message(Some("fk_daily_log_entries_athlete")),
            "Athlete not found"
        );
        assert_eq!(
            missing_reference_message(Some("fk_food_items_meal_plan")),
            "Meal plan not found"
        );
        assert_eq!(
            missing_reference_message(Some("fk_athlete_meal_plans_meal_plan")),
            "Athlete or meal plan not found"
        );
        assert_eq!(
            missing_reference_message(None),
            "Referenced entity not found"
        );
    }
}
