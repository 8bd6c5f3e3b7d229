use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use crate::error::{ApiError, FieldIssue};

/// New diary entry. The nutrient values are a snapshot recorded by the
/// client at log time; they are stored verbatim, decoupled from the
/// reference catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogEntryRequest {
    pub eaten_at: String,
    pub meal_type: String,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub kcal: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub lipids: f64,
}

impl CreateLogEntryRequest {
    /// Validates all fields; on success returns the parsed `eatenAt`.
    pub fn validate(&self) -> Result<OffsetDateTime, ApiError> {
        let mut issues = Vec::new();
        let eaten_at = parse_eaten_at(&mut issues, &self.eaten_at);
        check_meal_type(&mut issues, &self.meal_type);
        if self.food_name.trim().is_empty() {
            issues.push(FieldIssue::new("foodName", "foodName must not be empty"));
        }
        if !(self.quantity > 0.0) {
            issues.push(FieldIssue::new("quantity", "quantity must be positive"));
        }
        if self.unit.trim().is_empty() {
            issues.push(FieldIssue::new("unit", "unit must not be empty"));
        }
        for (field, value) in [
            ("kcal", self.kcal),
            ("protein", self.protein),
            ("carbohydrates", self.carbohydrates),
            ("lipids", self.lipids),
        ] {
            if !(value >= 0.0) {
                issues.push(FieldIssue::new(field, format!("{field} must not be negative")));
            }
        }

        match (eaten_at, issues.is_empty()) {
            (Some(ts), true) => Ok(ts),
            _ => Err(ApiError::validation(issues)),
        }
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogEntryRequest {
    pub eaten_at: Option<String>,
    pub meal_type: Option<String>,
    pub food_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub kcal: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub lipids: Option<f64>,
}

impl UpdateLogEntryRequest {
    /// Validates present fields; returns the parsed `eatenAt` when given.
    pub fn validate(&self) -> Result<Option<OffsetDateTime>, ApiError> {
        let mut issues = Vec::new();
        let eaten_at = self
            .eaten_at
            .as_deref()
            .and_then(|raw| parse_eaten_at(&mut issues, raw));
        if let Some(meal_type) = &self.meal_type {
            check_meal_type(&mut issues, meal_type);
        }
        if let Some(food_name) = &self.food_name {
            if food_name.trim().is_empty() {
                issues.push(FieldIssue::new("foodName", "foodName must not be empty"));
            }
        }
        if let Some(quantity) = self.quantity {
            if !(quantity > 0.0) {
                issues.push(FieldIssue::new("quantity", "quantity must be positive"));
            }
        }
        if let Some(unit) = &self.unit {
            if unit.trim().is_empty() {
                issues.push(FieldIssue::new("unit", "unit must not be empty"));
            }
        }
        for (field, value) in [
            ("kcal", self.kcal),
            ("protein", self.protein),
            ("carbohydrates", self.carbohydrates),
            ("lipids", self.lipids),
        ] {
            if let Some(v) = value {
                if !(v >= 0.0) {
                    issues.push(FieldIssue::new(field, format!("{field} must not be negative")));
                }
            }
        }

        if issues.is_empty() {
            Ok(eaten_at)
        } else {
            Err(ApiError::validation(issues))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogDayQuery {
    pub date: String,
}

/// The UTC day window `[date 00:00:00, date+1 00:00:00)` for a
/// `YYYY-MM-DD` query parameter.
pub fn day_window(date: &str) -> Result<(OffsetDateTime, OffsetDateTime), ApiError> {
    let format = format_description!("[year]-[month]-[day]");
    let day = Date::parse(date, format).map_err(|_| {
        ApiError::validation(vec![FieldIssue::new("date", "date must be YYYY-MM-DD")])
    })?;
    let start = day.midnight().assume_utc();
    Ok((start, start + Duration::days(1)))
}

fn parse_eaten_at(issues: &mut Vec<FieldIssue>, raw: &str) -> Option<OffsetDateTime> {
    match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(ts) => Some(ts),
        Err(_) => {
            issues.push(FieldIssue::new(
                "eatenAt",
                "eatenAt must be an RFC 3339 timestamp",
            ));
            None
        }
    }
}

fn check_meal_type(issues: &mut Vec<FieldIssue>, meal_type: &str) {
    if meal_type.chars().count() < 3 {
        issues.push(FieldIssue::new(
            "mealType",
            "mealType must be at least 3 characters",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry() -> CreateLogEntryRequest {
        CreateLogEntryRequest {
            eaten_at: "2025-10-23T12:00:00Z".to_string(),
            meal_type: "lunch".to_string(),
            food_name: "Banana, prata, crua".to_string(),
            quantity: 100.0,
            unit: "g".to_string(),
            kcal: 98.3,
            protein: 1.3,
            carbohydrates: 26.0,
            lipids: 0.1,
        }
    }

    #[test]
    fn accepts_a_well_formed_entry() {
        let parsed = entry().validate().unwrap();
        assert_eq!(parsed, datetime!(2025-10-23 12:00:00 UTC));
    }

    #[test]
    fn rejects_a_non_iso_timestamp() {
        let mut req = entry();
        req.eaten_at = "23/10/2025 12:00".to_string();
        let err = req.validate().unwrap_err();
        match err {
            ApiError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "eatenAt");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_nutrients() {
        let mut req = entry();
        req.protein = -0.1;
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_parses_eaten_at_when_present() {
        let req = UpdateLogEntryRequest {
            eaten_at: Some("2025-10-23T08:30:00Z".to_string()),
            meal_type: None,
            food_name: None,
            quantity: None,
            unit: None,
            kcal: None,
            protein: None,
            carbohydrates: None,
            lipids: None,
        };
        let parsed = req.validate().unwrap();
        assert_eq!(parsed, Some(datetime!(2025-10-23 08:30:00 UTC)));
    }

    #[test]
    fn update_with_no_fields_is_valid() {
        let req = UpdateLogEntryRequest {
            eaten_at: None,
            meal_type: None,
            food_name: None,
            quantity: None,
            unit: None,
            kcal: None,
            protein: None,
            carbohydrates: None,
            lipids: None,
        };
        assert_eq!(req.validate().unwrap(), None);
    }

    #[test]
    fn day_window_covers_one_utc_day() {
        let (start, end) = day_window("2025-10-23").unwrap();
        assert_eq!(start, datetime!(2025-10-23 00:00:00 UTC));
        assert_eq!(end, datetime!(2025-10-24 00:00:00 UTC));
    }

    #[test]
    fn day_window_rejects_other_formats() {
        assert!(day_window("23-10-2025").is_err());
        assert!(day_window("2025/10/23").is_err());
        assert!(day_window("not a date").is_err());
    }
}
