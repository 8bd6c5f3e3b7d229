use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::{ApiError, FieldIssue};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAthleteRequest {
    pub name: String,
    pub email: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl CreateAthleteRequest {
    pub fn normalize(&mut self) {
        self.email = self.email.trim().to_lowercase();
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push(FieldIssue::new("name", "Name must not be empty"));
        }
        if !is_valid_email(&self.email) {
            issues.push(FieldIssue::new("email", "Invalid email"));
        }
        check_positive(&mut issues, "height", self.height);
        check_positive(&mut issues, "weight", self.weight);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(issues))
        }
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAthleteRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl UpdateAthleteRequest {
    pub fn normalize(&mut self) {
        if let Some(email) = &mut self.email {
            *email = email.trim().to_lowercase();
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut issues = Vec::new();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                issues.push(FieldIssue::new("name", "Name must not be empty"));
            }
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                issues.push(FieldIssue::new("email", "Invalid email"));
            }
        }
        check_positive(&mut issues, "height", self.height);
        check_positive(&mut issues, "weight", self.weight);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(issues))
        }
    }
}

fn check_positive(issues: &mut Vec<FieldIssue>, field: &'static str, value: Option<f64>) {
    if let Some(v) = value {
        if !(v > 0.0) {
            issues.push(FieldIssue::new(field, format!("{field} must be positive")));
        }
    }
}
