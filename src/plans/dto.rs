use serde::{Deserialize, Serialize};

use super::repo::{FoodItem, MealPlan};
use crate::athletes::Athlete;
use crate::error::{ApiError, FieldIssue};

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
}

impl CreatePlanRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation(vec![FieldIssue::new(
                "name",
                "Name must not be empty",
            )]));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachPlanRequest {
    pub plan_id: i64,
}

/// New plan item. `foodId`/`foodName` are a snapshot of the reference
/// catalog taken by the client; the catalog itself is not consulted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodItemRequest {
    pub food_id: String,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub meal_type: String,
}

impl CreateFoodItemRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut issues = Vec::new();
        if self.food_id.trim().is_empty() {
            issues.push(FieldIssue::new("foodId", "foodId must not be empty"));
        }
        if self.food_name.trim().is_empty() {
            issues.push(FieldIssue::new("foodName", "foodName must not be empty"));
        }
        check_quantity(&mut issues, Some(self.quantity));
        check_unit(&mut issues, Some(&self.unit));
        check_meal_type(&mut issues, Some(&self.meal_type));
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
pub struct UpdateFoodItemRequest {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub meal_type: Option<String>,
}

impl UpdateFoodItemRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut issues = Vec::new();
        check_quantity(&mut issues, self.quantity);
        check_unit(&mut issues, self.unit.as_deref());
        check_meal_type(&mut issues, self.meal_type.as_deref());
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(issues))
        }
    }
}

/// A plan with its items and the athletes it is assigned to.
#[derive(Debug, Serialize)]
pub struct PlanDetails {
    #[serde(flatten)]
    pub plan: MealPlan,
    pub items: Vec<FoodItem>,
    pub athletes: Vec<Athlete>,
}

fn check_quantity(issues: &mut Vec<FieldIssue>, quantity: Option<f64>) {
    if let Some(q) = quantity {
        if !(q > 0.0) {
            issues.push(FieldIssue::new("quantity", "quantity must be positive"));
        }
    }
}

fn check_unit(issues: &mut Vec<FieldIssue>, unit: Option<&str>) {
    if let Some(u) = unit {
        if u.trim().is_empty() {
            issues.push(FieldIssue::new("unit", "unit must not be empty"));
        }
    }
}

fn check_meal_type(issues: &mut Vec<FieldIssue>, meal_type: Option<&str>) {
    if let Some(m) = meal_type {
        if m.chars().count() < 3 {
            issues.push(FieldIssue::new(
                "mealType",
                "mealType must be at least 3 characters",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> CreateFoodItemRequest {
        CreateFoodItemRequest {
            food_id: "170".to_string(),
            food_name: "Banana, prata, crua".to_string(),
            quantity: 100.0,
            unit: "g".to_string(),
            meal_type: "breakfast".to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_item() {
        assert!(item().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let mut req = item();
        req.quantity = 0.0;
        assert!(req.validate().is_err());
        req.quantity = -1.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_short_meal_type() {
        let mut req = item();
        req.meal_type = "ab".to_string();
        let err = req.validate().unwrap_err();
        match err {
            ApiError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "mealType");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn partial_item_update_checks_present_fields_only() {
        let req = UpdateFoodItemRequest {
            quantity: Some(80.0),
            unit: None,
            meal_type: None,
        };
        assert!(req.validate().is_ok());

        let req = UpdateFoodItemRequest {
            quantity: None,
            unit: Some(" ".to_string()),
            meal_type: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_plan_name_is_rejected() {
        let req = CreatePlanRequest {
            name: "  ".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
