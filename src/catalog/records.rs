use serde::{Deserialize, Serialize};

/// A food category from the reference set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
}

impl CategoryRecord {
    /// Fallback for foods whose category id has no match in the source.
    pub fn unknown() -> Self {
        Self {
            id: "?".to_string(),
            name: "Unknown".to_string(),
        }
    }
}

/// Macronutrients of a reference food, per 100 g of the edible part.
///
/// All values are non-negative; a food with no matching nutrients row gets
/// all zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub kcal: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub lipids: f64,
}

/// A reference food joined with its category and nutrients at load time.
/// Immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: String,
    pub description: String,
    pub category: CategoryRecord,
    #[serde(flatten)]
    pub nutrients: Nutrients,
}

/// Query-string filter for `GET /foods`. Filters compose with logical AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodFilter {
    pub search: Option<String>,
    pub category_id: Option<String>,
}
