use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

use super::records::{CategoryRecord, FoodRecord, Nutrients};

/// Parse failure in one of the reference CSV sources. Always fatal: the
/// server refuses to start without a complete catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{file} is missing a header row")]
    MissingHeader { file: &'static str },

    #[error("foods source line {line}: expected 3 columns, got {got}")]
    FoodColumnCount { line: usize, got: usize },
}

/// The in-memory food/nutrient reference catalog.
///
/// Built once from three CSV sources and never mutated afterwards. The join
/// is last-write-wins for duplicate ids within a source file.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(super) foods: Vec<FoodRecord>,
    pub(super) categories: Vec<CategoryRecord>,
}

impl Catalog {
    /// Load `categories.csv`, `nutrients.csv` and `foods.csv` from `dir`.
    ///
    /// Any I/O or parse failure aborts startup; there is no partial-success
    /// mode because every route assumes the catalog is fully present.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let read = |name: &str| -> anyhow::Result<String> {
            let path = dir.join(name);
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
        };
        let categories = read("categories.csv")?;
        let nutrients = read("nutrients.csv")?;
        let foods = read("foods.csv")?;
        Ok(Self::from_csv(&categories, &nutrients, &foods)?)
    }

    /// Build the catalog from raw CSV text.
    ///
    /// Three sequential passes: categories into an id map, nutrients into a
    /// foodId map, then foods joined against both with fallbacks. An unknown
    /// category becomes `{?, Unknown}`, missing nutrients become all zeros.
    pub fn from_csv(categories: &str, nutrients: &str, foods: &str) -> Result<Self, CatalogError> {
        // Pass 1: categories. Rows with an empty id or too few columns are
        // skipped; foods pointing at them fall back to Unknown.
        let mut category_by_id: HashMap<String, String> = HashMap::new();
        let mut category_order: Vec<String> = Vec::new();
        for (_, fields) in data_rows(categories, "categories")? {
            let id = fields.first().map(|s| s.trim()).unwrap_or("");
            if id.is_empty() || fields.len() < 2 {
                continue;
            }
            if !category_by_id.contains_key(id) {
                category_order.push(id.to_string());
            }
            category_by_id.insert(id.to_string(), fields[1].trim().to_string());
        }

        // Pass 2: nutrients. Non-numeric values default to 0.0, never
        // failing the row. Column order: foodId,kcal,protein,lipids,carbohydrates.
        let mut nutrients_by_food: HashMap<String, Nutrients> = HashMap::new();
        for (_, fields) in data_rows(nutrients, "nutrients")? {
            let food_id = fields.first().map(|s| s.trim()).unwrap_or("");
            if food_id.is_empty() {
                continue;
            }
            let num = |i: usize| {
                fields
                    .get(i)
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .unwrap_or(0.0)
            };
            nutrients_by_food.insert(
                food_id.to_string(),
                Nutrients {
                    kcal: num(1),
                    protein: num(2),
                    lipids: num(3),
                    carbohydrates: num(4),
                },
            );
        }

        // Pass 3: foods, joined sequentially. One record per source row; no
        // duplicate-id detection here.
        let mut food_records = Vec::new();
        for (line, fields) in data_rows(foods, "foods")? {
            if fields.len() != 3 {
                return Err(CatalogError::FoodColumnCount {
                    line,
                    got: fields.len(),
                });
            }
            let id = fields[0].trim().to_string();
            let description = fields[1].trim().to_string();
            let category_id = fields[2].trim();
            let category = category_by_id
                .get(category_id)
                .map(|name| CategoryRecord {
                    id: category_id.to_string(),
                    name: name.clone(),
                })
                .unwrap_or_else(CategoryRecord::unknown);
            let nutrients = nutrients_by_food.get(&id).cloned().unwrap_or_default();
            food_records.push(FoodRecord {
                id,
                description,
                category,
                nutrients,
            });
        }

        let categories = category_order
            .into_iter()
            .map(|id| {
                let name = category_by_id[&id].clone();
                CategoryRecord { id, name }
            })
            .collect();

        Ok(Self {
            foods: food_records,
            categories,
        })
    }
}

/// Split a CSV source into numbered data rows, skipping the header line and
/// blank lines. Line numbers are 1-based file positions.
fn data_rows(
    text: &str,
    file: &'static str,
) -> Result<Vec<(usize, Vec<String>)>, CatalogError> {
    let mut lines = text.lines();
    if lines.next().is_none() {
        return Err(CatalogError::MissingHeader { file });
    }
    Ok(lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 2, parse_csv_line(line)))
        .collect())
}

/// Parse a single CSV line, handling double-quoted fields and escaped
/// quotes (`""`).
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodFilter;

    const CATEGORIES: &str = "id,name\nC1,Fruits";
    const NUTRIENTS: &str = "foodId,kcal,protein,lipids,carbohydrates\nF1,89,1.1,0.3,23";
    const FOODS: &str = "id,name,categoryId\nF1,Banana,C1";

    #[test]
    fn joins_food_with_category_and_nutrients() {
        let catalog = Catalog::from_csv(CATEGORIES, NUTRIENTS, FOODS).unwrap();
        let foods = catalog.foods(&FoodFilter::default());
        assert_eq!(
            foods,
            vec![FoodRecord {
                id: "F1".to_string(),
                description: "Banana".to_string(),
                category: CategoryRecord {
                    id: "C1".to_string(),
                    name: "Fruits".to_string(),
                },
                nutrients: Nutrients {
                    kcal: 89.0,
                    protein: 1.1,
                    lipids: 0.3,
                    carbohydrates: 23.0,
                },
            }]
        );
    }

    #[test]
    fn flattens_nutrients_in_json() {
        let catalog = Catalog::from_csv(CATEGORIES, NUTRIENTS, FOODS).unwrap();
        let json = serde_json::to_value(&catalog.foods(&FoodFilter::default())[0]).unwrap();
        assert_eq!(json["kcal"], 89.0);
        assert_eq!(json["carbohydrates"], 23.0);
        assert_eq!(json["category"]["name"], "Fruits");
    }

    #[test]
    fn unknown_category_falls_back_to_sentinel() {
        let foods = "id,name,categoryId\nF1,Banana,NOPE";
        let catalog = Catalog::from_csv(CATEGORIES, NUTRIENTS, foods).unwrap();
        let record = &catalog.foods(&FoodFilter::default())[0];
        assert_eq!(record.category, CategoryRecord::unknown());
        assert_eq!(record.category.id, "?");
        assert_eq!(record.category.name, "Unknown");
    }

    #[test]
    fn missing_nutrients_row_defaults_to_zero() {
        let nutrients = "foodId,kcal,protein,lipids,carbohydrates";
        let catalog = Catalog::from_csv(CATEGORIES, nutrients, FOODS).unwrap();
        let record = &catalog.foods(&FoodFilter::default())[0];
        assert_eq!(record.nutrients, Nutrients::default());
    }

    #[test]
    fn non_numeric_nutrient_field_defaults_to_zero() {
        let nutrients = "foodId,kcal,protein,lipids,carbohydrates\nF1,89,abc,0.3,";
        let catalog = Catalog::from_csv(CATEGORIES, nutrients, FOODS).unwrap();
        let n = &catalog.foods(&FoodFilter::default())[0].nutrients;
        assert_eq!(n.kcal, 89.0);
        assert_eq!(n.protein, 0.0);
        assert_eq!(n.lipids, 0.3);
        assert_eq!(n.carbohydrates, 0.0);
    }

    #[test]
    fn duplicate_category_id_is_last_write_wins() {
        let categories = "id,name\nC1,Fruits\nC1,Frutas";
        let catalog = Catalog::from_csv(categories, NUTRIENTS, FOODS).unwrap();
        let listed = catalog.categories();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Frutas");
        assert_eq!(catalog.foods(&FoodFilter::default())[0].category.name, "Frutas");
    }

    #[test]
    fn duplicate_nutrients_row_is_last_write_wins() {
        let nutrients = concat!(
            "foodId,kcal,protein,lipids,carbohydrates\n",
            "F1,10,1,1,1\n",
            "F1,89,1.1,0.3,23",
        );
        let catalog = Catalog::from_csv(CATEGORIES, nutrients, FOODS).unwrap();
        assert_eq!(catalog.foods(&FoodFilter::default())[0].nutrients.kcal, 89.0);
    }

    #[test]
    fn malformed_category_row_is_skipped() {
        let categories = "id,name\n,Ghost\nC1,Fruits\nonly-one-column";
        let catalog = Catalog::from_csv(categories, NUTRIENTS, FOODS).unwrap();
        assert_eq!(catalog.categories().len(), 1);
        assert_eq!(catalog.categories()[0].id, "C1");
    }

    #[test]
    fn one_record_per_food_row() {
        let foods = "id,name,categoryId\nF1,Banana,C1\nF1,Banana again,C1\nF2,Apple,C1";
        let catalog = Catalog::from_csv(CATEGORIES, NUTRIENTS, foods).unwrap();
        assert_eq!(catalog.food_count(), 3);
    }

    #[test]
    fn quoted_field_keeps_embedded_comma() {
        let foods = "id,name,categoryId\nF1,\"Banana, prata, crua\",C1";
        let catalog = Catalog::from_csv(CATEGORIES, NUTRIENTS, foods).unwrap();
        assert_eq!(
            catalog.foods(&FoodFilter::default())[0].description,
            "Banana, prata, crua"
        );
    }

    #[test]
    fn escaped_quote_is_unescaped() {
        assert_eq!(
            parse_csv_line(r#"F1,"say ""hi"", ok",C1"#),
            vec!["F1", r#"say "hi", ok"#, "C1"]
        );
    }

    #[test]
    fn missing_header_is_fatal() {
        let err = Catalog::from_csv("", NUTRIENTS, FOODS).unwrap_err();
        assert!(matches!(err, CatalogError::MissingHeader { file: "categories" }));
    }

    #[test]
    fn bad_food_column_count_is_fatal() {
        let foods = "id,name,categoryId\nF1,Banana";
        let err = Catalog::from_csv(CATEGORIES, NUTRIENTS, foods).unwrap_err();
        assert!(matches!(err, CatalogError::FoodColumnCount { line: 2, got: 2 }));
    }

    #[test]
    fn header_only_sources_yield_empty_catalog() {
        let catalog = Catalog::from_csv(
            "id,name",
            "foodId,kcal,protein,lipids,carbohydrates",
            "id,name,categoryId",
        )
        .unwrap();
        assert_eq!(catalog.food_count(), 0);
        assert_eq!(catalog.category_count(), 0);
    }
}
