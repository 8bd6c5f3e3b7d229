use super::loader::Catalog;
use super::records::{CategoryRecord, FoodFilter, FoodRecord};

impl Catalog {
    /// All foods matching `filter`, as a defensive copy of the cached set.
    ///
    /// `search` keeps records whose description contains the query
    /// case-insensitively (plain substring, not tokenized); `category_id`
    /// is an exact match. Both filters compose with AND.
    pub fn foods(&self, filter: &FoodFilter) -> Vec<FoodRecord> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        self.foods
            .iter()
            .filter(|food| {
                search
                    .as_deref()
                    .map_or(true, |q| food.description.to_lowercase().contains(q))
            })
            .filter(|food| {
                filter
                    .category_id
                    .as_deref()
                    .map_or(true, |c| food.category.id == c)
            })
            .cloned()
            .collect()
    }

    /// The distinct category set, in first-seen order from the categories
    /// source.
    pub fn categories(&self) -> Vec<CategoryRecord> {
        self.categories.clone()
    }

    pub fn food_count(&self) -> usize {
        self.foods.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}
