//! CatalogIndex building and indexing logic.
//!
//! This module builds the CatalogIndex from a parsed catalog file:
//! - Insert primary records (cuisines, ingredients, dishes)
//! - Build the cuisine-name secondary index
//! - Validate that every relation points at an existing record
//!
//! Rust concepts used here:
//! - Entry API for HashMap
//! - Rayon's `try_for_each` for parallel validation with early exit

use crate::error::{CatalogError, Result};
use crate::parser::{self, CatalogFile};
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl CatalogIndex {
    /// Load the catalog from a JSON file.
    ///
    /// Steps:
    /// 1. Parse the file
    /// 2. Insert records, rejecting duplicate ids
    /// 3. Build the cuisine-name index
    /// 4. Validate relations
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading dish catalog from {:?}", path);
        let file = parser::parse_catalog(path)?;
        let index = Self::from_catalog_file(file)?;

        let (cuisines, ingredients, dishes) = index.counts();
        info!(
            "Loaded {} cuisines, {} ingredients, {} dishes",
            cuisines, ingredients, dishes
        );
        Ok(index)
    }

    /// Build and validate an index from an already parsed catalog document
    pub fn from_catalog_file(file: CatalogFile) -> Result<Self> {
        let mut index = CatalogIndex::new();

        let mut seen = HashSet::new();
        for cuisine in file.cuisines {
            if !seen.insert(cuisine.id) {
                return Err(CatalogError::DuplicateId {
                    entity: "Cuisine".to_string(),
                    id: cuisine.id,
                });
            }
            index.insert_cuisine(cuisine);
        }

        seen.clear();
        for ingredient in file.ingredients {
            if !seen.insert(ingredient.id) {
                return Err(CatalogError::DuplicateId {
                    entity: "Ingredient".to_string(),
                    id: ingredient.id,
                });
            }
            index.insert_ingredient(ingredient);
        }

        seen.clear();
        for record in file.dishes {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId {
                    entity: "Dish".to_string(),
                    id: record.id,
                });
            }
            let (dish, cuisine_id, ingredient_ids) = record.into_parts();
            index.insert_dish(dish, cuisine_id, ingredient_ids);
        }

        index.validate()?;
        index.build_secondary_indices();
        Ok(index)
    }

    /// Build the cuisine-name index after primary data is loaded.
    ///
    /// Dishes are walked in catalog order so each per-cuisine list keeps it.
    pub fn build_secondary_indices(&mut self) {
        self.cuisine_index.clear();
        for dish in &self.dishes {
            let Some(cuisine) = self
                .dish_cuisine
                .get(&dish.id)
                .and_then(|cuisine_id| self.cuisine_positions.get(cuisine_id))
                .map(|&pos| &self.cuisines[pos])
            else {
                continue;
            };

            self.cuisine_index
                .entry(cuisine.name.to_uppercase())
                .or_default()
                .push(dish.id);
        }
    }

    /// Validate data integrity.
    ///
    /// Every dish must point at an existing cuisine and existing ingredients.
    pub fn validate(&self) -> Result<()> {
        self.dishes.par_iter().try_for_each(|dish| {
            let cuisine_id = self.dish_cuisine.get(&dish.id).copied().unwrap_or_default();
            if !self.cuisine_positions.contains_key(&cuisine_id) {
                return Err(CatalogError::MissingReference {
                    entity: "Cuisine".to_string(),
                    id: cuisine_id,
                });
            }

            for ingredient_id in self.get_dish_ingredient_ids(dish.id) {
                if !self.ingredients.contains_key(ingredient_id) {
                    return Err(CatalogError::MissingReference {
                        entity: "Ingredient".to_string(),
                        id: *ingredient_id,
                    });
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_catalog_str, DishRecord};

    fn record(id: DishId, cuisine_id: CuisineId, ingredient_ids: Vec<IngredientId>) -> DishRecord {
        DishRecord {
            id,
            name: format!("Dish {id}"),
            image_url: String::new(),
            description: String::new(),
            cuisine_id,
            ingredient_ids,
        }
    }

    fn sample_file() -> CatalogFile {
        CatalogFile {
            cuisines: vec![
                Cuisine { id: 1, name: "Polska".to_string() },
                Cuisine { id: 2, name: "ITALIAN".to_string() },
            ],
            ingredients: vec![Ingredient {
                id: 1,
                name: "salt".to_string(),
                color: "#ffffff".to_string(),
            }],
            dishes: vec![record(1, 1, vec![1]), record(2, 2, vec![]), record(3, 1, vec![1])],
        }
    }

    #[test]
    fn test_cuisine_index_keeps_catalog_order() {
        let index = CatalogIndex::from_catalog_file(sample_file()).unwrap();

        assert_eq!(index.get_dishes_by_cuisine_name("polska"), &[1, 3]);
        assert_eq!(index.get_dishes_by_cuisine_name("Italian"), &[2]);
        assert!(index.get_dishes_by_cuisine_name("THAI").is_empty());
    }

    #[test]
    fn test_duplicate_dish_id_rejected() {
        let mut file = sample_file();
        file.dishes.push(record(1, 1, vec![]));

        let result = CatalogIndex::from_catalog_file(file);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateId { ref entity, id: 1 }) if entity == "Dish"
        ));
    }

    #[test]
    fn test_missing_ingredient_reference() {
        let mut file = sample_file();
        file.dishes.push(record(9, 1, vec![42]));

        let result = CatalogIndex::from_catalog_file(file);
        assert!(matches!(result, Err(CatalogError::MissingReference { id: 42, .. })));
    }

    #[test]
    fn test_missing_cuisine_reference() {
        let file = parse_catalog_str(r#"{"dishes": [{"id": 1, "name": "Orphan", "cuisineId": 5}]}"#)
            .unwrap();

        let result = CatalogIndex::from_catalog_file(file);
        assert!(matches!(result, Err(CatalogError::MissingReference { id: 5, .. })));
    }

    #[test]
    fn test_load_sample_catalog() {
        // Uses the catalog shipped in the repository's data/ directory
        let path = Path::new("../../data/catalog.json");

        if path.exists() {
            let index = CatalogIndex::load_from_file(path).unwrap();
            let (cuisines, ingredients, dishes) = index.counts();
            assert!(cuisines > 0);
            assert!(ingredients > 0);
            assert!(dishes > 0);
        }
    }
}
