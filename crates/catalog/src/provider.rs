//! The catalog capabilities the swipe session consumes.
//!
//! Sessions only ever talk to a `CatalogProvider`, so the in-memory
//! [`CatalogIndex`] can be swapped for a database-backed implementation
//! without touching session code.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogIndex, Cuisine, CuisineFilter, Dish, DishDetail, DishId};
use rayon::prelude::*;

/// Read-only access to dishes, cuisines and ingredients.
///
/// `Send + Sync` so one provider can be shared by every request handler.
pub trait CatalogProvider: Send + Sync {
    /// Every cuisine, in catalog order
    fn cuisines(&self) -> Result<Vec<Cuisine>>;

    /// Bare dish rows for a cuisine filter, in catalog order.
    ///
    /// An unknown cuisine yields an empty list, not an error.
    fn fetch_dishes_by_cuisine(&self, filter: &CuisineFilter) -> Result<Vec<Dish>>;

    /// Resolve a dish together with its cuisine and ingredients
    fn resolve_dish_detail(&self, id: DishId) -> Result<DishDetail>;

    /// Fetch and resolve a whole candidate pool, preserving catalog order.
    fn fetch_dish_details(&self, filter: &CuisineFilter) -> Result<Vec<DishDetail>> {
        let dishes = self.fetch_dishes_by_cuisine(filter)?;
        dishes
            .par_iter()
            .map(|dish| self.resolve_dish_detail(dish.id))
            .collect()
    }
}

impl CatalogProvider for CatalogIndex {
    fn cuisines(&self) -> Result<Vec<Cuisine>> {
        Ok(self.all_cuisines().to_vec())
    }

    fn fetch_dishes_by_cuisine(&self, filter: &CuisineFilter) -> Result<Vec<Dish>> {
        let dishes = match filter {
            CuisineFilter::All => self.all_dishes().to_vec(),
            CuisineFilter::Named(name) => self
                .get_dishes_by_cuisine_name(name)
                .iter()
                .filter_map(|&id| self.get_dish(id).cloned())
                .collect(),
        };
        Ok(dishes)
    }

    fn resolve_dish_detail(&self, id: DishId) -> Result<DishDetail> {
        let dish = self
            .get_dish(id)
            .cloned()
            .ok_or(CatalogError::DishNotFound { id })?;

        let cuisine_id = self
            .dish_cuisine
            .get(&id)
            .copied()
            .ok_or(CatalogError::DishNotFound { id })?;
        let cuisine = self
            .get_cuisine(cuisine_id)
            .cloned()
            .ok_or_else(|| CatalogError::MissingReference {
                entity: "Cuisine".to_string(),
                id: cuisine_id,
            })?;

        let ingredients = self
            .get_dish_ingredient_ids(id)
            .iter()
            .map(|&ingredient_id| {
                self.get_ingredient(ingredient_id)
                    .cloned()
                    .ok_or_else(|| CatalogError::MissingReference {
                        entity: "Ingredient".to_string(),
                        id: ingredient_id,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DishDetail::from_parts(dish, cuisine, ingredients))
    }
}
