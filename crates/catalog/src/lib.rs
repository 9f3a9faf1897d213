//! # Catalog Crate
//!
//! This crate loads and indexes the dish catalog: dishes, cuisines and
//! ingredients, plus the relations between them.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Dish, DishDetail, Cuisine, Ingredient, CatalogIndex)
//! - **parser**: Parse the JSON catalog file into Rust structs
//! - **index**: Build and validate the in-memory index
//! - **provider**: The `CatalogProvider` trait that sessions consume
//! - **error**: Error types for catalog loading and lookups
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogIndex, CatalogProvider, CuisineFilter};
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_file(Path::new("data/catalog.json"))?;
//!
//! let pool = index.fetch_dish_details(&CuisineFilter::parse(Some("POLSKA")))?;
//! println!("{} Polish dishes", pool.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod provider;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use provider::CatalogProvider;
pub use types::{
    // Type aliases
    CuisineId,
    DishId,
    IngredientId,
    // Core types
    CatalogIndex,
    Cuisine,
    CuisineFilter,
    Dish,
    DishDetail,
    Ingredient,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_index_creation() {
        let index = CatalogIndex::new();
        let (cuisines, ingredients, dishes) = index.counts();

        assert_eq!(cuisines, 0);
        assert_eq!(ingredients, 0);
        assert_eq!(dishes, 0);
    }

    #[test]
    fn test_insert_dish() {
        let mut index = CatalogIndex::new();
        index.insert_cuisine(Cuisine { id: 1, name: "POLSKA".to_string() });
        index.insert_ingredient(Ingredient {
            id: 5,
            name: "beetroot".to_string(),
            color: "#8b0036".to_string(),
        });
        index.insert_dish(
            Dish {
                id: 1,
                name: "Barszcz".to_string(),
                image_url: "barszcz.png".to_string(),
                description: "Beet soup".to_string(),
            },
            1,
            vec![5],
        );
        index.build_secondary_indices();

        let detail = index.resolve_dish_detail(1).unwrap();
        assert_eq!(detail.name, "Barszcz");
        assert_eq!(detail.ingredients[0].name, "beetroot");
        assert_eq!(index.get_dishes_by_cuisine_name("polska"), &[1]);
    }

    #[test]
    fn test_empty_queries() {
        let index = CatalogIndex::new();

        assert!(index.get_dish(999).is_none());
        assert!(index.get_cuisine(999).is_none());
        assert!(index.get_ingredient(999).is_none());
        assert!(index.get_dish_ingredient_ids(999).is_empty());
        assert!(index.fetch_dishes_by_cuisine(&CuisineFilter::All).unwrap().is_empty());
    }
}
