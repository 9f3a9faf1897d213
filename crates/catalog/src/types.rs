//! Core domain types for the dish catalog.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (DishId, CuisineId, IngredientId)
//! - Structs with public fields and serde renames for the client's JSON shape
//! - Enums for a small closed set of values (CuisineFilter)
//! - HashMap for id lookups alongside Vec for insertion order

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up dish IDs with cuisine IDs

/// Unique identifier for a dish
pub type DishId = u32;

/// Unique identifier for a cuisine
pub type CuisineId = u32;

/// Unique identifier for an ingredient
pub type IngredientId = u32;

// =============================================================================
// Catalog Entities
// =============================================================================

/// An ingredient as stored in the catalog.
///
/// Two ingredients are the same *kind* when their names match; `id` and
/// `color` are catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    /// Display color used by the client (e.g. "#e23b3b")
    pub color: String,
}

/// A cuisine (e.g. "POLSKA", "ITALIAN")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cuisine {
    pub id: CuisineId,
    pub name: String,
}

/// A bare dish row, without its relations resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub image_url: String,
    pub description: String,
}

/// A dish with its cuisine and ordered ingredient list resolved.
///
/// This is the unit exchanged with the client and the unit that gets scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishDetail {
    pub id: DishId,
    pub name: String,
    pub cuisine: Cuisine,
    pub ingredients: Vec<Ingredient>,
    pub image_url: String,
    pub description: String,
}

impl DishDetail {
    /// Combine a dish row with its resolved relations
    pub fn from_parts(dish: Dish, cuisine: Cuisine, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: dish.id,
            name: dish.name,
            cuisine,
            ingredients,
            image_url: dish.image_url,
            description: dish.description,
        }
    }
}

// =============================================================================
// Cuisine Filter
// =============================================================================

/// Which part of the catalog a session draws its candidates from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CuisineFilter {
    /// Every dish in the catalog
    All,
    /// Dishes of one cuisine, matched case-insensitively by name
    Named(String),
}

impl CuisineFilter {
    /// Interpret the optional cuisine name sent by a client.
    ///
    /// `None`, an empty string, "all" (any case) and the legacy "WSZYSTKIE"
    /// all select the whole catalog.
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            None => CuisineFilter::All,
            Some(n) if n.is_empty() => CuisineFilter::All,
            Some(n) if n.eq_ignore_ascii_case("all") || n.eq_ignore_ascii_case("wszystkie") => {
                CuisineFilter::All
            }
            Some(n) => CuisineFilter::Named(n.to_string()),
        }
    }
}

impl Default for CuisineFilter {
    fn default() -> Self {
        CuisineFilter::All
    }
}

impl fmt::Display for CuisineFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CuisineFilter::All => write!(f, "all"),
            CuisineFilter::Named(name) => write!(f, "{name}"),
        }
    }
}

// =============================================================================
// CatalogIndex - The In-Memory Catalog
// =============================================================================

/// Holds the whole catalog and the indices needed to answer session queries.
///
/// Dishes and cuisines keep their file order in `Vec`s so that "the first
/// dish of the pool" is well defined; HashMaps give O(1) id lookups.
#[derive(Debug)]
pub struct CatalogIndex {
    // Primary data stores (insertion order)
    pub(crate) dishes: Vec<Dish>,
    pub(crate) cuisines: Vec<Cuisine>,
    pub(crate) ingredients: HashMap<IngredientId, Ingredient>,

    // Id -> position lookups
    pub(crate) dish_positions: HashMap<DishId, usize>,
    pub(crate) cuisine_positions: HashMap<CuisineId, usize>,

    // Relations
    pub(crate) dish_cuisine: HashMap<DishId, CuisineId>,
    pub(crate) dish_ingredients: HashMap<DishId, Vec<IngredientId>>,

    // Secondary index: upper-cased cuisine name -> dishes (catalog order)
    pub(crate) cuisine_index: HashMap<String, Vec<DishId>>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self {
            dishes: Vec::new(),
            cuisines: Vec::new(),
            ingredients: HashMap::new(),
            dish_positions: HashMap::new(),
            cuisine_positions: HashMap::new(),
            dish_cuisine: HashMap::new(),
            dish_ingredients: HashMap::new(),
            cuisine_index: HashMap::new(),
        }
    }

    /// Get a dish row by ID
    pub fn get_dish(&self, id: DishId) -> Option<&Dish> {
        self.dish_positions.get(&id).map(|&pos| &self.dishes[pos])
    }

    /// Get a cuisine by ID
    pub fn get_cuisine(&self, id: CuisineId) -> Option<&Cuisine> {
        self.cuisine_positions.get(&id).map(|&pos| &self.cuisines[pos])
    }

    /// Get an ingredient by ID
    pub fn get_ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients.get(&id)
    }

    /// All dishes in catalog order
    pub fn all_dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// All cuisines in catalog order
    pub fn all_cuisines(&self) -> &[Cuisine] {
        &self.cuisines
    }

    /// Dish IDs belonging to a cuisine name (case-insensitive).
    ///
    /// Returns an empty slice for unknown cuisines.
    pub fn get_dishes_by_cuisine_name(&self, name: &str) -> &[DishId] {
        self.cuisine_index
            .get(&name.to_uppercase())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Ingredient IDs of a dish, in recipe order
    pub fn get_dish_ingredient_ids(&self, id: DishId) -> &[IngredientId] {
        self.dish_ingredients
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    // Mutators - used during catalog loading

    /// Insert a cuisine; a repeated id replaces the earlier entry in place
    pub fn insert_cuisine(&mut self, cuisine: Cuisine) {
        match self.cuisine_positions.get(&cuisine.id) {
            Some(&pos) => self.cuisines[pos] = cuisine,
            None => {
                self.cuisine_positions.insert(cuisine.id, self.cuisines.len());
                self.cuisines.push(cuisine);
            }
        }
    }

    /// Insert an ingredient
    pub fn insert_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.insert(ingredient.id, ingredient);
    }

    /// Insert a dish together with its relations
    pub fn insert_dish(
        &mut self,
        dish: Dish,
        cuisine_id: CuisineId,
        ingredient_ids: Vec<IngredientId>,
    ) {
        let id = dish.id;
        match self.dish_positions.get(&id) {
            Some(&pos) => self.dishes[pos] = dish,
            None => {
                self.dish_positions.insert(id, self.dishes.len());
                self.dishes.push(dish);
            }
        }
        self.dish_cuisine.insert(id, cuisine_id);
        self.dish_ingredients.insert(id, ingredient_ids);
    }

    /// Get counts for debugging/validation: (cuisines, ingredients, dishes)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.cuisines.len(), self.ingredients.len(), self.dishes.len())
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}
