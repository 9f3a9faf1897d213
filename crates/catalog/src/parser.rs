//! Parser for catalog files.
//!
//! The catalog is a single JSON document laid out like the relational tables
//! it is exported from:
//! - `cuisines`: `{id, name}`
//! - `ingredients`: `{id, name, color}`
//! - `dishes`: `{id, name, imageUrl, description, cuisineId, ingredientIds}`
//!
//! Relations are kept as ids here; [`crate::CatalogIndex`] resolves them.

use crate::error::{CatalogError, Result};
use crate::types::{Cuisine, CuisineId, Dish, DishId, Ingredient, IngredientId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One row of the `dishes` table, with its link-table entries inlined
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    pub id: DishId,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    pub cuisine_id: CuisineId,
    #[serde(default)]
    pub ingredient_ids: Vec<IngredientId>,
}

impl DishRecord {
    /// Split into the bare dish row and its relations
    pub fn into_parts(self) -> (Dish, CuisineId, Vec<IngredientId>) {
        (
            Dish {
                id: self.id,
                name: self.name,
                image_url: self.image_url,
                description: self.description,
            },
            self.cuisine_id,
            self.ingredient_ids,
        )
    }
}

/// The whole catalog document as it appears on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub cuisines: Vec<Cuisine>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub dishes: Vec<DishRecord>,
}

/// Parse a catalog file from disk
pub fn parse_catalog(path: &Path) -> Result<CatalogFile> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_catalog_str(&content)
}

/// Parse a catalog document already held in memory
pub fn parse_catalog_str(content: &str) -> Result<CatalogFile> {
    let file: CatalogFile = serde_json::from_str(content)?;
    Ok(file)
}
