//! Ingredient affinity tables built from a swipe history.
//!
//! Liked dishes contribute a multiset of ingredient kinds (an ingredient that
//! shows up in three liked dishes weighs 3), disliked dishes contribute a
//! plain set. A candidate dish is scored by walking its ingredients against
//! both tables.

use catalog::{DishDetail, Ingredient};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// How an ingredient of a candidate dish is matched against the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientMatch {
    /// Both sides compare by ingredient name only.
    #[default]
    #[serde(alias = "name")]
    ByName,
    /// Tables keep full `(id, name, color)` records while candidates are
    /// probed with id `0` and color `"0"`. Only matches catalogs whose
    /// ingredient records already carry those neutral values.
    Literal,
}

impl FromStr for IngredientMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "byname" | "by-name" => Ok(IngredientMatch::ByName),
            "literal" => Ok(IngredientMatch::Literal),
            other => Err(format!("unknown ingredient match mode: {other}")),
        }
    }
}

impl fmt::Display for IngredientMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngredientMatch::ByName => write!(f, "name"),
            IngredientMatch::Literal => write!(f, "literal"),
        }
    }
}

/// The catalog metadata stripped from an ingredient, leaving only its kind.
fn neutral(ingredient: &Ingredient) -> Ingredient {
    Ingredient {
        id: 0,
        name: ingredient.name.clone(),
        color: "0".to_string(),
    }
}

/// Liked-ingredient counts and disliked-ingredient set for one history.
#[derive(Debug, Clone)]
pub struct IngredientAffinity {
    mode: IngredientMatch,
    liked: HashMap<Ingredient, u32>,
    disliked: HashSet<Ingredient>,
}

impl IngredientAffinity {
    /// Build both tables from the liked and disliked dishes.
    pub fn from_history(
        liked: &[DishDetail],
        disliked: &[DishDetail],
        mode: IngredientMatch,
    ) -> Self {
        let table_key = |ingredient: &Ingredient| match mode {
            IngredientMatch::ByName => neutral(ingredient),
            IngredientMatch::Literal => ingredient.clone(),
        };

        let mut liked_counts: HashMap<Ingredient, u32> = HashMap::new();
        for ingredient in liked.iter().flat_map(|dish| &dish.ingredients) {
            *liked_counts.entry(table_key(ingredient)).or_insert(0) += 1;
        }

        let disliked_set = disliked
            .iter()
            .flat_map(|dish| &dish.ingredients)
            .map(table_key)
            .collect();

        Self {
            mode,
            liked: liked_counts,
            disliked: disliked_set,
        }
    }

    /// Matching mode the tables were built with
    pub fn mode(&self) -> IngredientMatch {
        self.mode
    }

    /// Accumulated weight of an ingredient kind among liked dishes (0 if absent)
    pub fn liked_count(&self, ingredient: &Ingredient) -> u32 {
        self.liked.get(&neutral(ingredient)).copied().unwrap_or(0)
    }

    /// Whether an ingredient kind appears in any disliked dish
    pub fn is_disliked(&self, ingredient: &Ingredient) -> bool {
        self.disliked.contains(&neutral(ingredient))
    }

    /// Score one dish.
    ///
    /// Each ingredient adds its liked count when liked, otherwise subtracts
    /// one when disliked, otherwise contributes nothing.
    pub fn score_dish(&self, dish: &DishDetail) -> i64 {
        dish.ingredients
            .iter()
            .map(|ingredient| {
                let probe = neutral(ingredient);
                match self.liked.get(&probe) {
                    Some(&count) => i64::from(count),
                    None if self.disliked.contains(&probe) => -1,
                    None => 0,
                }
            })
            .sum()
    }

    /// Number of distinct liked ingredient kinds
    pub fn liked_kinds(&self) -> usize {
        self.liked.len()
    }

    /// Number of distinct disliked ingredient kinds
    pub fn disliked_kinds(&self) -> usize {
        self.disliked.len()
    }
}
