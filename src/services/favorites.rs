// ABOUTME: Per-user favorites store backed by concurrent in-memory maps
// ABOUTME: Tracks recipe IDs per user and annotates recipe payloads with isFavorite
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::models::Recipe;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Per-user favorite recipe IDs
///
/// State is a map from user identifier to the set of favorited upstream
/// recipe IDs. Sets make add idempotent and membership checks O(1); the
/// store holds IDs only, recipe payloads are always fetched fresh through
/// the lookup service. No identity validation happens here: callers pass
/// whatever user identifier the route layer resolved.
#[derive(Debug, Default, Clone)]
pub struct FavoritesStore {
    favorites: Arc<DashMap<String, HashSet<u64>>>,
}

impl FavoritesStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// List the user's favorite recipe IDs
    #[must_use]
    pub fn list(&self, user_id: &str) -> Vec<u64> {
        self.favorites
            .get(user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Add a recipe to the user's favorites; returns false if already present
    pub fn add(&self, user_id: &str, recipe_id: u64) -> bool {
        self.favorites
            .entry(user_id.to_owned())
            .or_default()
            .insert(recipe_id)
    }

    /// Remove a recipe from the user's favorites; returns false if absent
    pub fn remove(&self, user_id: &str, recipe_id: u64) -> bool {
        self.favorites
            .get_mut(user_id)
            .is_some_and(|mut ids| ids.remove(&recipe_id))
    }

    /// Whether the user has favorited the recipe
    #[must_use]
    pub fn is_favorite(&self, user_id: &str, recipe_id: u64) -> bool {
        self.favorites
            .get(user_id)
            .is_some_and(|ids| ids.contains(&recipe_id))
    }

    /// Number of favorites for the user
    #[must_use]
    pub fn count(&self, user_id: &str) -> usize {
        self.favorites.get(user_id).map_or(0, |ids| ids.len())
    }

    /// Remove all favorites for the user
    pub fn clear(&self, user_id: &str) {
        self.favorites.remove(user_id);
    }

    /// Attach the per-user `isFavorite` flag to a recipe payload
    #[must_use]
    pub fn annotate(&self, user_id: &str, mut recipe: Recipe) -> Recipe {
        recipe.is_favorite = Some(self.is_favorite(user_id, recipe.id));
        recipe
    }

    /// Attach the per-user `isFavorite` flag to a batch of recipes
    #[must_use]
    pub fn annotate_all(&self, user_id: &str, recipes: Vec<Recipe>) -> Vec<Recipe> {
        recipes
            .into_iter()
            .map(|recipe| self.annotate(user_id, recipe))
            .collect()
    }
}
