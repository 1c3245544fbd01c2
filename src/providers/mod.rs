// ABOUTME: Upstream recipe provider abstraction
// ABOUTME: Defines the RecipeProvider trait implemented by concrete upstream clients
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Recipe Providers
//!
//! Trait-based abstraction over upstream recipe APIs. The lookup service
//! depends only on [`RecipeProvider`], so tests substitute a counting mock
//! and production wires in the Spoonacular client.

pub mod spoonacular;

use crate::errors::AppResult;
use crate::models::{Recipe, SearchParams, SearchResults};

pub use spoonacular::SpoonacularProvider;

/// Upstream recipe API client interface
#[async_trait::async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Provider name used in cache keys and logs
    fn name(&self) -> &'static str;

    /// Filtered recipe search with pagination
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails or the response cannot be decoded
    async fn search_recipes(&self, params: &SearchParams) -> AppResult<SearchResults>;

    /// Fetch a single recipe with full information
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the recipe does not exist upstream
    async fn get_recipe_by_id(&self, recipe_id: u64) -> AppResult<Recipe>;

    /// Fetch recipes similar to the given recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails
    async fn get_similar_recipes(&self, recipe_id: u64, limit: u32) -> AppResult<Vec<Recipe>>;

    /// Find recipes that use the given ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails
    async fn get_recipes_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> AppResult<Vec<Recipe>>;

    /// Fetch random recipes, optionally constrained by tags
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails
    async fn get_random_recipes(&self, number: u32, tags: Option<&str>) -> AppResult<Vec<Recipe>>;
}
