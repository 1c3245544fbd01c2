// ABOUTME: Spoonacular API client implementing the RecipeProvider trait
// ABOUTME: Handles request signing, response decoding, and upstream error classification
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::RecipeProvider;
use crate::config::environment::SpoonacularConfig;
use crate::constants::timeouts;
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, SearchParams, SearchResults};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Spoonacular upstream client
///
/// Every request carries the API key as the `apiKey` query parameter, which
/// is how Spoonacular authenticates callers. The client never retries:
/// upstream failures are classified and surfaced to the route layer.
pub struct SpoonacularProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Wire shape of `/recipes/random` responses
#[derive(Deserialize)]
struct RandomRecipesResponse {
    recipes: Vec<Recipe>,
}

/// Error body Spoonacular returns alongside non-2xx statuses
#[derive(Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    message: String,
}

impl SpoonacularProvider {
    /// Create a new client from upstream configuration
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if no API key is configured or the HTTP client
    /// cannot be constructed
    pub fn new(config: &SpoonacularConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("SPOONACULAR_API_KEY is not configured"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts::UPSTREAM_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Issue a GET request and decode the JSON response
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(path, "calling upstream recipe API");

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!("Upstream request to {path} failed: {e}");
                AppError::upstream_unavailable(format!("Recipe provider unreachable: {e}"))
            })?;

        let response = Self::check_status(response, path).await?;

        response.json::<T>().await.map_err(|e| {
            AppError::serialization(format!("Failed to decode upstream response: {e}"))
        })
    }

    /// Classify non-2xx upstream statuses into the application error taxonomy
    async fn check_status(response: Response, path: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<UpstreamErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_default();

        warn!(%status, path, "upstream recipe API returned an error");

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                AppError::upstream_auth("Invalid API key for recipe provider")
            }
            StatusCode::PAYMENT_REQUIRED => AppError::upstream_quota(),
            StatusCode::NOT_FOUND => AppError::not_found("Recipe"),
            _ => AppError::upstream(
                status.as_u16(),
                if message.is_empty() {
                    format!("Recipe provider error ({status})")
                } else {
                    message
                },
            ),
        })
    }
}

#[async_trait::async_trait]
impl RecipeProvider for SpoonacularProvider {
    fn name(&self) -> &'static str {
        "spoonacular"
    }

    async fn search_recipes(&self, params: &SearchParams) -> AppResult<SearchResults> {
        let mut query: Vec<(&str, String)> = vec![
            // Enriched payloads so search results are usable without follow-up lookups
            ("addRecipeInformation", "true".to_owned()),
            ("fillIngredients", "true".to_owned()),
            ("addRecipeNutrition", "true".to_owned()),
        ];

        if let Some(q) = &params.query {
            query.push(("query", q.clone()));
        }
        if let Some(cuisine) = &params.cuisine {
            query.push(("cuisine", cuisine.clone()));
        }
        if let Some(diet) = &params.diet {
            query.push(("diet", diet.clone()));
        }
        if let Some(intolerances) = &params.intolerances {
            query.push(("intolerances", intolerances.clone()));
        }
        if let Some(meal_type) = &params.meal_type {
            query.push(("type", meal_type.clone()));
        }
        if let Some(v) = params.max_ready_time {
            query.push(("maxReadyTime", v.to_string()));
        }
        if let Some(v) = params.min_calories {
            query.push(("minCalories", v.to_string()));
        }
        if let Some(v) = params.max_calories {
            query.push(("maxCalories", v.to_string()));
        }
        if let Some(v) = params.min_protein {
            query.push(("minProtein", v.to_string()));
        }
        if let Some(v) = params.max_protein {
            query.push(("maxProtein", v.to_string()));
        }
        if let Some(v) = params.min_carbs {
            query.push(("minCarbs", v.to_string()));
        }
        if let Some(v) = params.max_carbs {
            query.push(("maxCarbs", v.to_string()));
        }
        if let Some(v) = params.min_fat {
            query.push(("minFat", v.to_string()));
        }
        if let Some(v) = params.max_fat {
            query.push(("maxFat", v.to_string()));
        }
        if let Some(v) = params.number {
            query.push(("number", v.to_string()));
        }
        if let Some(v) = params.offset {
            query.push(("offset", v.to_string()));
        }

        self.get_json("/recipes/complexSearch", &query).await
    }

    async fn get_recipe_by_id(&self, recipe_id: u64) -> AppResult<Recipe> {
        self.get_json(
            &format!("/recipes/{recipe_id}/information"),
            &[("includeNutrition", "true".to_owned())],
        )
        .await
    }

    async fn get_similar_recipes(&self, recipe_id: u64, limit: u32) -> AppResult<Vec<Recipe>> {
        self.get_json(
            &format!("/recipes/{recipe_id}/similar"),
            &[("number", limit.to_string())],
        )
        .await
    }

    async fn get_recipes_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> AppResult<Vec<Recipe>> {
        self.get_json(
            "/recipes/findByIngredients",
            &[
                ("ingredients", ingredients.join(",")),
                ("number", number.to_string()),
                // ranking=2 minimizes missing ingredients rather than maximizing used ones
                ("ranking", "2".to_owned()),
                ("ignorePantry", "true".to_owned()),
            ],
        )
        .await
    }

    async fn get_random_recipes(&self, number: u32, tags: Option<&str>) -> AppResult<Vec<Recipe>> {
        let mut query = vec![("number", number.to_string())];
        if let Some(tags) = tags {
            query.push(("tags", tags.to_owned()));
        }

        let response: RandomRecipesResponse = self.get_json("/recipes/random", &query).await?;
        Ok(response.recipes)
    }
}
