// ABOUTME: Core data models and types for the Remy recipe API
// ABOUTME: Defines Recipe, Ingredient, ShoppingItem and other fundamental data structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Data Models
//!
//! Typed representations of the upstream recipe schema and the server's own
//! entities. Upstream payloads are modeled as fixed structs with explicit
//! optional fields; undocumented upstream fields are dropped on
//! deserialization. All wire names are camelCase to match the upstream API
//! and the JSON surface this server exposes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recipe as returned by the upstream provider, plus the response-time
/// `isFavorite` flag computed per user and never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Upstream numeric recipe identifier
    pub id: u64,
    /// Recipe title
    pub title: String,
    /// Primary image URL
    #[serde(default)]
    pub image: String,
    /// Image file type (e.g. "jpg")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    /// Total preparation plus cooking time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    /// Number of servings the recipe yields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    /// Link to the original recipe source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// HTML summary text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Cuisines this recipe belongs to (e.g. "italian")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisines: Option<Vec<String>>,
    /// Dish types (e.g. "main course", "dessert")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish_types: Option<Vec<String>>,
    /// Diets this recipe satisfies (e.g. "vegetarian")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diets: Option<Vec<String>>,
    /// Occasions this recipe suits (e.g. "christmas")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasions: Option<Vec<String>>,
    /// Free-text instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Structured step-by-step instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_instructions: Option<Vec<AnalyzedInstruction>>,
    /// Full ingredient list with amounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_ingredients: Option<Vec<Ingredient>>,
    /// Nutritional information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    /// Whether the requesting user has favorited this recipe;
    /// attached at response time, absent on raw upstream payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// A recipe ingredient with measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Upstream ingredient identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Original free-text ingredient line (e.g. "2 cups flour, sifted")
    #[serde(default)]
    pub original: String,
    /// Amount in the given unit
    pub amount: f64,
    /// Measurement unit
    #[serde(default)]
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Vec<String>>,
}

/// A named group of instruction steps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub name: String,
    pub steps: Vec<InstructionStep>,
}

/// A single numbered instruction step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<StepItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<StepItem>>,
}

/// An ingredient or piece of equipment referenced by an instruction step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepItem {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Nutritional information for a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub nutrients: Vec<Nutrient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caloric_breakdown: Option<CaloricBreakdown>,
}

/// A single nutrient measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_of_daily_needs: Option<f64>,
}

/// Macro split as percentages of caloric content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaloricBreakdown {
    pub percent_protein: f64,
    pub percent_fat: f64,
    pub percent_carbs: f64,
}

/// Recipe search filters, mirrored verbatim from the HTTP query string
/// into the upstream complex-search call
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text search query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Cuisine filter (comma-separated upstream syntax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Diet filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    /// Intolerance filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intolerances: Option<String>,
    /// Meal type filter (renamed: `type` is reserved)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    /// Maximum total preparation time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ready_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_protein: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_protein: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_carbs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_carbs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_fat: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fat: Option<u32>,
    /// Page size; defaulted by the lookup service when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Pagination offset; defaulted by the lookup service when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Paged search response: the two fields the API surface guarantees
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub results: Vec<Recipe>,
    #[serde(default)]
    pub total_results: u64,
}

/// A shopping list entry owned by exactly one user's list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    /// Server-assigned unique identifier
    pub id: String,
    /// Ingredient or product name
    pub name: String,
    /// Quantity in the given unit
    pub amount: f64,
    /// Measurement unit
    pub unit: String,
    /// Whether the item has been checked off
    pub purchased: bool,
    /// Recipe this item was extracted from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<u64>,
    /// Title of the originating recipe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
}

/// Shopping item fields supplied by the caller; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingItem {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub purchased: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
}

/// Partial update for a shopping item; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
}

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (used for identification)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the user account is active
    pub is_active: bool,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a fresh id and current timestamps
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            is_active: true,
            created_at: now,
            last_active: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_wire_names_are_camel_case() {
        let recipe = Recipe {
            id: 42,
            title: "Ratatouille".into(),
            image: "https://img.example/42.jpg".into(),
            image_type: Some("jpg".into()),
            ready_in_minutes: Some(75),
            servings: Some(4),
            source_url: None,
            summary: None,
            cuisines: Some(vec!["french".into()]),
            dish_types: None,
            diets: None,
            occasions: None,
            instructions: None,
            analyzed_instructions: None,
            extended_ingredients: None,
            nutrition: None,
            is_favorite: Some(true),
        };

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["readyInMinutes"], 75);
        assert_eq!(json["imageType"], "jpg");
        assert_eq!(json["isFavorite"], true);
        assert!(json.get("sourceUrl").is_none());
    }

    #[test]
    fn test_recipe_drops_undocumented_upstream_fields() {
        let raw = serde_json::json!({
            "id": 7,
            "title": "Soup",
            "image": "x.jpg",
            "cheap": true,
            "spoonacularScore": 93.2
        });

        let recipe: Recipe = serde_json::from_value(raw).unwrap();
        assert_eq!(recipe.id, 7);
        assert!(recipe.is_favorite.is_none());
    }

    #[test]
    fn test_search_params_type_field_rename() {
        let params: SearchParams =
            serde_json::from_value(serde_json::json!({"type": "dessert", "maxReadyTime": 30}))
                .unwrap();
        assert_eq!(params.meal_type.as_deref(), Some("dessert"));
        assert_eq!(params.max_ready_time, Some(30));
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User::new("remy@gusteaus.example".into(), "$2b$12$hash".into(), None);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "remy@gusteaus.example");
    }
}
