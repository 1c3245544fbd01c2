// ABOUTME: Domain services for recipe lookup, favorites, and shopping lists
// ABOUTME: Routes delegate here; services own caching and per-user state
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Per-user favorites store
pub mod favorites;
/// Cached recipe lookup over the upstream provider
pub mod recipes;
/// Per-user shopping list store
pub mod shopping_list;

pub use favorites::FavoritesStore;
pub use recipes::RecipeService;
pub use shopping_list::ShoppingListStore;
