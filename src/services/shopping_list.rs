// ABOUTME: Per-user shopping list store with ordered items and partial updates
// ABOUTME: Supports single and bulk inserts, item updates, and purchased-state sweeps
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::models::{NewShoppingItem, ShoppingItem, ShoppingItemUpdate};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Per-user shopping lists
///
/// Each user's list is an ordered `Vec`: items appear in insertion order and
/// keep their position across updates, which is what list UIs expect. Item
/// IDs are server-assigned UUIDs. Input validation (non-empty name, positive
/// amount) is the route layer's job; the store accepts what it is given.
#[derive(Debug, Default, Clone)]
pub struct ShoppingListStore {
    lists: Arc<DashMap<String, Vec<ShoppingItem>>>,
}

impl ShoppingListStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// List the user's items in insertion order
    #[must_use]
    pub fn list(&self, user_id: &str) -> Vec<ShoppingItem> {
        self.lists
            .get(user_id)
            .map(|items| items.clone())
            .unwrap_or_default()
    }

    /// Append a new item to the user's list, assigning a fresh ID
    pub fn add(&self, user_id: &str, new_item: NewShoppingItem) -> ShoppingItem {
        let item = Self::materialize(new_item);
        self.lists
            .entry(user_id.to_owned())
            .or_default()
            .push(item.clone());
        item
    }

    /// Append several items at once, preserving the given order
    pub fn add_many(&self, user_id: &str, new_items: Vec<NewShoppingItem>) -> Vec<ShoppingItem> {
        let items: Vec<ShoppingItem> = new_items.into_iter().map(Self::materialize).collect();
        self.lists
            .entry(user_id.to_owned())
            .or_default()
            .extend(items.iter().cloned());
        items
    }

    /// Apply a partial update to an item; returns the updated item or `None`
    /// if no item with that ID exists in the user's list
    pub fn update(
        &self,
        user_id: &str,
        item_id: &str,
        update: ShoppingItemUpdate,
    ) -> Option<ShoppingItem> {
        let mut items = self.lists.get_mut(user_id)?;
        let item = items.iter_mut().find(|item| item.id == item_id)?;

        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(amount) = update.amount {
            item.amount = amount;
        }
        if let Some(unit) = update.unit {
            item.unit = unit;
        }
        if let Some(purchased) = update.purchased {
            item.purchased = purchased;
        }
        if update.recipe_id.is_some() {
            item.recipe_id = update.recipe_id;
        }
        if update.recipe_name.is_some() {
            item.recipe_name = update.recipe_name;
        }

        Some(item.clone())
    }

    /// Remove an item by ID; returns false if absent
    pub fn remove(&self, user_id: &str, item_id: &str) -> bool {
        self.lists.get_mut(user_id).is_some_and(|mut items| {
            let before = items.len();
            items.retain(|item| item.id != item_id);
            items.len() < before
        })
    }

    /// Remove the user's entire list
    pub fn clear(&self, user_id: &str) {
        self.lists.remove(user_id);
    }

    /// Remove only purchased items, preserving the order of the rest
    pub fn clear_purchased(&self, user_id: &str) {
        if let Some(mut items) = self.lists.get_mut(user_id) {
            items.retain(|item| !item.purchased);
        }
    }

    fn materialize(new_item: NewShoppingItem) -> ShoppingItem {
        ShoppingItem {
            id: Uuid::new_v4().to_string(),
            name: new_item.name,
            amount: new_item.amount,
            unit: new_item.unit,
            purchased: new_item.purchased,
            recipe_id: new_item.recipe_id,
            recipe_name: new_item.recipe_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, purchased: bool) -> NewShoppingItem {
        NewShoppingItem {
            name: name.to_owned(),
            amount: 1.0,
            unit: "piece".to_owned(),
            purchased,
            recipe_id: None,
            recipe_name: None,
        }
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let store = ShoppingListStore::new();
        let a = store.add("alice", item("milk", false));
        let b = store.add("alice", item("milk", false));
        assert_ne!(a.id, b.id);
        assert_eq!(store.list("alice").len(), 2);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let store = ShoppingListStore::new();
        store.add_many(
            "alice",
            vec![item("flour", false), item("eggs", false), item("milk", false)],
        );
        let names: Vec<String> = store
            .list("alice")
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["flour", "eggs", "milk"]);
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let store = ShoppingListStore::new();
        let added = store.add("alice", item("butter", false));

        let updated = store
            .update(
                "alice",
                &added.id,
                ShoppingItemUpdate {
                    purchased: Some(true),
                    ..ShoppingItemUpdate::default()
                },
            )
            .unwrap();

        assert!(updated.purchased);
        assert_eq!(updated.name, "butter");
        assert!((updated.amount - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_unknown_item_returns_none() {
        let store = ShoppingListStore::new();
        store.add("alice", item("butter", false));
        assert!(store
            .update("alice", "no-such-id", ShoppingItemUpdate::default())
            .is_none());
    }

    #[test]
    fn test_remove_reports_absence() {
        let store = ShoppingListStore::new();
        let added = store.add("alice", item("sugar", false));
        assert!(store.remove("alice", &added.id));
        assert!(!store.remove("alice", &added.id));
    }

    #[test]
    fn test_clear_purchased_preserves_remaining_order() {
        let store = ShoppingListStore::new();
        store.add_many(
            "alice",
            vec![
                item("flour", false),
                item("eggs", true),
                item("milk", false),
                item("salt", true),
            ],
        );

        store.clear_purchased("alice");

        let names: Vec<String> = store
            .list("alice")
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["flour", "milk"]);
    }

    #[test]
    fn test_lists_are_isolated_per_user() {
        let store = ShoppingListStore::new();
        store.add("alice", item("milk", false));
        store.add("bob", item("bread", false));
        store.clear("alice");
        assert!(store.list("alice").is_empty());
        assert_eq!(store.list("bob").len(), 1);
    }
}
