use std::collections::BTreeMap;

use crate::error::{CostError, Result};
use crate::models::{Ingredient, IngredientLine, Recipe, SellableItem};

/// Anything stored in a repository, identified by a string id.
pub trait Entity {
    fn id(&self) -> &str;

    /// Canonical key for lookups (lowercase id).
    fn key(&self) -> String {
        key_of(self.id())
    }
}

fn key_of(id: &str) -> String {
    id.to_lowercase()
}

impl Entity for Ingredient {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Recipe {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for SellableItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// List/get/create/update/delete over one entity type.
pub trait Repository<T: Entity> {
    fn list(&self) -> Vec<&T>;
    fn get(&self, id: &str) -> Option<&T>;
    fn create(&mut self, item: T) -> Result<()>;
    fn update(&mut self, item: T) -> Result<()>;
    fn delete(&mut self, id: &str) -> Result<T>;
}

/// Read-only view of current ingredient prices.
pub trait PriceSource {
    fn unit_price(&self, ingredient_id: &str) -> Option<f64>;
}

/// Session-local repository. Ids are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    items: BTreeMap<String, T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a list, rejecting duplicate ids.
    pub fn from_items(items: Vec<T>) -> Result<Self> {
        let mut repo = Self::new();
        for item in items {
            repo.create(item)?;
        }
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clone all items out, in id order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.values().cloned().collect()
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Vec<&T> {
        self.items.values().collect()
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.items.get(&key_of(id))
    }

    fn create(&mut self, item: T) -> Result<()> {
        let key = item.key();
        if self.items.contains_key(&key) {
            return Err(CostError::DuplicateId(item.id().to_string()));
        }
        self.items.insert(key, item);
        Ok(())
    }

    fn update(&mut self, item: T) -> Result<()> {
        let key = item.key();
        match self.items.get_mut(&key) {
            Some(existing) => {
                *existing = item;
                Ok(())
            }
            None => Err(CostError::ItemNotFound(item.id().to_string())),
        }
    }

    fn delete(&mut self, id: &str) -> Result<T> {
        self.items
            .remove(&key_of(id))
            .ok_or_else(|| CostError::ItemNotFound(id.to_string()))
    }
}

impl PriceSource for InMemoryRepository<Ingredient> {
    fn unit_price(&self, ingredient_id: &str) -> Option<f64> {
        self.get(ingredient_id).map(|i| i.price)
    }
}

/// Copy of `lines` with unit prices taken from the current price list.
///
/// Lines whose ingredient is missing from `source` keep their snapshot price.
pub fn refresh_line_prices<S: PriceSource + ?Sized>(
    lines: &[IngredientLine],
    source: &S,
) -> Vec<IngredientLine> {
    lines
        .iter()
        .map(|line| {
            let mut refreshed = line.clone();
            match source.unit_price(&line.ingredient_id) {
                Some(price) => refreshed.unit_price = price,
                None => tracing::warn!(
                    ingredient_id = %line.ingredient_id,
                    "no current price; keeping snapshot price {}",
                    line.unit_price
                ),
            }
            refreshed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ingredients() -> Vec<Ingredient> {
        vec![
            Ingredient::new("ING-001", "Daging Sapi", "Protein", "g", 45.0),
            Ingredient::new("ING-002", "Santan", "Dairy", "ml", 12.0),
        ]
    }

    #[test]
    fn test_get_case_insensitive() {
        let repo = InMemoryRepository::from_items(sample_ingredients()).unwrap();
        assert!(repo.get("ing-001").is_some());
        assert!(repo.get("ING-001").is_some());
        assert!(repo.get("ING-404").is_none());
    }

    #[test]
    fn test_create_duplicate_rejected() {
        let mut repo = InMemoryRepository::from_items(sample_ingredients()).unwrap();
        let dup = Ingredient::new("ing-001", "Sapi Lagi", "Protein", "g", 1.0);
        assert!(matches!(repo.create(dup), Err(CostError::DuplicateId(_))));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_update_and_delete() {
        let mut repo = InMemoryRepository::from_items(sample_ingredients()).unwrap();

        let mut santan = repo.get("ING-002").unwrap().clone();
        santan.update_price(15.0);
        repo.update(santan).unwrap();
        assert_eq!(repo.unit_price("ING-002"), Some(15.0));

        let removed = repo.delete("ING-002").unwrap();
        assert_eq!(removed.name, "Santan");
        assert!(repo.get("ING-002").is_none());
        assert!(matches!(repo.delete("ING-002"), Err(CostError::ItemNotFound(_))));
    }

    #[test]
    fn test_update_missing_rejected() {
        let mut repo: InMemoryRepository<Ingredient> = InMemoryRepository::new();
        let ghost = Ingredient::new("ING-404", "Ghost", "", "g", 1.0);
        assert!(matches!(repo.update(ghost), Err(CostError::ItemNotFound(_))));
    }

    #[test]
    fn test_entity_key_is_lowercase_id() {
        let beef = Ingredient::new("ING-001", "Daging Sapi", "Protein", "g", 45.0);
        assert_eq!(beef.key(), "ing-001");
    }

    #[test]
    fn test_list_is_sorted_by_id() {
        let mut items = sample_ingredients();
        items.reverse();
        let repo = InMemoryRepository::from_items(items).unwrap();
        let ids: Vec<&str> = repo.list().into_iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["ING-001", "ING-002"]);
    }

    #[test]
    fn test_refresh_line_prices() {
        let repo = InMemoryRepository::from_items(sample_ingredients()).unwrap();
        let lines = vec![
            IngredientLine::new("ING-001", "Daging Sapi", 300.0, "g", 40.0),
            IngredientLine::new("ING-404", "Unknown", 10.0, "g", 3.0),
        ];

        let refreshed = refresh_line_prices(&lines, &repo);
        assert_eq!(refreshed[0].unit_price, 45.0);
        assert_eq!(refreshed[1].unit_price, 3.0);
        // Original lines are untouched
        assert_eq!(lines[0].unit_price, 40.0);
    }
}
