//! Hierarchical task categories.
//!
//! Categories form a forest through an optional parent reference. The only
//! operation that changes a parent goes through [`check_reparent`], which
//! walks the ancestry of the new parent so a cycle can never be stored.

use super::error::{AppError, StorageError, ValidationError};
use crate::db::store::Store;
use std::collections::HashMap;
use tracing::debug;

/// Sentinel category for tasks that were never filed anywhere.
pub const DEFAULT_CATEGORY_ID: i64 = 0;
pub const DEFAULT_CATEGORY_NAME: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    pub parent_id: Option<i64>,
}

impl Category {
    pub fn new(name: &str, parent_id: Option<i64>) -> Self {
        Category {
            id: None,
            name: name.to_string(),
            parent_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        Ok(())
    }
}

/// Verifies that `category` may be placed under `new_parent`.
///
/// `categories` must contain every stored category. Fails when the parent is
/// unknown or when `category` appears on the path from `new_parent` to its root.
pub fn check_reparent(categories: &[Category], category: i64, new_parent: Option<i64>) -> Result<(), ValidationError> {
    let Some(parent) = new_parent else {
        return Ok(());
    };

    let parents: HashMap<i64, Option<i64>> = categories.iter().filter_map(|c| c.id.map(|id| (id, c.parent_id))).collect();
    if !parents.contains_key(&parent) {
        return Err(ValidationError::UnknownCategory(parent));
    }

    let mut cursor = Some(parent);
    let mut steps = 0;
    while let Some(current) = cursor {
        if current == category {
            return Err(ValidationError::CategoryCycle { category, parent });
        }
        // A stored cycle would loop forever; the map size bounds any valid path.
        steps += 1;
        if steps > parents.len() {
            return Err(ValidationError::CategoryCycle { category, parent });
        }
        cursor = parents.get(&current).copied().flatten();
    }

    Ok(())
}

/// One row of a depth-first rendering of the category forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub depth: usize,
    pub category: Category,
}

/// Flattens the forest depth-first, roots and siblings sorted by name.
pub fn flatten_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let mut children: HashMap<Option<i64>, Vec<&Category>> = HashMap::new();
    for category in categories {
        children.entry(category.parent_id).or_default().push(category);
    }
    for siblings in children.values_mut() {
        siblings.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let mut nodes = Vec::with_capacity(categories.len());
    let mut stack: Vec<(usize, &Category)> = children.get(&None).map(|roots| roots.iter().rev().map(|c| (0, *c)).collect()).unwrap_or_default();

    while let Some((depth, category)) = stack.pop() {
        nodes.push(CategoryNode {
            depth,
            category: category.clone(),
        });
        if nodes.len() > categories.len() {
            break;
        }
        if let Some(kids) = children.get(&category.id) {
            stack.extend(kids.iter().rev().map(|c| (depth + 1, *c)));
        }
    }

    nodes
}

/// Category operations against the store.
#[derive(Clone)]
pub struct CategoryTree {
    store: Store,
}

impl CategoryTree {
    pub fn new(store: Store) -> Self {
        CategoryTree { store }
    }

    pub async fn add(&self, name: &str, parent_id: Option<i64>) -> Result<Category, AppError> {
        let category = Category::new(name.trim(), parent_id);
        category.validate()?;
        if let Some(parent) = parent_id {
            if self.store.get_category(parent).await?.is_none() {
                return Err(ValidationError::UnknownCategory(parent).into());
            }
        }
        Ok(self.store.insert_category(&category).await?)
    }

    pub async fn all(&self) -> Result<Vec<Category>, StorageError> {
        self.store.get_all_categories().await
    }

    pub async fn roots(&self) -> Result<Vec<Category>, StorageError> {
        self.store.get_root_categories().await
    }

    pub async fn children(&self, parent_id: i64) -> Result<Vec<Category>, StorageError> {
        self.store.get_subcategories(parent_id).await
    }

    pub async fn rename(&self, id: i64, name: &str) -> Result<Category, AppError> {
        let mut category = self.store.get_category(id).await?.ok_or(StorageError::NotFound { entity: "category", id })?;
        category.name = name.trim().to_string();
        category.validate()?;
        self.store.update_category(&category).await?;
        Ok(category)
    }

    /// Moves a category under `new_parent` (or to the top level with `None`).
    pub async fn reparent(&self, id: i64, new_parent: Option<i64>) -> Result<Category, AppError> {
        let categories = self.store.get_all_categories().await?;
        let mut category = categories
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or(StorageError::NotFound { entity: "category", id })?;

        check_reparent(&categories, id, new_parent)?;

        category.parent_id = new_parent;
        self.store.update_category(&category).await?;
        debug!(category_id = id, ?new_parent, "category moved");
        Ok(category)
    }

    /// Deletes a category; its tasks fall back to the default category.
    pub async fn delete(&self, id: i64) -> Result<(), StorageError> {
        self.store.delete_category(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str, parent_id: Option<i64>) -> Category {
        Category {
            id: Some(id),
            name: name.to_string(),
            parent_id,
        }
    }

    fn sample() -> Vec<Category> {
        vec![
            category(1, "Work", None),
            category(2, "Projects", Some(1)),
            category(3, "Backend", Some(2)),
            category(4, "Home", None),
        ]
    }

    #[test]
    fn test_reparent_under_descendant_is_rejected() {
        let categories = sample();
        assert_eq!(
            check_reparent(&categories, 1, Some(3)),
            Err(ValidationError::CategoryCycle { category: 1, parent: 3 })
        );
        assert_eq!(
            check_reparent(&categories, 2, Some(2)),
            Err(ValidationError::CategoryCycle { category: 2, parent: 2 })
        );
    }

    #[test]
    fn test_reparent_to_sibling_tree_is_allowed() {
        let categories = sample();
        assert!(check_reparent(&categories, 2, Some(4)).is_ok());
        assert!(check_reparent(&categories, 3, None).is_ok());
    }

    #[test]
    fn test_reparent_to_unknown_parent() {
        assert_eq!(check_reparent(&sample(), 2, Some(42)), Err(ValidationError::UnknownCategory(42)));
    }

    #[test]
    fn test_flatten_tree_depths() {
        let nodes = flatten_tree(&sample());
        let rendered: Vec<(usize, &str)> = nodes.iter().map(|n| (n.depth, n.category.name.as_str())).collect();
        assert_eq!(rendered, vec![(0, "Home"), (0, "Work"), (1, "Projects"), (2, "Backend")]);
    }
}
