use super::tasks::Tasks;
use crate::libs::category::{Category, DEFAULT_CATEGORY_ID};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const SELECT_CATEGORIES: &str = "SELECT id, name, parent_category_id FROM categories";
const INSERT_CATEGORY: &str = "INSERT INTO categories (name, parent_category_id) VALUES (?1, ?2)";
const UPDATE_CATEGORY: &str = "UPDATE categories SET name = ?1, parent_category_id = ?2 WHERE id = ?3";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";
const LIFT_CHILDREN: &str = "UPDATE categories SET parent_category_id = ?2 WHERE parent_category_id = ?1";

fn row_to_category(row: &Row<'_>) -> Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_id: row.get(2)?,
    })
}

pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Categories { conn }
    }

    pub fn insert(&self, category: &Category) -> Result<i64> {
        self.conn.execute(INSERT_CATEGORY, params![category.name, category.parent_id])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update(&self, id: i64, category: &Category) -> Result<usize> {
        self.conn.execute(UPDATE_CATEGORY, params![category.name, category.parent_id, id])
    }

    /// Deletes a category without orphaning anything.
    ///
    /// Tasks filed under it fall back to the default category and its children
    /// move up to its parent. Returns rows deleted (0 or 1).
    pub fn delete(&self, id: i64) -> Result<usize> {
        let Some(category) = self.get_by_id(id)? else {
            return Ok(0);
        };

        let tx = self.conn.unchecked_transaction()?;
        Tasks::new(&tx).reassign_category(id, DEFAULT_CATEGORY_ID)?;
        tx.execute(LIFT_CHILDREN, params![id, category.parent_id])?;
        let deleted = tx.execute(DELETE_CATEGORY, params![id])?;
        tx.commit()?;

        Ok(deleted)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_CATEGORIES), params![id], row_to_category)
            .optional()
    }

    pub fn fetch_all(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_CATEGORIES))?;
        let categories = stmt.query_map([], row_to_category)?.collect::<Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn fetch_roots(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE parent_category_id IS NULL ORDER BY id", SELECT_CATEGORIES))?;
        let categories = stmt.query_map([], row_to_category)?.collect::<Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn fetch_children(&self, parent_id: i64) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE parent_category_id = ?1 ORDER BY id", SELECT_CATEGORIES))?;
        let categories = stmt.query_map(params![parent_id], row_to_category)?.collect::<Result<Vec<_>>>()?;
        Ok(categories)
    }
}
