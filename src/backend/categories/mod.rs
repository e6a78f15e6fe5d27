//! Categories
//!
//! Channel categories of a community. Each community holds one ordered list of
//! categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::ordering::{ListKey, OrderedEntry, SqlValue};

/// Database operations for categories
pub mod db;

/// HTTP handlers for categories
pub mod handlers;

/// A channel category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub community_id: i64,
    pub name: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// A category not yet stored
    pub fn new(community_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            community_id,
            name: name.into(),
            position: 0,
            created_at: Utc::now(),
        }
    }
}

/// Categories are ordered per community
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunityList {
    pub community_id: i64,
}

impl ListKey for CommunityList {
    fn columns() -> &'static [&'static str] {
        &["community_id"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::Int(Some(self.community_id))]
    }
}

impl OrderedEntry for Category {
    type ListId = CommunityList;

    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = "id, community_id, name, position, created_at";

    fn id(&self) -> i64 {
        self.id
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }

    fn list_id(&self) -> CommunityList {
        CommunityList {
            community_id: self.community_id,
        }
    }

    fn set_list_id(&mut self, list_id: CommunityList) {
        self.community_id = list_id.community_id;
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            community_id: row.try_get("community_id")?,
            name: row.try_get("name")?,
            position: row.try_get("position")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn attributes(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", SqlValue::Text(Some(self.name.clone()))),
            ("created_at", SqlValue::Timestamp(self.created_at)),
        ]
    }
}

/// Create category request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    /// Explicit position; appended to the end when absent
    #[serde(default)]
    pub position: Option<i64>,
}

/// Move category request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveCategoryRequest {
    #[serde(default)]
    pub after_id: Option<i64>,
    #[serde(default)]
    pub before_id: Option<i64>,
}
