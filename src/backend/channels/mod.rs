//! Channels
//!
//! Channels of a community, ordered within their category. Channels without
//! a category form their own list.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use thiserror::Error;

use crate::ordering::{ListKey, OrderedEntry, SqlValue};

/// Database operations for channels
pub mod db;

/// HTTP handlers for channels
pub mod handlers;

/// What a channel contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    #[default]
    Posts,
    Tasks,
    Chat,
    Room,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Tasks => "tasks",
            Self::Chat => "chat",
            Self::Room => "room",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown channel kind stored in the database
#[derive(Debug, Error)]
#[error("unknown channel kind: {0}")]
pub struct ParseChannelKindError(String);

impl FromStr for ChannelKind {
    type Err = ParseChannelKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posts" => Ok(Self::Posts),
            "tasks" => Ok(Self::Tasks),
            "chat" => Ok(Self::Chat),
            "room" => Ok(Self::Room),
            other => Err(ParseChannelKindError(other.to_string())),
        }
    }
}

/// A channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub community_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub kind: ChannelKind,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    /// A channel not yet stored
    pub fn new(
        community_id: i64,
        category_id: Option<i64>,
        name: impl Into<String>,
        kind: ChannelKind,
    ) -> Self {
        Self {
            id: 0,
            community_id,
            category_id,
            name: name.into(),
            kind,
            position: 0,
            created_at: Utc::now(),
        }
    }
}

/// Channels are ordered per community and category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelList {
    pub community_id: i64,
    pub category_id: Option<i64>,
}

impl ListKey for ChannelList {
    fn columns() -> &'static [&'static str] {
        &["community_id", "category_id"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(Some(self.community_id)),
            SqlValue::Int(self.category_id),
        ]
    }
}

impl OrderedEntry for Channel {
    type ListId = ChannelList;

    const TABLE: &'static str = "channels";
    const COLUMNS: &'static str = "id, community_id, category_id, name, kind, position, created_at";

    fn id(&self) -> i64 {
        self.id
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }

    fn list_id(&self) -> ChannelList {
        ChannelList {
            community_id: self.community_id,
            category_id: self.category_id,
        }
    }

    fn set_list_id(&mut self, list_id: ChannelList) {
        self.community_id = list_id.community_id;
        self.category_id = list_id.category_id;
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let kind: String = row.try_get("kind")?;
        Ok(Self {
            id: row.try_get("id")?,
            community_id: row.try_get("community_id")?,
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            kind: kind.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            position: row.try_get("position")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn attributes(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", SqlValue::Text(Some(self.name.clone()))),
            ("kind", SqlValue::Text(Some(self.kind.as_str().to_string()))),
            ("created_at", SqlValue::Timestamp(self.created_at)),
        ]
    }
}

/// Create channel request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChannelRequest {
    pub name: String,
    #[serde(default)]
    pub kind: ChannelKind,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Explicit position; appended to the end when absent
    #[serde(default)]
    pub position: Option<i64>,
}

/// Move channel request body
///
/// `category_id` names the target list; leaving it out targets the
/// uncategorised channels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveChannelRequest {
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub after_id: Option<i64>,
    #[serde(default)]
    pub before_id: Option<i64>,
}

/// Query string selecting a channel list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelListQuery {
    #[serde(default)]
    pub category_id: Option<i64>,
}
