//! Partition Keys
//!
//! A partition key identifies one ordered list inside a table, for example
//! "all channels of community 7 without a category". Each orderable entity
//! supplies its own key type by implementing [`ListKey`]; the engine turns the
//! key into a `WHERE` predicate and binds its values.

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// Query type the engine builds statements with
#[doc(hidden)]
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// A value bound into a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlValue {
    /// Nullable integer column
    Int(Option<i64>),
    /// Nullable text column
    Text(Option<String>),
    /// Timestamp column
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    pub(crate) fn bind_to(self, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        match self {
            Self::Int(value) => query.bind(value),
            Self::Text(value) => query.bind(value),
            Self::Timestamp(value) => query.bind(value),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(Some(value)) => write!(f, "{}", value),
            Self::Text(Some(value)) => write!(f, "{:?}", value),
            Self::Int(None) | Self::Text(None) => f.write_str("null"),
            Self::Timestamp(value) => write!(f, "{}", value.to_rfc3339()),
        }
    }
}

/// Partition key of an orderable entity
///
/// Implementors list the columns forming the partition and the values of one
/// particular partition, in the same order. Columns are compared with `IS`,
/// so a `NULL` value selects its own partition rather than matching nothing.
///
/// # Example
///
/// ```rust
/// use spaced_list::ordering::{ListKey, SqlValue};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct BoardList {
///     board_id: i64,
/// }
///
/// impl ListKey for BoardList {
///     fn columns() -> &'static [&'static str] {
///         &["board_id"]
///     }
///
///     fn values(&self) -> Vec<SqlValue> {
///         vec![SqlValue::Int(Some(self.board_id))]
///     }
/// }
///
/// assert_eq!(BoardList::filter(), "board_id IS ?");
/// ```
pub trait ListKey: Clone + PartialEq + fmt::Debug + Send + Sync {
    /// Partition columns, in bind order
    fn columns() -> &'static [&'static str];

    /// Values of this partition, one per column
    fn values(&self) -> Vec<SqlValue>;

    /// `WHERE` fragment selecting this partition
    fn filter() -> String {
        Self::columns()
            .iter()
            .map(|column| format!("{} IS ?", column))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// `SET` fragment assigning the partition columns
    fn assignments() -> String {
        Self::columns()
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Stable textual form, used to key partition locks
    fn describe(&self) -> String {
        Self::columns()
            .iter()
            .zip(self.values())
            .map(|(column, value)| format!("{}={}", column, value))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Bind the partition values onto a query
    #[doc(hidden)]
    fn bind<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        self.values()
            .into_iter()
            .fold(query, |query, value| value.bind_to(query))
    }
}
