//! Collection descriptors and the record-to-row mapping trait

use rusqlite::types::ToSql;
use rusqlite::Row;

/// A named collection (table) and its name index, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub name: &'static str,
    pub name_index: Option<NameIndex>,
}

/// Secondary index over a collection's `name` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameIndex {
    pub name: &'static str,
    pub unique: bool,
}

pub const GENERAL: Collection = Collection {
    name: "general",
    name_index: None,
};

pub const TRAITS: Collection = Collection {
    name: "traits",
    name_index: Some(NameIndex {
        name: "idx_traits_name",
        unique: true,
    }),
};

pub const PLAYERS: Collection = Collection {
    name: "players",
    name_index: Some(NameIndex {
        name: "idx_players_name",
        unique: false,
    }),
};

pub const TRACKERS: Collection = Collection {
    name: "trackers",
    name_index: Some(NameIndex {
        name: "idx_trackers_name",
        unique: true,
    }),
};

/// All collections, in the order they are created
pub const ALL: [Collection; 4] = [GENERAL, TRAITS, PLAYERS, TRACKERS];

/// A record stored in an auto-keyed collection
///
/// Rows are read as `id` followed by [`CollectionRecord::COLUMNS`], and
/// written by binding [`CollectionRecord::bind_values`] to those columns in
/// the same order. The key is always assigned by the store.
pub trait CollectionRecord: Sized {
    const COLLECTION: Collection;

    /// Data columns, excluding the `id` key
    const COLUMNS: &'static [&'static str];

    /// Store-assigned key, if this record has been read from a store
    fn key(&self) -> Option<i64>;

    /// Values for [`CollectionRecord::COLUMNS`], in order
    fn bind_values(&self) -> Vec<&dyn ToSql>;

    /// Hydrate a record from a row of `id` plus the data columns
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

pub(crate) fn select_sql<R: CollectionRecord>(filter: &str) -> String {
    format!(
        "SELECT id, {} FROM {} {} ORDER BY id",
        R::COLUMNS.join(", "),
        R::COLLECTION.name,
        filter
    )
}

pub(crate) fn insert_sql<R: CollectionRecord>() -> String {
    let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::COLLECTION.name,
        R::COLUMNS.join(", "),
        placeholders.join(", ")
    )
}
