//! Embedded SQL migrations
//!
//! Each step's SQL is compiled in with `include_str!`. The SHA-256 of that
//! SQL is recorded when the step is applied and compared on every later
//! open, so an edited step is caught instead of silently diverging.

use sha2::{Digest, Sha256};

/// Schema version a fully migrated store is at
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub version: u32,
    pub id: &'static str,
    pub sql: &'static str,
    /// Drops existing collections instead of carrying their rows forward
    pub destructive: bool,
}

impl Migration {
    /// Hex SHA-256 of the step's SQL
    pub fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.sql.as_bytes()))
    }
}

/// All embedded migrations, in version order
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        id: "001_initial_schema",
        sql: include_str!("../../migrations/001_initial_schema.sql"),
        destructive: true,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_contiguous_up_to_schema_version() {
        let versions: Vec<u32> = get_migrations().iter().map(|m| m.version).collect();
        let expected: Vec<u32> = (1..=SCHEMA_VERSION).collect();
        assert_eq!(versions, expected);
    }

    #[test]
    fn test_ids_are_prefixed_with_version() {
        for migration in get_migrations() {
            assert!(migration
                .id
                .starts_with(&format!("{:03}_", migration.version)));
        }
    }

    #[test]
    fn test_checksum_tracks_sql() {
        let step = get_migrations()[0];
        assert_eq!(step.checksum().len(), 64);
        assert_eq!(step.checksum(), step.checksum());

        let edited = Migration {
            sql: "SELECT 1",
            ..step
        };
        assert_ne!(edited.checksum(), step.checksum());
    }
}
