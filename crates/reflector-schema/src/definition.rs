//! Foreign keys from `SHOW CREATE TABLE` text.
//!
//! Servers without `information_schema.key_column_usage` still print every
//! constraint in the table definition, e.g.
//!
//! ```text
//!   CONSTRAINT `books_ibfk_1` FOREIGN KEY (`author_id`) REFERENCES `authors` (`id`)
//! ```
//!
//! Only single-column constraints with backtick-quoted names match, which is
//! how the server always prints them.

use std::sync::OnceLock;

use regex::Regex;

use crate::introspect::ForeignKeyConstraint;

const FOREIGN_KEY_PATTERN: &str =
    r"\sCONSTRAINT `[^`]*` FOREIGN KEY \(`([^`]*)`\) REFERENCES `([^`]*)` \(`([^`]*)`\)";

fn foreign_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FOREIGN_KEY_PATTERN).expect("foreign key pattern compiles"))
}

/// Scan a table definition for foreign-key clauses.
///
/// Matches are non-overlapping and returned left to right.
pub fn scan_foreign_keys(definition: &str) -> Vec<ForeignKeyConstraint> {
    foreign_key_re()
        .captures_iter(definition)
        .map(|caps| ForeignKeyConstraint {
            column: caps[1].to_string(),
            referenced_table: caps[2].to_string(),
            referenced_column: caps[3].to_string(),
        })
        .collect()
}
