//! Introspection options.

use crate::type_map::FieldKind;

/// How foreign-key constraints are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForeignKeyStrategy {
    /// Query `information_schema`; scan `SHOW CREATE TABLE` only if the
    /// server reports the view as unavailable.
    #[default]
    Auto,
    /// Query `information_schema` and propagate every failure.
    InformationSchema,
    /// Always scan `SHOW CREATE TABLE` output.
    ShowCreateTable,
}

/// What to do with a native type code the type map does not list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTypePolicy {
    /// Fail with a schema error naming the code.
    #[default]
    Error,
    /// Use the given kind and log a warning.
    Fallback(FieldKind),
}

/// Options controlling an [`Introspector`](crate::Introspector).
///
/// # Example
///
/// ```
/// use reflector_schema::{FieldKind, ForeignKeyStrategy, IntrospectOptions, UnknownTypePolicy};
///
/// let options = IntrospectOptions::new()
///     .foreign_keys(ForeignKeyStrategy::ShowCreateTable)
///     .unknown_types(UnknownTypePolicy::Fallback(FieldKind::Text))
///     .cache_column_maps(true);
/// assert!(options.cache_column_maps);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntrospectOptions {
    /// Foreign-key discovery strategy
    pub foreign_keys: ForeignKeyStrategy,
    /// Policy for unmapped type codes
    pub unknown_types: UnknownTypePolicy,
    /// Reuse a referenced table's name-to-index map within one
    /// `resolve_foreign_keys` call instead of describing it per relation
    pub cache_column_maps: bool,
}

impl IntrospectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foreign_keys(mut self, strategy: ForeignKeyStrategy) -> Self {
        self.foreign_keys = strategy;
        self
    }

    pub fn unknown_types(mut self, policy: UnknownTypePolicy) -> Self {
        self.unknown_types = policy;
        self
    }

    pub fn cache_column_maps(mut self, enabled: bool) -> Self {
        self.cache_column_maps = enabled;
        self
    }
}
