//! Identifier quoting.

/// Quote a table or column name for interpolation into MySQL text.
///
/// Names already wrapped in backticks are returned unchanged; otherwise the
/// name is wrapped and embedded backticks are doubled.
pub fn quote_name(name: &str) -> String {
    if name.len() >= 2 && name.starts_with('`') && name.ends_with('`') {
        return name.to_string();
    }
    format!("`{}`", name.replace('`', "``"))
}
