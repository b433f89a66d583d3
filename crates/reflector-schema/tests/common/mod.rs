//! A scripted cursor for driving the introspector without a server.

#![allow(dead_code)]

use reflector_core::error::{Error, QueryError, QueryErrorKind};
use reflector_core::{ColumnDescriptor, Cursor, Result, Row, Value};
use reflector_mysql::{FieldType, ServerError};

enum Reply {
    Rows {
        description: Option<Vec<ColumnDescriptor>>,
        rows: Vec<Row>,
    },
    Fault(ServerError),
}

struct Rule {
    prefix: String,
    param: Option<String>,
    reply: Reply,
}

/// Replays canned replies for statements matching a prefix.
///
/// Rules are tried in registration order; the first whose prefix matches
/// (and whose parameter matches, if it names one) answers. Statements no
/// rule matches fail with a generic database error.
#[derive(Default)]
pub struct ScriptedCursor {
    rules: Vec<Rule>,
    pending: Vec<Row>,
    description: Option<Vec<ColumnDescriptor>>,
    pub executed: Vec<(String, Vec<Value>)>,
}

impl ScriptedCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer statements starting with `prefix` with `rows`.
    pub fn on(mut self, prefix: &str, rows: Vec<Row>) -> Self {
        self.rules.push(Rule {
            prefix: prefix.to_string(),
            param: None,
            reply: Reply::Rows {
                description: None,
                rows,
            },
        });
        self
    }

    /// Answer statements starting with `prefix` and bound to `param`.
    pub fn on_param(mut self, prefix: &str, param: &str, rows: Vec<Row>) -> Self {
        self.rules.push(Rule {
            prefix: prefix.to_string(),
            param: Some(param.to_string()),
            reply: Reply::Rows {
                description: None,
                rows,
            },
        });
        self
    }

    /// Describe `table` with the given columns, in order.
    pub fn table(mut self, table: &str, columns: &[(&str, FieldType)]) -> Self {
        let description = columns
            .iter()
            .map(|(name, ty)| ColumnDescriptor::new(*name, ty.code()))
            .collect();
        self.rules.push(Rule {
            prefix: format!("SELECT * FROM `{}` LIMIT 1", table),
            param: None,
            reply: Reply::Rows {
                description: Some(description),
                rows: Vec::new(),
            },
        });
        self
    }

    /// Fail statements starting with `prefix` with a server error.
    pub fn fail(mut self, prefix: &str, error: ServerError) -> Self {
        self.rules.push(Rule {
            prefix: prefix.to_string(),
            param: None,
            reply: Reply::Fault(error),
        });
        self
    }

    /// Append the [`library`] rules after the ones registered so far.
    pub fn chain_library(mut self) -> Self {
        self.rules.extend(library().rules);
        self
    }

    /// Number of executed statements starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.executed
            .iter()
            .filter(|(sql, _)| sql.starts_with(prefix))
            .count()
    }

    pub fn statements(&self) -> Vec<&str> {
        self.executed.iter().map(|(sql, _)| sql.as_str()).collect()
    }
}

impl Cursor for ScriptedCursor {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()> {
        self.executed.push((sql.to_string(), params.to_vec()));
        self.pending.clear();
        self.description = None;

        let rule = self.rules.iter().find(|rule| {
            sql.starts_with(&rule.prefix)
                && rule.param.as_deref().is_none_or(|p| {
                    params.first().and_then(Value::as_str) == Some(p)
                })
        });

        match rule.map(|r| &r.reply) {
            Some(Reply::Rows { description, rows }) => {
                self.description = description.clone();
                self.pending = rows.clone();
                Ok(())
            }
            Some(Reply::Fault(server)) => Err(server.clone().into_error(None)),
            None => Err(Error::Query(QueryError::new(
                QueryErrorKind::Database,
                format!("unscripted statement: {}", sql),
            ))),
        }
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        Ok(std::mem::take(&mut self.pending))
    }

    fn description(&self) -> Option<&[ColumnDescriptor]> {
        self.description.as_deref()
    }
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub fn row(values: Vec<Value>) -> Row {
    Row::new(values)
}

/// One `information_schema.key_column_usage` row.
pub fn fk_row(column: &str, table: &str, referenced: &str) -> Row {
    row(vec![text(column), text(table), text(referenced)])
}

/// One `SHOW INDEX` row: Table, Non_unique, Key_name, Seq_in_index, Column_name.
pub fn index_row(table: &str, non_unique: Value, key_name: &str, column: Option<&str>) -> Row {
    row(vec![
        text(table),
        non_unique,
        text(key_name),
        Value::BigInt(1),
        column.map_or(Value::Null, text),
    ])
}

/// One `SHOW CREATE TABLE` row.
pub fn create_row(table: &str, definition: &str) -> Row {
    row(vec![text(table), text(definition)])
}

pub const INFORMATION_SCHEMA: &str = "SELECT column_name, referenced_table_name";

pub const BOOKS_DEFINITION: &str = "CREATE TABLE `books` (\n  \
    `id` int(11) NOT NULL AUTO_INCREMENT,\n  \
    `title` varchar(200) NOT NULL,\n  \
    `author_id` int(11) NOT NULL,\n  \
    `editor_id` int(11) DEFAULT NULL,\n  \
    PRIMARY KEY (`id`),\n  \
    CONSTRAINT `books_ibfk_1` FOREIGN KEY (`author_id`) REFERENCES `authors` (`id`),\n  \
    CONSTRAINT `books_ibfk_2` FOREIGN KEY (`editor_id`) REFERENCES `people` (`person_id`)\n\
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8";

/// A small library database: `authors`, `people`, `books`.
///
/// `books.author_id` references `authors.id` (position 0) and
/// `books.editor_id` references `people.person_id` (position 1).
pub fn library() -> ScriptedCursor {
    ScriptedCursor::new()
        .table(
            "authors",
            &[("id", FieldType::Long), ("name", FieldType::VarString)],
        )
        .table(
            "people",
            &[("name", FieldType::VarString), ("person_id", FieldType::Long)],
        )
        .table(
            "books",
            &[
                ("id", FieldType::Long),
                ("title", FieldType::VarString),
                ("author_id", FieldType::Long),
                ("editor_id", FieldType::Long),
            ],
        )
        .on(
            "SHOW TABLES",
            vec![
                row(vec![text("authors")]),
                row(vec![text("books")]),
                row(vec![text("people")]),
            ],
        )
        .on_param(
            INFORMATION_SCHEMA,
            "books",
            vec![
                fk_row("author_id", "authors", "id"),
                fk_row("editor_id", "people", "person_id"),
            ],
        )
        .on(INFORMATION_SCHEMA, Vec::new())
        .on(
            "SHOW CREATE TABLE `books`",
            vec![create_row("books", BOOKS_DEFINITION)],
        )
        .on(
            "SHOW CREATE TABLE `authors`",
            vec![create_row(
                "authors",
                "CREATE TABLE `authors` (\n  `id` int(11) NOT NULL,\n  \
                 `name` varchar(100) NOT NULL,\n  PRIMARY KEY (`id`)\n)",
            )],
        )
        .on(
            "SHOW INDEX FROM `books`",
            vec![
                index_row("books", Value::BigInt(0), "PRIMARY", Some("id")),
                index_row("books", Value::BigInt(1), "books_author", Some("author_id")),
            ],
        )
        .on(
            "SHOW INDEX FROM `authors`",
            vec![index_row("authors", Value::BigInt(0), "PRIMARY", Some("id"))],
        )
        .on(
            "SHOW INDEX FROM `people`",
            vec![
                index_row("people", Value::BigInt(0), "PRIMARY", Some("person_id")),
                index_row("people", Value::BigInt(1), "people_name", Some("name")),
            ],
        )
}
