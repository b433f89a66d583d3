//! MySQL server error classification.
//!
//! Drivers report server failures as an error number, a five-character
//! SQLSTATE and a message. [`ServerError::classify`] sorts them into the
//! core [`QueryErrorKind`]s so the introspector can tell "this server has no
//! such catalog view" apart from faults that must propagate.

use reflector_core::error::{Error, QueryError, QueryErrorKind};

/// Error numbers the classification relies on.
pub mod codes {
    /// ER_DBACCESS_DENIED_ERROR
    pub const DBACCESS_DENIED: u16 = 1044;
    /// ER_ACCESS_DENIED_ERROR
    pub const ACCESS_DENIED: u16 = 1045;
    /// ER_BAD_DB_ERROR
    pub const BAD_DB: u16 = 1049;
    /// ER_BAD_FIELD_ERROR
    pub const BAD_FIELD: u16 = 1054;
    /// ER_DUP_ENTRY
    pub const DUP_ENTRY: u16 = 1062;
    /// ER_PARSE_ERROR
    pub const PARSE_ERROR: u16 = 1064;
    /// ER_TABLEACCESS_DENIED_ERROR
    pub const TABLEACCESS_DENIED: u16 = 1142;
    /// ER_NO_SUCH_TABLE
    pub const NO_SUCH_TABLE: u16 = 1146;
    /// ER_NOT_SUPPORTED_YET
    pub const NOT_SUPPORTED_YET: u16 = 1235;
    /// ER_ROW_IS_REFERENCED_2
    pub const ROW_IS_REFERENCED: u16 = 1451;
    /// ER_NO_REFERENCED_ROW_2
    pub const NO_REFERENCED_ROW: u16 = 1452;
    /// CR_SERVER_GONE_ERROR
    pub const SERVER_GONE: u16 = 2006;
    /// CR_SERVER_LOST
    pub const SERVER_LOST: u16 = 2013;
}

/// A server-reported error, as carried by a MySQL ERR packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    /// Error number
    pub code: u16,
    /// SQL state (5 characters)
    pub sql_state: String,
    /// Error message
    pub message: String,
}

impl ServerError {
    pub fn new(code: u16, sql_state: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            sql_state: sql_state.into(),
            message: message.into(),
        }
    }

    /// Classify this error.
    ///
    /// Error numbers win over SQLSTATE; an unknown number in SQLSTATE class
    /// `42` is a syntax or access-rule violation and `08` is a connection
    /// exception.
    pub fn classify(&self) -> QueryErrorKind {
        match self.code {
            codes::PARSE_ERROR => QueryErrorKind::Syntax,
            codes::NO_SUCH_TABLE | codes::BAD_DB | codes::BAD_FIELD => QueryErrorKind::NotFound,
            codes::NOT_SUPPORTED_YET => QueryErrorKind::Unsupported,
            codes::DBACCESS_DENIED | codes::ACCESS_DENIED | codes::TABLEACCESS_DENIED => {
                QueryErrorKind::Permission
            }
            codes::DUP_ENTRY | codes::ROW_IS_REFERENCED | codes::NO_REFERENCED_ROW => {
                QueryErrorKind::Constraint
            }
            codes::SERVER_GONE | codes::SERVER_LOST => QueryErrorKind::Connection,
            _ => match self.sql_state.get(..2) {
                Some("42") => QueryErrorKind::Syntax,
                Some("08") => QueryErrorKind::Connection,
                Some("23") => QueryErrorKind::Constraint,
                _ => QueryErrorKind::Database,
            },
        }
    }

    /// Convert into a core error, attaching the failing statement.
    pub fn into_error(self, sql: Option<&str>) -> Error {
        let kind = self.classify();
        Error::Query(QueryError {
            kind,
            sql: sql.map(str::to_string),
            sqlstate: Some(self.sql_state),
            code: Some(self.code),
            message: self.message,
            source: None,
        })
    }
}

impl From<ServerError> for Error {
    fn from(err: ServerError) -> Self {
        err.into_error(None)
    }
}
