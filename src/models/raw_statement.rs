use crate::models::encoded_value::EncodedValue;
use serde::Serialize;

/// One named parameter of a raw statement.
///
/// For a statement `INSERT INTO posts VALUES ($id, $title)` the names are
/// `$id` and `$title`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    /// Placeholder name as written in the statement
    pub name: String,

    /// Encoded value bound to the placeholder
    pub value: EncodedValue,
}

/// Payload for executing a raw parametrized SQL statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawStatementPayload {
    /// Statement text with named placeholders
    pub statement: String,

    /// Encoded values, one per placeholder
    pub parameters: Vec<NamedValue>,
}
