//! Error types for trove-link.
//!
//! Every failure in this crate is local and synchronous: nothing is retried
//! and no partial payload is ever returned. Callers decide whether to retry
//! with corrected input.

use thiserror::Error;

/// Result type alias used throughout trove-link.
pub type Result<T> = std::result::Result<T, TroveLinkError>;

/// All error conditions produced by the encoding engine.
#[derive(Error, Debug)]
pub enum TroveLinkError {
    // ---- inference failures ----
    /// The host value has no mapping into the TroveDB type system
    /// (e.g. a nested object or a nested array).
    #[error("unsupported value kind: {0}")]
    UnsupportedValueKind(String),

    /// Array elements do not all share one scalar type.
    #[error("heterogeneous array: first element is {first}, element {index} is {found}")]
    HeterogeneousArray {
        first: String,
        index: usize,
        found: String,
    },

    /// An empty array carries no element to infer a type from.
    #[error("cannot infer the element type of an empty array; supply an explicit array type")]
    AmbiguousEmptyArray,

    /// A null value carries no type to infer.
    #[error("cannot infer a type for null; supply an explicit type")]
    AmbiguousNull,

    // ---- codec failures ----
    /// The value's shape (array-ness or scalar kind) is incompatible with
    /// the declared type.
    #[error("parameter {param}: {value} value does not match declared type {declared}")]
    TypeMismatch {
        param: String,
        value: String,
        declared: String,
    },

    /// A numeric value does not fit the declared width, precision, or scale.
    #[error("parameter {param}: {value} does not fit {declared}")]
    OutOfRange {
        param: String,
        value: String,
        declared: String,
    },

    /// A string failed UUID parsing for a uuid-typed parameter.
    #[error("parameter {param}: malformed UUID \"{input}\"")]
    MalformedUuid { param: String, input: String },

    /// A string failed decimal parsing for a decimal-typed parameter.
    #[error("parameter {param}: malformed decimal \"{input}\"")]
    MalformedDecimal { param: String, input: String },

    /// An encoded byte sequence cannot be decoded back under its type tag.
    #[error("cannot decode {declared}: {reason}")]
    MalformedEncoding { declared: String, reason: String },

    // ---- reconciliation failures ----
    /// Positionally paired values and types differ in length.
    #[error("row {row}: {values} value(s) cannot be paired with {types} type(s)")]
    ArityMismatch {
        row: usize,
        values: usize,
        types: usize,
    },

    /// A named value has no matching entry in the named types.
    #[error("row {row}: no declared type for parameter \"{name}\"")]
    MissingTypeForParameter { row: usize, name: String },

    /// A batch row disagrees with the first row's arity or name set.
    #[error("row {row} does not match the shape of row 0: {detail}")]
    InconsistentBatchShape { row: usize, detail: String },

    /// A single parameter set mixes named and positional entries.
    #[error("parameter set mixes named and positional entries")]
    MixedParameterModes,

    /// Strict mode rejected an order-dependent cross-shape pairing
    /// ({values} values against {types} types).
    #[error("strict mode rejects pairing {values} values with {types} types by order")]
    CrossShapeMatching {
        values: &'static str,
        types: &'static str,
    },

    // ---- builder failures ----
    /// A namespace, procedure name, or statement failed identifier validation.
    #[error("invalid {context} \"{input}\": {reason}")]
    InvalidIdentifier {
        context: &'static str,
        input: String,
        reason: String,
    },

    /// The execution mode and the batch row count disagree.
    #[error("{mode} mode expects {expected}, got {rows} row(s)")]
    ModeArityConflict {
        mode: &'static str,
        expected: &'static str,
        rows: usize,
    },
}
