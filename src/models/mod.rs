//! Data models for the trove-link encoding engine.
//!
//! Defines the type descriptors, native and encoded value forms, and the
//! payload structures handed to the transport layer.

pub mod account_id;
pub mod data_type;
pub mod encoded_value;
pub mod native_value;
pub mod parameter_set;
pub mod payload;
pub mod raw_statement;
pub mod transfer;

pub use account_id::AccountId;
pub use data_type::{DataKind, DataType};
pub use encoded_value::EncodedValue;
pub use native_value::NativeValue;
pub use parameter_set::{InvocationBatch, ParameterEntry, ParameterSet};
pub use payload::{ActionPayload, ExecMode};
pub use raw_statement::{NamedValue, RawStatementPayload};
pub use transfer::TransferPayload;
