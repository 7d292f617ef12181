//! trove-link: client-side payload encoding for TroveDB.
//!
//! TroveDB is a schema-driven, strongly-typed remote data store whose
//! namespaced stored procedures (state-mutating actions and read-only
//! views) take typed positional or named parameters. This crate is the
//! client-side reconciliation and encoding engine: it unifies
//! loosely-typed caller arguments with optional type hints, encodes each
//! value into the type-tagged wire form, and assembles the payload handed
//! to the transport/signing layer.
//!
//! Everything here is pure and synchronous: no I/O, no shared state, no
//! retries. Failures are terminal for the call that produced them and
//! nothing is ever silently coerced.
//!
//! # Example
//!
//! ```rust
//! use trove_link::{
//!     build_action, reconcile_batch, ExecMode, NativeValue, ParamValues, ReconcileOptions,
//! };
//!
//! # fn main() -> trove_link::Result<()> {
//! let rows = vec![ParamValues::Positional(vec![
//!     NativeValue::from("hello"),
//!     NativeValue::from(42i64),
//! ])];
//! let batch = reconcile_batch(&rows, None, ReconcileOptions::default())?;
//! let payload = build_action("social", "add_post", batch, ExecMode::Execute)?;
//! assert_eq!(payload.namespace, "social");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod codec;
pub mod error;
pub mod infer;
pub mod models;
pub mod reconcile;
pub mod schema;

pub use builder::{build_action, build_raw_statement, build_transfer};
pub use codec::{decode, encode, encode_param};
pub use error::{Result, TroveLinkError};
pub use infer::infer;
pub use models::{
    AccountId, ActionPayload, DataKind, DataType, EncodedValue, ExecMode, InvocationBatch,
    NamedValue, NativeValue, ParameterEntry, ParameterSet, RawStatementPayload, TransferPayload,
};
pub use reconcile::{reconcile_batch, reconcile_row, ParamTypes, ParamValues, ReconcileOptions};
pub use schema::{NamedParamSpec, ProcedureSpec};
