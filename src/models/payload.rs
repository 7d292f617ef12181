use crate::models::parameter_set::InvocationBatch;
use serde::{Deserialize, Serialize};

/// How an action payload is executed on the remote node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecMode {
    /// State-mutating transactional call; accepts a multi-row batch
    Execute,

    /// Direct read-only view call; exactly one row of arguments
    Call,
}

/// Final payload handed to the transport/signing layer.
///
/// Constructed once per client-level call via
/// [`crate::builder::build_action`] and immutable thereafter. This crate
/// performs no network I/O or signing on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionPayload {
    /// Schema namespace the procedure is defined under
    pub namespace: String,

    /// Procedure (action or view) name
    pub action: String,

    /// Encoded argument rows, one parameter set per invocation
    pub arguments: InvocationBatch,

    /// Execution mode
    pub mode: ExecMode,
}
