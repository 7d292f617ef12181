use crate::models::account_id::AccountId;
use serde::{Deserialize, Serialize};

/// Payload for transferring funds between accounts.
///
/// The amount is carried as a decimal string because it may exceed native
/// integer precision; [`crate::builder::build_transfer`] validates that it
/// parses before the payload is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferPayload {
    /// Recipient account
    pub to: AccountId,

    /// Amount as a decimal string, e.g. `"100.50"`
    pub amount: String,
}
