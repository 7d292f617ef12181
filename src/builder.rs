//! Payload assembly and final shape validation.
//!
//! Pure assembly: the builders transform no values, they validate
//! identifiers and mode/batch agreement, then hand an immutable payload to
//! the transport layer.

use crate::error::{Result, TroveLinkError};
use crate::models::{
    AccountId, ActionPayload, ExecMode, InvocationBatch, NamedValue, RawStatementPayload,
    TransferPayload,
};
use log::debug;
use rust_decimal::Decimal;

/// Assemble an action payload.
///
/// # Errors
///
/// - [`TroveLinkError::InvalidIdentifier`] when `namespace` or `action` is
///   empty or malformed
/// - [`TroveLinkError::ModeArityConflict`] when the row count disagrees
///   with the execution mode ([`ExecMode::Call`] takes exactly one row,
///   [`ExecMode::Execute`] at least one)
pub fn build_action(
    namespace: &str,
    action: &str,
    arguments: InvocationBatch,
    mode: ExecMode,
) -> Result<ActionPayload> {
    validate_identifier("namespace", namespace)?;
    validate_identifier("action name", action)?;

    match mode {
        ExecMode::Call if arguments.len() != 1 => {
            return Err(TroveLinkError::ModeArityConflict {
                mode: "call",
                expected: "exactly one row",
                rows: arguments.len(),
            });
        }
        ExecMode::Execute if arguments.is_empty() => {
            return Err(TroveLinkError::ModeArityConflict {
                mode: "execute",
                expected: "at least one row",
                rows: 0,
            });
        }
        _ => {}
    }

    debug!(
        "built action payload: {}.{} ({:?}, {} row(s))",
        namespace,
        action,
        mode,
        arguments.len()
    );
    Ok(ActionPayload {
        namespace: namespace.to_string(),
        action: action.to_string(),
        arguments,
        mode,
    })
}

/// Assemble a raw parametrized-statement payload.
pub fn build_raw_statement(
    statement: &str,
    parameters: Vec<NamedValue>,
) -> Result<RawStatementPayload> {
    if statement.trim().is_empty() {
        return Err(TroveLinkError::InvalidIdentifier {
            context: "statement",
            input: statement.to_string(),
            reason: "statement cannot be empty".to_string(),
        });
    }
    Ok(RawStatementPayload {
        statement: statement.to_string(),
        parameters,
    })
}

/// Assemble a transfer payload.
///
/// The account bytes are opaque to this crate and only checked for
/// presence; the amount must parse as a decimal.
pub fn build_transfer(to: AccountId, amount: &str) -> Result<TransferPayload> {
    if to.is_empty() {
        return Err(TroveLinkError::InvalidIdentifier {
            context: "account",
            input: String::new(),
            reason: "account identifier cannot be empty".to_string(),
        });
    }
    amount
        .parse::<Decimal>()
        .map_err(|_| TroveLinkError::MalformedDecimal {
            param: "amount".to_string(),
            input: amount.to_string(),
        })?;
    Ok(TransferPayload {
        to,
        amount: amount.to_string(),
    })
}

/// Validate a namespace or procedure identifier.
///
/// Only letters, numbers, and underscores; must start with a letter or
/// underscore; at most 128 characters.
fn validate_identifier(context: &'static str, name: &str) -> Result<()> {
    let fail = |reason: &str| TroveLinkError::InvalidIdentifier {
        context,
        input: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(fail("cannot be empty"));
    }
    if name.len() > 128 {
        return Err(fail("too long (max 128 chars)"));
    }
    let first = name.chars().next().unwrap();
    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(fail("must start with a letter or underscore"));
    }
    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' {
            return Err(fail(&format!(
                "contains invalid character '{}'; only letters, numbers, and underscores allowed",
                c
            )));
        }
    }
    Ok(())
}
