use crate::error::{Result, TroveLinkError};
use crate::models::encoded_value::EncodedValue;
use serde::Serialize;

/// One reconciled, encoded parameter of an invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterEntry {
    /// Parameter name in named mode, `None` in positional mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Encoded value
    pub value: EncodedValue,
}

/// Ordered, fully-encoded parameter list for one invocation row.
///
/// Invariant: either every entry carries a name (named mode) or none does
/// (positional mode). Mixed entries are rejected at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: Vec<ParameterEntry>,
}

impl ParameterSet {
    /// Build a positional parameter set.
    pub fn positional(values: Vec<EncodedValue>) -> Self {
        Self {
            entries: values
                .into_iter()
                .map(|value| ParameterEntry { name: None, value })
                .collect(),
        }
    }

    /// Build a named parameter set.
    pub fn named(values: Vec<(String, EncodedValue)>) -> Self {
        Self {
            entries: values
                .into_iter()
                .map(|(name, value)| ParameterEntry {
                    name: Some(name),
                    value,
                })
                .collect(),
        }
    }

    /// Build from raw entries, enforcing the all-named / all-positional
    /// invariant.
    pub fn from_entries(entries: Vec<ParameterEntry>) -> Result<Self> {
        let named = entries.iter().filter(|e| e.name.is_some()).count();
        if named != 0 && named != entries.len() {
            return Err(TroveLinkError::MixedParameterModes);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when entries carry names. An empty set counts as positional.
    pub fn is_named(&self) -> bool {
        self.entries.first().map(|e| e.name.is_some()).unwrap_or(false)
    }

    /// Parameter names in entry order, or `None` in positional mode.
    pub fn names(&self) -> Option<Vec<&str>> {
        if !self.is_named() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .filter_map(|e| e.name.as_deref())
                .collect(),
        )
    }

    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }
}

/// Ordered sequence of parameter sets, one per row of arguments to the
/// same procedure.
///
/// Invariant: every row has the same arity and, in named mode, the same
/// name set (order may vary per row).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InvocationBatch {
    rows: Vec<ParameterSet>,
}

impl InvocationBatch {
    /// Batch with no rows (an action invoked with no arguments).
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Single-row batch.
    pub fn single(row: ParameterSet) -> Self {
        Self { rows: vec![row] }
    }

    /// Build from rows, enforcing the uniform-shape invariant.
    pub fn from_rows(rows: Vec<ParameterSet>) -> Result<Self> {
        if let Some(first) = rows.first() {
            for (i, row) in rows.iter().enumerate().skip(1) {
                check_row_shape(i, first, row)?;
            }
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ParameterSet] {
        &self.rows
    }
}

/// Compare a row's shape against the batch's first row.
fn check_row_shape(index: usize, first: &ParameterSet, row: &ParameterSet) -> Result<()> {
    if row.len() != first.len() {
        return Err(TroveLinkError::InconsistentBatchShape {
            row: index,
            detail: format!("arity {} vs {}", row.len(), first.len()),
        });
    }
    if row.is_named() != first.is_named() {
        return Err(TroveLinkError::InconsistentBatchShape {
            row: index,
            detail: "named row in a positional batch (or vice versa)".to_string(),
        });
    }
    if let (Some(mut first_names), Some(mut row_names)) = (first.names(), row.names()) {
        // Same name set is required; per-row order may differ.
        first_names.sort_unstable();
        row_names.sort_unstable();
        if first_names != row_names {
            return Err(TroveLinkError::InconsistentBatchShape {
                row: index,
                detail: format!(
                    "parameter names [{}] vs [{}]",
                    row_names.join(", "),
                    first_names.join(", ")
                ),
            });
        }
    }
    Ok(())
}
