//! Parameter shape reconciliation.
//!
//! Callers may declare argument values positionally or by name, and type
//! hints positionally, by name, or not at all. This module unifies the two
//! shapes into one canonical, fully-encoded [`ParameterSet`] per row.
//!
//! The cross-shape pairings (positional values with named types, and named
//! values with positional types) pair strictly by mapping/declaration
//! order. That convention is load-bearing for compatibility with existing
//! callers; [`ReconcileOptions::strict`] opts into rejecting it.

use crate::codec;
use crate::error::{Result, TroveLinkError};
use crate::infer;
use crate::models::{DataType, InvocationBatch, NativeValue, ParameterSet};
use indexmap::IndexMap;
use log::debug;

/// Caller-declared argument values for one row.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValues {
    /// Ordered list of values
    Positional(Vec<NativeValue>),
    /// Name-keyed mapping; iteration order is the caller's insertion order
    Named(IndexMap<String, NativeValue>),
}

impl ParamValues {
    pub fn len(&self) -> usize {
        match self {
            ParamValues::Positional(v) => v.len(),
            ParamValues::Named(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_named(&self) -> bool {
        matches!(self, ParamValues::Named(_))
    }

    fn sorted_names(&self) -> Option<Vec<&str>> {
        match self {
            ParamValues::Positional(_) => None,
            ParamValues::Named(m) => {
                let mut names: Vec<&str> = m.keys().map(String::as_str).collect();
                names.sort_unstable();
                Some(names)
            }
        }
    }
}

/// Caller-declared type hints for a call.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamTypes {
    /// Ordered list of types
    Positional(Vec<DataType>),
    /// Name-keyed mapping; iteration order is the declaration order
    Named(IndexMap<String, DataType>),
}

/// Options controlling reconciliation behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Reject order-dependent cross-shape pairing instead of silently
    /// matching positional values against named types (or vice versa) by
    /// order. Off by default for compatibility.
    pub strict_cross_matching: bool,
}

impl ReconcileOptions {
    /// Options with strict cross-shape matching enabled.
    pub fn strict() -> Self {
        Self {
            strict_cross_matching: true,
        }
    }
}

/// Reconcile a single row of values against optional type hints.
///
/// When `types` is omitted, every value's type is inferred.
pub fn reconcile_row(
    values: &ParamValues,
    types: Option<&ParamTypes>,
    options: ReconcileOptions,
) -> Result<ParameterSet> {
    let resolved = resolve_types(values, types)?;
    reconcile_against(0, values, &resolved, options)
}

/// Reconcile a batch of rows against one fixed type resolution.
///
/// The resolution is computed once per call — from the explicit `types`
/// when given, otherwise inferred from the first row — and reused for every
/// row, so inference cannot diverge between rows of the same batch. Either
/// every row encodes successfully or the whole batch fails.
pub fn reconcile_batch(
    rows: &[ParamValues],
    types: Option<&ParamTypes>,
    options: ReconcileOptions,
) -> Result<InvocationBatch> {
    let Some(first_row) = rows.first() else {
        return Ok(InvocationBatch::empty());
    };
    // Shape disagreement between rows is diagnosed before any pairing or
    // encoding, so a misshapen row cannot surface as a per-parameter
    // failure against the row-0-derived resolution.
    for (index, row) in rows.iter().enumerate().skip(1) {
        check_value_row_shape(index, first_row, row)?;
    }

    let resolved = resolve_types(first_row, types)?;
    debug!(
        "reconciling batch: {} row(s), {} parameter(s) per row",
        rows.len(),
        first_row.len()
    );

    let mut sets = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        sets.push(reconcile_against(index, row, &resolved, options)?);
    }
    InvocationBatch::from_rows(sets)
}

/// Compare a row's shape against the batch's first row.
fn check_value_row_shape(index: usize, first: &ParamValues, row: &ParamValues) -> Result<()> {
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
    if let (Some(first_names), Some(row_names)) = (first.sorted_names(), row.sorted_names()) {
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

/// The fixed type resolution for a call: explicit hints, or inference over
/// the shape-defining row.
fn resolve_types(values: &ParamValues, types: Option<&ParamTypes>) -> Result<ParamTypes> {
    if let Some(types) = types {
        return Ok(types.clone());
    }
    match values {
        ParamValues::Positional(vals) => {
            let inferred = vals.iter().map(infer::infer).collect::<Result<Vec<_>>>()?;
            Ok(ParamTypes::Positional(inferred))
        }
        ParamValues::Named(vals) => {
            let mut inferred = IndexMap::with_capacity(vals.len());
            for (name, value) in vals {
                inferred.insert(name.clone(), infer::infer(value)?);
            }
            Ok(ParamTypes::Named(inferred))
        }
    }
}

/// Pair one row of values with the resolved types and encode every entry.
fn reconcile_against(
    row: usize,
    values: &ParamValues,
    types: &ParamTypes,
    options: ReconcileOptions,
) -> Result<ParameterSet> {
    match (values, types) {
        (ParamValues::Positional(vals), ParamTypes::Positional(tys)) => {
            check_arity(row, vals.len(), tys.len())?;
            let encoded = vals
                .iter()
                .zip(tys)
                .enumerate()
                .map(|(i, (value, ty))| codec::encode_param(&index_label(i), value, ty))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParameterSet::positional(encoded))
        }
        (ParamValues::Positional(vals), ParamTypes::Named(tys)) => {
            if options.strict_cross_matching {
                return Err(TroveLinkError::CrossShapeMatching {
                    values: "positional",
                    types: "named",
                });
            }
            // Positional values carry no names to match against; the named
            // types are taken in declaration order and paired by index.
            check_arity(row, vals.len(), tys.len())?;
            debug!(
                "row {}: pairing {} positional value(s) with named types by declaration order",
                row,
                vals.len()
            );
            let encoded = vals
                .iter()
                .zip(tys.values())
                .enumerate()
                .map(|(i, (value, ty))| codec::encode_param(&index_label(i), value, ty))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParameterSet::positional(encoded))
        }
        (ParamValues::Named(vals), ParamTypes::Positional(tys)) => {
            if options.strict_cross_matching {
                return Err(TroveLinkError::CrossShapeMatching {
                    values: "named",
                    types: "positional",
                });
            }
            // Names come from the values' own mapping order, paired with
            // the positional types by index.
            check_arity(row, vals.len(), tys.len())?;
            debug!(
                "row {}: pairing {} named value(s) with positional types by mapping order",
                row,
                vals.len()
            );
            let encoded = vals
                .iter()
                .zip(tys)
                .map(|((name, value), ty)| {
                    codec::encode_param(name, value, ty).map(|ev| (name.clone(), ev))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(ParameterSet::named(encoded))
        }
        (ParamValues::Named(vals), ParamTypes::Named(tys)) => {
            let encoded = vals
                .iter()
                .map(|(name, value)| {
                    let ty = tys.get(name).ok_or_else(|| {
                        TroveLinkError::MissingTypeForParameter {
                            row,
                            name: name.clone(),
                        }
                    })?;
                    codec::encode_param(name, value, ty).map(|ev| (name.clone(), ev))
                })
                .collect::<Result<Vec<_>>>()?;
            // Type entries for names absent from the values are ignored.
            Ok(ParameterSet::named(encoded))
        }
    }
}

fn check_arity(row: usize, values: usize, types: usize) -> Result<()> {
    if values != types {
        return Err(TroveLinkError::ArityMismatch { row, values, types });
    }
    Ok(())
}

/// Diagnostic label for a positional parameter (1-based, like `$1`).
fn index_label(index: usize) -> String {
    format!("#{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataKind;

    fn named_values(pairs: &[(&str, NativeValue)]) -> ParamValues {
        ParamValues::Named(
            pairs
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        )
    }

    fn named_types(pairs: &[(&str, DataType)]) -> ParamTypes {
        ParamTypes::Named(
            pairs
                .iter()
                .map(|(name, ty)| (name.to_string(), ty.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_positional_values_positional_types() {
        let values = ParamValues::Positional(vec![
            NativeValue::Text("abc".into()),
            NativeValue::Int(7),
        ]);
        let types = ParamTypes::Positional(vec![DataType::text(), DataType::int()]);

        let set = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.is_named());
        assert_eq!(set.entries()[0].value.data_type, DataType::text());
        assert_eq!(set.entries()[1].value.data_type, DataType::int());
    }

    #[test]
    fn test_positional_arity_mismatch() {
        let values = ParamValues::Positional(vec![NativeValue::Int(1)]);
        let types = ParamTypes::Positional(vec![DataType::int(), DataType::int()]);

        let err = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            TroveLinkError::ArityMismatch {
                row: 0,
                values: 1,
                types: 2
            }
        ));
    }

    #[test]
    fn test_no_types_infers_everything() {
        let values = ParamValues::Positional(vec![
            NativeValue::Text("hello".into()),
            NativeValue::Bool(true),
        ]);
        let set = reconcile_row(&values, None, ReconcileOptions::default()).unwrap();
        assert_eq!(set.entries()[0].value.data_type, DataType::text());
        assert_eq!(set.entries()[1].value.data_type, DataType::boolean());
    }

    #[test]
    fn test_inference_failure_propagates() {
        let values = ParamValues::Positional(vec![NativeValue::Null]);
        let err = reconcile_row(&values, None, ReconcileOptions::default()).unwrap_err();
        assert!(matches!(err, TroveLinkError::AmbiguousNull));
    }

    #[test]
    fn test_positional_values_named_types_pair_by_declaration_order() {
        let values = ParamValues::Positional(vec![NativeValue::Text("abc123".into())]);
        let types = named_types(&[("$id", DataType::text())]);

        let set = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_named(), "positional values stay unnamed");
        assert_eq!(set.entries()[0].value.data_type, DataType::text());
    }

    #[test]
    fn test_named_values_positional_types_pair_by_mapping_order() {
        let values = named_values(&[("$id", NativeValue::Text("abc123".into()))]);
        let types = ParamTypes::Positional(vec![DataType::text()]);

        let set = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap();
        assert_eq!(set.names().unwrap(), vec!["$id"]);
        assert_eq!(set.entries()[0].value.data_type, DataType::text());
    }

    #[test]
    fn test_strict_mode_rejects_cross_shape() {
        let values = ParamValues::Positional(vec![NativeValue::Text("abc".into())]);
        let types = named_types(&[("$id", DataType::text())]);
        let err = reconcile_row(&values, Some(&types), ReconcileOptions::strict()).unwrap_err();
        assert!(matches!(
            err,
            TroveLinkError::CrossShapeMatching {
                values: "positional",
                types: "named"
            }
        ));

        let values = named_values(&[("$id", NativeValue::Text("abc".into()))]);
        let types = ParamTypes::Positional(vec![DataType::text()]);
        let err = reconcile_row(&values, Some(&types), ReconcileOptions::strict()).unwrap_err();
        assert!(matches!(err, TroveLinkError::CrossShapeMatching { .. }));
    }

    #[test]
    fn test_named_values_named_types_match_by_name() {
        let values = named_values(&[
            ("$user", NativeValue::Text("alice".into())),
            ("$id", NativeValue::Int(7)),
        ]);
        // Declaration order differs from value order; names win.
        let types = named_types(&[("$id", DataType::int()), ("$user", DataType::text())]);

        let set = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap();
        assert_eq!(set.names().unwrap(), vec!["$user", "$id"]);
        assert_eq!(set.entries()[0].value.data_type, DataType::text());
        assert_eq!(set.entries()[1].value.data_type, DataType::int());
    }

    #[test]
    fn test_missing_type_for_parameter() {
        let values = named_values(&[
            ("$id", NativeValue::Text("abc123".into())),
            ("$user", NativeValue::Text("alice".into())),
        ]);
        let types = named_types(&[("$id", DataType::text())]);

        let err = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap_err();
        match err {
            TroveLinkError::MissingTypeForParameter { row, name } => {
                assert_eq!(row, 0);
                assert_eq!(name, "$user");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extra_named_types_ignored() {
        let values = named_values(&[("$id", NativeValue::Int(1))]);
        let types = named_types(&[("$id", DataType::int()), ("$unused", DataType::text())]);
        let set = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_batch_uses_one_type_resolution() {
        // No explicit types: the resolution inferred from row 0 (uuid-shaped
        // text => UUID) also governs row 1, whose plain text then fails
        // instead of silently re-inferring as TEXT.
        let rows = vec![
            ParamValues::Positional(vec![NativeValue::Text(
                "f47ac10b-58cc-4372-a567-0e02b2c3d479".into(),
            )]),
            ParamValues::Positional(vec![NativeValue::Text("not a uuid".into())]),
        ];
        let err = reconcile_batch(&rows, None, ReconcileOptions::default()).unwrap_err();
        assert!(matches!(err, TroveLinkError::MalformedUuid { .. }));
    }

    #[test]
    fn test_batch_shape_invariance() {
        let rows = vec![
            named_values(&[("$id", NativeValue::Int(1))]),
            named_values(&[("$other", NativeValue::Int(2))]),
        ];
        let types = named_types(&[("$id", DataType::int()), ("$other", DataType::int())]);
        let err = reconcile_batch(&rows, Some(&types), ReconcileOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            TroveLinkError::InconsistentBatchShape { row: 1, .. }
        ));
    }

    #[test]
    fn test_batch_shape_checked_before_inference_pairing() {
        // No explicit types: a row-1 name that row 0 lacks is a shape
        // disagreement, not a missing type in the inferred resolution.
        let rows = vec![
            named_values(&[("$id", NativeValue::Int(1))]),
            named_values(&[("$other", NativeValue::Int(2))]),
        ];
        let err = reconcile_batch(&rows, None, ReconcileOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            TroveLinkError::InconsistentBatchShape { row: 1, .. }
        ));

        // Same for arity against the row-0-derived type list.
        let rows = vec![
            ParamValues::Positional(vec![NativeValue::Int(1), NativeValue::Int(2)]),
            ParamValues::Positional(vec![NativeValue::Int(3)]),
        ];
        let err = reconcile_batch(&rows, None, ReconcileOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            TroveLinkError::InconsistentBatchShape { row: 1, .. }
        ));
    }

    #[test]
    fn test_batch_mode_disagreement() {
        let rows = vec![
            ParamValues::Positional(vec![NativeValue::Int(1)]),
            named_values(&[("$id", NativeValue::Int(2))]),
        ];
        let err = reconcile_batch(&rows, None, ReconcileOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            TroveLinkError::InconsistentBatchShape { row: 1, .. }
        ));
    }

    #[test]
    fn test_empty_batch() {
        let batch = reconcile_batch(&[], None, ReconcileOptions::default()).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_null_with_named_hint_encodes_as_null() {
        let values = named_values(&[("$note", NativeValue::Null)]);
        let types = named_types(&[("$note", DataType::text())]);
        let set = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap();
        assert!(set.entries()[0].value.is_null());
        assert_eq!(set.entries()[0].value.data_type.kind, DataKind::Null);
    }

    #[test]
    fn test_empty_array_with_explicit_type() {
        let values = ParamValues::Positional(vec![NativeValue::Array(vec![])]);
        let types = ParamTypes::Positional(vec![DataType::int().into_array()]);
        let set = reconcile_row(&values, Some(&types), ReconcileOptions::default()).unwrap();
        assert_eq!(set.entries()[0].value.entry_count(), 0);
    }
}
