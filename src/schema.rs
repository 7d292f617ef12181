//! Interface to the schema/compilation collaborator.
//!
//! A caller that has the remote procedure's declared parameter list can
//! pre-fill type hints from it instead of writing them out by hand or
//! relying on inference. Nothing here is required: explicit hints and
//! inference both work without a schema.

use crate::models::DataType;
use crate::reconcile::ParamTypes;
use serde::{Deserialize, Serialize};

/// One declared parameter of a remote procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedParamSpec {
    /// Parameter name as declared in the schema, e.g. `$id`
    pub name: String,

    /// Declared type
    pub data_type: DataType,
}

/// Declared signature of a remote procedure (action or view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureSpec {
    /// Procedure name
    pub name: String,

    /// Parameters in declaration order
    pub parameters: Vec<NamedParamSpec>,
}

impl ProcedureSpec {
    /// Named type hints in declaration order, ready for
    /// [`crate::reconcile::reconcile_batch`].
    pub fn param_types(&self) -> ParamTypes {
        ParamTypes::Named(
            self.parameters
                .iter()
                .map(|p| (p.name.clone(), p.data_type.clone()))
                .collect(),
        )
    }
}
