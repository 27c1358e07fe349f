//! Playing surfaces.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a table. Generated ids look like `table_<uuid>`.
pub type TableId = String;

/// A physical table matches are played on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Table {
    /// A new available table with a generated id.
    pub fn new() -> Self {
        Self::with_id(format!("table_{}", Uuid::new_v4()))
    }

    pub fn with_id(id: impl Into<TableId>) -> Self {
        Self {
            id: id.into(),
            available: true,
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
