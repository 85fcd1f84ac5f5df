//! Sequence and sequence style models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shotline_core::shot::{Sequence, SequenceStyleRecord};
use shotline_core::types::{EntityId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `sequences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SequenceRow {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    /// Active `sequence_styles` row, if any.
    pub style_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SequenceRow> for Sequence {
    fn from(row: SequenceRow) -> Self {
        Sequence {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            style_id: row.style_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSequence {
    pub id: Option<EntityId>,
    pub project_id: EntityId,
    pub name: String,
    pub style_id: Option<EntityId>,
}

/// A row from the `sequence_styles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SequenceStyleRow {
    pub id: EntityId,
    pub sequence_id: EntityId,
    pub style_name: String,
    pub intensity: f64,
    pub palette: Vec<String>,
    /// NOT NULL in the database; defaults to `{}`.
    pub parameters: Json<BTreeMap<String, f64>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SequenceStyleRow> for SequenceStyleRecord {
    fn from(row: SequenceStyleRow) -> Self {
        SequenceStyleRecord {
            id: row.id,
            sequence_id: row.sequence_id,
            style_name: row.style_name,
            intensity: row.intensity,
            palette: row.palette,
            parameters: row.parameters.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSequenceStyle {
    pub id: Option<EntityId>,
    pub sequence_id: EntityId,
    pub style_name: String,
    pub intensity: f64,
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}
