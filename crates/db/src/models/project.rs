//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use shotline_core::shot::Project;
use shotline_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRow {
    pub id: EntityId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
        }
    }
}

/// DTO for creating a new project. A v7 UUID is minted when `id` is omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub id: Option<EntityId>,
    pub name: String,
}
