//! Shot model and DTOs.

use serde::{Deserialize, Serialize};
use shotline_core::reference::ReferenceImage;
use shotline_core::shot::{GenerationParameters, Shot, VisualStyle};
use shotline_core::types::{EntityId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `shots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShotRow {
    pub id: EntityId,
    pub sequence_id: EntityId,
    pub prompt: String,
    pub tags: Vec<String>,
    pub character_ids: Vec<EntityId>,
    pub location_ids: Vec<EntityId>,
    pub reference_images: Json<Vec<ReferenceImage>>,
    pub visual_style: Option<Json<VisualStyle>>,
    pub parameters: Json<GenerationParameters>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ShotRow> for Shot {
    fn from(row: ShotRow) -> Self {
        Shot {
            id: row.id,
            sequence_id: row.sequence_id,
            prompt: row.prompt,
            tags: row.tags,
            character_ids: row.character_ids,
            location_ids: row.location_ids,
            reference_images: row.reference_images.0,
            visual_style: row.visual_style.map(|style| style.0),
            parameters: row.parameters.0,
        }
    }
}

/// DTO for creating a shot. `parameters` falls back to
/// [`GenerationParameters::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateShot {
    pub id: Option<EntityId>,
    pub sequence_id: EntityId,
    pub prompt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub character_ids: Vec<EntityId>,
    #[serde(default)]
    pub location_ids: Vec<EntityId>,
    #[serde(default)]
    pub reference_images: Vec<ReferenceImage>,
    pub visual_style: Option<VisualStyle>,
    pub parameters: Option<GenerationParameters>,
}
