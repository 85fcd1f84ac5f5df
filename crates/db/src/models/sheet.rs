//! Master bible sheet models.
//!
//! Image lists are stored as JSONB arrays of reference images.

use serde::{Deserialize, Serialize};
use shotline_core::bible::{CharacterAppearanceSheet, LocationAppearanceSheet};
use shotline_core::reference::ReferenceImage;
use shotline_core::types::{EntityId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `character_sheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterSheetRow {
    pub id: EntityId,
    pub project_id: EntityId,
    pub character_name: String,
    pub aliases: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub appearance_images: Json<Vec<ReferenceImage>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CharacterSheetRow> for CharacterAppearanceSheet {
    fn from(row: CharacterSheetRow) -> Self {
        CharacterAppearanceSheet {
            id: row.id,
            project_id: row.project_id,
            character_name: row.character_name,
            aliases: row.aliases,
            thumbnail_url: row.thumbnail_url,
            appearance_images: row.appearance_images.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacterSheet {
    pub id: Option<EntityId>,
    pub project_id: EntityId,
    pub character_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub appearance_images: Vec<ReferenceImage>,
}

/// A row from the `location_sheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocationSheetRow {
    pub id: EntityId,
    pub project_id: EntityId,
    pub location_name: String,
    pub aliases: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub reference_images: Json<Vec<ReferenceImage>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<LocationSheetRow> for LocationAppearanceSheet {
    fn from(row: LocationSheetRow) -> Self {
        LocationAppearanceSheet {
            id: row.id,
            project_id: row.project_id,
            location_name: row.location_name,
            aliases: row.aliases,
            thumbnail_url: row.thumbnail_url,
            reference_images: row.reference_images.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocationSheet {
    pub id: Option<EntityId>,
    pub project_id: EntityId,
    pub location_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub reference_images: Vec<ReferenceImage>,
}
