//! Repository for the `character_sheets` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::sheet::{CharacterSheetRow, CreateCharacterSheet};
use crate::new_id;

const COLUMNS: &str = "id, project_id, character_name, aliases, thumbnail_url, \
                       appearance_images, created_at, updated_at";

pub struct CharacterSheetRepo;

impl CharacterSheetRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCharacterSheet,
    ) -> Result<CharacterSheetRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO character_sheets
                (id, project_id, character_name, aliases, thumbnail_url, appearance_images)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CharacterSheetRow>(&query)
            .bind(input.id.clone().unwrap_or_else(new_id))
            .bind(&input.project_id)
            .bind(&input.character_name)
            .bind(&input.aliases)
            .bind(&input.thumbnail_url)
            .bind(Json(&input.appearance_images))
            .fetch_one(pool)
            .await
    }

    /// List a project's character sheets, ordered by name ascending.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: &str,
    ) -> Result<Vec<CharacterSheetRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM character_sheets
             WHERE project_id = $1
             ORDER BY character_name ASC, id ASC"
        );
        sqlx::query_as::<_, CharacterSheetRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

}
