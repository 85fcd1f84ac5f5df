//! Repository for the `projects` table.

use sqlx::PgPool;

use crate::models::project::{CreateProject, ProjectRow};
use crate::new_id;

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, name) VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(input.id.clone().unwrap_or_else(new_id))
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

}
