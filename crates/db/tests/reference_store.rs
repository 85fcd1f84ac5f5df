//! Integration tests for the PostgreSQL reference store.
//!
//! These need a running PostgreSQL; run with
//! `DATABASE_URL=... cargo test -p shotline-db -- --ignored`.

use std::collections::BTreeMap;

use shotline_core::reference::{ReferenceImage, ReferenceSource};
use shotline_core::store::ReferenceStore;
use shotline_db::models::project::CreateProject;
use shotline_db::models::sequence::{CreateSequence, CreateSequenceStyle};
use shotline_db::models::sheet::{CreateCharacterSheet, CreateLocationSheet};
use shotline_db::models::shot::CreateShot;
use shotline_db::repositories::{
    CharacterSheetRepo, LocationSheetRepo, ProjectRepo, SequenceRepo, SequenceStyleRepo, ShotRepo,
};
use shotline_db::store::PgReferenceStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn image(id: &str, url: &str, weight: f64) -> ReferenceImage {
    ReferenceImage {
        id: id.to_string(),
        url: url.to_string(),
        weight,
        source: ReferenceSource::Upload,
    }
}

/// Project `p1` with sequence `q1`, shot `s1`, one character and one location.
async fn seed(pool: &PgPool) {
    ProjectRepo::create(
        pool,
        &CreateProject {
            id: Some("p1".to_string()),
            name: "Pilot".to_string(),
        },
    )
    .await
    .unwrap();

    SequenceRepo::create(
        pool,
        &CreateSequence {
            id: Some("q1".to_string()),
            project_id: "p1".to_string(),
            name: "Opening".to_string(),
            style_id: None,
        },
    )
    .await
    .unwrap();

    CharacterSheetRepo::create(
        pool,
        &CreateCharacterSheet {
            id: Some("c1".to_string()),
            project_id: "p1".to_string(),
            character_name: "Aria".to_string(),
            aliases: vec!["The Pilot".to_string()],
            thumbnail_url: Some("https://cdn/aria.png".to_string()),
            appearance_images: vec![image("img-a", "https://cdn/aria-full.png", 0.8)],
        },
    )
    .await
    .unwrap();

    LocationSheetRepo::create(
        pool,
        &CreateLocationSheet {
            id: Some("l1".to_string()),
            project_id: "p1".to_string(),
            location_name: "Hangar".to_string(),
            aliases: vec![],
            thumbnail_url: None,
            reference_images: vec![],
        },
    )
    .await
    .unwrap();

    ShotRepo::create(
        pool,
        &CreateShot {
            id: Some("s1".to_string()),
            sequence_id: "q1".to_string(),
            prompt: "Aria walks into the Hangar".to_string(),
            tags: vec!["night".to_string()],
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Store reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_store_reads_hierarchy(pool: PgPool) {
    seed(&pool).await;
    let store = PgReferenceStore::new(pool);

    let shot = store.get_shot("s1").await.unwrap().expect("shot exists");
    assert_eq!(shot.sequence_id, "q1");
    assert_eq!(shot.tags, vec!["night".to_string()]);
    assert!(shot.reference_images.is_empty());

    let sequence = store.get_sequence("q1").await.unwrap().expect("sequence exists");
    assert_eq!(sequence.project_id, "p1");

    let characters = store.get_master_character_sheets("p1").await.unwrap();
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].aliases, vec!["The Pilot".to_string()]);
    assert_eq!(characters[0].appearance_images[0].weight, 0.8);

    let locations = store.get_master_location_sheets("p1").await.unwrap();
    assert_eq!(locations.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unknown_ids_are_empty(pool: PgPool) {
    let store = PgReferenceStore::new(pool);

    assert!(store.get_shot("missing").await.unwrap().is_none());
    assert!(store.get_sequence("missing").await.unwrap().is_none());
    assert!(store.get_sequence_style("missing").await.unwrap().is_none());
    assert!(store
        .get_master_character_sheets("missing")
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Sequence styles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_sequence_style_follows_style_id(pool: PgPool) {
    seed(&pool).await;

    SequenceRepo::create(
        &pool,
        &CreateSequence {
            id: Some("q2".to_string()),
            project_id: "p1".to_string(),
            name: "Chase".to_string(),
            style_id: Some("st1".to_string()),
        },
    )
    .await
    .unwrap();

    let parameters = BTreeMap::from([("contrast".to_string(), 1.2)]);
    for id in ["st1", "st2"] {
        SequenceStyleRepo::create(
            &pool,
            &CreateSequenceStyle {
                id: Some(id.to_string()),
                sequence_id: "q2".to_string(),
                style_name: format!("style-{id}"),
                intensity: 0.5,
                palette: vec!["#112233".to_string()],
                parameters: parameters.clone(),
            },
        )
        .await
        .unwrap();
    }

    let store = PgReferenceStore::new(pool);
    let style = store
        .get_sequence_style("q2")
        .await
        .unwrap()
        .expect("style resolved");
    assert_eq!(style.id, "st1");
    assert_eq!(style.parameters.get("contrast"), Some(&1.2));
    assert_eq!(style.palette, vec!["#112233".to_string()]);

    assert!(store.get_sequence_style("q1").await.unwrap().is_none());
}
