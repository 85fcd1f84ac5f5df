//! Shared fixtures for the engine integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use shotline_core::bible::{CharacterAppearanceSheet, LocationAppearanceSheet};
use shotline_core::reference::{ReferenceImage, ReferenceSource};
use shotline_core::shot::{GenerationParameters, Sequence, SequenceStyleRecord, Shot, VisualStyle};
use shotline_core::store::InMemoryReferenceStore;

pub const PROJECT: &str = "p1";
pub const SEQUENCE: &str = "q1";
pub const STYLE: &str = "st1";

pub fn image(id: &str, url: &str, weight: f64, source: ReferenceSource) -> ReferenceImage {
    ReferenceImage {
        id: id.to_string(),
        url: url.to_string(),
        weight,
        source,
    }
}

pub fn aria() -> CharacterAppearanceSheet {
    CharacterAppearanceSheet {
        id: "c1".to_string(),
        project_id: PROJECT.to_string(),
        character_name: "Aria".to_string(),
        aliases: vec!["the pilot".to_string()],
        thumbnail_url: None,
        appearance_images: vec![image(
            "aria-front",
            "https://cdn.example/aria-front.png",
            1.0,
            ReferenceSource::Library,
        )],
    }
}

pub fn hangar() -> LocationAppearanceSheet {
    LocationAppearanceSheet {
        id: "l1".to_string(),
        project_id: PROJECT.to_string(),
        location_name: "Hangar".to_string(),
        aliases: vec![],
        thumbnail_url: Some("https://cdn.example/hangar.png".to_string()),
        reference_images: vec![],
    }
}

pub fn noir_style() -> SequenceStyleRecord {
    SequenceStyleRecord {
        id: STYLE.to_string(),
        sequence_id: SEQUENCE.to_string(),
        style_name: "Noir".to_string(),
        intensity: 0.8,
        palette: vec!["#111111".to_string(), "#aa0000".to_string()],
        parameters: BTreeMap::from([("contrast".to_string(), 1.2)]),
    }
}

pub fn matching_visual_style() -> VisualStyle {
    VisualStyle {
        style_name: "noir".to_string(),
        intensity: 0.8,
        palette: vec!["#111111".to_string(), "#AA0000".to_string()],
        parameters: BTreeMap::from([("contrast".to_string(), 1.2)]),
    }
}

pub fn shot(id: &str, prompt: &str) -> Shot {
    Shot {
        id: id.to_string(),
        sequence_id: SEQUENCE.to_string(),
        prompt: prompt.to_string(),
        tags: vec![],
        character_ids: vec![],
        location_ids: vec![],
        reference_images: vec![],
        visual_style: None,
        parameters: GenerationParameters::default(),
    }
}

/// Project with Aria and the Hangar in its bible and one sequence.
///
/// The sequence carries the noir style only when `styled` is set.
pub async fn store(styled: bool) -> Arc<InMemoryReferenceStore> {
    let store = Arc::new(InMemoryReferenceStore::new());
    store
        .put_sequence(Sequence {
            id: SEQUENCE.to_string(),
            project_id: PROJECT.to_string(),
            name: "Launch".to_string(),
            style_id: styled.then(|| STYLE.to_string()),
        })
        .await;
    if styled {
        store.put_sequence_style(noir_style()).await;
    }
    store.put_character_sheet(aria()).await;
    store.put_location_sheet(hangar()).await;
    store
}
