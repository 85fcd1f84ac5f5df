//! Project hierarchy: projects, sequences, sequence styles and shots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::reference::{validate_reference_images, validate_unit_range, ReferenceImage};
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
}

/// A named, ordered group of shots sharing an optional style record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub style_id: Option<EntityId>,
}

/// Shared visual treatment applied to every shot in a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStyleRecord {
    pub id: EntityId,
    pub sequence_id: EntityId,
    pub style_name: String,
    pub intensity: f64,
    /// Hex colours, e.g. `#1a2b3c`.
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}

/// A shot's own visual style settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualStyle {
    pub style_name: String,
    pub intensity: f64,
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}

/// Sampler settings used when the shot is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    #[serde(default)]
    pub seed: Option<i64>,
    pub denoising_strength: f64,
    pub steps: u32,
    pub guidance_scale: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            seed: None,
            denoising_strength: 0.75,
            steps: 30,
            guidance_scale: 7.5,
        }
    }
}

/// The atomic unit of production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: EntityId,
    pub sequence_id: EntityId,
    pub prompt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Character sheet ids explicitly attached to the shot.
    #[serde(default)]
    pub character_ids: Vec<EntityId>,
    /// Location sheet ids explicitly attached to the shot.
    #[serde(default)]
    pub location_ids: Vec<EntityId>,
    #[serde(default)]
    pub reference_images: Vec<ReferenceImage>,
    #[serde(default)]
    pub visual_style: Option<VisualStyle>,
    #[serde(default)]
    pub parameters: GenerationParameters,
}

impl Shot {
    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_reference_images(&self.reference_images)?;
        if let Some(style) = &self.visual_style {
            validate_unit_range(style.intensity, "visual style intensity")?;
        }
        validate_unit_range(self.parameters.denoising_strength, "denoising_strength")?;
        if self.parameters.steps == 0 {
            return Err(CoreError::Validation("steps must be > 0".to_string()));
        }
        Ok(())
    }
}
