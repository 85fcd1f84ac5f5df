//! Reference images: weighted visual anchors attached to shots and bible sheets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EntityId;

/// Validate that a value falls within `[0.0, 1.0]`.
///
/// Shared by reference weights, style intensities and engine tolerances.
/// NaN is rejected. The error names the field.
pub fn validate_unit_range(value: f64, name: &str) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

/// Where a reference image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSource {
    /// Picked from the project asset library (includes inherited bible images).
    Library,
    /// Uploaded directly onto the shot.
    Upload,
}

/// A weighted visual anchor used to steer generation.
///
/// `weight` is always within `[0.0, 1.0]` when built through
/// [`ReferenceImage::new`]; collections loaded from storage should be checked
/// with [`validate_reference_images`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub id: EntityId,
    pub url: String,
    pub weight: f64,
    pub source: ReferenceSource,
}

impl ReferenceImage {
    /// Build a reference image, rejecting weights outside `[0.0, 1.0]`.
    pub fn new(
        id: impl Into<EntityId>,
        url: impl Into<String>,
        weight: f64,
        source: ReferenceSource,
    ) -> Result<Self, CoreError> {
        validate_unit_range(weight, "reference weight")?;
        Ok(Self {
            id: id.into(),
            url: url.into(),
            weight,
            source,
        })
    }

    /// Whether the image points at something that can actually be displayed.
    pub fn is_usable(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

fn check_reference(image: &ReferenceImage) -> Result<(), CoreError> {
    if image.id.trim().is_empty() {
        return Err(CoreError::Validation(
            "Reference image id must not be empty".to_string(),
        ));
    }
    validate_unit_range(image.weight, &format!("weight of reference '{}'", image.id))
}

/// Validate a reference image collection.
///
/// Rules:
/// - Every weight in `[0.0, 1.0]`
/// - No empty ids
/// - No duplicate ids within the collection
pub fn validate_reference_images(images: &[ReferenceImage]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(images.len());
    for image in images {
        check_reference(image)?;
        if !seen.insert(image.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate reference image id: {}",
                image.id
            )));
        }
    }
    Ok(())
}

/// Drop every entry of a loaded collection that breaks the rules of
/// [`validate_reference_images`], keeping the first of any duplicated id.
///
/// Returns one error per dropped entry, in collection order.
pub fn retain_valid_references(images: &mut Vec<ReferenceImage>) -> Vec<CoreError> {
    let mut seen = HashSet::with_capacity(images.len());
    let mut rejected = Vec::new();
    images.retain(|image| {
        if let Err(e) = check_reference(image) {
            rejected.push(e);
            return false;
        }
        if !seen.insert(image.id.clone()) {
            rejected.push(CoreError::Validation(format!(
                "Duplicate reference image id: {}",
                image.id
            )));
            return false;
        }
        true
    });
    rejected
}
