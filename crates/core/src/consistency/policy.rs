//! Severity assignment, drift tolerances and inheritance fallback policies.
//!
//! Detected conditions are mapped to severities through a [`SeverityPolicy`]
//! rather than hard-coded in the validators, so a project can re-weight a
//! condition without touching rule code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::reference::validate_unit_range;

use super::issue::{IssueType, Severity};

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// A condition a validator can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCondition {
    MissingCharacterReference,
    CharacterWeightDrift,
    CharacterSheetWithoutImages,
    MissingLocationReference,
    LocationWeightDrift,
    LocationSheetWithoutImages,
    StyleMissing,
    StyleNameMismatch,
    StyleIntensityDrift,
    PaletteDrift,
    ColorParameterDrift,
    CompositionParameterDrift,
}

impl IssueCondition {
    pub const ALL: [IssueCondition; 12] = [
        Self::MissingCharacterReference,
        Self::CharacterWeightDrift,
        Self::CharacterSheetWithoutImages,
        Self::MissingLocationReference,
        Self::LocationWeightDrift,
        Self::LocationSheetWithoutImages,
        Self::StyleMissing,
        Self::StyleNameMismatch,
        Self::StyleIntensityDrift,
        Self::PaletteDrift,
        Self::ColorParameterDrift,
        Self::CompositionParameterDrift,
    ];

    /// Prefix used in deterministic issue ids.
    pub fn slug(self) -> &'static str {
        match self {
            Self::MissingCharacterReference => "missing_character_reference",
            Self::CharacterWeightDrift => "character_weight_drift",
            Self::CharacterSheetWithoutImages => "character_sheet_without_images",
            Self::MissingLocationReference => "missing_location_reference",
            Self::LocationWeightDrift => "location_weight_drift",
            Self::LocationSheetWithoutImages => "location_sheet_without_images",
            Self::StyleMissing => "style_missing",
            Self::StyleNameMismatch => "style_name_mismatch",
            Self::StyleIntensityDrift => "style_intensity_drift",
            Self::PaletteDrift => "palette_drift",
            Self::ColorParameterDrift => "color_parameter_drift",
            Self::CompositionParameterDrift => "composition_parameter_drift",
        }
    }

    /// Dimension an issue raised for this condition belongs to.
    pub fn issue_type(self) -> IssueType {
        match self {
            Self::MissingCharacterReference
            | Self::CharacterWeightDrift
            | Self::CharacterSheetWithoutImages => IssueType::Character,
            Self::MissingLocationReference
            | Self::LocationWeightDrift
            | Self::LocationSheetWithoutImages => IssueType::Location,
            Self::StyleMissing | Self::StyleNameMismatch | Self::StyleIntensityDrift => {
                IssueType::Style
            }
            Self::PaletteDrift | Self::ColorParameterDrift => IssueType::Color,
            Self::CompositionParameterDrift => IssueType::Composition,
        }
    }

    /// Built-in severity when no override is configured.
    pub fn default_severity(self) -> Severity {
        match self {
            Self::MissingCharacterReference => Severity::High,
            Self::CharacterWeightDrift => Severity::Medium,
            Self::CharacterSheetWithoutImages => Severity::Low,
            Self::MissingLocationReference => Severity::Medium,
            Self::LocationWeightDrift => Severity::Low,
            Self::LocationSheetWithoutImages => Severity::Low,
            Self::StyleMissing => Severity::High,
            Self::StyleNameMismatch => Severity::High,
            Self::StyleIntensityDrift => Severity::Medium,
            Self::PaletteDrift => Severity::Medium,
            Self::ColorParameterDrift => Severity::Low,
            Self::CompositionParameterDrift => Severity::Low,
        }
    }
}

// ---------------------------------------------------------------------------
// SeverityPolicy
// ---------------------------------------------------------------------------

/// Maps detected conditions to severities.
///
/// Conditions without an override use [`IssueCondition::default_severity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityPolicy {
    overrides: BTreeMap<IssueCondition, Severity>,
}

impl SeverityPolicy {
    pub fn severity_for(&self, condition: IssueCondition) -> Severity {
        self.overrides
            .get(&condition)
            .copied()
            .unwrap_or_else(|| condition.default_severity())
    }

    pub fn with_override(mut self, condition: IssueCondition, severity: Severity) -> Self {
        self.overrides.insert(condition, severity);
        self
    }

    /// Parse overrides from a JSON object such as
    /// `{"palette_drift": "high", "style_missing": "critical"}`.
    ///
    /// Unknown condition names and the `unknown` severity are rejected so
    /// that a typo does not silently fall back to the default.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let policy: SeverityPolicy = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid severity policy: {e}")))?;
        if let Some((condition, _)) = policy
            .overrides
            .iter()
            .find(|(_, s)| **s == Severity::Unknown)
        {
            return Err(CoreError::Validation(format!(
                "Invalid severity for '{}'. Must be one of: critical, high, medium, low",
                condition.slug()
            )));
        }
        Ok(policy)
    }
}

// ---------------------------------------------------------------------------
// Tolerances
// ---------------------------------------------------------------------------

/// Default allowed difference between a reference weight and the sheet's
/// canonical weight.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 0.2;
/// Default allowed absolute difference in style intensity.
pub const DEFAULT_INTENSITY_TOLERANCE: f64 = 0.15;
/// Default allowed fraction of sequence palette colours missing from a shot.
pub const DEFAULT_PALETTE_TOLERANCE: f64 = 0.34;
/// Default allowed relative drift of a numeric style parameter.
pub const DEFAULT_PARAMETER_TOLERANCE: f64 = 0.25;

/// Drift tolerances used by the validators. All values lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub weight: f64,
    pub intensity: f64,
    pub palette: f64,
    pub parameter: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT_TOLERANCE,
            intensity: DEFAULT_INTENSITY_TOLERANCE,
            palette: DEFAULT_PALETTE_TOLERANCE,
            parameter: DEFAULT_PARAMETER_TOLERANCE,
        }
    }
}

impl Tolerances {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_unit_range(self.weight, "weight_tolerance")?;
        validate_unit_range(self.intensity, "intensity_tolerance")?;
        validate_unit_range(self.palette, "palette_tolerance")?;
        validate_unit_range(self.parameter, "parameter_tolerance")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EntityFallbackPolicy
// ---------------------------------------------------------------------------

/// What the inheritance resolver returns for a shot that names no
/// characters or locations at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityFallbackPolicy {
    /// Inherit no master sheets.
    #[default]
    InheritNothing,
    /// Inherit every sheet in the master bible.
    InheritAll,
}

impl EntityFallbackPolicy {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim() {
            "inherit_nothing" => Ok(Self::InheritNothing),
            "inherit_all" => Ok(Self::InheritAll),
            other => Err(CoreError::Validation(format!(
                "Invalid entity fallback policy '{other}'. Must be one of: inherit_nothing, inherit_all"
            ))),
        }
    }
}
