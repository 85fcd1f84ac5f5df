//! Inherited reference material and the pure selection step of resolution.

use serde::{Deserialize, Serialize};

use crate::bible::AppearanceSheet;
use crate::shot::{SequenceStyleRecord, Shot};

use super::mentions::sheets_named_by;
use super::policy::EntityFallbackPolicy;

/// Master and sequence material that applies to one shot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InheritedReferences {
    pub from_master: Vec<AppearanceSheet>,
    pub from_sequence: Option<SequenceStyleRecord>,
}

impl InheritedReferences {
    /// Nothing inherited, the result for unknown shots.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.from_master.is_empty() && self.from_sequence.is_none()
    }
}

/// Pick the bible sheets a shot inherits.
///
/// A sheet applies when the shot names it (explicit id, name or alias). When
/// the shot names no sheet at all, `fallback` decides. The result is ordered
/// characters first, then by name and id, so equal inputs always give equal
/// output.
pub fn select_inherited_sheets(
    shot: &Shot,
    bible: Vec<AppearanceSheet>,
    fallback: EntityFallbackPolicy,
) -> Vec<AppearanceSheet> {
    let named = sheets_named_by(shot, &bible);
    let mut selected: Vec<AppearanceSheet> = if named.contains(&true) {
        bible
            .into_iter()
            .zip(named)
            .filter_map(|(sheet, named)| named.then_some(sheet))
            .collect()
    } else {
        match fallback {
            EntityFallbackPolicy::InheritNothing => Vec::new(),
            EntityFallbackPolicy::InheritAll => bible,
        }
    };

    selected.sort_by(|a, b| {
        a.kind()
            .label()
            .cmp(b.kind().label())
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.id().cmp(b.id()))
    });
    selected.dedup_by(|a, b| a.kind() == b.kind() && a.id() == b.id());
    selected
}
