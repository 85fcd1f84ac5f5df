//! Character and location coverage rules.
//!
//! Both rule sets share one implementation: a sheet the shot refers to must
//! be represented in the shot's reference images, at roughly the sheet's
//! canonical weight.

use crate::bible::{AppearanceSheet, SheetKind};
use crate::reference::ReferenceImage;
use crate::shot::Shot;

use super::issue::ConsistencyIssue;
use super::materialize::{inherited_reference_id, INHERITED_WEIGHT};
use super::mentions::sheets_named_by;
use super::policy::{IssueCondition, SeverityPolicy, Tolerances};

/// Float slack so a weight sitting exactly on the tolerance is not flagged.
const WEIGHT_EPSILON: f64 = 1e-9;

struct KindConditions {
    missing: IssueCondition,
    drift: IssueCondition,
    without_images: IssueCondition,
}

fn conditions_for(kind: SheetKind) -> KindConditions {
    match kind {
        SheetKind::Character => KindConditions {
            missing: IssueCondition::MissingCharacterReference,
            drift: IssueCondition::CharacterWeightDrift,
            without_images: IssueCondition::CharacterSheetWithoutImages,
        },
        SheetKind::Location => KindConditions {
            missing: IssueCondition::MissingLocationReference,
            drift: IssueCondition::LocationWeightDrift,
            without_images: IssueCondition::LocationSheetWithoutImages,
        },
    }
}

/// Expected weight of `reference` if it represents `sheet`, `None` otherwise.
///
/// Inherited references expect [`INHERITED_WEIGHT`]; a reference carrying the
/// id of one of the sheet's images expects that image's weight. Matches by
/// url or thumbnail expect the sheet's canonical weight.
fn expected_weight(reference: &ReferenceImage, sheet: &AppearanceSheet) -> Option<f64> {
    if reference.id == inherited_reference_id(sheet.id()) {
        return Some(INHERITED_WEIGHT);
    }
    if let Some(image) = sheet.images().iter().find(|img| img.id == reference.id) {
        return Some(image.weight);
    }

    if !reference.is_usable() {
        return None;
    }
    let by_url = sheet
        .images()
        .iter()
        .any(|img| img.is_usable() && img.url == reference.url);
    let by_thumbnail = sheet
        .thumbnail_url()
        .is_some_and(|thumb| thumb == reference.url);

    (by_url || by_thumbnail).then(|| sheet.canonical_weight().unwrap_or(INHERITED_WEIGHT))
}

/// Check every sheet of `kind` the shot refers to.
///
/// Sheets of the other kind, and sheets the shot does not name, are ignored.
pub fn check_sheet_coverage(
    shot: &Shot,
    sheets: &[AppearanceSheet],
    kind: SheetKind,
    policy: &SeverityPolicy,
    tolerances: &Tolerances,
) -> Vec<ConsistencyIssue> {
    let conditions = conditions_for(kind);
    let mut issues = Vec::new();

    let named = sheets_named_by(shot, sheets);
    for sheet in sheets
        .iter()
        .zip(named)
        .filter_map(|(sheet, named)| (named && sheet.kind() == kind).then_some(sheet))
    {
        let matched: Vec<(&ReferenceImage, f64)> = shot
            .reference_images
            .iter()
            .filter_map(|r| expected_weight(r, sheet).map(|w| (r, w)))
            .collect();

        if matched.is_empty() {
            let condition = if sheet.primary_image_url().is_some() {
                conditions.missing
            } else {
                conditions.without_images
            };
            let description = if condition == conditions.missing {
                format!(
                    "{} '{}' appears in the shot but none of its reference images are attached",
                    capitalize(kind.label()),
                    sheet.name()
                )
            } else {
                format!(
                    "{} '{}' appears in the shot but its appearance sheet has no usable images",
                    capitalize(kind.label()),
                    sheet.name()
                )
            };
            issues.push(
                ConsistencyIssue::new(
                    format!("{}:{}", condition.slug(), sheet.id()),
                    condition.issue_type(),
                    policy.severity_for(condition),
                    description,
                )
                .with_subject(sheet.id()),
            );
            continue;
        }

        for (reference, expected) in matched {
            if (reference.weight - expected).abs() <= tolerances.weight + WEIGHT_EPSILON {
                continue;
            }
            let condition = conditions.drift;
            issues.push(
                ConsistencyIssue::new(
                    format!("{}:{}:{}", condition.slug(), sheet.id(), reference.id),
                    condition.issue_type(),
                    policy.severity_for(condition),
                    format!(
                        "Reference '{}' for {} '{}' has weight {:.2}, expected {:.2} (±{:.2})",
                        reference.id,
                        kind.label(),
                        sheet.name(),
                        reference.weight,
                        expected,
                        tolerances.weight
                    ),
                )
                .with_subject(sheet.id()),
            );
        }
    }

    issues
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::{CharacterAppearanceSheet, LocationAppearanceSheet};
    use crate::consistency::issue::{IssueType, Severity};
    use crate::reference::ReferenceSource;
    use crate::shot::GenerationParameters;

    fn img(id: &str, url: &str, weight: f64) -> ReferenceImage {
        ReferenceImage {
            id: id.to_string(),
            url: url.to_string(),
            weight,
            source: ReferenceSource::Library,
        }
    }

    fn shot(prompt: &str, refs: Vec<ReferenceImage>) -> Shot {
        Shot {
            id: "s1".to_string(),
            sequence_id: "q1".to_string(),
            prompt: prompt.to_string(),
            tags: vec![],
            character_ids: vec![],
            location_ids: vec![],
            reference_images: refs,
            visual_style: None,
            parameters: GenerationParameters::default(),
        }
    }

    fn aria(images: Vec<ReferenceImage>) -> AppearanceSheet {
        AppearanceSheet::Character(CharacterAppearanceSheet {
            id: "c1".to_string(),
            project_id: "p1".to_string(),
            character_name: "Aria".to_string(),
            aliases: vec![],
            thumbnail_url: None,
            appearance_images: images,
        })
    }

    fn harbor() -> AppearanceSheet {
        AppearanceSheet::Location(LocationAppearanceSheet {
            id: "l1".to_string(),
            project_id: "p1".to_string(),
            location_name: "Harbor".to_string(),
            aliases: vec![],
            thumbnail_url: Some("harbor-thumb.png".to_string()),
            reference_images: vec![],
        })
    }

    fn check(shot: &Shot, sheets: &[AppearanceSheet], kind: SheetKind) -> Vec<ConsistencyIssue> {
        check_sheet_coverage(
            shot,
            sheets,
            kind,
            &SeverityPolicy::default(),
            &Tolerances::default(),
        )
    }

    #[test]
    fn missing_reference_is_flagged() {
        let sheets = vec![aria(vec![img("a1", "aria.png", 1.0)])];
        let issues = check(&shot("Aria runs", vec![]), &sheets, SheetKind::Character);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "missing_character_reference:c1");
        assert_eq!(issues[0].issue_type, IssueType::Character);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].subject_id.as_deref(), Some("c1"));
    }

    #[test]
    fn unreferenced_sheet_is_ignored() {
        let sheets = vec![aria(vec![img("a1", "aria.png", 1.0)])];
        assert!(check(&shot("empty street", vec![]), &sheets, SheetKind::Character).is_empty());
    }

    #[test]
    fn inherited_reference_satisfies_sheet() {
        let sheets = vec![aria(vec![img("a1", "aria.png", 0.5)])];
        let refs = vec![img("inherited-c1", "aria.png", 1.0)];
        assert!(check(&shot("Aria runs", refs), &sheets, SheetKind::Character).is_empty());
    }

    #[test]
    fn matching_by_image_id_or_url() {
        let sheets = vec![aria(vec![img("a1", "aria.png", 0.8)])];
        let by_id = vec![img("a1", "copy.png", 0.8)];
        assert!(check(&shot("Aria", by_id), &sheets, SheetKind::Character).is_empty());

        let by_url = vec![img("upload-7", "aria.png", 0.7)];
        assert!(check(&shot("Aria", by_url), &sheets, SheetKind::Character).is_empty());
    }

    #[test]
    fn image_id_match_expects_that_images_weight() {
        let sheets = vec![aria(vec![
            img("a1", "aria-side.png", 0.4),
            img("a2", "aria-front.png", 0.9),
        ])];
        let exact = vec![img("a1", "aria-side.png", 0.4)];
        assert!(check(&shot("Aria", exact), &sheets, SheetKind::Character).is_empty());

        let drifted = vec![img("a1", "aria-side.png", 0.9)];
        let issues = check(&shot("Aria", drifted), &sheets, SheetKind::Character);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "character_weight_drift:c1:a1");
    }

    #[test]
    fn weight_drift_is_flagged() {
        let sheets = vec![aria(vec![img("a1", "aria.png", 0.9)])];
        let refs = vec![img("upload-7", "aria.png", 0.4)];
        let issues = check(&shot("Aria", refs), &sheets, SheetKind::Character);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "character_weight_drift:c1:upload-7");
        assert_eq!(issues[0].severity, Severity::Medium);
        assert!(issues[0].description.contains("0.40"));
    }

    #[test]
    fn weight_at_tolerance_boundary_passes() {
        let sheets = vec![aria(vec![img("a1", "aria.png", 1.0)])];
        let refs = vec![img("inherited-c1", "aria.png", 0.8)];
        assert!(check(&shot("Aria", refs), &sheets, SheetKind::Character).is_empty());
    }

    #[test]
    fn sheet_without_images_gets_low_issue() {
        let sheets = vec![aria(vec![img("a1", " ", 1.0)])];
        let issues = check(&shot("Aria", vec![]), &sheets, SheetKind::Character);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "character_sheet_without_images:c1");
        assert_eq!(issues[0].severity, Severity::Low);
    }

    #[test]
    fn location_rules_use_location_conditions() {
        let sheets = vec![aria(vec![img("a1", "aria.png", 1.0)]), harbor()];
        let issues = check(&shot("Aria at the harbor", vec![]), &sheets, SheetKind::Location);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "missing_location_reference:l1");
        assert_eq!(issues[0].issue_type, IssueType::Location);
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn thumbnail_url_satisfies_location() {
        let refs = vec![img("r1", "harbor-thumb.png", 1.0)];
        assert!(check(&shot("harbor", refs), &[harbor()], SheetKind::Location).is_empty());
    }

    #[test]
    fn policy_controls_severity() {
        let sheets = vec![aria(vec![img("a1", "aria.png", 1.0)])];
        let policy = SeverityPolicy::default()
            .with_override(IssueCondition::MissingCharacterReference, Severity::Critical);
        let issues = check_sheet_coverage(
            &shot("Aria", vec![]),
            &sheets,
            SheetKind::Character,
            &policy,
            &Tolerances::default(),
        );
        assert_eq!(issues[0].severity, Severity::Critical);
    }
}
