//! Style, colour and composition drift against the sequence style record.

use std::collections::HashSet;

use crate::shot::{SequenceStyleRecord, Shot};

use super::issue::ConsistencyIssue;
use super::policy::{IssueCondition, SeverityPolicy, Tolerances};

/// Style parameters that describe colour treatment. Every other numeric
/// parameter is treated as a composition parameter.
pub const COLOR_PARAMETER_KEYS: &[&str] = &[
    "saturation",
    "contrast",
    "brightness",
    "exposure",
    "temperature",
    "tint",
    "hue",
    "gamma",
];

/// Denominator floor for relative drift so zero-valued parameters compare
/// by absolute difference.
const MIN_RELATIVE_BASE: f64 = 1e-9;

/// Float slack so values sitting exactly on a tolerance are not flagged.
const EPSILON: f64 = 1e-9;

pub fn is_color_parameter(key: &str) -> bool {
    COLOR_PARAMETER_KEYS.contains(&key.to_ascii_lowercase().as_str())
}

/// Normalise a colour string for comparison: trimmed, lowercase, leading
/// `#`, and 3-digit shorthand expanded (`#abc` -> `#aabbcc`).
pub fn normalize_hex(color: &str) -> String {
    let body = color.trim().trim_start_matches('#').to_ascii_lowercase();
    let body = if body.len() == 3 && body.chars().all(|c| c.is_ascii_hexdigit()) {
        body.chars().flat_map(|c| [c, c]).collect()
    } else {
        body
    };
    format!("#{body}")
}

/// Fraction of `expected` colours present in `actual`, in `[0.0, 1.0]`.
///
/// An empty `expected` palette is fully covered.
pub fn palette_coverage(expected: &[String], actual: &[String]) -> f64 {
    let wanted: HashSet<String> = expected.iter().map(|c| normalize_hex(c)).collect();
    if wanted.is_empty() {
        return 1.0;
    }
    let have: HashSet<String> = actual.iter().map(|c| normalize_hex(c)).collect();
    let hits = wanted.iter().filter(|c| have.contains(*c)).count();
    hits as f64 / wanted.len() as f64
}

/// Relative drift of `actual` from `expected`.
pub fn relative_drift(actual: f64, expected: f64) -> f64 {
    (actual - expected).abs() / expected.abs().max(MIN_RELATIVE_BASE)
}

fn issue(
    condition: IssueCondition,
    subject: &str,
    policy: &SeverityPolicy,
    description: String,
) -> ConsistencyIssue {
    ConsistencyIssue::new(
        format!("{}:{subject}", condition.slug()),
        condition.issue_type(),
        policy.severity_for(condition),
        description,
    )
    .with_subject(subject)
}

/// Compare a shot's visual style with its sequence style record.
///
/// Without a record there is nothing to drift from, so no issues are raised.
pub fn check_style_consistency(
    shot: &Shot,
    record: Option<&SequenceStyleRecord>,
    policy: &SeverityPolicy,
    tolerances: &Tolerances,
) -> Vec<ConsistencyIssue> {
    let Some(record) = record else {
        return Vec::new();
    };

    let Some(style) = &shot.visual_style else {
        return vec![issue(
            IssueCondition::StyleMissing,
            &record.id,
            policy,
            format!(
                "Shot has no visual style but its sequence uses '{}'",
                record.style_name
            ),
        )];
    };

    let mut issues = Vec::new();

    if !style
        .style_name
        .trim()
        .eq_ignore_ascii_case(record.style_name.trim())
    {
        issues.push(issue(
            IssueCondition::StyleNameMismatch,
            &record.id,
            policy,
            format!(
                "Shot style '{}' differs from sequence style '{}'",
                style.style_name, record.style_name
            ),
        ));
    }

    let intensity_diff = (style.intensity - record.intensity).abs();
    if intensity_diff > tolerances.intensity + EPSILON {
        issues.push(issue(
            IssueCondition::StyleIntensityDrift,
            &record.id,
            policy,
            format!(
                "Style intensity {:.2} drifts from sequence intensity {:.2} (±{:.2})",
                style.intensity, record.intensity, tolerances.intensity
            ),
        ));
    }

    let coverage = palette_coverage(&record.palette, &style.palette);
    if coverage + EPSILON < 1.0 - tolerances.palette {
        issues.push(issue(
            IssueCondition::PaletteDrift,
            &record.id,
            policy,
            format!(
                "Shot palette covers {:.0}% of the sequence palette",
                coverage * 100.0
            ),
        ));
    }

    for (key, expected) in &record.parameters {
        let condition = if is_color_parameter(key) {
            IssueCondition::ColorParameterDrift
        } else {
            IssueCondition::CompositionParameterDrift
        };
        let subject = format!("{}:{key}", record.id);

        match style.parameters.get(key) {
            None => issues.push(issue(
                condition,
                &subject,
                policy,
                format!("Style parameter '{key}' is not set; sequence uses {expected}"),
            )),
            Some(actual) if relative_drift(*actual, *expected) > tolerances.parameter + EPSILON => {
                issues.push(issue(
                    condition,
                    &subject,
                    policy,
                    format!(
                        "Style parameter '{key}' is {actual}, sequence uses {expected} (±{:.0}%)",
                        tolerances.parameter * 100.0
                    ),
                ))
            }
            Some(_) => {}
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::consistency::issue::{IssueType, Severity};
    use crate::shot::{GenerationParameters, VisualStyle};

    fn record() -> SequenceStyleRecord {
        SequenceStyleRecord {
            id: "st1".to_string(),
            sequence_id: "q1".to_string(),
            style_name: "Noir".to_string(),
            intensity: 0.8,
            palette: vec!["#111111".to_string(), "#AA0000".to_string(), "#fff".to_string()],
            parameters: BTreeMap::from([
                ("contrast".to_string(), 1.2),
                ("focal_length".to_string(), 35.0),
            ]),
        }
    }

    fn matching_style() -> VisualStyle {
        VisualStyle {
            style_name: "noir".to_string(),
            intensity: 0.75,
            palette: vec!["#111111".to_string(), "#aa0000".to_string(), "#FFFFFF".to_string()],
            parameters: BTreeMap::from([
                ("contrast".to_string(), 1.25),
                ("focal_length".to_string(), 35.0),
            ]),
        }
    }

    fn shot(style: Option<VisualStyle>) -> Shot {
        Shot {
            id: "s1".to_string(),
            sequence_id: "q1".to_string(),
            prompt: String::new(),
            tags: vec![],
            character_ids: vec![],
            location_ids: vec![],
            reference_images: vec![],
            visual_style: style,
            parameters: GenerationParameters::default(),
        }
    }

    fn check(shot: &Shot, record: Option<&SequenceStyleRecord>) -> Vec<ConsistencyIssue> {
        check_style_consistency(shot, record, &SeverityPolicy::default(), &Tolerances::default())
    }

    #[test]
    fn no_record_means_no_issues() {
        assert!(check(&shot(None), None).is_empty());
    }

    #[test]
    fn missing_style_is_single_issue() {
        let r = record();
        let issues = check(&shot(None), Some(&r));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "style_missing:st1");
        assert_eq!(issues[0].severity, Severity::High);
    }

    #[test]
    fn matching_style_passes() {
        let r = record();
        assert!(check(&shot(Some(matching_style())), Some(&r)).is_empty());
    }

    #[test]
    fn name_and_intensity_drift() {
        let r = record();
        let mut style = matching_style();
        style.style_name = "Pastel".to_string();
        style.intensity = 0.3;
        let issues = check(&shot(Some(style)), Some(&r));
        let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["style_name_mismatch:st1", "style_intensity_drift:st1"]);
        assert!(issues.iter().all(|i| i.issue_type == IssueType::Style));
    }

    #[test]
    fn palette_drift_is_color_issue() {
        let r = record();
        let mut style = matching_style();
        style.palette = vec!["#111111".to_string()];
        let issues = check(&shot(Some(style)), Some(&r));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "palette_drift:st1");
        assert_eq!(issues[0].issue_type, IssueType::Color);
        assert!(issues[0].description.contains("33%"));
    }

    #[test]
    fn one_missing_colour_is_tolerated() {
        let r = record();
        let mut style = matching_style();
        style.palette.pop();
        assert!(check(&shot(Some(style)), Some(&r)).is_empty());
    }

    #[test]
    fn parameter_drift_classified_by_key() {
        let r = record();
        let mut style = matching_style();
        style.parameters.insert("contrast".to_string(), 2.0);
        style.parameters.remove("focal_length");
        let issues = check(&shot(Some(style)), Some(&r));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, "color_parameter_drift:st1:contrast");
        assert_eq!(issues[0].issue_type, IssueType::Color);
        assert_eq!(issues[1].id, "composition_parameter_drift:st1:focal_length");
        assert_eq!(issues[1].issue_type, IssueType::Composition);
        assert_eq!(issues[1].subject_id.as_deref(), Some("st1:focal_length"));
    }

    #[test]
    fn normalize_hex_expands_shorthand() {
        assert_eq!(normalize_hex("#FFF"), "#ffffff");
        assert_eq!(normalize_hex(" aa0000 "), "#aa0000");
    }

    #[test]
    fn coverage_of_empty_palette_is_full() {
        assert_eq!(palette_coverage(&[], &["#000".to_string()]), 1.0);
    }

    #[test]
    fn relative_drift_handles_zero_base() {
        assert_eq!(relative_drift(0.0, 0.0), 0.0);
        assert!(relative_drift(0.1, 0.0) > 1.0);
        assert!((relative_drift(1.25, 1.0) - 0.25).abs() < 1e-12);
    }
}
