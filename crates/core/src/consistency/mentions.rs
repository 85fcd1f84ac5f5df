//! Detection of bible entities named by a shot.

use regex::RegexSet;

use crate::bible::AppearanceSheet;
use crate::shot::Shot;

/// Case-insensitive whole-word pattern matching any of a sheet's names.
///
/// Word boundaries are any non letter/digit/underscore characters, so names
/// with punctuation ("Dr. Vance", "Pier 9") still match exactly. Blank names
/// are skipped; a sheet with no usable name has no pattern.
fn sheet_pattern(sheet: &AppearanceSheet) -> Option<String> {
    let names: Vec<String> = sheet
        .match_names()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(regex::escape)
        .collect();
    if names.is_empty() {
        return None;
    }
    Some(format!(
        r"(?i)(?:^|[^\p{{L}}\p{{N}}_])(?:{})(?:$|[^\p{{L}}\p{{N}}_])",
        names.join("|")
    ))
}

fn explicitly_attached(shot: &Shot, sheet: &AppearanceSheet) -> bool {
    match sheet {
        AppearanceSheet::Character(s) => shot.character_ids.contains(&s.id),
        AppearanceSheet::Location(s) => shot.location_ids.contains(&s.id),
    }
}

/// For each sheet, whether the shot names it: by explicit id, or by its name
/// or an alias appearing in the prompt or a tag.
///
/// All name patterns are compiled into one [`RegexSet`] per call, so the
/// prompt and tags are scanned once regardless of bible size.
pub fn sheets_named_by(shot: &Shot, sheets: &[AppearanceSheet]) -> Vec<bool> {
    let mut named: Vec<bool> = sheets
        .iter()
        .map(|sheet| explicitly_attached(shot, sheet))
        .collect();

    let (indices, patterns): (Vec<usize>, Vec<String>) = sheets
        .iter()
        .enumerate()
        .filter(|(i, _)| !named[*i])
        .filter_map(|(i, sheet)| sheet_pattern(sheet).map(|p| (i, p)))
        .unzip();
    if patterns.is_empty() {
        return named;
    }
    let Ok(set) = RegexSet::new(&patterns) else {
        return named;
    };

    let texts = std::iter::once(shot.prompt.as_str()).chain(shot.tags.iter().map(String::as_str));
    for text in texts {
        for hit in set.matches(text).iter() {
            named[indices[hit]] = true;
        }
    }
    named
}
