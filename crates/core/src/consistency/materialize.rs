//! Conversion of inherited sheets into reference images a shot can adopt.

use std::collections::HashSet;

use crate::bible::AppearanceSheet;
use crate::reference::{ReferenceImage, ReferenceSource};

/// Prefix of reference ids produced by [`materialize_inherited_references`].
pub const INHERITED_ID_PREFIX: &str = "inherited-";

/// Weight given to every materialized reference.
pub const INHERITED_WEIGHT: f64 = 1.0;

/// Reference id a sheet materializes to.
pub fn inherited_reference_id(source_id: &str) -> String {
    format!("{INHERITED_ID_PREFIX}{source_id}")
}

/// One library reference per sheet that exposes a usable image.
///
/// Sheets without a thumbnail or any non-blank image url are skipped. A
/// sheet listed twice yields one reference.
pub fn materialize_inherited_references(inherited: &[AppearanceSheet]) -> Vec<ReferenceImage> {
    let mut seen = HashSet::new();
    inherited
        .iter()
        .filter_map(|sheet| {
            let url = sheet.primary_image_url()?;
            let id = inherited_reference_id(sheet.id());
            seen.insert(id.clone()).then(|| ReferenceImage {
                id,
                url: url.to_string(),
                weight: INHERITED_WEIGHT,
                source: ReferenceSource::Library,
            })
        })
        .collect()
}

/// Append `inherited` to `existing` without removing or duplicating entries.
///
/// Existing entries keep their order and values; an inherited entry whose id
/// is already present is dropped.
pub fn merge_inherited_references(
    existing: &[ReferenceImage],
    inherited: Vec<ReferenceImage>,
) -> Vec<ReferenceImage> {
    let mut ids: HashSet<String> = existing.iter().map(|r| r.id.clone()).collect();
    let mut merged = existing.to_vec();
    merged.extend(inherited.into_iter().filter(|r| ids.insert(r.id.clone())));
    merged
}
