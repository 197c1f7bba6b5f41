//! Rules that derive OBY values which are not stored directly on the source records.

use super::domain::FamilyTreeData;

const COMMON_COUNTRIES: &[&str] = &[
    "Poland",
    "USA",
    "United States",
    "Germany",
    "France",
    "UK",
    "Canada",
    "Australia",
];

/// Best-effort country for a free-text place such as "Krakow, Poland".
///
/// A known country name anywhere in the text wins (first match in list order);
/// otherwise the segment after the last comma is taken as the country.
pub fn extract_country(place: Option<&str>) -> String {
    let Some(place) = place.filter(|value| !value.is_empty()) else {
        return String::new();
    };

    let lowered = place.to_lowercase();
    if let Some(country) = COMMON_COUNTRIES
        .iter()
        .find(|country| lowered.contains(&country.to_lowercase()))
    {
        return (*country).to_string();
    }

    place
        .rsplit(',')
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

pub fn normalize_marital_status(status: Option<&str>) -> &'static str {
    let Some(status) = status.filter(|value| !value.is_empty()) else {
        return "single";
    };

    let normalized = status.to_lowercase();
    if normalized.contains("married") {
        "married"
    } else if normalized.contains("divorced") {
        "divorced"
    } else if normalized.contains("widow") {
        "widowed"
    } else {
        "single"
    }
}

/// Maps a free-text grandparent label onto one of the four OBY relationships.
///
/// Unknown or missing labels fall back to `paternal-grandfather`. That default
/// can misclassify a grandparent whose relationship was never recorded and is
/// kept until the case team confirms the intended behavior.
pub fn normalize_relationship(relationship: Option<&str>) -> &'static str {
    let Some(relationship) = relationship.filter(|value| !value.is_empty()) else {
        return "paternal-grandfather";
    };

    let normalized = relationship.to_lowercase();
    let maternal = normalized.contains("maternal");
    if normalized.contains("grandmother") {
        if maternal {
            "maternal-grandmother"
        } else {
            "paternal-grandmother"
        }
    } else if normalized.contains("grandfather") {
        if maternal {
            "maternal-grandfather"
        } else {
            "paternal-grandfather"
        }
    } else {
        "paternal-grandfather"
    }
}

/// Lineage is continuous unless an ancestor slot records a loss of citizenship.
///
/// Missing ancestors and missing flags count as "not lost".
pub fn assess_continuous_lineage(tree: &FamilyTreeData) -> bool {
    !tree
        .ancestors()
        .into_iter()
        .flatten()
        .any(|member| member.has_lost_citizenship())
}
