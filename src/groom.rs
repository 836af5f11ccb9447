use crate::model::feature::Feature;
use crate::model::groomed::{Category, GroomedFeature, Priority};

/// Keywords that mark an item High priority, checked before the Medium set.
pub const HIGH_PRIORITY_KEYWORDS: &[&str] = &["urgent", "high", "critical"];

/// Keywords that mark an item Medium priority; anything unmatched is Low.
pub const MEDIUM_PRIORITY_KEYWORDS: &[&str] = &["medium", "normal"];

/// Maximum summary length before truncation, in characters.
const SUMMARY_MAX_CHARS: usize = 60;

/// Classify and trim every fetched feature, preserving fetch order. Pure:
/// same input yields the same output, and the input is left untouched.
pub fn groom_features(features: &[Feature]) -> Vec<GroomedFeature> {
    features.iter().map(groom_feature).collect()
}

fn groom_feature(feature: &Feature) -> GroomedFeature {
    let name = feature.name.to_lowercase();
    let description = feature.description_text().to_lowercase();

    GroomedFeature {
        id: feature.id.clone(),
        name: feature.name.clone(),
        summary: trim_summary(feature.description_text()),
        category: categorize(&name, &description),
        // The lowercased fields are joined with no separator, so a keyword
        // spanning the name/description seam still matches.
        priority: prioritize(&format!("{name}{description}")),
        status: feature.status_name().to_string(),
    }
}

/// Category by substring match, name and description tested independently.
/// Deliberately not word-boundary aware: "debugging" counts as a bug. Bug
/// wins over Feature when both appear.
fn categorize(name: &str, description: &str) -> Category {
    if name.contains("bug") || description.contains("bug") {
        Category::Bug
    } else if name.contains("feature") || description.contains("feature") {
        Category::Feature
    } else {
        Category::Other
    }
}

/// Priority by substring match against the combined search text, High set
/// checked before Medium.
fn prioritize(search_text: &str) -> Priority {
    if HIGH_PRIORITY_KEYWORDS.iter().any(|kw| search_text.contains(kw)) {
        Priority::High
    } else if MEDIUM_PRIORITY_KEYWORDS.iter().any(|kw| search_text.contains(kw)) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// First 60 characters of the description plus `...` when longer, the
/// description unchanged otherwise. Counts characters, not bytes.
fn trim_summary(description: &str) -> String {
    if description.chars().count() > SUMMARY_MAX_CHARS {
        let head: String = description.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
