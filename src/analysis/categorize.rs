//! Keyword categorization.
//!
//! Categories are checked in declaration order and the first one with any
//! keyword present wins. Several keyword lists overlap (`"tech"` is a
//! substring of `"technology"`, and both Science and Technology and
//! Technology and Gadgets list `"technology"`); the order of [`CATEGORIES`]
//! decides those cases and must not be rearranged.

/// Label used when no keyword matches.
pub const DEFAULT_CATEGORY: &str = "General News";

/// Ordered `(label, keywords)` table. Keywords are lower case and matched as
/// plain substrings.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("Politics", &["election", "government", "policy", "politician"]),
    ("International News", &["world", "international", "foreign"]),
    ("National News", &["india", "national"]),
    ("Local News", &["local", "city", "town"]),
    ("Business and Finance", &["business", "finance", "market", "economy"]),
    ("Science and Technology", &["science", "technology", "tech", "research"]),
    ("Health and Wellness", &["health", "wellness", "medical", "fitness"]),
    ("Entertainment", &["entertainment", "movie", "film", "music"]),
    ("Sports", &["sport", "game", "tournament", "match"]),
    ("Lifestyle and Features", &["lifestyle", "feature", "trend"]),
    ("Opinion and Editorial", &["opinion", "editorial"]),
    ("Environment", &["environment", "climate", "nature"]),
    ("Education", &["education", "school", "college", "university"]),
    ("Crime and Justice", &["crime", "justice", "law", "court"]),
    ("Human Interest", &["human interest", "story", "people"]),
    ("Obituaries", &["obituary", "death", "passed away"]),
    ("Weather", &["weather", "forecast", "rain", "temperature"]),
    ("Religion and Spirituality", &["religion", "spirituality", "faith"]),
    ("Technology and Gadgets", &["technology", "gadget", "device"]),
    ("Automotive", &["car", "automobile", "vehicle"]),
];

/// Assign a category label from the headline and content, case-insensitively.
pub fn categorize(headline: &str, content: &str) -> &'static str {
    let text = format!("{headline} {content}").to_lowercase();

    CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(label, _)| *label)
        .unwrap_or(DEFAULT_CATEGORY)
}
