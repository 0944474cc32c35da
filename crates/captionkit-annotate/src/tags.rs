//! Tag extraction — whole-word vocabulary matching per category.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Matched vocabulary terms. Ordered so iteration is alphabetical.
pub type TagSet = BTreeSet<String>;

/// Vocabulary group a tag can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    People,
    Actions,
    Sports,
    Locations,
    Objects,
    Weather,
    Colors,
    Emotions,
}

impl TagCategory {
    pub const ALL: [TagCategory; 8] = [
        Self::People,
        Self::Actions,
        Self::Sports,
        Self::Locations,
        Self::Objects,
        Self::Weather,
        Self::Colors,
        Self::Emotions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Actions => "actions",
            Self::Sports => "sports",
            Self::Locations => "locations",
            Self::Objects => "objects",
            Self::Weather => "weather",
            Self::Colors => "colors",
            Self::Emotions => "emotions",
        }
    }

    /// Terms recognized for this category.
    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            Self::People => &[
                "person", "people", "man", "woman", "child", "boy", "girl", "baby", "adult",
            ],
            Self::Actions => &[
                "running", "walking", "sitting", "standing", "jumping", "dancing", "playing",
                "working", "exercising", "cooking", "reading", "writing", "driving", "riding",
                "swimming", "flying", "climbing", "lifting", "pushing", "pulling", "throwing",
                "catching", "kicking", "hitting",
            ],
            Self::Sports => &[
                "football", "basketball", "tennis", "soccer", "baseball", "golf", "hockey",
                "volleyball", "boxing", "wrestling", "cycling", "skiing", "surfing",
                "skateboarding", "yoga", "gym", "fitness", "workout", "exercise",
                "bench press", "squats", "deadlift",
            ],
            Self::Locations => &[
                "park", "beach", "street", "road", "building", "house", "office", "school",
                "hospital", "restaurant", "store", "mall", "gym", "stadium", "field", "court",
                "track", "pool", "lake", "river", "mountain", "forest", "desert", "city",
                "town", "village",
            ],
            Self::Objects => &[
                "car", "truck", "bike", "bicycle", "motorcycle", "bus", "train", "plane",
                "boat", "chair", "table", "bed", "computer", "phone", "camera", "book", "ball",
                "bottle", "cup", "plate", "food", "tree", "flower", "animal", "dog", "cat",
                "bird",
            ],
            Self::Weather => &[
                "sunny", "cloudy", "rainy", "snowy", "foggy", "windy", "storm", "clear",
                "bright", "dark", "day", "night", "morning", "afternoon", "evening", "sunset",
                "sunrise",
            ],
            Self::Colors => &[
                "red", "blue", "green", "yellow", "orange", "purple", "pink", "black", "white",
                "gray", "grey", "brown", "silver", "gold",
            ],
            Self::Emotions => &[
                "happy", "sad", "angry", "excited", "surprised", "calm", "peaceful",
                "energetic", "tired", "focused", "concentrated", "relaxed",
            ],
        }
    }
}

/// Build a case-sensitive whole-word alternation over lower-case terms.
pub(crate) fn word_pattern(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap()
}

static CATEGORY_PATTERNS: Lazy<Vec<(TagCategory, Regex)>> = Lazy::new(|| {
    TagCategory::ALL
        .iter()
        .map(|&category| (category, word_pattern(category.vocabulary())))
        .collect()
});

/// Extract every vocabulary term present in the caption.
pub fn extract_tags(caption: &str) -> TagSet {
    merge_categories(extract_tags_by_category(caption))
}

/// Union of per-category matches, dropping the category.
pub fn merge_categories(grouped: Vec<(TagCategory, TagSet)>) -> TagSet {
    grouped.into_iter().flat_map(|(_, tags)| tags).collect()
}

/// Extract tags grouped by the category that matched them.
pub fn extract_tags_by_category(caption: &str) -> Vec<(TagCategory, TagSet)> {
    let caption_lower = caption.to_lowercase();

    CATEGORY_PATTERNS
        .iter()
        .filter_map(|(category, pattern)| {
            let matched: TagSet = pattern
                .find_iter(&caption_lower)
                .map(|m| m.as_str().to_string())
                .collect();
            (!matched.is_empty()).then_some((*category, matched))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> TagSet {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_extract_running_in_park() {
        let tags = extract_tags("A man running in a park");
        assert_eq!(tags, set(&["man", "park", "running"]));
    }

    #[test]
    fn test_whole_word_only() {
        // "woman" must not also yield "man", "cart" must not yield "car"
        let tags = extract_tags("a woman pushing a cart");
        assert_eq!(tags, set(&["pushing", "woman"]));
    }

    #[test]
    fn test_shared_term_collapses() {
        let tags = extract_tags("people at the gym, a gym bag on the floor");
        assert_eq!(tags, set(&["gym", "people"]));

        let grouped = extract_tags_by_category("people at the gym");
        let categories: Vec<TagCategory> = grouped.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![TagCategory::People, TagCategory::Sports, TagCategory::Locations]
        );
    }

    #[test]
    fn test_multi_word_term() {
        let tags = extract_tags("a man doing BENCH PRESS in a gym");
        assert!(tags.contains("bench press"));
        assert!(tags.contains("gym"));
    }

    #[test]
    fn test_empty_and_unmatched() {
        assert!(extract_tags("").is_empty());
        assert!(extract_tags("lorem ipsum dolor sit amet").is_empty());
        assert!(extract_tags("ein Hund läuft über die Straße").is_empty());
    }

    #[test]
    fn test_every_tag_occurs_in_caption() {
        let caption = "A group of people playing basketball at night near a red car";
        let lower = caption.to_lowercase();
        for tag in extract_tags(caption) {
            assert!(lower.contains(&tag), "{} not in caption", tag);
        }
    }
}
