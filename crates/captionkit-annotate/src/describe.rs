//! Composite description built from the caption, scene context and tags.

use crate::scene::{ActivityLevel, Mood, SceneContext, Setting, SocialContext, TimeOfDay};
use crate::tags::TagSet;

/// Person terms left out of the "key elements" sentence.
pub const PERSON_TERMS: &[&str] = &["person", "people", "man", "woman"];

/// Maximum number of tags listed in the description.
pub const MAX_KEY_ELEMENTS: usize = 5;

/// Build the description: the caption followed by one sentence per
/// non-default context field and a key-elements sentence.
pub fn create_description(caption: &str, context: &SceneContext, tags: &TagSet) -> String {
    let mut parts: Vec<String> = vec![caption.to_string()];

    if context.setting != Setting::Unknown {
        parts.push(format!("This appears to be an {} scene.", context.setting));
    }

    if context.time_of_day != TimeOfDay::Unknown {
        parts.push(format!("The time appears to be {}.", context.time_of_day));
    }

    if context.activity_level != ActivityLevel::Unknown {
        parts.push(format!(
            "The activity level in the image is {}.",
            context.activity_level
        ));
    }

    match context.social_context {
        SocialContext::Group => {
            parts.push("This involves multiple people or a group setting.".to_string())
        }
        SocialContext::Individual => {
            parts.push("This focuses on an individual person.".to_string())
        }
        SocialContext::Unknown => {}
    }

    if context.mood != Mood::Neutral {
        parts.push(format!("The overall mood appears {}.", context.mood));
    }

    let key_tags: Vec<&str> = tags
        .iter()
        .map(String::as_str)
        .filter(|tag| !PERSON_TERMS.contains(tag))
        .take(MAX_KEY_ELEMENTS)
        .collect();
    if !key_tags.is_empty() {
        parts.push(format!("Key elements include: {}.", key_tags.join(", ")));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> TagSet {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_plain_caption_unchanged() {
        let desc = create_description("a blurry photo", &SceneContext::default(), &set(&[]));
        assert_eq!(desc, "a blurry photo");

        let desc = create_description("", &SceneContext::default(), &set(&[]));
        assert_eq!(desc, "");
    }

    #[test]
    fn test_person_terms_only_add_nothing() {
        let desc = create_description(
            "someone",
            &SceneContext::default(),
            &set(&["man", "people", "person", "woman"]),
        );
        assert_eq!(desc, "someone");
    }

    #[test]
    fn test_full_description() {
        let context = SceneContext {
            setting: Setting::Outdoor,
            time_of_day: TimeOfDay::Morning,
            activity_level: ActivityLevel::High,
            social_context: SocialContext::Individual,
            mood: Mood::Positive,
        };
        let desc = create_description(
            "a happy man running in a park at sunrise",
            &context,
            &set(&["happy", "man", "park", "running", "sunrise"]),
        );
        assert_eq!(
            desc,
            "a happy man running in a park at sunrise \
             This appears to be an outdoor scene. \
             The time appears to be morning. \
             The activity level in the image is high. \
             This focuses on an individual person. \
             The overall mood appears positive. \
             Key elements include: happy, park, running, sunrise."
        );
    }

    #[test]
    fn test_key_elements_capped_and_sorted() {
        let context = SceneContext {
            social_context: SocialContext::Group,
            ..Default::default()
        };
        let desc = create_description(
            "x",
            &context,
            &set(&["tree", "people", "dog", "ball", "red", "park", "car"]),
        );
        assert_eq!(
            desc,
            "x This involves multiple people or a group setting. \
             Key elements include: ball, car, dog, park, red."
        );
    }
}
