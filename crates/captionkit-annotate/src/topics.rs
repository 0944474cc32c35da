//! Related conversation topics derived from tags and scene context.

use std::collections::HashSet;

use crate::scene::{ActivityLevel, SceneContext, Setting};
use crate::tags::TagSet;

/// Maximum number of related topics on a record.
pub const MAX_RELATED_TOPICS: usize = 5;

/// Condition that activates a topic list.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Any of these tags is present.
    AnyTag(&'static [&'static str]),
    Setting(Setting),
    ActivityLevel(ActivityLevel),
}

impl Trigger {
    fn fires(&self, tags: &TagSet, context: &SceneContext) -> bool {
        match *self {
            Self::AnyTag(terms) => terms.iter().any(|t| tags.contains(*t)),
            Self::Setting(setting) => context.setting == setting,
            Self::ActivityLevel(level) => context.activity_level == level,
        }
    }
}

/// Trigger → topics table. Earlier rows take precedence when truncating.
pub const TOPIC_RULES: &[(Trigger, &[&str])] = &[
    (
        Trigger::AnyTag(&["running", "exercise", "gym", "fitness"]),
        &["fitness", "health", "exercise routines", "nutrition", "wellness"],
    ),
    (
        Trigger::AnyTag(&["beach", "outdoor", "park"]),
        &["outdoor activities", "nature", "travel", "recreation"],
    ),
    (
        Trigger::AnyTag(&["sports", "basketball", "football", "tennis"]),
        &["sports", "athletics", "competition", "team activities"],
    ),
    (
        Trigger::Setting(Setting::Outdoor),
        &["outdoor lifestyle", "fresh air benefits"],
    ),
    (
        Trigger::ActivityLevel(ActivityLevel::High),
        &["active lifestyle", "energy", "motivation"],
    ),
];

/// Collect topics from every firing rule, deduplicated, first five kept.
pub fn related_topics(tags: &TagSet, context: &SceneContext) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut topics: Vec<String> = Vec::new();

    for (trigger, rule_topics) in TOPIC_RULES {
        if !trigger.fires(tags, context) {
            continue;
        }
        for &topic in rule_topics.iter() {
            if seen.insert(topic) {
                topics.push(topic.to_string());
            }
        }
    }

    topics.truncate(MAX_RELATED_TOPICS);
    topics
}
