//! Scene context inference — priority-ordered keyword groups per dimension.
//!
//! Each dimension is resolved independently: the first group (in table
//! order) with a whole-word keyword hit wins, otherwise the dimension keeps
//! its default.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tags::word_pattern;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Setting {
    Indoor,
    Outdoor,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Day,
    Evening,
    Night,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialContext {
    Group,
    Individual,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Focused,
    Calm,
    #[default]
    Neutral,
}

impl Setting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
            Self::Unknown => "unknown",
        }
    }
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Day => "day",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::Unknown => "unknown",
        }
    }
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

impl SocialContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Individual => "individual",
            Self::Unknown => "unknown",
        }
    }
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Focused => "focused",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(Setting, TimeOfDay, ActivityLevel, SocialContext, Mood);

/// Five-dimension classification of a caption. Every field is always set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneContext {
    pub setting: Setting,
    pub time_of_day: TimeOfDay,
    pub activity_level: ActivityLevel,
    pub social_context: SocialContext,
    pub mood: Mood,
}

impl SceneContext {
    /// True when no dimension matched.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

// Keyword groups, highest priority first.

pub const SETTING_GROUPS: &[(Setting, &[&str])] = &[
    (Setting::Indoor, &["indoor", "inside", "room", "office", "house", "building"]),
    (Setting::Outdoor, &["outdoor", "outside", "park", "street", "beach", "field", "forest"]),
];

pub const TIME_OF_DAY_GROUPS: &[(TimeOfDay, &[&str])] = &[
    (TimeOfDay::Night, &["night", "evening", "dark"]),
    (TimeOfDay::Morning, &["morning", "sunrise"]),
    (TimeOfDay::Day, &["afternoon", "day", "sunny", "bright"]),
    (TimeOfDay::Evening, &["sunset", "dusk"]),
];

pub const ACTIVITY_GROUPS: &[(ActivityLevel, &[&str])] = &[
    (
        ActivityLevel::High,
        &["running", "jumping", "dancing", "playing", "exercising", "working out"],
    ),
    (ActivityLevel::Medium, &["walking", "standing", "working"]),
    (ActivityLevel::Low, &["sitting", "lying", "sleeping", "resting"]),
];

pub const SOCIAL_GROUPS: &[(SocialContext, &[&str])] = &[
    (SocialContext::Group, &["group", "people", "crowd", "team", "family"]),
    (SocialContext::Individual, &["person", "man", "woman", "individual"]),
];

pub const MOOD_GROUPS: &[(Mood, &[&str])] = &[
    (Mood::Positive, &["smiling", "happy", "celebrating", "laughing"]),
    (Mood::Focused, &["focused", "concentrated", "serious", "determined"]),
    (Mood::Calm, &["relaxed", "calm", "peaceful"]),
];

fn compile<T: Copy>(groups: &[(T, &[&str])]) -> Vec<(T, Regex)> {
    groups
        .iter()
        .map(|&(value, keywords)| (value, word_pattern(keywords)))
        .collect()
}

static SETTING_RULES: Lazy<Vec<(Setting, Regex)>> = Lazy::new(|| compile(SETTING_GROUPS));
static TIME_OF_DAY_RULES: Lazy<Vec<(TimeOfDay, Regex)>> =
    Lazy::new(|| compile(TIME_OF_DAY_GROUPS));
static ACTIVITY_RULES: Lazy<Vec<(ActivityLevel, Regex)>> = Lazy::new(|| compile(ACTIVITY_GROUPS));
static SOCIAL_RULES: Lazy<Vec<(SocialContext, Regex)>> = Lazy::new(|| compile(SOCIAL_GROUPS));
static MOOD_RULES: Lazy<Vec<(Mood, Regex)>> = Lazy::new(|| compile(MOOD_GROUPS));

/// Value of the first group with a keyword hit, or the default.
fn first_match<T: Copy + Default>(rules: &[(T, Regex)], text: &str) -> T {
    rules
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(value, _)| *value)
        .unwrap_or_default()
}

/// Infer the scene context of a caption.
pub fn analyze_scene_context(caption: &str) -> SceneContext {
    let caption_lower = caption.to_lowercase();

    SceneContext {
        setting: first_match(&SETTING_RULES, &caption_lower),
        time_of_day: first_match(&TIME_OF_DAY_RULES, &caption_lower),
        activity_level: first_match(&ACTIVITY_RULES, &caption_lower),
        social_context: first_match(&SOCIAL_RULES, &caption_lower),
        mood: first_match(&MOOD_RULES, &caption_lower),
    }
}
