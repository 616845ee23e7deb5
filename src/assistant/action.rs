//! Best-effort extraction of a fenced filter block from assistant text.
//!
//! Models do not always reproduce the requested fence exactly, so three
//! shapes are tried in a fixed priority order and the first structural match
//! wins. A match whose body is not a valid action is not an error: the
//! message is shown as plain text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::FilterAction;

static FILTER_STRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```filter\n(.*?)\n```").expect("static regex"));
static FILTER_LOOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```filter\s*(.*?)\s*```").expect("static regex"));
static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\n(.*?)\n```").expect("static regex"));

/// Fence shapes recognised around an action, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceStrategy {
    /// ```` ```filter ```` with the body on its own lines.
    FilterStrict,
    /// ```` ```filter ```` with arbitrary whitespace around the body.
    FilterLoose,
    /// ```` ```json ```` with the body on its own lines.
    Json,
}

impl FenceStrategy {
    pub const PRIORITY: [FenceStrategy; 3] = [
        FenceStrategy::FilterStrict,
        FenceStrategy::FilterLoose,
        FenceStrategy::Json,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            FenceStrategy::FilterStrict => &FILTER_STRICT,
            FenceStrategy::FilterLoose => &FILTER_LOOSE,
            FenceStrategy::Json => &JSON_FENCE,
        }
    }
}

/// A fenced block located in the text: the whole fence and its body.
struct FencedBlock<'t> {
    strategy: FenceStrategy,
    whole: regex::Match<'t>,
    body: &'t str,
}

fn locate(text: &str) -> Option<FencedBlock<'_>> {
    FenceStrategy::PRIORITY.iter().find_map(|strategy| {
        let caps = strategy.pattern().captures(text)?;
        Some(FencedBlock {
            strategy: *strategy,
            whole: caps.get(0)?,
            body: caps.get(1)?.as_str(),
        })
    })
}

/// Split assistant text into what to display and an optional action.
///
/// On success the matched fence is removed and the remainder trimmed. If no
/// fence is present, or the first fence found does not hold a valid
/// `{label, filters}` object, the text comes back unchanged with no action.
pub fn extract_filter_action(text: &str) -> (String, Option<FilterAction>) {
    let Some(block) = locate(text) else {
        return (text.to_string(), None);
    };

    match serde_json::from_str::<FilterAction>(block.body.trim()) {
        Ok(action) => {
            let mut display = String::with_capacity(text.len());
            display.push_str(&text[..block.whole.start()]);
            display.push_str(&text[block.whole.end()..]);
            (display.trim().to_string(), Some(action))
        }
        Err(e) => {
            debug!(strategy = ?block.strategy, error = %e, "ignoring malformed filter action");
            (text.to_string(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionFilter, EnergyType};

    #[test]
    fn strict_fence_is_extracted_and_stripped() {
        let text = "Here you go!\n\n```filter\n{\"label\": \"View Fire\", \"filters\": {\"type\": \"Fire\", \"collectionFilter\": \"owned\"}}\n```";
        let (display, action) = extract_filter_action(text);
        let action = action.unwrap();
        assert_eq!(action.label, "View Fire");
        assert_eq!(action.filters.energy_type, Some(EnergyType::Fire));
        assert_eq!(action.filters.collection_filter, Some(CollectionFilter::Owned));
        assert_eq!(display, "Here you go!");
    }

    #[test]
    fn loose_fence_on_one_line() {
        let text = "Sure ```filter {\"label\":\"Pikachu\",\"filters\":{\"search\":\"Pikachu\"}} ``` done";
        let (display, action) = extract_filter_action(text);
        assert_eq!(action.unwrap().filters.search.as_deref(), Some("Pikachu"));
        assert_eq!(display, "Sure  done");
    }

    #[test]
    fn json_fence_is_last_resort() {
        let text = "Look:\n```json\n{\"label\":\"Water\",\"filters\":{\"type\":\"Water\"}}\n```\n";
        let (display, action) = extract_filter_action(text);
        assert_eq!(action.unwrap().filters.energy_type, Some(EnergyType::Water));
        assert_eq!(display, "Look:");
    }

    #[test]
    fn first_matching_strategy_wins_even_if_invalid() {
        // The filter fence is broken; the valid json fence later must not be used.
        let text = "```filter\n{\"label\": }\n```\n```json\n{\"label\":\"x\",\"filters\":{}}\n```";
        let (display, action) = extract_filter_action(text);
        assert!(action.is_none());
        assert_eq!(display, text);
    }

    #[test]
    fn unknown_enum_value_degrades_to_text() {
        let text = "```filter\n{\"label\":\"x\",\"filters\":{\"type\":\"Fairy\"}}\n```";
        let (display, action) = extract_filter_action(text);
        assert!(action.is_none());
        assert_eq!(display, text);
    }

    #[test]
    fn missing_label_degrades_to_text() {
        let text = "```filter\n{\"filters\":{\"type\":\"Fire\"}}\n```";
        assert!(extract_filter_action(text).1.is_none());
    }

    #[test]
    fn plain_text_passes_through() {
        let (display, action) = extract_filter_action("  You own 12 Crown Rare cards.  ");
        assert!(action.is_none());
        assert_eq!(display, "  You own 12 Crown Rare cards.  ");
    }
}
