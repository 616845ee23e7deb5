//! System prompt rendering for the collection assistant.
//!
//! Plain string interpolation over the aggregates; the exact whitespace is
//! not load-bearing, but section order is kept stable so prompts diff well.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::models::{
    BoosterSummary, ChatContextData, CollectionFilter, CollectionSummary, EnergyType,
    FilterRarity, Stage, Tally, WishlistTally, RARITY_ORDER,
};

const INTRO: &str = "You are a helpful assistant for a Pokemon TCG Pocket card collection tracker app. \
You help users understand their collection, suggest which boosters to open, and answer questions about their cards.";

/// Render the full system prompt for one chat turn.
pub fn build_system_prompt(context: &ChatContextData) -> String {
    render(&context.collection_summary, &context.booster_summaries)
}

/// Render the system prompt from its two inputs.
pub fn render(summary: &CollectionSummary, boosters: &[BoosterSummary]) -> String {
    let mut s = String::new();

    s.push_str(INTRO);
    s.push_str("\n\n");

    s.push_str("CURRENT COLLECTION STATE:\n");
    let _ = writeln!(s, "- Total Cards: {}", summary.total_cards);
    let _ = writeln!(
        s,
        "- Owned: {} ({}% complete)",
        summary.owned_cards, summary.completion_percentage
    );
    let _ = writeln!(s, "- Wishlisted: {} cards", summary.wishlisted_cards);

    section(&mut s, "BY RARITY (owned/total, wishlisted):", &wishlist_line(&summary.by_rarity));
    section(&mut s, "BY TYPE (owned/total, wishlisted):", &wishlist_line(&summary.by_type));
    section(&mut s, "BY CATEGORY (owned/total, wishlisted):", &wishlist_line(&summary.by_category));
    section(&mut s, "BY STAGE (owned/total):", &tally_line(&summary.by_stage));
    section(
        &mut s,
        "CARDS BY RARITY AND CATEGORY (for questions like \"how many Two Star Trainers\"):",
        &nested_lines(&summary.by_rarity_and_category),
    );
    section(
        &mut s,
        "CARDS BY RARITY AND TYPE (for questions like \"how many Crown Rare Fire Pokemon\"):",
        &nested_lines(&summary.by_rarity_and_type),
    );

    let booster_lines: Vec<String> = boosters.iter().map(booster_line).collect();
    section(&mut s, "BOOSTER PACK DETAILS:", &booster_lines.join("\n"));

    s.push_str(&guidelines());
    s.push('\n');
    s.push_str(&filter_grammar());
    s
}

fn section(s: &mut String, heading: &str, body: &str) {
    let _ = write!(s, "\n{}\n{}\n", heading, body);
}

fn wishlist_line(stats: &BTreeMap<String, WishlistTally>) -> String {
    stats
        .iter()
        .map(|(label, t)| format!("{}: {}/{} ({} wishlisted)", label, t.owned, t.total, t.wishlisted))
        .collect::<Vec<_>>()
        .join(", ")
}

fn tally_line(stats: &BTreeMap<String, Tally>) -> String {
    stats
        .iter()
        .map(|(label, t)| format!("{}: {}/{}", label, t.owned, t.total))
        .collect::<Vec<_>>()
        .join(", ")
}

fn nested_lines(stats: &BTreeMap<String, BTreeMap<String, Tally>>) -> String {
    stats
        .iter()
        .map(|(outer, inner)| format!("{}: {{ {} }}", outer, tally_line(inner)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- name (setName): owned/total (pct%) | Missing: n rarity, ...`
///
/// The missing clause is left out when nothing is missing.
pub fn booster_line(b: &BoosterSummary) -> String {
    let missing = b
        .missing_by_rarity
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(rarity, count)| format!("{} {}", count, rarity))
        .collect::<Vec<_>>()
        .join(", ");

    let mut line = format!(
        "- {} ({}): {}/{} ({}%)",
        b.name, b.set_name, b.owned_cards, b.total_cards, b.completion_percentage
    );
    if !missing.is_empty() {
        let _ = write!(line, " | Missing: {}", missing);
    }
    line
}

fn guidelines() -> String {
    let mut s = String::from("\nGUIDELINES:\n");
    s.push_str("- Be concise and helpful\n");
    s.push_str("- Use the cross-dimensional data above to answer specific questions like \"how many X rarity Y category/type cards\"\n");
    s.push_str("- When recommending which booster to open, consider:\n");
    s.push_str("  1. Completion percentage (prioritize boosters closer to completion for collectors)\n");
    s.push_str("  2. Missing rare cards (prioritize boosters with valuable missing cards)\n");
    s.push_str("  3. User's stated preferences if any\n");
    s.push_str("- Use the actual data provided - do not make up card names or statistics\n");
    let _ = writeln!(s, "- Rarity tiers from common to rare: {}", RARITY_ORDER.join(" < "));
    s.push_str("- Categories are: Pokemon, Trainer (includes Supporter items)\n");
    s.push_str("- If asked about specific card names not in the data, explain you have aggregate statistics only\n");
    s.push_str("- Format responses clearly with bullet points when listing multiple items\n");
    s.push_str("- Keep responses focused and actionable\n");
    s
}

fn quoted<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn filter_grammar() -> String {
    let mut s = String::from("SMART SEARCH FEATURE:\n");
    s.push_str("When the user asks to \"show\", \"find\", \"filter\", or \"search\" for cards, you can provide a filter action button.\n");
    s.push_str("Include a JSON block at the END of your response in this exact format:\n\n");
    s.push_str("```filter\n");
    s.push_str("{\"label\": \"View Fire Types\", \"filters\": {\"type\": \"Fire\", \"collectionFilter\": \"owned\"}}\n");
    s.push_str("```\n\n");

    s.push_str("Available filter options:\n");
    s.push_str("- search: string (card name search)\n");
    let _ = writeln!(s, "- rarity: {}", quoted(FilterRarity::ALL));
    let _ = writeln!(s, "- type: {}", quoted(EnergyType::ALL));
    let _ = writeln!(s, "- stage: {}", quoted(Stage::ALL));
    let _ = writeln!(s, "- collectionFilter: {}", quoted(CollectionFilter::ALL));
    s.push_str("\nIMPORTANT: Use exact rarity values. \"Crown\" (not \"Crown Rare\") for the rarest cards.\n\n");

    s.push_str("Examples:\n");
    s.push_str("- \"Show my water types\" → filters: {\"type\": \"Water\", \"collectionFilter\": \"owned\"}\n");
    s.push_str("- \"What Crown cards am I missing?\" → filters: {\"rarity\": \"Crown\", \"collectionFilter\": \"missing\"}\n");
    s.push_str("- \"Find Pikachu cards\" → filters: {\"search\": \"Pikachu\"}\n");
    s.push_str("- \"Show missing Fire Pokemon\" → filters: {\"type\": \"Fire\", \"collectionFilter\": \"missing\"}\n");
    s.push_str("- \"Show my shiny cards\" → filters: {\"rarity\": \"One Shiny\", \"collectionFilter\": \"owned\"}\n\n");
    s.push_str("Only include the filter block when the user explicitly wants to see/find/filter cards. For general questions about stats, just answer normally.");
    s
}
