// src/extractors/keywords.rs
//
// Every literal the roster sheets are navigated by. The extractor keys its
// section transitions on exact fragment text, so any wording change in the
// sheet templates has to be reflected here.

use once_cell::sync::Lazy;
use regex::Regex;

// --- Section markers ---
pub const SIDELINE: &str = "SIDELINE";
pub const INDUCEMENTS: &str = "INDUCEMENTS";
pub const SUMMARY: &str = "SUMMARY";
pub const COACH_NAME: &str = "COACH NAME";
pub const TEAM_NAME: &str = "TEAM NAME";
pub const COST: &str = "COST";

/// Fragments that close the inducement list.
pub const INDUCEMENTS_END: [&str; 3] = [SUMMARY, "No inducements", "LEAGUES & SPECIAL"];

/// Sideline purchases in the order they are printed.
pub const SIDELINE_PROPERTIES: [&str; 5] = [
    "Apothecary",
    "Assistant coaches",
    "Cheerleaders",
    "Dedicated fans",
    "Re-rolls",
];

// --- Roster type markers (first match inside the SUMMARY block wins) ---
pub const MATCHED_PLAYED_MARKER: &str = "Skill Points";
pub const STANDARD_MARKER: &str = "Players cost";
pub const EUROBOWL_MARKER: &str = "Option:";

/// Separator between the chosen option and its description on Eurobowl sheets.
pub const EUROBOWL_OPTION_SEPARATOR: &str = ": ";
pub const EUROBOWL_OPTION_FIELD: &str = "Option";

// --- Summary schemas: `None` slots are the values following each label ---
pub const MATCHED_PLAYED_SUMMARY: [Option<&str>; 6] = [
    Some("Skill Points"),
    None,
    Some("Secondary skills"),
    None,
    Some("Star players"),
    None,
];

pub const STANDARD_SUMMARY: [Option<&str>; 12] = [
    Some("Players cost"),
    None,
    Some("Skills cost"),
    None,
    Some("Inducement cost"),
    None,
    Some("Sideline cost"),
    None,
    Some("Primary skills"),
    None,
    Some("Secondary skills"),
    None,
];

// --- Players ---
pub const SPECIAL_SKILL: &str = "Special skill: ";

/// Rendering color of primary skills.
pub const PRIMARY_SKILL_RGB: u32 = 681912;
/// Rendering color of secondary skills.
pub const SECONDARY_SKILL_RGB: u32 = 4822027;

/// Player cost, e.g. `50k`. Closes the player printed before it.
pub static COST_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\b\d+k\b$").expect("Failed to compile COST_MARKER_RE")
});

pub fn is_cost_marker(text: &str) -> bool {
    COST_MARKER_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_marker_requires_whole_token() {
        assert!(is_cost_marker("50k"));
        assert!(is_cost_marker("1150k"));
        assert!(!is_cost_marker("k"));
        assert!(!is_cost_marker("50K"));
        assert!(!is_cost_marker("50k "));
        assert!(!is_cost_marker("cost 50k"));
        assert!(!is_cost_marker("50kk"));
    }

    #[test]
    fn summary_schemas_alternate_label_and_value() {
        for schema in [&MATCHED_PLAYED_SUMMARY[..], &STANDARD_SUMMARY[..]] {
            assert_eq!(schema.len() % 2, 0);
            for (i, slot) in schema.iter().enumerate() {
                assert_eq!(slot.is_some(), i % 2 == 0, "slot {i}");
            }
        }
    }

    #[test]
    fn type_markers_are_the_first_summary_labels() {
        assert_eq!(MATCHED_PLAYED_SUMMARY[0], Some(MATCHED_PLAYED_MARKER));
        assert_eq!(STANDARD_SUMMARY[0], Some(STANDARD_MARKER));
    }
}
