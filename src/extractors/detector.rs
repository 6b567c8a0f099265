// src/extractors/detector.rs
use std::fmt;

use serde::Serialize;

use crate::extractors::keywords;
use crate::source::LoadedDocument;
use crate::utils::error::ExtractError;

/// Layout variants of the roster sheet. They only differ in the SUMMARY block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RosterType {
    #[serde(rename = "bbtc_pl_2025_matched_played")]
    MatchedPlayed,
    #[serde(rename = "bbtc_pl_2025")]
    Standard,
    #[serde(rename = "bbtc_pl_eurobowl_2025")]
    Eurobowl,
}

/// How the SUMMARY block of a roster type is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySchema {
    /// Alternating label/value slots; labels sit in the `Some` slots.
    Paired(&'static [Option<&'static str>]),
    /// A single "<option>: <description>" line.
    OptionLine,
}

impl RosterType {
    pub fn tag(self) -> &'static str {
        match self {
            RosterType::MatchedPlayed => "bbtc_pl_2025_matched_played",
            RosterType::Standard => "bbtc_pl_2025",
            RosterType::Eurobowl => "bbtc_pl_eurobowl_2025",
        }
    }

    pub fn summary_schema(self) -> SummarySchema {
        match self {
            RosterType::MatchedPlayed => SummarySchema::Paired(&keywords::MATCHED_PLAYED_SUMMARY),
            RosterType::Standard => SummarySchema::Paired(&keywords::STANDARD_SUMMARY),
            RosterType::Eurobowl => SummarySchema::OptionLine,
        }
    }

    /// Classifies a fragment seen inside the SUMMARY block.
    fn from_summary_label(text: &str) -> Option<Self> {
        if text == keywords::MATCHED_PLAYED_MARKER {
            Some(RosterType::MatchedPlayed)
        } else if text == keywords::STANDARD_MARKER {
            Some(RosterType::Standard)
        } else if text.contains(keywords::EUROBOWL_MARKER) {
            Some(RosterType::Eurobowl)
        } else {
            None
        }
    }
}

impl fmt::Display for RosterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Finds the first distinguishing label after a SUMMARY marker.
/// The summary flag does not carry over between pages.
pub fn detect_roster_type(document: &LoadedDocument) -> Result<RosterType, ExtractError> {
    for (page_number, page) in document.pages.iter().enumerate() {
        let mut started_summary = false;

        for fragment in &page.fragments {
            if fragment.text == keywords::SUMMARY {
                started_summary = true;
            } else if started_summary {
                tracing::trace!("Summary candidate on page {}: '{}'", page_number + 1, fragment.text);
                if let Some(roster_type) = RosterType::from_summary_label(&fragment.text) {
                    tracing::info!(
                        "Detected roster type {} for {} on page {}",
                        roster_type,
                        document.pdf_name,
                        page_number + 1
                    );
                    return Ok(roster_type);
                }
            }
        }
    }

    tracing::warn!("No roster type marker found in {}", document.full_path);
    Err(ExtractError::RosterTypeUnrecognized { document: document.full_path.clone() })
}
