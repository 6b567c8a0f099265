// src/extractors/mod.rs
pub mod detector;
pub mod keywords;
pub mod record;
pub mod roster;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use detector::{detect_roster_type, RosterType, SummarySchema};
#[allow(unused_imports)]
pub use record::{PlayerRecord, TeamRecord};
#[allow(unused_imports)]
pub use roster::{ExtractionState, RosterExtractor, Section, SkillColor};
