// src/extractors/roster.rs

// --- Imports ---
use std::fmt;

use crate::extractors::detector::{detect_roster_type, RosterType, SummarySchema};
use crate::extractors::keywords;
use crate::extractors::record::{append_text, FieldKey, PlayerRecord, TeamRecord};
use crate::source::{Fragment, LoadedDocument};
use crate::utils::error::ExtractError;

// --- Data Structures ---

/// Region of the roster sheet the next fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Race,
    Coach,
    Team,
    Sideline,
    Inducements,
    Summary,
    Players,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Race => "Race",
            Section::Coach => "Coach",
            Section::Team => "Team",
            Section::Sideline => "Sideline",
            Section::Inducements => "Inducements",
            Section::Summary => "Summary",
            Section::Players => "Players",
        };
        f.write_str(name)
    }
}

/// Skill class, resolved from a fragment's rendering color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillColor {
    Primary,
    Secondary,
    Other,
}

impl SkillColor {
    pub fn from_rgb(color: u32) -> Self {
        match color {
            keywords::PRIMARY_SKILL_RGB => SkillColor::Primary,
            keywords::SECONDARY_SKILL_RGB => SkillColor::Secondary,
            _ => SkillColor::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerProperty {
    Name,
    Skills,
}

/// Position inside the player listing, which only exists once `COST` was seen.
#[derive(Debug, Clone)]
struct RosterCursor {
    player_ctr: u32,
    next_property: PlayerProperty,
    current: PlayerRecord,
}

impl RosterCursor {
    fn start() -> Self {
        Self {
            player_ctr: 1,
            next_property: PlayerProperty::Name,
            current: PlayerRecord::new(1),
        }
    }

    /// Hands back the finished player and opens the next one.
    fn advance(&mut self) -> PlayerRecord {
        self.player_ctr += 1;
        self.next_property = PlayerProperty::Name;
        std::mem::replace(&mut self.current, PlayerRecord::new(self.player_ctr))
    }
}

/// Everything the section machine remembers between fragments of one document.
#[derive(Debug, Clone)]
pub struct ExtractionState {
    document: String,
    schema: SummarySchema,
    section: Section,
    sideline_ctr: usize,
    next_inducement_name: Option<String>,
    /// `None` until the SUMMARY marker itself is seen.
    summary_ctr: Option<usize>,
    roster: Option<RosterCursor>,
}

impl ExtractionState {
    pub fn new(document: impl Into<String>, roster_type: RosterType) -> Self {
        Self {
            document: document.into(),
            schema: roster_type.summary_schema(),
            section: Section::Race,
            sideline_ctr: 0,
            next_inducement_name: None,
            summary_ctr: None,
            roster: None,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Feeds one fragment through the global markers, then the current section.
    pub fn step(&mut self, record: &mut TeamRecord, fragment: &Fragment) -> Result<(), ExtractError> {
        tracing::trace!("[{}] '{}' color {}", self.section, fragment.text, fragment.color);
        self.apply_section_markers(&fragment.text);

        match self.section {
            Section::Race => self.step_race(record, &fragment.text),
            Section::Coach => self.step_coach(record, &fragment.text),
            Section::Team => self.step_team(record, &fragment.text),
            Section::Sideline => self.step_sideline(record, &fragment.text),
            Section::Inducements => self.step_inducements(record, &fragment.text),
            Section::Summary => return self.step_summary(record, fragment),
            Section::Players => return self.step_players(record, fragment),
        }
        Ok(())
    }

    /// Called once the fragment stream is exhausted.
    pub fn finish(self, record: &TeamRecord) {
        // The last player is closed by its own cost marker; whatever is open here was never printed in full.
        if let Some(cursor) = self.roster {
            if cursor.current.has_content() {
                tracing::debug!(
                    "Dropping unfinished player {} ({:?}) at end of {}",
                    cursor.current.ctr,
                    cursor.current.position_name,
                    record.pdf_name
                );
            }
        }
        if let Some(name) = self.next_inducement_name {
            tracing::debug!("Dropping inducement '{}' without a value in {}", name, record.pdf_name);
        }
    }

    fn enter(&mut self, section: Section) {
        if self.section != section {
            tracing::debug!("{}: {} -> {}", self.document, self.section, section);
        }
        self.section = section;
    }

    fn apply_section_markers(&mut self, text: &str) {
        match text {
            keywords::SIDELINE => self.enter_sideline(),
            keywords::INDUCEMENTS => self.enter_inducements(),
            keywords::SUMMARY => self.enter_summary(),
            _ => {}
        }
    }

    fn enter_sideline(&mut self) {
        self.enter(Section::Sideline);
        self.sideline_ctr = 0;
    }

    fn enter_inducements(&mut self) {
        self.enter(Section::Inducements);
        self.next_inducement_name = None;
    }

    fn enter_summary(&mut self) {
        self.enter(Section::Summary);
        self.summary_ctr = None;
    }

    fn enter_players(&mut self) {
        self.enter(Section::Players);
        self.roster = None;
    }

    fn violation(&self, fragment: &Fragment, detail: impl Into<String>) -> ExtractError {
        ExtractError::SchemaViolation {
            document: self.document.clone(),
            section: self.section.to_string(),
            fragment: fragment.text.clone(),
            detail: detail.into(),
        }
    }

    // --- Sections ---

    fn step_race(&mut self, record: &mut TeamRecord, text: &str) {
        if text == keywords::COACH_NAME {
            self.enter(Section::Coach);
            return;
        }
        append_text(&mut record.race, text);
    }

    fn step_coach(&mut self, record: &mut TeamRecord, text: &str) {
        record.coach = Some(text.to_string());
        self.enter(Section::Team);
    }

    fn step_team(&mut self, record: &mut TeamRecord, text: &str) {
        match text {
            keywords::TEAM_NAME => {}
            keywords::SIDELINE => self.enter_sideline(),
            _ => append_text(&mut record.team, text),
        }
    }

    fn step_sideline(&mut self, record: &mut TeamRecord, text: &str) {
        let properties = &keywords::SIDELINE_PROPERTIES;
        if self.sideline_ctr >= properties.len() {
            self.enter_inducements();
            return;
        }
        if text == keywords::SIDELINE {
            return;
        }
        if properties.contains(&text) {
            // A sheet without an apothecary starts straight at the next label
            if self.sideline_ctr == 0 && text != properties[0] {
                tracing::debug!("{}: no {} line, skipping ahead", self.document, properties[0]);
                self.sideline_ctr += 1;
            }
            return;
        }
        record.set_field(FieldKey::Sideline(properties[self.sideline_ctr]), text);
        self.sideline_ctr += 1;
    }

    fn step_inducements(&mut self, record: &mut TeamRecord, text: &str) {
        if keywords::INDUCEMENTS_END.contains(&text) {
            if let Some(name) = self.next_inducement_name.take() {
                tracing::debug!("{}: inducement '{}' has no value", self.document, name);
            }
            self.enter_summary();
            return;
        }
        if text == keywords::INDUCEMENTS {
            return;
        }
        match self.next_inducement_name.take() {
            None => self.next_inducement_name = Some(text.to_string()),
            Some(name) => record.set_field(FieldKey::Inducement(&name), text),
        }
    }

    fn step_summary(&mut self, record: &mut TeamRecord, fragment: &Fragment) -> Result<(), ExtractError> {
        if let SummarySchema::Paired(slots) = self.schema {
            if self.summary_ctr == Some(slots.len()) {
                self.enter_players();
                return Ok(());
            }
        }

        let text = fragment.text.as_str();
        if text == keywords::SUMMARY {
            self.summary_ctr = Some(0);
            return Ok(());
        }
        let Some(ctr) = self.summary_ctr else {
            return Ok(());
        };

        match self.schema {
            SummarySchema::OptionLine => {
                if ctr != 0 {
                    return Err(self.violation(fragment, "option summary has a single field"));
                }
                let option = text
                    .split(keywords::EUROBOWL_OPTION_SEPARATOR)
                    .next()
                    .unwrap_or(text);
                record.set_field(FieldKey::Summary(keywords::EUROBOWL_OPTION_FIELD), option);
                self.enter_players();
            }
            SummarySchema::Paired(slots) => {
                // Labels sit on even slots, their values right after
                if ctr % 2 == 1 {
                    if let Some(label) = slots[ctr - 1] {
                        record.set_field(FieldKey::Summary(label), text);
                    }
                }
                self.summary_ctr = Some(ctr + 1);
            }
        }
        Ok(())
    }

    fn step_players(&mut self, record: &mut TeamRecord, fragment: &Fragment) -> Result<(), ExtractError> {
        let text = fragment.text.as_str();
        if text == keywords::COST {
            record.players = Some(Vec::new());
            self.roster = Some(RosterCursor::start());
            return Ok(());
        }

        let Some(cursor) = self.roster.as_mut() else {
            return Ok(());
        };

        if keywords::is_cost_marker(text) {
            let finished = cursor.advance();
            tracing::debug!("{}: player {} {:?} finished", self.document, finished.ctr, finished.position_name);
            record.players.get_or_insert_with(Vec::new).push(finished);
        } else {
            match cursor.next_property {
                PlayerProperty::Name => {
                    // First token is the roster number
                    let position: Vec<&str> = text.split_whitespace().skip(1).collect();
                    cursor.current.position_name = Some(position.join(" "));
                    cursor.next_property = PlayerProperty::Skills;
                }
                PlayerProperty::Skills => {
                    let skill = text.trim().trim_matches(',');
                    let filled = match SkillColor::from_rgb(fragment.color) {
                        SkillColor::Primary => fill_skill_pair(
                            &mut cursor.current.primary_1,
                            &mut cursor.current.primary_2,
                            skill,
                        ),
                        SkillColor::Secondary => fill_skill_pair(
                            &mut cursor.current.secondary_1,
                            &mut cursor.current.secondary_2,
                            skill,
                        ),
                        SkillColor::Other => true,
                    };
                    if !filled {
                        let ctr = cursor.current.ctr;
                        return Err(self.violation(
                            fragment,
                            format!("unexpected skill for player {} (color {})", ctr, fragment.color),
                        ));
                    }
                }
            }
        }

        if text == keywords::SPECIAL_SKILL {
            if let Some(cursor) = self.roster.as_mut() {
                cursor.current.star = true;
            }
        }
        Ok(())
    }
}

/// Fills the first empty slot. Returns false when both are already taken.
fn fill_skill_pair(first: &mut Option<String>, second: &mut Option<String>, skill: &str) -> bool {
    if first.is_none() {
        *first = Some(skill.to_string());
    } else if second.is_none() {
        *second = Some(skill.to_string());
    } else {
        return false;
    }
    true
}

// --- Main Extractor Structure ---
pub struct RosterExtractor;

impl RosterExtractor {
    pub fn new() -> Self { Self {} }

    /// Detects the roster type, then extracts the record.
    pub fn process(&self, document: &LoadedDocument) -> Result<TeamRecord, ExtractError> {
        let roster_type = detect_roster_type(document)?;
        self.extract(document, roster_type)
    }

    /// Runs the section machine over every fragment of the document.
    pub fn extract(&self, document: &LoadedDocument, roster_type: RosterType) -> Result<TeamRecord, ExtractError> {
        tracing::info!("Extracting {} as {}", document.pdf_name, roster_type);

        let mut record = TeamRecord::new(document.pdf_name.clone(), roster_type);
        let mut state = ExtractionState::new(document.full_path.clone(), roster_type);

        for fragment in document.fragments() {
            state.step(&mut record, fragment)?;
        }

        if state.section() != Section::Players {
            tracing::warn!("{} ended in the {} section", document.pdf_name, state.section());
        }
        state.finish(&record);

        tracing::info!(
            "Extracted {} for {}: {} fields, {} players",
            record.team.as_deref().unwrap_or("<unnamed team>"),
            document.pdf_name,
            record.dynamic_fields().len(),
            record.players().len()
        );
        Ok(record)
    }
}
