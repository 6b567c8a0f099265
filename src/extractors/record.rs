// src/extractors/record.rs
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::extractors::detector::RosterType;

/// One roster slot. Skill slots fill in the order their fragments appear.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PlayerRecord {
    pub ctr: u32,
    pub position_name: Option<String>,
    pub primary_1: Option<String>,
    pub primary_2: Option<String>,
    pub secondary_1: Option<String>,
    pub secondary_2: Option<String>,
    pub star: bool,
}

impl PlayerRecord {
    pub fn new(ctr: u32) -> Self {
        Self {
            ctr,
            position_name: None,
            primary_1: None,
            primary_2: None,
            secondary_1: None,
            secondary_2: None,
            star: false,
        }
    }

    /// True once anything beyond the roster position has been recorded.
    pub fn has_content(&self) -> bool {
        self.position_name.is_some()
            || self.primary_1.is_some()
            || self.secondary_1.is_some()
            || self.star
    }
}

/// Dynamically named record keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey<'a> {
    Sideline(&'a str),
    Inducement(&'a str),
    Summary(&'a str),
}

impl fmt::Display for FieldKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Sideline(name) => write!(f, "Sideline - {}", name),
            FieldKey::Inducement(name) => write!(f, "Inducement - {}", name),
            FieldKey::Summary(name) => write!(f, "Summary - {}", name),
        }
    }
}

/// Everything read from one roster sheet.
///
/// Serializes as a flat map: `pdf_name`, `pdf_type`, `Race`, `Coach`, `Team`,
/// then the dynamic fields in the order they were first set, then `Players`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub pdf_name: String,
    pub pdf_type: RosterType,
    pub race: Option<String>,
    pub coach: Option<String>,
    pub team: Option<String>,
    fields: Vec<(String, String)>,
    pub players: Option<Vec<PlayerRecord>>,
}

impl TeamRecord {
    pub fn new(pdf_name: impl Into<String>, pdf_type: RosterType) -> Self {
        Self {
            pdf_name: pdf_name.into(),
            pdf_type,
            race: None,
            coach: None,
            team: None,
            fields: Vec::new(),
            players: None,
        }
    }

    /// Sets a dynamic field. A repeated key keeps its first position and takes the new value.
    pub fn set_field(&mut self, key: FieldKey<'_>, value: impl Into<String>) {
        let key = key.to_string();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "pdf_name" => Some(&self.pdf_name),
            "pdf_type" => Some(self.pdf_type.tag()),
            "Race" => self.race.as_deref(),
            "Coach" => self.coach.as_deref(),
            "Team" => self.team.as_deref(),
            _ => self
                .fields
                .iter()
                .find(|(existing, _)| existing == key)
                .map(|(_, value)| value.as_str()),
        }
    }

    pub fn dynamic_fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// All scalar fields in serialization order, skipping absent ones.
    pub fn scalar_fields(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = vec![
            ("pdf_name", self.pdf_name.as_str()),
            ("pdf_type", self.pdf_type.tag()),
        ];
        let fixed = [("Race", &self.race), ("Coach", &self.coach), ("Team", &self.team)];
        out.extend(fixed.into_iter().filter_map(|(k, v)| v.as_deref().map(|v| (k, v))));
        out.extend(self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        out
    }

    pub fn players(&self) -> &[PlayerRecord] {
        self.players.as_deref().unwrap_or(&[])
    }
}

/// Appends to a space-joined text field.
pub fn append_text(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(text);
        }
        None => *slot = Some(text.to_string()),
    }
}

impl Serialize for TeamRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.scalar_fields() {
            map.serialize_entry(key, value)?;
        }
        if let Some(players) = &self.players {
            map.serialize_entry("Players", players)?;
        }
        map.end()
    }
}
