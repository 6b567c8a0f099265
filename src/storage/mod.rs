// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::record::TeamRecord;
use crate::source::LoadedDocument;
use crate::utils::error::StorageError;

const TEAMS_TABLE: &str = "teams.csv";
const PLAYERS_TABLE: &str = "players.csv";
const PLAYER_COLUMNS: [&str; 9] = [
    "pdf_name",
    "Team",
    "ctr",
    "position_name",
    "primary_1",
    "primary_2",
    "secondary_1",
    "secondary_2",
    "star",
];

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the team record as pretty JSON, named after the source document
    pub fn save_record(&self, record: &TeamRecord) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.json", file_stem(&record.pdf_name)));

        let body = serde_json::to_string_pretty(record)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, body).map_err(StorageError::IoError)?;

        tracing::info!("Saved record to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the extraction in JSON format
    pub fn save_record_metadata(&self, record: &TeamRecord) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", file_stem(&record.pdf_name)));

        let metadata = serde_json::json!({
            "pdf_name": record.pdf_name,
            "pdf_type": record.pdf_type,
            "team": record.team,
            "field_count": record.dynamic_fields().len(),
            "player_count": record.players().len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// Writes `teams.csv` (one row per team) and `players.csv` (one row per player).
    pub fn save_tables(&self, records: &[TeamRecord]) -> Result<(PathBuf, PathBuf), StorageError> {
        let teams_path = self.base_dir.join(TEAMS_TABLE);
        let mut writer = csv::Writer::from_path(&teams_path)?;
        let (header, rows) = team_rows(records);
        writer.write_record(&header)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        tracing::info!("Saved {} teams to {}", records.len(), teams_path.display());

        let players_path = self.base_dir.join(PLAYERS_TABLE);
        let mut writer = csv::Writer::from_path(&players_path)?;
        writer.write_record(PLAYER_COLUMNS)?;
        let mut player_count = 0;
        for row in player_rows(records) {
            writer.write_record(&row)?;
            player_count += 1;
        }
        writer.flush()?;
        tracing::info!("Saved {} players to {}", player_count, players_path.display());

        Ok((teams_path, players_path))
    }

    /// Dumps the fragment stream as `page | color | text` lines for inspecting a sheet's layout.
    pub fn save_fragment_trace(&self, document: &LoadedDocument) -> Result<PathBuf, StorageError> {
        let debug_dir = self.base_dir.join("debug");
        if !debug_dir.exists() {
            fs::create_dir_all(&debug_dir).map_err(StorageError::IoError)?;
        }
        let file_path = debug_dir.join(format!("{}.fragments.txt", file_stem(&document.pdf_name)));

        let mut trace = String::new();
        for (page_number, page) in document.pages.iter().enumerate() {
            for fragment in &page.fragments {
                trace.push_str(&format!("{} | {} | {:?}\n", page_number + 1, fragment.color, fragment.text));
            }
        }
        fs::write(&file_path, trace).map_err(StorageError::IoError)?;

        tracing::info!("Saved fragment trace to {}", file_path.display());
        Ok(file_path)
    }
}

fn file_stem(pdf_name: &str) -> &str {
    Path::new(pdf_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(pdf_name)
}

/// Header is the union of all scalar keys in first-seen order; missing cells stay blank.
fn team_rows(records: &[TeamRecord]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header: Vec<String> = Vec::new();
    for record in records {
        for (key, _) in record.scalar_fields() {
            if !header.iter().any(|existing| existing == key) {
                header.push(key.to_string());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            header
                .iter()
                .map(|key| record.field(key).unwrap_or_default().to_string())
                .collect()
        })
        .collect();

    (header, rows)
}

fn player_rows(records: &[TeamRecord]) -> impl Iterator<Item = Vec<String>> + '_ {
    records.iter().flat_map(|record| {
        let team = record.team.clone().unwrap_or_default();
        record.players().iter().map(move |player| {
            vec![
                record.pdf_name.clone(),
                team.clone(),
                player.ctr.to_string(),
                player.position_name.clone().unwrap_or_default(),
                player.primary_1.clone().unwrap_or_default(),
                player.primary_2.clone().unwrap_or_default(),
                player.secondary_1.clone().unwrap_or_default(),
                player.secondary_2.clone().unwrap_or_default(),
                player.star.to_string(),
            ]
        })
    })
}
