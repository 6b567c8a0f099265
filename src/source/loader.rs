// src/source/loader.rs
use std::path::{Path, PathBuf};

use crate::source::models::{LoadedDocument, Page, RawPage};
use crate::utils::error::SourceError;

const SPAN_DUMP_EXTENSION: &str = "json";

/// Loads a span dump from disk. Page and fragment order is kept exactly as stored.
pub async fn load_document(path: &Path) -> Result<LoadedDocument, SourceError> {
    let path_str = path.display().to_string();
    tracing::info!("Loading document from: {}", path_str);

    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io { path: path_str.clone(), source })?;

    let document = parse_document(&path_str, &body)?;
    tracing::debug!(
        "Loaded {} pages ({} fragments) from {}",
        document.pages.len(),
        document.fragments().count(),
        path_str
    );

    Ok(document)
}

/// Parses the JSON body of a span dump: an array of pages.
pub fn parse_document(full_path: &str, body: &str) -> Result<LoadedDocument, SourceError> {
    let raw_pages: Vec<RawPage> = serde_json::from_str(body)
        .map_err(|source| SourceError::Parse { path: full_path.to_string(), source })?;

    if raw_pages.is_empty() {
        return Err(SourceError::Empty(full_path.to_string()));
    }

    let pages = raw_pages.into_iter().map(Page::from).collect();
    Ok(LoadedDocument::new(full_path, pages))
}

/// Expands directory arguments into the span dumps they contain (sorted); files pass through.
pub async fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, SourceError> {
    let mut inputs = Vec::new();

    for path in paths {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| SourceError::Io { path: path.display().to_string(), source })?;

        if !metadata.is_dir() {
            inputs.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        let mut entries = tokio::fs::read_dir(path)
            .await
            .map_err(|source| SourceError::Io { path: path.display().to_string(), source })?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| SourceError::Io { path: path.display().to_string(), source })?
        {
            let entry_path = entry.path();
            let is_dump = entry_path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SPAN_DUMP_EXTENSION));
            if is_dump && entry_path.is_file() {
                found.push(entry_path);
            }
        }
        found.sort();
        tracing::debug!("Found {} span dumps in {}", found.len(), path.display());
        inputs.extend(found);
    }

    Ok(inputs)
}
