// src/source/models.rs
use serde::Deserialize;

/// A single text run as it appears on the page, with its sRGB fill color.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub color: u32,
}

impl Fragment {
    pub fn new(text: impl Into<String>, color: u32) -> Self {
        Self { text: text.into(), color }
    }
}

/// Fragments of one page, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub fragments: Vec<Fragment>,
}

/// A roster sheet ready for detection and extraction.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub full_path: String,
    pub pdf_name: String,
    pub pages: Vec<Page>,
}

impl LoadedDocument {
    pub fn new(full_path: impl Into<String>, pages: Vec<Page>) -> Self {
        let full_path = full_path.into();
        let pdf_name = document_name(&full_path);
        Self { full_path, pdf_name, pages }
    }

    /// Every fragment of every page, in document order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> + '_ {
        self.pages.iter().flat_map(|page| page.fragments.iter())
    }
}

/// Final path component; sheets are often collected on Windows, so both separators count.
fn document_name(full_path: &str) -> String {
    full_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(full_path)
        .to_string()
}

// --- Raw span dump shapes ---
// A page is either the block/line/span tree emitted by PDF text extractors
// or a flat list of fragments.

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPage {
    Blocks { blocks: Vec<RawBlock> },
    Flat(Vec<Fragment>),
}

#[derive(Debug, Deserialize)]
pub struct RawBlock {
    // Image blocks carry no lines
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

#[derive(Debug, Deserialize)]
pub struct RawLine {
    #[serde(default)]
    pub spans: Vec<Fragment>,
}

impl From<RawPage> for Page {
    fn from(raw: RawPage) -> Self {
        let fragments = match raw {
            RawPage::Blocks { blocks } => blocks
                .into_iter()
                .flat_map(|block| block.lines)
                .flat_map(|line| line.spans)
                .collect(),
            RawPage::Flat(fragments) => fragments,
        };
        Page { fragments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_name_is_last_path_component() {
        let doc = LoadedDocument::new(r"C:\rosters\2025\orcs.pdf", vec![]);
        assert_eq!(doc.pdf_name, "orcs.pdf");
        let doc = LoadedDocument::new("/tmp/rosters/elves.json", vec![]);
        assert_eq!(doc.pdf_name, "elves.json");
        let doc = LoadedDocument::new("bare.json", vec![]);
        assert_eq!(doc.pdf_name, "bare.json");
    }

    #[test]
    fn fragments_span_pages_in_order() {
        let doc = LoadedDocument::new(
            "doc.json",
            vec![
                Page { fragments: vec![Fragment::new("a", 0), Fragment::new("b", 0)] },
                Page::default(),
                Page { fragments: vec![Fragment::new("c", 1)] },
            ],
        );
        let texts: Vec<&str> = doc.fragments().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn block_tree_skips_image_blocks_and_extra_span_fields() {
        let json = r#"{
            "width": 595.0,
            "blocks": [
                {"type": 1, "bbox": [0, 0, 10, 10]},
                {"type": 0, "lines": [
                    {"spans": [
                        {"text": "SUMMARY", "color": 0, "size": 9.5, "font": "Arial"},
                        {"text": "Players cost", "color": 0}
                    ]},
                    {"spans": [{"text": "1000k", "color": 16777215}]}
                ]}
            ]
        }"#;
        let raw: RawPage = serde_json::from_str(json).unwrap();
        let page = Page::from(raw);
        let texts: Vec<&str> = page.fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["SUMMARY", "Players cost", "1000k"]);
        assert_eq!(page.fragments[2].color, 16777215);
    }

    #[test]
    fn flat_page_is_accepted() {
        let raw: RawPage = serde_json::from_str(r#"[{"text": "COST", "color": 0}]"#).unwrap();
        assert_eq!(Page::from(raw).fragments, vec![Fragment::new("COST", 0)]);
    }
}
