/// Session journal
///
/// Every operation that changes the collection or the flags is recorded with
/// a sequence number, a local timestamp, the action and a short detail. The
/// journal can be exported as plain text or JSON.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ViewerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// 1-based
    pub sequence: usize,
    pub timestamp: DateTime<Local>,
    pub action: String,
    pub detail: String,
}

impl JournalEntry {
    pub fn to_text(&self) -> String {
        format!(
            "[{:03}] {} | {} | {}",
            self.sequence,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.action,
            self.detail
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub session_id: String,
    pub session_start: DateTime<Local>,
    /// Display name of the collection loaded last
    pub collection: String,
    pub software_version: String,
    pub entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_start: Local::now(),
            collection: String::new(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: Vec::new(),
        }
    }

    pub fn set_collection(&mut self, name: &str) {
        self.collection = name.to_string();
    }

    pub fn record(&mut self, action: &str, detail: &str) {
        let seq = self.entries.len() + 1;
        self.entries.push(JournalEntry {
            sequence: seq,
            timestamp: Local::now(),
            action: action.to_string(),
            detail: detail.to_string(),
        });
        log::info!("[{:03}] {}: {}", seq, action, detail);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Spectral Viewer session journal\n");
        out.push_str(&format!("Session:    {}\n", self.session_id));
        out.push_str(&format!(
            "Started:    {}\n",
            self.session_start.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("Collection: {}\n", self.collection));
        out.push_str(&format!("Software:   v{}\n", self.software_version));
        out.push_str(&format!("Operations: {}\n\n", self.entries.len()));
        for entry in &self.entries {
            out.push_str(&entry.to_text());
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn save_text(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text()).map_err(|e| ViewerError::io(path, e))
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()).map_err(|e| ViewerError::io(path, e))
    }

    /// Save as JSON for a `.json` path, as text otherwise
    pub fn save(&self, path: &Path) -> Result<()> {
        let is_json = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            self.save_json(path)
        } else {
            self.save_text(path)
        }
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_sequenced() {
        let mut j = Journal::new();
        assert!(j.is_empty());
        j.record("Flag", "a");
        j.record("Unflag all", "1 flag cleared");
        assert_eq!(j.len(), 2);
        assert_eq!(j.entries[0].sequence, 1);
        assert_eq!(j.entries[1].action, "Unflag all");
    }

    #[test]
    fn test_text_export() {
        let mut j = Journal::new();
        j.set_collection("field_2024");
        j.record("Stitch", "12 spectra");
        let text = j.to_text();
        assert!(text.contains("field_2024"));
        assert!(text.contains("[001]"));
        assert!(text.contains("Stitch | 12 spectra"));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut j = Journal::new();
        j.record("Jump correct", "splices [1000, 1800]");
        let parsed: Journal = serde_json::from_str(&j.to_json()).unwrap();
        assert_eq!(parsed.session_id, j.session_id);
        assert_eq!(parsed.entries.len(), 1);
    }

    #[test]
    fn test_save_picks_format_by_extension() {
        let dir = std::env::temp_dir().join(format!("spectral_viewer_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut j = Journal::new();
        j.record("Load", "3 spectra");

        j.save(&dir.join("journal.JSON")).unwrap();
        let json = std::fs::read_to_string(dir.join("journal.JSON")).unwrap();
        assert!(json.trim_start().starts_with('{'));

        j.save(&dir.join("journal.txt")).unwrap();
        let text = std::fs::read_to_string(dir.join("journal.txt")).unwrap();
        assert!(text.starts_with("Spectral Viewer session journal"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
