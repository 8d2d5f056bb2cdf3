/// Flag store: flagged curve names plus the file they are saved to

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewerError};

/// Set of flagged names, always a subset of the current collection
#[derive(Debug, Clone)]
pub struct FlagStore {
    flagged: BTreeSet<String>,
    members: HashSet<String>,
    path: PathBuf,
    extension: String,
}

impl FlagStore {
    pub fn new(path: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            flagged: BTreeSet::new(),
            members: HashSet::new(),
            path: path.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Replace the membership and drop flags for names that left it.
    ///
    /// Returns the number of pruned flags.
    pub fn set_members<I>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        self.members = names.into_iter().collect();
        let before = self.flagged.len();
        let members = &self.members;
        self.flagged.retain(|n| members.contains(n));
        before - self.flagged.len()
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Flag a member. Returns true if the flag was newly set.
    pub fn flag(&mut self, name: &str) -> bool {
        self.is_member(name) && self.flagged.insert(name.to_string())
    }

    pub fn unflag(&mut self, name: &str) -> bool {
        self.flagged.remove(name)
    }

    /// Flip the flag of a member; `None` for names outside the collection
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        if !self.is_member(name) {
            return None;
        }
        if self.flagged.remove(name) {
            Some(false)
        } else {
            self.flagged.insert(name.to_string());
            Some(true)
        }
    }

    /// Clear every flag, returning how many were set
    pub fn unflag_all(&mut self) -> usize {
        let n = self.flagged.len();
        self.flagged.clear();
        n
    }

    pub fn is_flagged(&self, name: &str) -> bool {
        self.flagged.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flagged.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Change the save target without writing.
    ///
    /// A file name without an extension gets the default one appended.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        let mut path = path.into();
        if path.extension().is_none() {
            path.set_extension(&self.extension);
        }
        log::info!("Flag file set to {}", path.display());
        self.path = path;
    }

    /// Write the flagged names, one per line, overwriting the target
    pub fn save(&self) -> Result<usize> {
        let mut out = String::new();
        for name in &self.flagged {
            out.push_str(name);
            out.push('\n');
        }
        std::fs::write(&self.path, out).map_err(|e| ViewerError::io(&self.path, e))?;
        log::info!("Saved {} flags to {}", self.flagged.len(), self.path.display());
        Ok(self.flagged.len())
    }

    /// Names listed in a flag file, blank lines ignored
    pub fn read_file(path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path).map_err(|e| ViewerError::io(path, e))?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Flag every member listed in `path`.
    ///
    /// Returns (newly flagged, names that are not members).
    pub fn load(&mut self, path: &Path) -> Result<(usize, usize)> {
        let mut added = 0;
        let mut unknown = 0;
        for name in Self::read_file(path)? {
            if !self.is_member(&name) {
                unknown += 1;
            } else if self.flag(&name) {
                added += 1;
            }
        }
        Ok((added, unknown))
    }
}
