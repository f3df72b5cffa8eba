// ── Local allow/block URL pattern lists ──
//
// Newline-delimited pattern files read from a known relative directory.
// A missing file is tolerated (empty list with a warning, because pushing
// an empty list clears any existing patterns on the appliance); a pattern
// appearing in both lists is a conflict the caller must treat as fatal
// before any mutation is sent.

use std::path::Path;

use tracing::warn;

pub const ALLOWLIST_FILE: &str = "allowlist.txt";
pub const BLOCKLIST_FILE: &str = "blocklist.txt";

/// Allow and block URL pattern lists for content filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterLists {
    pub allow: Vec<String>,
    pub block: Vec<String>,
}

impl FilterLists {
    /// Load both lists from `dir`, substituting empty lists for files
    /// that cannot be read.
    pub fn load(dir: &Path) -> Self {
        Self {
            allow: read_list(&dir.join(ALLOWLIST_FILE), "allow"),
            block: read_list(&dir.join(BLOCKLIST_FILE), "block"),
        }
    }

    /// Patterns present in both lists, in allow-list order.
    pub fn overlap(&self) -> Vec<String> {
        self.allow
            .iter()
            .filter(|entry| self.block.contains(entry))
            .cloned()
            .collect()
    }
}

fn read_list(path: &Path, which: &str) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect(),
        Err(err) => {
            warn!(
                "{which} list {} not readable ({err}); using an empty list, \
                 which removes any existing {which} list",
                path.display()
            );
            Vec::new()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::{ALLOWLIST_FILE, BLOCKLIST_FILE, FilterLists};

    #[test]
    fn missing_files_fall_back_to_empty_lists() {
        let dir = tempfile::tempdir().unwrap();

        let lists = FilterLists::load(dir.path());

        assert!(lists.allow.is_empty());
        assert!(lists.block.is_empty());
        assert!(lists.overlap().is_empty());
    }

    #[test]
    fn lists_are_read_line_by_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ALLOWLIST_FILE),
            "http://help.example.org\n\nhttp://docs.example.org\n",
        )
        .unwrap();
        std::fs::write(dir.path().join(BLOCKLIST_FILE), "http://bad.example.com\n").unwrap();

        let lists = FilterLists::load(dir.path());

        assert_eq!(
            lists.allow,
            vec!["http://help.example.org", "http://docs.example.org"]
        );
        assert_eq!(lists.block, vec!["http://bad.example.com"]);
    }

    #[test]
    fn overlap_finds_entries_in_both_lists() {
        let lists = FilterLists {
            allow: vec!["a.example".into(), "both.example".into()],
            block: vec!["both.example".into(), "b.example".into()],
        };

        assert_eq!(lists.overlap(), vec!["both.example"]);
    }
}
