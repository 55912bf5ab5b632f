//! Shared helpers for CLI integration tests.

pub mod fixtures;

use std::path::PathBuf;

use srs_cli::deck_file::DeckFile;
use tempfile::TempDir;

/// A card file living in its own temporary directory.
pub struct TestContext {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestContext {
    /// Write `file` to a fresh temp directory.
    pub fn with_file(file: &DeckFile) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("cards.json");
        file.save(&path).expect("write card file");
        Self { _dir: dir, path }
    }

    pub fn load(&self) -> DeckFile {
        DeckFile::load(&self.path).expect("load card file")
    }
}
