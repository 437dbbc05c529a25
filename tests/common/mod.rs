#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// The scenario dataset used throughout the suite: `id` and `revenue` are
/// fully numeric, `region` is categorical.
pub const SALES_CSV: &str = "id,region,revenue\n1,East,100\n2,West,200\n3,East,50\n";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` to `name` inside the workspace and returns its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create file");
        file.write_all(contents.as_bytes()).expect("write file");
        path
    }
}
