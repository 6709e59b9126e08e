// File: ./src/context.rs
//! Where canvas-desk keeps its files.
//!
//! Two files matter: the credential file (`canvas.env`) in the config
//! directory and the log file in the data directory. Every function that
//! touches either takes an [`AppContext`], so tests can point the whole
//! application at a scratch directory.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "canvas.env";
pub const LOG_FILE_NAME: &str = "canvas-desk.log";

pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// `None` when the data directory cannot be created; logging is then off.
    fn get_log_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|dir| dir.join(LOG_FILE_NAME))
    }
}

pub type SharedContext = std::sync::Arc<dyn AppContext>;

fn created(dir: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    Ok(dir)
}

#[derive(Clone, Debug)]
enum Location {
    /// `--root <path>`: `<path>/config` and `<path>/data`.
    Root(PathBuf),
    /// Platform directories, e.g. `~/.config/canvas-desk` on Linux.
    Platform,
}

impl Location {
    fn dir(&self, sub: &str) -> Result<PathBuf> {
        match self {
            Location::Root(root) => created(root.join(sub)),
            Location::Platform => {
                let proj = ProjectDirs::from("com", "canvas-desk", "canvas-desk")
                    .ok_or_else(|| anyhow!("Could not determine a home directory"))?;
                let dir = if sub == "config" {
                    proj.config_dir()
                } else {
                    proj.data_dir()
                };
                created(dir.to_path_buf())
            }
        }
    }
}

/// The context the binaries run with.
#[derive(Clone, Debug)]
pub struct StandardContext {
    location: Location,
}

impl StandardContext {
    pub fn new(override_root: Option<PathBuf>) -> Self {
        let location = match override_root {
            Some(root) => Location::Root(root),
            None => Location::Platform,
        };
        Self { location }
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.location.dir("data")
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.location.dir("config")
    }
}

/// A throwaway root under the system temp dir, deleted on drop.
#[derive(Debug)]
pub struct TestContext {
    root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("canvas_desk_test_{}", uuid::Uuid::new_v4()));
        // Tests will panic if this fails.
        fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        created(self.root.join("data"))
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        created(self.root.join("config"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
