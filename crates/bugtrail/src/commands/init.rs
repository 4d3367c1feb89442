//! Implementation of the `init` command.
//!
//! Creates the `.bugtrail/` directory with a configuration file, an empty
//! data file and a `.gitignore`.

use crate::error::{ConfigError, Result};
use crate::storage::{BackendKind, StorageBackend};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the bugtrail directory
pub const BUGTRAIL_DIR_NAME: &str = ".bugtrail";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the issues data file
pub const ISSUES_FILE_NAME: &str = "issues.txt";

/// Name of the gitignore file within .bugtrail
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Maximum directory depth to traverse when searching for the bugtrail root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for bugtrail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BugtrailConfig {
    /// Storage configuration
    pub storage: StorageConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type: `file` or `memory`
    pub backend: String,

    /// Path to the data file, relative to the repository root
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            data_file: format!("{BUGTRAIL_DIR_NAME}/{ISSUES_FILE_NAME}"),
        }
    }
}

impl StorageConfig {
    /// Resolves this section into a backend, with paths relative to `root_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::UnknownBackend` for an unrecognized backend name.
    pub fn to_backend(&self, root_dir: &Path) -> Result<StorageBackend> {
        let backend = match self.backend.parse::<BackendKind>()? {
            BackendKind::File => StorageBackend::File(root_dir.join(&self.data_file)),
            BackendKind::Memory => StorageBackend::InMemory,
        };
        Ok(backend)
    }
}

impl BugtrailConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created bugtrail directory
    pub bugtrail_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created issues file
    pub issues_file: PathBuf,
    /// Path to the created gitignore file
    pub gitignore_file: PathBuf,
}

/// Initialize a new bugtrail repository in `base_dir`.
///
/// # Errors
///
/// Returns `ConfigError::AlreadyInitialized` if `.bugtrail/` already exists,
/// or an IO error if any file cannot be created.
pub async fn init(base_dir: &Path) -> Result<InitResult> {
    let bugtrail_dir = base_dir.join(BUGTRAIL_DIR_NAME);

    if bugtrail_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(bugtrail_dir).into());
    }

    fs::create_dir_all(&bugtrail_dir).await?;

    let config_file = bugtrail_dir.join(CONFIG_FILE_NAME);
    BugtrailConfig::default().save(&config_file).await?;

    let issues_file = bugtrail_dir.join(ISSUES_FILE_NAME);
    fs::write(&issues_file, "").await?;

    let gitignore_file = bugtrail_dir.join(GITIGNORE_FILE_NAME);
    let gitignore_content = "\
# Temporary files left by interrupted saves
*.tmp
";
    fs::write(&gitignore_file, gitignore_content).await?;

    tracing::info!(path = %bugtrail_dir.display(), "Initialized bugtrail repository");

    Ok(InitResult {
        bugtrail_dir,
        config_file,
        issues_file,
        gitignore_file,
    })
}

/// Returns `true` if `base_dir` contains a `.bugtrail/` directory.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(BUGTRAIL_DIR_NAME).exists()
}

/// Find the bugtrail root directory by searching up the directory tree.
///
/// Returns the directory containing `.bugtrail/`, or `None` if the
/// filesystem root or the depth limit is reached first.
pub fn find_bugtrail_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(BUGTRAIL_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
