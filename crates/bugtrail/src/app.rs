//! Application context for CLI command execution.
//!
//! [`App`] finds the repository, reads its configuration, opens the store
//! and loads every issue into an [`IssueCollection`]. Commands work on the
//! collection and call [`App::save`] to write it back.
//!
//! # Example
//!
//! ```no_run
//! use bugtrail::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("{} issues", app.collection().len());
//!     Ok(())
//! }
//! ```

use crate::collection::IssueCollection;
use crate::commands::init::{
    find_bugtrail_root, BugtrailConfig, BUGTRAIL_DIR_NAME, CONFIG_FILE_NAME,
};
use crate::error::{ConfigError, Result};
use crate::storage::{create_store, IssueStore, LoadWarning, StorageBackend};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
pub struct App {
    store: Box<dyn IssueStore>,
    collection: IssueCollection,
    warnings: Vec<LoadWarning>,
    bugtrail_dir: PathBuf,
    backend: StorageBackend,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("bugtrail_dir", &self.bugtrail_dir)
            .field("backend", &self.backend)
            .field("issues", &self.collection.len())
            .field("store", &"<dyn IssueStore>")
            .finish()
    }
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.bugtrail/`, loads its
    /// configuration and all stored issues. Records that could not be loaded
    /// are logged and kept in [`App::warnings`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No bugtrail repository is found in the directory tree
    /// - Configuration cannot be loaded
    /// - The data file is missing or unreadable
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_bugtrail_root(working_dir).ok_or(ConfigError::NotInitialized)?;

        let bugtrail_dir = root_dir.join(BUGTRAIL_DIR_NAME);
        let config = BugtrailConfig::load(&bugtrail_dir.join(CONFIG_FILE_NAME)).await?;

        let backend = config.storage.to_backend(&root_dir)?;
        tracing::debug!(?backend, "Opening issue store");
        let store = create_store(backend.clone());

        let (issues, mut warnings) = store.load().await?;
        let mut collection = IssueCollection::new();
        for id in collection.add_issues(issues) {
            warnings.push(LoadWarning::DuplicateId { issue_id: id.get() });
        }

        Ok(Self {
            store,
            collection,
            warnings,
            bugtrail_dir,
            backend,
        })
    }

    /// The loaded issues.
    pub fn collection(&self) -> &IssueCollection {
        &self.collection
    }

    /// The loaded issues, for commands that change them.
    pub fn collection_mut(&mut self) -> &mut IssueCollection {
        &mut self.collection
    }

    /// Problems found while loading.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Path to the `.bugtrail` directory.
    pub fn bugtrail_dir(&self) -> &Path {
        &self.bugtrail_dir
    }

    /// The configured backend.
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    /// Writes the collection back to the store.
    ///
    /// This should be called after any mutating operation.
    pub async fn save(&self) -> Result<()> {
        self.store.save(self.collection.issues()).await
    }
}
