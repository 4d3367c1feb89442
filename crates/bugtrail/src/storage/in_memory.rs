//! In-memory storage backend.

use super::{IssueStore, LoadWarning};
use crate::domain::Issue;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps the saved issue list in memory. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    issues: Arc<Mutex<Vec<Issue>>>,
}

impl InMemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `issues`.
    #[must_use]
    pub fn with_issues(issues: Vec<Issue>) -> Self {
        Self {
            issues: Arc::new(Mutex::new(issues)),
        }
    }
}

#[async_trait]
impl IssueStore for InMemoryStore {
    async fn load(&self) -> Result<(Vec<Issue>, Vec<LoadWarning>)> {
        Ok((self.issues.lock().await.clone(), Vec::new()))
    }

    async fn save(&self, issues: &[Issue]) -> Result<()> {
        *self.issues.lock().await = issues.to_vec();
        Ok(())
    }
}
