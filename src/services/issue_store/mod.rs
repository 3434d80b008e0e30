//! Issue Store - all persistence and query logic for issues and comments.
//!
//! The store is split by concern:
//!
//! - **shaping**: GitHub-shaped user, label and URL builders
//! - **issues**: create / get / PATCH-style update
//! - **listing**: filter, sort, paginate and search across repositories
//! - **comments**: the comment sub-resource and the parent comment counter
//!
//! Storage layout under the [`BlobStorage`] root:
//!
//! ```text
//! repos/<owner>/<repo>/counter.txt
//! repos/<owner>/<repo>/comment_counter.txt
//! repos/<owner>/<repo>/issues/<number>/issue.json
//! repos/<owner>/<repo>/comments/<id>.json
//! ```
//!
//! Counters and the parent issue's comment count are updated with plain
//! read-then-write calls. Two concurrent writers on the same repository can
//! allocate the same number or lose an increment; callers that need more
//! must serialize access themselves.

mod comments;
mod issues;
mod listing;
pub mod shaping;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::{StorageError, StoreError, StoreResult};
use crate::domain::models::Issue;
use crate::domain::ports::{path_segments, BlobStorage};

const REPOS_ROOT: &str = "repos";

/// CRUD, listing and search for GitHub-shaped issues and comments.
#[derive(Clone)]
pub struct IssueStore {
    storage: Arc<dyn BlobStorage>,
}

impl IssueStore {
    /// Store over `storage`.
    pub fn new(storage: Arc<dyn BlobStorage>) -> Self {
        Self { storage }
    }

    // -- paths ---------------------------------------------------------------

    /// `owner` and `repo` must each be exactly one path segment, otherwise
    /// the record would be filed under a different repository.
    fn repo_dir(owner: &str, repo: &str) -> StoreResult<String> {
        let dir = format!("{REPOS_ROOT}/{owner}/{repo}");
        if owner.contains('/') || repo.contains('/') || path_segments(&dir)?.len() != 3 {
            return Err(StorageError::InvalidPath(dir).into());
        }
        Ok(dir)
    }

    fn issue_path(owner: &str, repo: &str, number: u64) -> StoreResult<String> {
        Ok(format!("{}/issues/{number}/issue.json", Self::repo_dir(owner, repo)?))
    }

    fn counter_path(owner: &str, repo: &str) -> StoreResult<String> {
        Ok(format!("{}/counter.txt", Self::repo_dir(owner, repo)?))
    }

    fn comment_counter_path(owner: &str, repo: &str) -> StoreResult<String> {
        Ok(format!("{}/comment_counter.txt", Self::repo_dir(owner, repo)?))
    }

    fn comment_path(owner: &str, repo: &str, comment_id: u64) -> StoreResult<String> {
        Ok(format!("{}/comments/{comment_id}.json", Self::repo_dir(owner, repo)?))
    }

    // -- id allocation -------------------------------------------------------

    /// Allocate the next issue number for `owner/repo`, starting at 1.
    pub async fn next_number(&self, owner: &str, repo: &str) -> StoreResult<u64> {
        self.increment_counter(&Self::counter_path(owner, repo)?).await
    }

    /// Allocate the next comment id for `owner/repo`, starting at 1.
    pub async fn next_comment_id(&self, owner: &str, repo: &str) -> StoreResult<u64> {
        self.increment_counter(&Self::comment_counter_path(owner, repo)?)
            .await
    }

    async fn increment_counter(&self, path: &str) -> StoreResult<u64> {
        let current = match self.storage.read(path).await {
            Ok(bytes) => {
                let raw = String::from_utf8_lossy(&bytes);
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| StoreError::CorruptCounter {
                        path: path.to_string(),
                        value: raw.trim().to_string(),
                    })?
            }
            Err(e) if e.is_not_found() => 0,
            Err(e) => return Err(e.into()),
        };

        let next = current + 1;
        self.storage.write(path, next.to_string().as_bytes()).await?;
        debug!(path, next, "allocated id");
        Ok(next)
    }

    // -- record I/O ----------------------------------------------------------

    async fn read_json<T: DeserializeOwned>(&self, path: &str) -> StoreResult<Option<T>> {
        match self.storage.read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_json<T: Serialize>(&self, path: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.storage.write(path, &bytes).await?;
        Ok(())
    }

    async fn read_issue(&self, owner: &str, repo: &str, number: u64) -> StoreResult<Option<Issue>> {
        self.read_json(&Self::issue_path(owner, repo, number)?).await
    }

    async fn write_issue(&self, owner: &str, repo: &str, issue: &Issue) -> StoreResult<()> {
        self.write_json(&Self::issue_path(owner, repo, issue.number)?, issue)
            .await
    }

    // -- discovery -----------------------------------------------------------

    /// Child names under `prefix`, or nothing when the prefix does not exist.
    async fn list_or_empty(&self, prefix: &str) -> StoreResult<Vec<String>> {
        match self.storage.list(prefix).await {
            Ok(names) => Ok(names),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Every `(owner, repo)` pair that has data in storage.
    async fn list_repos(&self) -> StoreResult<Vec<(String, String)>> {
        let mut repos = Vec::new();
        for owner in self.list_or_empty(REPOS_ROOT).await? {
            let owner_dir = format!("{REPOS_ROOT}/{owner}");
            for repo in self.list_or_empty(&owner_dir).await? {
                repos.push((owner.clone(), repo));
            }
        }
        Ok(repos)
    }

    /// Issue numbers stored for a repository, ascending.
    async fn list_issue_numbers(&self, owner: &str, repo: &str) -> StoreResult<Vec<u64>> {
        let dir = format!("{}/issues", Self::repo_dir(owner, repo)?);
        let mut numbers: Vec<u64> = self
            .list_or_empty(&dir)
            .await?
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect();
        numbers.sort_unstable();
        Ok(numbers)
    }

    /// Comment ids stored for a repository, ascending.
    async fn list_comment_ids(&self, owner: &str, repo: &str) -> StoreResult<Vec<u64>> {
        let dir = format!("{}/comments", Self::repo_dir(owner, repo)?);
        let mut ids: Vec<u64> = self
            .list_or_empty(&dir)
            .await?
            .iter()
            .filter_map(|name| name.strip_suffix(".json")?.parse().ok())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
