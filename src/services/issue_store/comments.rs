//! The issue comment sub-resource.

use tracing::{debug, info, warn};

use super::listing::{sort_stable, updated_since};
use super::{shaping, IssueStore};
use crate::domain::errors::StoreResult;
use crate::domain::models::{
    timestamp, Comment, CommentListQuery, CommentRecord, CommentSort, Page, SortDirection,
};

impl IssueStore {
    async fn read_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
    ) -> StoreResult<Option<CommentRecord>> {
        self.read_json(&Self::comment_path(owner, repo, comment_id)?)
            .await
    }

    async fn write_comment(&self, owner: &str, repo: &str, record: &CommentRecord) -> StoreResult<()> {
        self.write_json(&Self::comment_path(owner, repo, record.comment.id)?, record)
            .await
    }

    /// All comment records of a repository, in id order.
    async fn comment_records(&self, owner: &str, repo: &str) -> StoreResult<Vec<CommentRecord>> {
        let mut records = Vec::new();
        for id in self.list_comment_ids(owner, repo).await? {
            if let Some(record) = self.read_comment(owner, repo, id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Add `delta` to the parent issue's comment count, flooring at zero,
    /// and touch its `updated_at`. A missing parent is skipped.
    async fn adjust_comment_count(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        delta: i64,
    ) -> StoreResult<()> {
        let Some(mut issue) = self.read_issue(owner, repo, issue_number).await? else {
            warn!(owner, repo, issue_number, "comment parent issue missing");
            return Ok(());
        };
        issue.comments = issue.comments.saturating_add_signed(delta);
        issue.updated_at = timestamp::now();
        self.write_issue(owner, repo, &issue).await
    }

    /// Create a comment on an issue. `None` when the issue does not exist.
    pub async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: String,
        base_url: &str,
    ) -> StoreResult<Option<Comment>> {
        if self.read_issue(owner, repo, issue_number).await?.is_none() {
            return Ok(None);
        }

        let id = self.next_comment_id(owner, repo).await?;
        let now = timestamp::now();
        let (url, html_url, issue_url) =
            shaping::comment_urls(base_url, owner, repo, issue_number, id);

        let record = CommentRecord {
            issue_number,
            comment: Comment {
                id,
                node_id: format!("IC_{id}"),
                url,
                html_url,
                issue_url,
                user: shaping::local_user(base_url),
                created_at: now,
                updated_at: now,
                body,
                author_association: shaping::author_association(),
                pinned: None,
            },
        };
        self.write_comment(owner, repo, &record).await?;
        self.adjust_comment_count(owner, repo, issue_number, 1).await?;

        info!(owner, repo, issue_number, comment_id = id, "comment created");
        Ok(Some(record.comment))
    }

    /// Look up a comment by repository-wide id.
    pub async fn get_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
    ) -> StoreResult<Option<Comment>> {
        Ok(self
            .read_comment(owner, repo, comment_id)
            .await?
            .map(|record| record.comment))
    }

    /// Replace a comment's body.
    pub async fn update_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        body: String,
    ) -> StoreResult<Option<Comment>> {
        let Some(mut record) = self.read_comment(owner, repo, comment_id).await? else {
            return Ok(None);
        };
        record.comment.body = body;
        record.comment.updated_at = timestamp::now();
        self.write_comment(owner, repo, &record).await?;
        debug!(owner, repo, comment_id, "comment updated");
        Ok(Some(record.comment))
    }

    /// Delete a comment and decrement its issue's counter. `false` when the
    /// comment does not exist.
    pub async fn delete_comment(&self, owner: &str, repo: &str, comment_id: u64) -> StoreResult<bool> {
        let Some(record) = self.read_comment(owner, repo, comment_id).await? else {
            return Ok(false);
        };
        self.storage
            .delete(&Self::comment_path(owner, repo, comment_id)?)
            .await?;
        self.adjust_comment_count(owner, repo, record.issue_number, -1)
            .await?;

        info!(owner, repo, comment_id, "comment deleted");
        Ok(true)
    }

    /// Comments on one issue, oldest first. `None` when the issue does not exist.
    pub async fn list_comments_for_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        since: Option<&str>,
        page: Page,
    ) -> StoreResult<Option<Vec<Comment>>> {
        if self.read_issue(owner, repo, issue_number).await?.is_none() {
            return Ok(None);
        }

        let mut comments: Vec<Comment> = self
            .comment_records(owner, repo)
            .await?
            .into_iter()
            .filter(|record| record.issue_number == issue_number)
            .map(|record| record.comment)
            .filter(|comment| updated_since(&comment.updated_at, since))
            .collect();

        sort_stable(&mut comments, SortDirection::Asc, |a, b| {
            a.created_at.cmp(&b.created_at)
        });
        Ok(Some(page.apply(comments)))
    }

    /// Comments across a repository.
    pub async fn list_comments_for_repo(
        &self,
        owner: &str,
        repo: &str,
        query: &CommentListQuery,
    ) -> StoreResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comment_records(owner, repo)
            .await?
            .into_iter()
            .map(|record| record.comment)
            .filter(|comment| updated_since(&comment.updated_at, query.since.as_deref()))
            .collect();

        sort_stable(&mut comments, query.direction, |a, b| match query.sort {
            CommentSort::Created => a.created_at.cmp(&b.created_at),
            CommentSort::Updated => a.updated_at.cmp(&b.updated_at),
        });
        Ok(query.page.apply(comments))
    }

    /// Mark a comment pinned. `None` when it does not exist.
    pub async fn pin_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
    ) -> StoreResult<Option<Comment>> {
        self.set_pinned(owner, repo, comment_id, true).await
    }

    /// Unpin a comment. Succeeds whether or not it was pinned.
    pub async fn unpin_comment(&self, owner: &str, repo: &str, comment_id: u64) -> StoreResult<bool> {
        Ok(self
            .set_pinned(owner, repo, comment_id, false)
            .await?
            .is_some())
    }

    async fn set_pinned(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        pinned: bool,
    ) -> StoreResult<Option<Comment>> {
        let Some(mut record) = self.read_comment(owner, repo, comment_id).await? else {
            return Ok(None);
        };
        record.comment.pinned = Some(pinned);
        record.comment.updated_at = timestamp::now();
        self.write_comment(owner, repo, &record).await?;
        debug!(owner, repo, comment_id, pinned, "comment pin changed");
        Ok(Some(record.comment))
    }
}
