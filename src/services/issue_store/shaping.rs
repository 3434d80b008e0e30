//! Builders for the GitHub-shaped pieces of issue and comment records.

use crate::domain::models::{Label, SimpleUser};

/// Login of the single synthetic actor that authors everything.
pub const LOCAL_USER_LOGIN: &str = "local-user";

const LABEL_COLOR: &str = "ededed";
const AUTHOR_ASSOCIATION: &str = "OWNER";

/// `author_association` stamped on every issue and comment.
pub fn author_association() -> String {
    AUTHOR_ASSOCIATION.to_string()
}

/// The fixed `local-user` actor. Only `url`/`html_url` depend on `base_url`.
pub fn local_user(base_url: &str) -> SimpleUser {
    let profile = format!("{base_url}/users/{LOCAL_USER_LOGIN}");
    SimpleUser {
        login: LOCAL_USER_LOGIN.to_string(),
        id: 1,
        node_id: "U_local1".to_string(),
        avatar_url: String::new(),
        gravatar_id: String::new(),
        url: profile.clone(),
        html_url: profile,
        followers_url: String::new(),
        following_url: String::new(),
        gists_url: String::new(),
        starred_url: String::new(),
        subscriptions_url: String::new(),
        organizations_url: String::new(),
        repos_url: String::new(),
        events_url: String::new(),
        received_events_url: String::new(),
        user_type: "User".to_string(),
        site_admin: false,
    }
}

/// A user object for an arbitrary login (assignees).
pub fn user_for_login(login: &str, base_url: &str) -> SimpleUser {
    let profile = format!("{base_url}/users/{login}");
    SimpleUser {
        login: login.to_string(),
        id: login_id(login),
        node_id: format!("U_{login}"),
        avatar_url: String::new(),
        gravatar_id: String::new(),
        url: profile.clone(),
        html_url: profile.clone(),
        followers_url: format!("{profile}/followers"),
        following_url: format!("{profile}/following{{/other_user}}"),
        gists_url: format!("{profile}/gists{{/gist_id}}"),
        starred_url: format!("{profile}/starred{{/owner}}{{/repo}}"),
        subscriptions_url: format!("{profile}/subscriptions"),
        organizations_url: format!("{profile}/orgs"),
        repos_url: format!("{profile}/repos"),
        events_url: format!("{profile}/events{{/privacy}}"),
        received_events_url: format!("{profile}/received_events"),
        user_type: "User".to_string(),
        site_admin: false,
    }
}

/// Stable numeric id for a login: 64-bit FNV-1a folded below ten million.
pub fn login_id(login: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;

    let hash = login
        .bytes()
        .fold(OFFSET, |acc, b| (acc ^ u64::from(b)).wrapping_mul(PRIME));
    hash % 10_000_000
}

/// Label objects for `names`, with ids `number * 100 + index`.
pub fn labels_from_names(
    names: &[String],
    number: u64,
    base_url: &str,
    owner: &str,
    repo: &str,
) -> Vec<Label> {
    names
        .iter()
        .zip(0u64..)
        .map(|(name, index)| {
            let id = number * 100 + index;
            Label {
                id,
                node_id: format!("LA_{id}"),
                url: format!("{base_url}/repos/{owner}/{repo}/labels/{name}"),
                name: name.clone(),
                description: None,
                color: LABEL_COLOR.to_string(),
                default: false,
            }
        })
        .collect()
}

/// `(assignee, assignees)` for the given logins.
///
/// A plural list wins over the singular login; the singular field is always
/// the first element of the list.
pub fn assignment(
    assignee: Option<&str>,
    assignees: Option<&[String]>,
    base_url: &str,
) -> (Option<SimpleUser>, Vec<SimpleUser>) {
    let users: Vec<SimpleUser> = match (assignees, assignee) {
        (Some(list), _) if !list.is_empty() => list
            .iter()
            .map(|login| user_for_login(login, base_url))
            .collect(),
        (_, Some(login)) if !login.is_empty() => vec![user_for_login(login, base_url)],
        _ => Vec::new(),
    };
    (users.first().cloned(), users)
}

/// URL fields of one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueUrls {
    /// API URL of the issue
    pub url: String,
    /// API URL of the repository
    pub repository_url: String,
    /// Label template URL
    pub labels_url: String,
    /// Comment collection URL
    pub comments_url: String,
    /// Event collection URL
    pub events_url: String,
    /// Same as `url`; there is no web UI per issue
    pub html_url: String,
}

impl IssueUrls {
    /// URLs for issue `number` of `owner/repo`.
    pub fn new(base_url: &str, owner: &str, repo: &str, number: u64) -> Self {
        let repository_url = format!("{base_url}/repos/{owner}/{repo}");
        let url = format!("{repository_url}/issues/{number}");
        Self {
            labels_url: format!("{url}/labels{{/name}}"),
            comments_url: format!("{url}/comments"),
            events_url: format!("{url}/events"),
            html_url: url.clone(),
            repository_url,
            url,
        }
    }
}

/// URL fields of one comment: `(url, html_url, issue_url)`.
pub fn comment_urls(
    base_url: &str,
    owner: &str,
    repo: &str,
    issue_number: u64,
    comment_id: u64,
) -> (String, String, String) {
    let repository_url = format!("{base_url}/repos/{owner}/{repo}");
    let issue_url = format!("{repository_url}/issues/{issue_number}");
    (
        format!("{repository_url}/issues/comments/{comment_id}"),
        format!("{issue_url}#issuecomment-{comment_id}"),
        issue_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000";

    #[test]
    fn test_local_user_only_links_profile() {
        let user = local_user(BASE);
        assert_eq!(user.id, 1);
        assert_eq!(user.url, "http://localhost:8000/users/local-user");
        assert_eq!(user.html_url, user.url);
        assert!(user.followers_url.is_empty());
    }

    #[test]
    fn test_login_id_is_stable_and_bounded() {
        assert_eq!(login_id("octocat"), login_id("octocat"));
        assert_ne!(login_id("octocat"), login_id("hubot"));
        assert!(login_id("octocat") < 10_000_000);
    }

    #[test]
    fn test_user_for_login_templates() {
        let user = user_for_login("octocat", BASE);
        assert_eq!(user.node_id, "U_octocat");
        assert_eq!(
            user.following_url,
            "http://localhost:8000/users/octocat/following{/other_user}"
        );
        assert_eq!(
            user.starred_url,
            "http://localhost:8000/users/octocat/starred{/owner}{/repo}"
        );
    }

    #[test]
    fn test_label_ids_follow_number_and_index() {
        let names = vec!["bug".to_string(), "urgent".to_string()];
        let labels = labels_from_names(&names, 2, BASE, "octo", "hello");
        assert_eq!(labels[0].id, 200);
        assert_eq!(labels[1].id, 201);
        assert_eq!(labels[1].node_id, "LA_201");
        assert_eq!(labels[0].color, "ededed");
        assert_eq!(labels[0].url, "http://localhost:8000/repos/octo/hello/labels/bug");
    }

    #[test]
    fn test_plural_assignees_win() {
        let many = vec!["a".to_string(), "b".to_string()];
        let (single, list) = assignment(Some("c"), Some(&many), BASE);
        assert_eq!(single.unwrap().login, "a");
        assert_eq!(list.len(), 2);

        let (single, list) = assignment(Some("c"), None, BASE);
        assert_eq!(single.unwrap().login, "c");
        assert_eq!(list.len(), 1);

        let (single, list) = assignment(None, None, BASE);
        assert!(single.is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_issue_urls() {
        let urls = IssueUrls::new(BASE, "octo", "hello", 3);
        assert_eq!(urls.url, "http://localhost:8000/repos/octo/hello/issues/3");
        assert_eq!(urls.repository_url, "http://localhost:8000/repos/octo/hello");
        assert_eq!(urls.labels_url, format!("{}/labels{{/name}}", urls.url));
        assert_eq!(urls.html_url, urls.url);
    }
}
