// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fetchers for the three public GitHub data feeds a card displays.
//!
//! Every request is an unauthenticated GET. Failures (network errors and
//! non-success statuses) are returned as [`Error::Fetch`]; a successful
//! response with an unexpected shape yields an empty sequence instead.

use std::future::Future;

use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    config::ItemCount,
    error::Error,
    models::{Profile, PullRequest, Repository, SearchResults},
};

/// Public REST endpoint used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size of the unpaginated listing the language tally is derived from.
const LISTING_PAGE_SIZE: u8 = 100;

/// Source of the data feeds behind a card.
///
/// [`GithubClient`] is the production implementation; tests substitute
/// in-memory sources.
pub trait GithubSource
{
    /// Retrieves the public profile of `username`.
    fn profile(&self, username: &str,) -> impl Future<Output = Result<Profile, Error,>,> + Send;

    /// Retrieves pull requests authored by `username`, in API order.
    fn pull_requests(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<PullRequest,>, Error,>,> + Send;

    /// Retrieves the `count` most starred repositories of `username`.
    fn top_repositories(
        &self,
        username: &str,
        count: ItemCount,
    ) -> impl Future<Output = Result<Vec<Repository,>, Error,>,> + Send;

    /// Retrieves the repository listing the language tally is derived from.
    fn all_repositories(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<Repository,>, Error,>,> + Send;
}

/// `octocrab`-backed client for the public GitHub REST API.
#[derive(Debug, Clone,)]
pub struct GithubClient
{
    octocrab: Octocrab,
}

#[derive(Serialize,)]
struct IssueSearchQuery
{
    q: String,
}

#[derive(Serialize,)]
struct RepositorySearchQuery
{
    q:        String,
    sort:     &'static str,
    order:    &'static str,
    per_page: usize,
}

#[derive(Serialize,)]
struct ListingQuery
{
    per_page: u8,
}

impl GithubClient
{
    /// Builds a client for the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, Error,>
    {
        Self::with_base_uri(DEFAULT_API_URL,)
    }

    /// Builds a client that sends requests to `base_uri` instead of the
    /// public API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] when `base_uri` is not a valid URI or the
    /// HTTP client cannot be constructed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ghcard::GithubClient;
    ///
    /// # fn example() -> Result<(), ghcard::Error> {
    /// let client = GithubClient::with_base_uri("http://127.0.0.1:8080",)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_base_uri(base_uri: &str,) -> Result<Self, Error,>
    {
        let octocrab = Octocrab::builder()
            .base_uri(base_uri,)
            .map_err(|e| Error::fetch(format!("invalid API url {base_uri}: {e}"),),)?
            .add_retry_config(RetryConfig::None,)
            .build()
            .map_err(|e| Error::fetch(format!("failed to initialize GitHub client: {e}"),),)?;

        Ok(Self {
            octocrab,
        },)
    }

    async fn get_json<P,>(&self, route: &str, parameters: Option<&P,>,) -> Result<Value, Error,>
    where
        P: Serialize + ?Sized,
    {
        debug!("GET {}", route);
        self.octocrab
            .get::<Value, _, P,>(route, parameters,)
            .await
            .map_err(|e| Error::fetch(format!("GET {route} failed: {e}"),),)
    }
}

impl GithubSource for GithubClient
{
    async fn profile(&self, username: &str,) -> Result<Profile, Error,>
    {
        let route = format!("/users/{username}");
        let payload = self.get_json::<(),>(&route, None,).await?;
        let profile: Profile = serde_json::from_value(payload,)
            .map_err(|e| Error::fetch(format!("unexpected profile payload for {username}: {e}"),),)?;
        info!("Fetched profile of {}", profile.login);
        Ok(profile,)
    }

    async fn pull_requests(&self, username: &str,) -> Result<Vec<PullRequest,>, Error,>
    {
        let query = IssueSearchQuery {
            q: format!("author:{username} type:pr"),
        };
        let payload = self.get_json("/search/issues", Some(&query,),).await?;
        let pulls = search_items::<PullRequest,>("/search/issues", payload,);
        info!("Fetched {} pull requests authored by {}", pulls.len(), username);
        Ok(pulls,)
    }

    async fn top_repositories(
        &self,
        username: &str,
        count: ItemCount,
    ) -> Result<Vec<Repository,>, Error,>
    {
        let query = RepositorySearchQuery {
            q:        format!("user:{username}"),
            sort:     "stars",
            order:    "desc",
            per_page: count.get(),
        };
        let payload = self.get_json("/search/repositories", Some(&query,),).await?;
        let repositories = search_items::<Repository,>("/search/repositories", payload,);
        info!("Fetched {} top repositories of {}", repositories.len(), username);
        Ok(repositories,)
    }

    async fn all_repositories(&self, username: &str,) -> Result<Vec<Repository,>, Error,>
    {
        let route = format!("/users/{username}/repos");
        let query = ListingQuery {
            per_page: LISTING_PAGE_SIZE,
        };
        let payload = self.get_json(&route, Some(&query,),).await?;
        let repositories = serde_json::from_value::<Vec<Repository,>,>(payload,).unwrap_or_else(|e| {
            debug!("Unexpected payload from {}: {}", route, e);
            Vec::new()
        },);
        info!("Fetched {} repositories of {}", repositories.len(), username);
        Ok(repositories,)
    }
}

fn search_items<T,>(route: &str, payload: Value,) -> Vec<T,>
where
    T: DeserializeOwned,
{
    match serde_json::from_value::<SearchResults<T,>,>(payload,) {
        Ok(results,) => results.items,
        Err(e,) => {
            debug!("Unexpected payload from {}: {}", route, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures
{
    use serde_json::{Value, json};

    pub fn profile(login: &str,) -> Value
    {
        json!({
            "login": login,
            "name": "The Octocat",
            "avatar_url": format!("https://avatars.example.com/{login}.png"),
            "bio": "Mascot of GitHub",
            "created_at": "2011-01-25T18:44:36Z",
            "followers": 21000,
            "following": 9,
            "public_repos": 8,
            "html_url": format!("https://github.com/{login}")
        })
    }

    pub fn pull_request(id: u64, state: &str,) -> Value
    {
        json!({
            "id": id,
            "title": format!("Fix issue #{id}"),
            "html_url": format!("https://github.com/octocat/Hello-World/pull/{id}"),
            "state": state,
            "created_at": "2024-03-02T10:00:00Z"
        })
    }

    pub fn repository(id: u64, name: &str, language: Option<&str,>, stars: u64,) -> Value
    {
        json!({
            "id": id,
            "name": name,
            "html_url": format!("https://github.com/octocat/{name}"),
            "description": format!("{name} description"),
            "language": language,
            "stargazers_count": stars,
            "forks_count": stars / 10,
            "created_at": "2012-05-01T00:00:00Z",
            "updated_at": "2024-05-01T00:00:00Z",
            "owner": { "login": "octocat" }
        })
    }
}

#[cfg(test)]
mod tests
{
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::{GithubClient, GithubSource, fixtures};
    use crate::{config::ItemCount, error::Error, models::PullRequestState};

    async fn client_for(server: &MockServer,) -> GithubClient
    {
        GithubClient::with_base_uri(&server.uri(),).expect("failed to build client",)
    }

    #[tokio::test]
    async fn profile_is_fetched_from_users_endpoint()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/octocat",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(fixtures::profile("octocat",),),)
            .mount(&server,)
            .await;

        let profile = client_for(&server,).await.profile("octocat",).await.expect("profile",);
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.public_repos, 8);
    }

    #[tokio::test]
    async fn profile_not_found_is_a_fetch_error()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/ghost",),)
            .respond_with(ResponseTemplate::new(404,).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            }),),)
            .mount(&server,)
            .await;

        let error = client_for(&server,).await.profile("ghost",).await.unwrap_err();
        assert!(matches!(error, Error::Fetch { .. }), "unexpected error: {error:?}");
    }

    #[tokio::test]
    async fn pull_requests_use_author_search_query()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/search/issues",),)
            .and(query_param("q", "author:octocat type:pr",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!({
                "total_count": 2,
                "incomplete_results": false,
                "items": [fixtures::pull_request(1, "open"), fixtures::pull_request(2, "closed")]
            }),),)
            .mount(&server,)
            .await;

        let pulls = client_for(&server,).await.pull_requests("octocat",).await.expect("pulls",);
        assert_eq!(pulls.len(), 2);
        assert_eq!(pulls[0].id, 1);
        assert_eq!(pulls[1].state, PullRequestState::Closed);
    }

    #[tokio::test]
    async fn pull_requests_with_unexpected_shape_are_empty()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/search/issues",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!({
                "items": "not a list"
            }),),)
            .mount(&server,)
            .await;

        let pulls = client_for(&server,).await.pull_requests("octocat",).await.expect("pulls",);
        assert!(pulls.is_empty());
    }

    #[tokio::test]
    async fn top_repositories_request_star_order_and_count()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/search/repositories",),)
            .and(query_param("q", "user:octocat",),)
            .and(query_param("sort", "stars",),)
            .and(query_param("order", "desc",),)
            .and(query_param("per_page", "3",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!({
                "total_count": 3,
                "items": [
                    fixtures::repository(1, "Spoon-Knife", Some("HTML"), 12000),
                    fixtures::repository(2, "Hello-World", None, 2500),
                    fixtures::repository(3, "linguist", Some("Ruby"), 300)
                ]
            }),),)
            .mount(&server,)
            .await;

        let repositories = client_for(&server,)
            .await
            .top_repositories("octocat", ItemCount::Three,)
            .await
            .expect("repositories",);
        let names: Vec<&str,> = repositories.iter().map(|repo| repo.name.as_str(),).collect();
        assert_eq!(names, ["Spoon-Knife", "Hello-World", "linguist"]);
    }

    #[tokio::test]
    async fn all_repositories_are_listed_from_user_repos()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/octocat/repos",),)
            .and(query_param("per_page", "100",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([
                fixtures::repository(1, "a", Some("Rust"), 1),
                fixtures::repository(2, "b", None, 2)
            ]),),)
            .mount(&server,)
            .await;

        let repositories =
            client_for(&server,).await.all_repositories("octocat",).await.expect("repositories",);
        assert_eq!(repositories.len(), 2);
    }

    #[tokio::test]
    async fn all_repositories_with_object_payload_are_empty()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/octocat/repos",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!({ "unexpected": true }),),)
            .mount(&server,)
            .await;

        let repositories =
            client_for(&server,).await.all_repositories("octocat",).await.expect("repositories",);
        assert!(repositories.is_empty());
    }

    #[tokio::test]
    async fn server_errors_are_not_retried()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/octocat/repos",),)
            .respond_with(ResponseTemplate::new(500,).set_body_json(json!({
                "message": "Server Error"
            }),),)
            .expect(1,)
            .mount(&server,)
            .await;

        let result = client_for(&server,).await.all_repositories("octocat",).await;
        assert!(result.is_err());
    }

    #[test]
    fn invalid_base_uri_is_rejected()
    {
        let error = GithubClient::with_base_uri("not a uri",).unwrap_err();
        assert!(matches!(error, Error::Fetch { .. }));
    }
}
