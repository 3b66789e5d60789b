//! Remote repository manager - hosting platform REST calls

use serde::Deserialize;
use serde_json::json;

use crate::core::models::{
    ACCEPT_V3, Authorization, HttpOutcome, HttpRequest, Method, StepResult, user_agent,
};
use crate::core::ports::HttpGateway;
use crate::error::PipelineError;

/// Preview media type for the pages configuration endpoint
pub const PAGES_PREVIEW: &str = "application/vnd.github.switcheroo-preview+json";

/// Preview media type for the pages build endpoint
pub const PAGES_BUILD_PREVIEW: &str = "application/vnd.github.mister-fantastic-preview+json";

#[derive(Debug, Deserialize)]
struct CreatedRepository {
    full_name: String,
}

/// Authenticated calls against one account
pub struct RemoteRepositoryManager<'a> {
    gateway: &'a dyn HttpGateway,
    api_url: &'a str,
    headers: Vec<(String, String)>,
}

impl std::fmt::Debug for RemoteRepositoryManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteRepositoryManager")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl<'a> RemoteRepositoryManager<'a> {
    /// Manager sending as `identity` with `authorization`
    #[must_use]
    pub fn new(
        gateway: &'a dyn HttpGateway,
        api_url: &'a str,
        identity: &str,
        authorization: &Authorization,
    ) -> Self {
        let headers = vec![
            ("User-Agent".to_string(), user_agent(identity)),
            ("Authorization".to_string(), authorization.header_value()),
            ("Accept".to_string(), ACCEPT_V3.to_string()),
        ];
        Self {
            gateway,
            api_url: api_url.trim_end_matches('/'),
            headers,
        }
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, format!("{}{path}", self.api_url));
        for (name, value) in &self.headers {
            request = request.header(name, value.clone());
        }
        request
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpOutcome, PipelineError> {
        log::debug!("{} {}", request.method, request.url);
        let outcome = self.gateway.send(request)?;
        log::debug!("Raw response ({}):\n{}", outcome.status_code, outcome.body);
        Ok(outcome.ensure_success()?)
    }

    /// Create a public repository and return its canonical full name.
    ///
    /// The platform may rename on collision; callers must use the returned
    /// name, not the requested one.
    pub fn create_repository(&self, name: &str, description: &str) -> Result<String, PipelineError> {
        let request = self.request(Method::Post, "/user/repos").json(json!({
            "name": name,
            "description": description,
            "private": false,
            "has_projects": false,
        }));
        let outcome = self.send(&request)?;
        let created: CreatedRepository = outcome.json()?;
        Ok(created.full_name)
    }

    /// Serve pages from `/docs` on `branch`
    pub fn enable_pages(&self, full_name: &str, branch: &str) -> Result<StepResult, PipelineError> {
        let request = self
            .request(Method::Post, &format!("/repos/{full_name}/pages"))
            .header("Accept", PAGES_PREVIEW)
            .json(json!({
                "source": {
                    "branch": branch,
                    "path": "/docs",
                }
            }));
        let outcome = self.send(&request)?;
        Ok(StepResult::done(format!("GitHub pages enabled in {full_name}.")).with_detail(outcome.body))
    }

    /// Rebuild the owner's personal site so it picks up the new project
    pub fn rebuild_user_pages(&self, owner: &str) -> Result<StepResult, PipelineError> {
        let site = format!("{owner}.github.io");
        let request = self
            .request(Method::Post, &format!("/repos/{owner}/{site}/pages/builds"))
            .header("Accept", PAGES_BUILD_PREVIEW);
        let outcome = self.send(&request)?;
        Ok(StepResult::done(format!("Personal blog `{site}` pages rebuilt.")).with_detail(outcome.body))
    }
}
