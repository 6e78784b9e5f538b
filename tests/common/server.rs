//! Mock deletion endpoint

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const DESTROY_PATH: &str = "/i/api/1.1/statuses/destroy.json";
pub const SCRIPT_PATH: &str = "/responsive-web/client-web/main.js";

/// Wiremock server standing in for the deletion API
pub struct MockEndpoint {
    server: MockServer,
}

/// Matches a deletion request for exactly this id
fn deletes(id: &str) -> impl Fn(&Request) -> bool + Send + Sync + 'static {
    let suffix = format!("&id={}", id);
    move |request: &Request| String::from_utf8_lossy(&request.body).ends_with(&suffix)
}

impl MockEndpoint {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn destroy_url(&self) -> String {
        format!("{}{}", self.server.uri(), DESTROY_PATH)
    }

    pub fn script_url(&self) -> String {
        format!("{}{}", self.server.uri(), SCRIPT_PATH)
    }

    /// Answer every deletion with `status`
    pub async fn respond_all(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(DESTROY_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Answer deletions of `id` with `status`, `times` times
    pub async fn respond_to(&self, id: &str, status: u16, times: u64) {
        Mock::given(method("POST"))
            .and(path(DESTROY_PATH))
            .and(deletes(id))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(times)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Serve a main script that embeds `token`
    pub async fn serve_script(&self, token: &str) {
        let body = format!(r#"var n="short",e={{bearer:"{}"}},t="x";"#, token);
        Mock::given(method("GET"))
            .and(path(SCRIPT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Deletion requests received so far
    pub async fn deletions(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == DESTROY_PATH)
            .collect()
    }

    /// Deletion requests received for `id`
    pub async fn deletions_of(&self, id: &str) -> usize {
        let matches = deletes(id);
        self.deletions().await.iter().filter(|r| matches(r)).count()
    }
}
