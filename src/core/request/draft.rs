//! Request drafts: fully prepared, not-yet-sent deletion requests

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::DELETE => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deletion request for one resource id
///
/// Drafts are built per attempt and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestDraft {
    id: String,
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: String,
    include_credentials: bool,
}

impl RequestDraft {
    pub(crate) fn new(
        id: String,
        url: String,
        method: HttpMethod,
        headers: Vec<(String, String)>,
        body: String,
        include_credentials: bool,
    ) -> Self {
        Self {
            id,
            url,
            method,
            headers,
            body,
            include_credentials,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header with this name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether site cookies travel with the request
    pub fn include_credentials(&self) -> bool {
        self.include_credentials
    }
}

impl std::fmt::Debug for RequestDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(key, value)| {
                if key.eq_ignore_ascii_case("authorization") {
                    (key.as_str(), "[REDACTED]")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("RequestDraft")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &headers)
            .field("body", &self.body)
            .field("include_credentials", &self.include_credentials)
            .finish()
    }
}
