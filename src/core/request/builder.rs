//! Turns a resource id plus a bearer credential into a request draft

use super::cookies::CookieStore;
use super::draft::{HttpMethod, RequestDraft};
use crate::config::EndpointConfig;
use crate::utils::error::{PurgeError, Result};
use std::sync::Arc;
use url::form_urlencoded;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Clone)]
pub struct RequestBuilder {
    endpoint: String,
    csrf_cookie: String,
    csrf_header: String,
    cookies: Arc<dyn CookieStore>,
}

impl RequestBuilder {
    pub fn new(endpoint: &EndpointConfig, cookies: Arc<dyn CookieStore>) -> Self {
        Self {
            endpoint: endpoint.url.clone(),
            csrf_cookie: endpoint.csrf_cookie.clone(),
            csrf_header: endpoint.csrf_header.clone(),
            cookies,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Read the anti-forgery value, failing when the cookie is absent or empty
    pub fn csrf_token(&self) -> Result<String> {
        match self.cookies.get(&self.csrf_cookie) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(PurgeError::missing_csrf_token(&self.csrf_cookie)),
        }
    }

    /// Build the deletion draft for one id
    pub fn build(&self, id: &str, token: &str) -> Result<RequestDraft> {
        let csrf = self.csrf_token()?;

        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("tweet_mode", "extended")
            .append_pair("id", id)
            .finish();

        let headers = vec![
            ("Accept".to_string(), "*/*".to_string()),
            ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
            (self.csrf_header.clone(), csrf),
            ("authorization".to_string(), format!("Bearer {}", token)),
        ];

        Ok(RequestDraft::new(
            id.to_string(),
            self.endpoint.clone(),
            HttpMethod::POST,
            headers,
            body,
            true,
        ))
    }

    /// Build drafts for every id, failing on the first error
    pub fn build_all<'a, I>(&self, ids: I, token: &str) -> Result<Vec<RequestDraft>>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter().map(|id| self.build(id, token)).collect()
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("endpoint", &self.endpoint)
            .field("csrf_cookie", &self.csrf_cookie)
            .field("csrf_header", &self.csrf_header)
            .finish()
    }
}
