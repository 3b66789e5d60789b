//! HTTP request/response shapes and authentication headers

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::NetworkError;

/// Default media type for the v3 REST API
pub const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Raw media type, used to fetch ignore templates as plain text
pub const ACCEPT_V3_RAW: &str = "application/vnd.github.v3.raw";

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// An outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Header name/value pairs, names unique ignoring case
    pub headers: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Request with no headers and no body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Set a header, replacing any existing value with the same name
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Attach a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a header value by name
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutcome {
    /// Status code
    pub status_code: u16,
    /// Raw body
    pub body: String,
    /// Canonical reason phrase
    pub reason: String,
}

impl HttpOutcome {
    /// 200..=299
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }

    /// `message` field of a JSON error body, if the body parses
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        serde_json::from_str::<Value>(&self.body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_string)
    }

    /// Turn a non-2xx outcome into a [`NetworkError::Status`]
    pub fn ensure_success(self) -> Result<Self, NetworkError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self.server_message();
        Err(NetworkError::Status {
            status: self.status_code,
            reason: self.reason,
            message,
            body: self.body,
        })
    }

    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, NetworkError> {
        serde_json::from_str(&self.body)
            .map_err(|e| NetworkError::Transport(format!("unexpected response body: {e}")))
    }
}

/// Identity and secret for Basic authentication.
///
/// Lives only in memory for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name
    pub identity: String,
    /// Password
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// How requests authenticate
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    /// OAuth token from the secret store
    Token(String),
    /// Interactive identity and password
    Basic(Credentials),
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(<redacted>)"),
            Self::Basic(c) => f.debug_tuple("Basic").field(c).finish(),
        }
    }
}

impl Authorization {
    /// `Authorization` header value.
    ///
    /// Basic credentials are encoded here rather than through an HTTP client's
    /// basic-auth helper: such helpers have mangled secrets containing special
    /// characters, so the `identity:secret` pair is base64-encoded verbatim.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Token(token) => format!("token {token}"),
            Self::Basic(c) => {
                let pair = format!("{}:{}", c.identity, c.secret);
                format!("Basic {}", STANDARD.encode(pair.as_bytes()))
            },
        }
    }
}

/// `User-Agent` value for `identity`
#[must_use]
pub fn user_agent(identity: &str) -> String {
    format!("{identity} using {}/{}", crate::paths::PROGRAM, crate::VERSION)
}
