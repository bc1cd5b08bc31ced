//! Successful widget server responses

use http_client::RawResponse;
use serde::de::DeserializeOwned;

use crate::Result;

/// The one status both `find` and `send_action` accept as success
pub fn is_success(status: u16) -> bool {
    status == 200
}

/// Body of a successful widget server reply
///
/// Built only after [`is_success`] has accepted the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: String,
}

impl Response {
    pub fn from_raw(raw: RawResponse) -> Self {
        Self {
            status: raw.status,
            body: raw.body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw body text as sent by the server
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Decode the body as JSON
    ///
    /// ```rust
    /// use http_client::RawResponse;
    /// use widget_api::Response;
    ///
    /// let response = Response::from_raw(RawResponse::new(200, r#"{"status":"clicked"}"#));
    /// let value: serde_json::Value = response.json().unwrap();
    /// assert_eq!(value["status"], "clicked");
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
