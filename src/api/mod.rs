//! Client for the FRASS backend API.
//!
//! The transport sits behind [`Backend`] so the same client runs on the
//! browser's `fetch` (see `app::platform`) and on a recording mock in tests.

mod payload;
mod types;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

pub use payload::{FormPayload, FormValue, Upload};
pub use types::{HistoryState, ScanOutcome, ScanResponse, StatusResponse, Student};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS).
    #[error("network error: {0}")]
    Transport(String),
    /// Non-2xx reply without a usable JSON body.
    #[error("server returned HTTP {status}")]
    Http { status: u16 },
    #[error("unexpected response: {0}")]
    Decode(String),
    /// No transport is available on this target.
    #[error("backend unavailable: {0}")]
    Unavailable(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Fixed backend endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Signup,
    Logout,
    SaveStudent,
    Students,
    DeleteStudent,
    ScanFace,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "/api/login",
            Endpoint::Signup => "/api/signup",
            Endpoint::Logout => "/api/logout",
            Endpoint::SaveStudent => "/api/save_student",
            Endpoint::Students => "/api/students",
            Endpoint::DeleteStudent => "/api/delete_student",
            Endpoint::ScanFace => "/api/scan_face",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::Students => Method::Get,
            _ => Method::Post,
        }
    }
}

/// `/api/student_photo/:id`
pub fn student_photo_url(id: i64) -> String {
    format!("/api/student_photo/{id}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<FormPayload>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_none_or(|ct| ct.contains("json"))
    }
}

/// HTTP transport.
///
/// Futures are `?Send`: browser promises live on the UI thread.
#[async_trait(?Send)]
pub trait Backend {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Typed access to the backend endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient<B> {
    backend: B,
}

impl<B: Backend> ApiClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn call(
        &self,
        endpoint: Endpoint,
        body: Option<FormPayload>,
    ) -> Result<RawResponse, ApiError> {
        let request = ApiRequest {
            method: endpoint.method(),
            path: endpoint.path().to_string(),
            body,
        };
        debug!(method = endpoint.method().as_str(), path = endpoint.path(), "API request");
        let response = self.backend.send(request).await?;
        debug!(
            path = endpoint.path(),
            status = response.status,
            bytes = response.body.len(),
            "API response"
        );
        Ok(response)
    }

    /// Post a form to a `{status, message}` endpoint.
    pub async fn post_status(
        &self,
        endpoint: Endpoint,
        payload: FormPayload,
    ) -> Result<StatusResponse, ApiError> {
        let response = self.call(endpoint, Some(payload)).await?;
        decode_json(&response)
    }

    pub async fn logout(&self) -> Result<StatusResponse, ApiError> {
        let response = self.call(Endpoint::Logout, None).await?;
        decode_json(&response)
    }

    pub async fn students(&self) -> Result<Vec<Student>, ApiError> {
        let response = self.call(Endpoint::Students, None).await?;
        decode_json(&response)
    }

    pub async fn scan_face(&self, payload: FormPayload) -> Result<ScanOutcome, ApiError> {
        let response = self.call(Endpoint::ScanFace, Some(payload)).await?;
        match response.content_type.as_deref() {
            Some(ct) if ct.starts_with("image/") && response.is_success() => {
                Ok(ScanOutcome::Annotated {
                    content_type: ct.to_string(),
                    bytes: response.body,
                })
            }
            _ => decode_json(&response).map(ScanOutcome::Json),
        }
    }
}

/// Decode a JSON body. Error statuses still carry `{status, message}`, so the
/// body wins whenever it parses.
fn decode_json<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ApiError> {
    if response.is_json() {
        match serde_json::from_slice(&response.body) {
            Ok(value) => return Ok(value),
            Err(e) if response.is_success() => return Err(ApiError::Decode(e.to_string())),
            Err(e) => warn!(status = response.status, "Error body is not JSON: {}", e),
        }
    }
    if response.is_success() {
        Err(ApiError::Decode(format!(
            "expected JSON, got {}",
            response.content_type.as_deref().unwrap_or("no content type")
        )))
    } else {
        Err(ApiError::Http {
            status: response.status,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockBackend;
    use super::*;

    #[test]
    fn test_endpoint_table() {
        assert_eq!(Endpoint::Students.method(), Method::Get);
        assert_eq!(Endpoint::ScanFace.method(), Method::Post);
        assert_eq!(Endpoint::DeleteStudent.path(), "/api/delete_student");
        assert_eq!(student_photo_url(42), "/api/student_photo/42");
    }

    #[test]
    fn test_students_decodes_list() {
        let client = ApiClient::new(MockBackend::new().respond_json(
            200,
            r#"[{"id":1,"roll_no":"R1","name":"Jane","course":"CS","branch":"A","image_path":null}]"#,
        ));
        let students = tokio_test::block_on(client.students()).unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Jane");

        let requests = client.backend().requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/api/students");
        assert!(requests[0].body.is_none());
    }

    #[test]
    fn test_error_status_with_json_body_is_returned_as_status() {
        let client = ApiClient::new(
            MockBackend::new()
                .respond_json(401, r#"{"status":"error","message":"Invalid credentials"}"#),
        );
        let payload = FormPayload::new().text("email", "a@b.com").text("password", "x");
        let resp = tokio_test::block_on(client.post_status(Endpoint::Login, payload)).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_error_status_with_html_body_is_http_error() {
        let client = ApiClient::new(MockBackend::new().respond(RawResponse {
            status: 500,
            content_type: Some("text/html".to_string()),
            body: b"<h1>Internal Server Error</h1>".to_vec(),
        }));
        let err = tokio_test::block_on(client.logout()).unwrap_err();
        assert_eq!(err, ApiError::Http { status: 500 });
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let client = ApiClient::new(MockBackend::new().respond_json(200, "not json"));
        let err = tokio_test::block_on(client.students()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_scan_face_accepts_legacy_image_reply() {
        let client = ApiClient::new(MockBackend::new().respond(RawResponse {
            status: 200,
            content_type: Some("image/jpeg".to_string()),
            body: vec![0xFF, 0xD8, 0xFF],
        }));
        let payload = FormPayload::new().file("image", Upload::new("frame.jpg", "image/jpeg", vec![1]));
        let outcome = tokio_test::block_on(client.scan_face(payload)).unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::Annotated {
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF],
            }
        );
    }

    #[test]
    fn test_transport_error_propagates() {
        let client = ApiClient::new(
            MockBackend::new().fail(ApiError::Transport("Failed to fetch".to_string())),
        );
        let err = tokio_test::block_on(client.students()).unwrap_err();
        assert_eq!(err.to_string(), "network error: Failed to fetch");
    }
}
