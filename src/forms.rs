//! Form submitter: validate, post, and turn the reply into a status line.

use tracing::{info, warn};

use crate::api::{
    ApiClient, ApiError, Backend, Endpoint, FormPayload, ScanOutcome, Student, Upload,
};
use crate::nav::{Router, Transition};
use crate::validate::{self, ValidationError};

/// Styling for a status element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Pending,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::Success => "status-ok",
            Tone::Error => "status-err",
            Tone::Pending => "status-pending",
        }
    }
}

/// Text written into a form's status element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub tone: Tone,
    pub text: String,
}

impl StatusLine {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }

    pub fn pending(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Pending,
            text: text.into(),
        }
    }
}

/// A form that posts to one fixed endpoint.
pub trait Form {
    const ENDPOINT: Endpoint;
    /// Shown when the backend reports success without a message.
    const SUCCESS_TEXT: &'static str;

    fn validate(&self) -> Result<(), ValidationError>;
    fn payload(&self) -> FormPayload;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Form for LoginForm {
    const ENDPOINT: Endpoint = Endpoint::Login;
    const SUCCESS_TEXT: &'static str = "Login successful";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::email(&self.email)?;
        validate::login_password(&self.password)
    }

    fn payload(&self) -> FormPayload {
        FormPayload::new()
            .text("email", self.email.trim())
            .text("password", self.password.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    /// Client-side only, never sent.
    pub confirm: String,
}

impl Form for SignupForm {
    const ENDPOINT: Endpoint = Endpoint::Signup;
    const SUCCESS_TEXT: &'static str = "Account created. You can log in now.";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::email(&self.email)?;
        validate::new_password(&self.password)?;
        validate::password_confirmation(&self.password, &self.confirm)
    }

    fn payload(&self) -> FormPayload {
        FormPayload::new()
            .text("email", self.email.trim())
            .text("password", self.password.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub roll_no: String,
    pub name: String,
    pub course: String,
    pub branch: String,
    pub photo: Option<Upload>,
}

impl Form for StudentForm {
    const ENDPOINT: Endpoint = Endpoint::SaveStudent;
    const SUCCESS_TEXT: &'static str = "Student saved";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::roll_no(&self.roll_no)?;
        validate::name(&self.name)?;
        validate::label("Course", &self.course)?;
        validate::label("Branch", &self.branch)?;
        if let Some(photo) = &self.photo {
            validate::photo(&photo.content_type, photo.bytes.len())?;
        }
        Ok(())
    }

    fn payload(&self) -> FormPayload {
        let payload = FormPayload::new()
            .text("roll_no", self.roll_no.trim())
            .text("name", self.name.trim())
            .text("course", self.course.trim())
            .text("branch", self.branch.trim());
        match &self.photo {
            Some(photo) => payload.file("photo", photo.clone()),
            None => payload,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteForm {
    pub roll_no: String,
}

impl Form for DeleteForm {
    const ENDPOINT: Endpoint = Endpoint::DeleteStudent;
    const SUCCESS_TEXT: &'static str = "Student deleted";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::roll_no(&self.roll_no)
    }

    fn payload(&self) -> FormPayload {
        FormPayload::new().text("roll_no", self.roll_no.trim())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanForm {
    pub image: Upload,
}

impl Form for ScanForm {
    const ENDPOINT: Endpoint = Endpoint::ScanFace;
    const SUCCESS_TEXT: &'static str = "Attendance marked";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::photo(&self.image.content_type, self.image.bytes.len())
    }

    fn payload(&self) -> FormPayload {
        FormPayload::new().file("image", self.image.clone())
    }
}

/// How a submission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Caught before the network call.
    Invalid(ValidationError),
    /// Transport or decode failure.
    Failed(ApiError),
    /// Backend answered with a non-success status.
    Rejected(String),
    Accepted(String),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn status_line(&self) -> StatusLine {
        match self {
            Outcome::Invalid(e) => StatusLine::error(format!("⚠ {e}")),
            Outcome::Failed(e) => StatusLine::error(format!("Request failed: {e}")),
            Outcome::Rejected(message) => StatusLine::error(message.clone()),
            Outcome::Accepted(message) => StatusLine::success(message.clone()),
        }
    }
}

/// Result of a face scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanReport {
    pub line: StatusLine,
    pub student: Option<Student>,
    /// Annotated frame from backends that reply with an image.
    pub annotated: Option<Upload>,
}

/// Move the router into the authenticated state after an accepted login.
pub fn apply_login(outcome: &Outcome, router: &mut Router) -> Option<Transition> {
    outcome.is_accepted().then(|| router.login_succeeded())
}

pub struct Submitter<B> {
    client: ApiClient<B>,
}

impl<B: Backend> Submitter<B> {
    pub fn new(client: ApiClient<B>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<B> {
        &self.client
    }

    pub async fn submit<F: Form>(&self, form: &F) -> Outcome {
        if let Err(e) = form.validate() {
            info!(endpoint = F::ENDPOINT.path(), "Rejected before submit: {}", e);
            return Outcome::Invalid(e);
        }
        match self.client.post_status(F::ENDPOINT, form.payload()).await {
            Ok(resp) if resp.is_success() => Outcome::Accepted(
                resp.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| F::SUCCESS_TEXT.to_string()),
            ),
            Ok(resp) => Outcome::Rejected(
                resp.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Request failed".to_string()),
            ),
            Err(e) => {
                warn!(endpoint = F::ENDPOINT.path(), "Submit failed: {}", e);
                Outcome::Failed(e)
            }
        }
    }

    /// Post `/api/logout`. The caller logs the router out regardless.
    pub async fn logout(&self) -> Outcome {
        match self.client.logout().await {
            Ok(resp) if resp.is_success() => Outcome::Accepted("Logged out".to_string()),
            Ok(resp) => Outcome::Rejected(resp.message.unwrap_or_else(|| resp.status.clone())),
            Err(e) => {
                warn!("Logout request failed: {}", e);
                Outcome::Failed(e)
            }
        }
    }

    pub async fn scan(&self, form: &ScanForm) -> ScanReport {
        if let Err(e) = form.validate() {
            return ScanReport {
                line: Outcome::Invalid(e).status_line(),
                student: None,
                annotated: None,
            };
        }
        match self.client.scan_face(form.payload()).await {
            Ok(ScanOutcome::Json(resp)) if resp.is_success() => {
                let text = match (&resp.student, &resp.message) {
                    (Some(s), _) => format!("Match: {} ({})", s.name, s.roll_no),
                    (None, Some(m)) if !m.is_empty() => m.clone(),
                    _ => ScanForm::SUCCESS_TEXT.to_string(),
                };
                ScanReport {
                    line: StatusLine::success(text),
                    student: resp.student,
                    annotated: None,
                }
            }
            Ok(ScanOutcome::Json(resp)) => ScanReport {
                line: StatusLine::error(
                    resp.message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| "No match found".to_string()),
                ),
                student: None,
                annotated: None,
            },
            Ok(ScanOutcome::Annotated {
                content_type,
                bytes,
            }) => ScanReport {
                line: StatusLine::success("Scan complete"),
                student: None,
                annotated: Some(Upload::new("scan-result", content_type, bytes)),
            },
            Err(e) => {
                warn!("Scan failed: {}", e);
                ScanReport {
                    line: Outcome::Failed(e).status_line(),
                    student: None,
                    annotated: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::{FormValue, Method, RawResponse};
    use crate::nav::{Page, View};

    fn submitter(backend: MockBackend) -> Submitter<MockBackend> {
        Submitter::new(ApiClient::new(backend))
    }

    fn backend_of(submitter: &Submitter<MockBackend>) -> &MockBackend {
        submitter.client().backend()
    }

    #[test]
    fn test_successful_login_lands_on_dashboard() {
        let submitter = submitter(MockBackend::new().respond_json(200, r#"{"status":"success"}"#));
        let mut router = Router::new();
        router.start(None);

        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        };
        let outcome = tokio_test::block_on(submitter.submit(&form));
        assert_eq!(outcome, Outcome::Accepted("Login successful".to_string()));

        let transition = apply_login(&outcome, &mut router).expect("login accepted");
        assert_eq!(transition.to, View::Page(Page::Dashboard));
        assert!(router.logged_in());

        let requests = backend_of(&submitter).requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/login");
        assert_eq!(requests[0].method, Method::Post);
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body.get_text("email"), Some("a@b.com"));
        assert_eq!(body.get_text("password"), Some("secret"));
    }

    #[test]
    fn test_rejected_login_keeps_session_anonymous() {
        let submitter = submitter(
            MockBackend::new()
                .respond_json(200, r#"{"status":"error","message":"Invalid credentials"}"#),
        );
        let mut router = Router::new();
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "wrong".to_string(),
        };
        let outcome = tokio_test::block_on(submitter.submit(&form));
        assert_eq!(outcome.status_line(), StatusLine::error("Invalid credentials"));
        assert!(apply_login(&outcome, &mut router).is_none());
        assert!(!router.logged_in());
    }

    #[test]
    fn test_empty_roll_number_never_hits_network() {
        let submitter = submitter(MockBackend::new());
        let outcome = tokio_test::block_on(submitter.submit(&DeleteForm::default()));
        assert_eq!(
            outcome,
            Outcome::Invalid(ValidationError::Missing("Roll number"))
        );
        assert_eq!(outcome.status_line().tone, Tone::Error);
        assert_eq!(outcome.status_line().text, "⚠ Roll number is required");
        assert!(backend_of(&submitter).requests().is_empty());
    }

    #[test]
    fn test_delete_reports_backend_message() {
        let submitter = submitter(
            MockBackend::new()
                .respond_json(200, r#"{"status":"success","message":"Deleted R1"}"#),
        );
        let form = DeleteForm {
            roll_no: " R1 ".to_string(),
        };
        let outcome = tokio_test::block_on(submitter.submit(&form));
        assert_eq!(outcome.status_line(), StatusLine::success("Deleted R1"));
        let requests = backend_of(&submitter).requests();
        assert_eq!(
            requests[0].body.as_ref().and_then(|b| b.get_text("roll_no")),
            Some("R1")
        );
    }

    #[test]
    fn test_signup_requires_matching_confirmation_and_omits_it() {
        let mismatch = SignupForm {
            email: "new@frass.local".to_string(),
            password: "password1".to_string(),
            confirm: "password2".to_string(),
        };
        assert_eq!(mismatch.validate(), Err(ValidationError::PasswordMismatch));

        let ok = SignupForm {
            confirm: "password1".to_string(),
            ..mismatch
        };
        assert_eq!(ok.validate(), Ok(()));
        assert_eq!(ok.payload().field_names(), vec!["email", "password"]);
    }

    #[test]
    fn test_student_payload_carries_optional_photo() {
        let mut form = StudentForm {
            roll_no: "R1".to_string(),
            name: "Jane".to_string(),
            course: "CS".to_string(),
            branch: "A".to_string(),
            photo: None,
        };
        assert_eq!(
            form.payload().field_names(),
            vec!["roll_no", "name", "course", "branch"]
        );

        form.photo = Some(Upload::new("jane.png", "image/png", vec![1, 2, 3]));
        let payload = form.payload();
        assert!(matches!(
            payload.fields().last(),
            Some(("photo", FormValue::File(_)))
        ));
        assert_eq!(payload.get_file("photo").map(|u| u.bytes.len()), Some(3));
    }

    #[test]
    fn test_student_photo_must_be_an_image() {
        let form = StudentForm {
            roll_no: "R1".to_string(),
            name: "Jane".to_string(),
            course: "CS".to_string(),
            branch: "A".to_string(),
            photo: Some(Upload::new("cv.pdf", "application/pdf", vec![1])),
        };
        let submitter = submitter(MockBackend::new());
        let outcome = tokio_test::block_on(submitter.submit(&form));
        assert_eq!(outcome, Outcome::Invalid(ValidationError::PhotoType));
        assert!(backend_of(&submitter).requests().is_empty());
    }

    #[test]
    fn test_transport_failure_is_reported_once() {
        let submitter = submitter(
            MockBackend::new().fail(ApiError::Transport("Failed to fetch".to_string())),
        );
        let form = DeleteForm {
            roll_no: "R1".to_string(),
        };
        let outcome = tokio_test::block_on(submitter.submit(&form));
        assert_eq!(
            outcome.status_line(),
            StatusLine::error("Request failed: network error: Failed to fetch")
        );
        assert_eq!(backend_of(&submitter).requests().len(), 1);
    }

    #[test]
    fn test_scan_match_names_student() {
        let submitter = submitter(MockBackend::new().respond_json(
            200,
            r#"{"status":"success","student":{"id":3,"roll_no":"R3","name":"Ravi","course":"ME","branch":"C","image_path":null}}"#,
        ));
        let form = ScanForm {
            image: Upload::new("frame.jpg", "image/jpeg", vec![0xFF, 0xD8]),
        };
        let report = tokio_test::block_on(submitter.scan(&form));
        assert_eq!(report.line, StatusLine::success("Match: Ravi (R3)"));
        assert_eq!(report.student.map(|s| s.id), Some(3));
        let requests = backend_of(&submitter).requests();
        assert_eq!(requests[0].path, "/api/scan_face");
        assert!(requests[0].body.as_ref().unwrap().get_file("image").is_some());
    }

    #[test]
    fn test_scan_no_match() {
        let submitter = submitter(
            MockBackend::new().respond_json(200, r#"{"status":"fail","message":"Face not recognised"}"#),
        );
        let form = ScanForm {
            image: Upload::new("frame.jpg", "image/jpeg", vec![0xFF]),
        };
        let report = tokio_test::block_on(submitter.scan(&form));
        assert_eq!(report.line, StatusLine::error("Face not recognised"));
        assert!(report.student.is_none());
    }

    #[test]
    fn test_scan_legacy_image_reply() {
        let submitter = submitter(MockBackend::new().respond(RawResponse {
            status: 200,
            content_type: Some("image/png".to_string()),
            body: vec![0x89, 0x50],
        }));
        let form = ScanForm {
            image: Upload::new("frame.jpg", "image/jpeg", vec![0xFF]),
        };
        let report = tokio_test::block_on(submitter.scan(&form));
        assert_eq!(report.line.tone, Tone::Success);
        assert_eq!(
            report.annotated.map(|u| u.content_type),
            Some("image/png".to_string())
        );
    }

    #[test]
    fn test_logout_reports_failure_without_panicking() {
        let submitter = submitter(MockBackend::new().respond(RawResponse {
            status: 502,
            content_type: Some("text/plain".to_string()),
            body: b"Bad Gateway".to_vec(),
        }));
        let outcome = tokio_test::block_on(submitter.logout());
        assert_eq!(outcome, Outcome::Failed(ApiError::Http { status: 502 }));
    }
}
