//! Wire types for the backend API.

use serde::{Deserialize, Serialize};

/// `{status, message}` envelope returned by every mutating endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// One row of `/api/students`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub roll_no: String,
    pub name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// JSON reply from `/api/scan_face`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub student: Option<Student>,
}

impl ScanResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// What `/api/scan_face` sent back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    Json(ScanResponse),
    /// Older backends answer with an annotated image instead of JSON.
    Annotated {
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Value stored in `history.state`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryState {
    pub page: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_tolerates_missing_message() {
        let resp: StatusResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.message, None);

        let resp: StatusResponse =
            serde_json::from_str(r#"{"status":"error","message":"Invalid credentials"}"#).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_student_with_null_image() {
        let students: Vec<Student> = serde_json::from_str(
            r#"[{"id":1,"roll_no":"R1","name":"Jane","course":"CS","branch":"A","image_path":null}]"#,
        )
        .unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].image_path, None);
    }

    #[test]
    fn test_scan_response_with_student() {
        let resp: ScanResponse = serde_json::from_str(
            r#"{"status":"success","student":{"id":7,"roll_no":"R7","name":"Ann","course":"EE","branch":"B","image_path":"uploads/7.jpg"}}"#,
        )
        .unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.student.map(|s| s.id), Some(7));
    }
}
