//! Face match from an uploaded photo.

use base64::Engine;
use dioxus::prelude::*;

use super::register::read_upload;
use crate::api::Upload;
use crate::app::components::StatusText;
use crate::app::shell::submitter;
use crate::forms::{ScanForm, ScanReport, StatusLine};

/// Inline `data:` URL for an annotated frame returned by the backend.
pub(super) fn data_url(upload: &Upload) -> String {
    format!(
        "data:{};base64,{}",
        upload.content_type,
        base64::engine::general_purpose::STANDARD.encode(&upload.bytes)
    )
}

/// Match result shared by the photo and live scan pages.
#[component]
pub(super) fn ScanResult(report: ScanReport) -> Element {
    let student = report.student.clone();
    let annotated = report.annotated.as_ref().map(data_url);

    rsx! {
        StatusText { line: Some(report.line.clone()) }
        if let Some(student) = student {
            article { id: "scan-match",
                header { strong { "{student.name}" } }
                p { "Roll No: {student.roll_no}" }
                p { "Course: {student.course} / {student.branch}" }
            }
        }
        if let Some(src) = annotated {
            img { class: "live-preview", src: "{src}", alt: "Scan result" }
        }
    }
}

#[component]
pub fn Scan() -> Element {
    let mut image = use_signal(|| None::<Upload>);
    let mut report = use_signal(|| None::<ScanReport>);
    let mut status = use_signal(|| None::<StatusLine>);
    let mut busy = use_signal(|| false);

    let pick = move |evt: FormEvent| {
        spawn(async move {
            image.set(read_upload(&evt).await);
            report.set(None);
        });
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(upload) = image() else {
            status.set(Some(StatusLine::error("⚠ Choose a photo first")));
            return;
        };
        status.set(Some(StatusLine::pending("Matching…")));
        busy.set(true);

        spawn(async move {
            let result = submitter().scan(&ScanForm { image: upload }).await;
            busy.set(false);
            status.set(None);
            report.set(Some(result));
        });
    };

    rsx! {
        article { class: "medium",
            h2 { "Scan Photo" }
            form { onsubmit: submit,
                input { id: "scan_image", r#type: "file", accept: "image/*", onchange: pick }
                button { r#type: "submit", disabled: busy(), "Scan" }
            }
            StatusText { line: status() }
            if let Some(report) = report() {
                ScanResult { report }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        let upload = Upload::new("r.png", "image/png", vec![1, 2, 3]);
        assert_eq!(data_url(&upload), "data:image/png;base64,AQID");
    }
}
