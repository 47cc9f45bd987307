//! Add / update student form.

use dioxus::prelude::*;
use tracing::warn;

use crate::api::Upload;
use crate::app::components::StatusText;
use crate::app::shell::submitter;
use crate::forms::{StatusLine, StudentForm};

/// Browsers leave `type` empty for some files; fall back to the extension.
pub(super) fn image_type(file_name: &str, reported: Option<String>) -> String {
    reported.filter(|ct| !ct.is_empty()).unwrap_or_else(|| {
        mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string()
    })
}

/// Read the first selected file of a file input.
pub(super) async fn read_upload(evt: &FormEvent) -> Option<Upload> {
    let file = evt.files().into_iter().next()?;
    let name = file.name();
    let content_type = image_type(&name, file.content_type());
    match file.read_bytes().await {
        Ok(bytes) => Some(Upload::new(name, content_type, bytes.to_vec())),
        Err(e) => {
            warn!("Could not read {}: {}", name, e);
            None
        }
    }
}

#[component]
pub fn Register() -> Element {
    let mut roll_no = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut course = use_signal(String::new);
    let mut branch = use_signal(String::new);
    let mut photo = use_signal(|| None::<Upload>);
    let mut status = use_signal(|| None::<StatusLine>);
    let mut busy = use_signal(|| false);

    let pick_photo = move |evt: FormEvent| {
        spawn(async move {
            photo.set(read_upload(&evt).await);
        });
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = StudentForm {
            roll_no: roll_no(),
            name: name(),
            course: course(),
            branch: branch(),
            photo: photo(),
        };
        busy.set(true);
        status.set(Some(StatusLine::pending("Saving…")));

        spawn(async move {
            let outcome = submitter().submit(&form).await;
            busy.set(false);
            status.set(Some(outcome.status_line()));
        });
    };

    let photo_label = photo
        .read()
        .as_ref()
        .map(|p| format!("{} ({} KB)", p.file_name, p.bytes.len().div_ceil(1024)))
        .unwrap_or_else(|| "No photo selected".to_string());

    rsx! {
        article { class: "medium",
            h2 { "Add / Update Student" }
            form { onsubmit: submit,
                input {
                    id: "roll_no",
                    placeholder: "Roll No",
                    value: "{roll_no}",
                    oninput: move |e| roll_no.set(e.value()),
                }
                input {
                    id: "name",
                    placeholder: "Name",
                    value: "{name}",
                    oninput: move |e| name.set(e.value()),
                }
                div { class: "grid",
                    input {
                        id: "course",
                        placeholder: "Course",
                        value: "{course}",
                        oninput: move |e| course.set(e.value()),
                    }
                    input {
                        id: "branch",
                        placeholder: "Branch",
                        value: "{branch}",
                        oninput: move |e| branch.set(e.value()),
                    }
                }
                label { r#for: "photo",
                    "Photo (optional)"
                    input {
                        id: "photo",
                        r#type: "file",
                        accept: "image/*",
                        onchange: pick_photo,
                    }
                }
                small { "{photo_label}" }
                button { r#type: "submit", disabled: busy(), "Save" }
            }
            StatusText { line: status() }
        }
    }
}
