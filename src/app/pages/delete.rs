//! Delete student by roll number.

use dioxus::prelude::*;

use crate::app::components::StatusText;
use crate::app::shell::submitter;
use crate::forms::{DeleteForm, StatusLine};

#[component]
pub fn Delete() -> Element {
    let mut roll_no = use_signal(String::new);
    let mut status = use_signal(|| None::<StatusLine>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = DeleteForm { roll_no: roll_no() };
        busy.set(true);

        spawn(async move {
            let outcome = submitter().submit(&form).await;
            busy.set(false);
            if outcome.is_accepted() {
                roll_no.set(String::new());
            }
            status.set(Some(outcome.status_line()));
        });
    };

    rsx! {
        article { class: "narrow",
            h2 { "Delete Student" }
            form { onsubmit: submit,
                input {
                    id: "delete_roll",
                    placeholder: "Enter Roll Number",
                    value: "{roll_no}",
                    oninput: move |e| roll_no.set(e.value()),
                }
                button { r#type: "submit", class: "secondary", disabled: busy(), "Delete" }
            }
            StatusText { line: status() }
        }
    }
}
