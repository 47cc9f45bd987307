//! Account creation form.

use dioxus::prelude::*;

use crate::app::components::StatusText;
use crate::app::shell::{submitter, use_shell};
use crate::forms::{SignupForm, StatusLine};
use crate::nav::Page;
use crate::validate::MIN_PASSWORD_LEN;

#[component]
pub fn Signup() -> Element {
    let shell = use_shell();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut status = use_signal(|| None::<StatusLine>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = SignupForm {
            email: email(),
            password: password(),
            confirm: confirm(),
        };
        busy.set(true);
        status.set(Some(StatusLine::pending("Creating account…")));

        spawn(async move {
            let outcome = submitter().submit(&form).await;
            busy.set(false);
            if outcome.is_accepted() {
                password.set(String::new());
                confirm.set(String::new());
            }
            status.set(Some(outcome.status_line()));
        });
    };

    rsx! {
        article { class: "narrow",
            h2 { "Sign Up" }
            form { onsubmit: submit,
                input {
                    id: "signup_email",
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "username",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                input {
                    id: "signup_password",
                    r#type: "password",
                    placeholder: "Password (min {MIN_PASSWORD_LEN} characters)",
                    autocomplete: "new-password",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                input {
                    id: "signup_confirm",
                    r#type: "password",
                    placeholder: "Confirm password",
                    autocomplete: "new-password",
                    value: "{confirm}",
                    oninput: move |e| confirm.set(e.value()),
                }
                button { r#type: "submit", disabled: busy(), "Create Account" }
            }
            StatusText { line: status() }
            small {
                "Already registered? "
                a {
                    href: "#login",
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        shell.navigate(Page::Login);
                    },
                    "Login"
                }
            }
        }
    }
}
