//! Login form.

use dioxus::prelude::*;

use crate::app::components::StatusText;
use crate::app::shell::{submitter, use_shell};
use crate::forms::{LoginForm, StatusLine};
use crate::nav::Page;

#[component]
pub fn Login() -> Element {
    let shell = use_shell();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut status = use_signal(|| None::<StatusLine>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = LoginForm {
            email: email(),
            password: password(),
        };
        busy.set(true);
        status.set(Some(StatusLine::pending("Signing in…")));

        spawn(async move {
            let outcome = submitter().submit(&form).await;
            busy.set(false);
            if !shell.login(&outcome) {
                status.set(Some(outcome.status_line()));
            }
        });
    };

    rsx! {
        article { class: "narrow",
            h2 { "Login" }
            form { onsubmit: submit,
                input {
                    id: "login_email",
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "username",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                input {
                    id: "login_password",
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                button { r#type: "submit", disabled: busy(), aria_busy: if busy() { "true" } else { "false" }, "Login" }
            }
            StatusText { line: status() }
            small {
                "No account yet? "
                a {
                    href: "#signup",
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        shell.navigate(Page::Signup);
                    },
                    "Sign up"
                }
            }
        }
    }
}
