//! Live camera scan.
//!
//! The camera itself is started and stopped by the shell when the router
//! enters or leaves this page; this component only renders the preview and
//! submits captured frames.

use dioxus::prelude::*;

use super::scan::ScanResult;
use crate::app::components::StatusText;
use crate::app::platform::{VideoFrame, LIVE_VIDEO_ID};
use crate::app::shell::{submitter, use_shell};
use crate::camera::CameraError;
use crate::forms::{ScanForm, ScanReport, StatusLine};

#[component]
pub fn ScanLive() -> Element {
    let shell = use_shell();
    let mut report = use_signal(|| None::<ScanReport>);
    let mut status = use_signal(|| None::<StatusLine>);
    let mut busy = use_signal(|| false);

    let camera_status = shell.camera_status.read().clone();
    let camera_ready = shell.camera.read().is_held();

    let capture = move |_| {
        let frame = VideoFrame::find()
            .ok_or(CameraError::NotReady)
            .and_then(|source| shell.camera.read().capture_frame(&source));
        let upload = match frame {
            Ok(upload) => upload,
            Err(e) => {
                status.set(Some(StatusLine::error(e.to_string())));
                return;
            }
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
        h2 { "Live Scan" }
        StatusText { line: camera_status }
        video {
            id: LIVE_VIDEO_ID,
            class: "live-preview",
            autoplay: true,
            playsinline: true,
            muted: true,
            // The stream can arrive before this element is mounted
            onmounted: move |_| {
                shell.camera.peek().rebind_preview();
            },
        }
        div {
            button {
                disabled: !camera_ready || busy(),
                aria_busy: if busy() { "true" } else { "false" },
                onclick: capture,
                "Capture & Match"
            }
        }
        StatusText { line: status() }
        if let Some(report) = report() {
            ScanResult { report }
        }
    }
}
