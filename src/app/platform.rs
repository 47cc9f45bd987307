//! Browser implementations of the router's boundaries: `fetch`, the history
//! API, `getUserMedia` and canvas capture.
//!
//! Off the browser (host builds, tests) these are inert: requests fail with
//! [`ApiError::Unavailable`], there is no camera and history calls do nothing.

use async_trait::async_trait;

use crate::api::{ApiError, ApiRequest, Backend, RawResponse};
use crate::camera::{CameraError, FrameSource, MediaDevices};
use crate::nav::Page;

/// `<video>` element the live scan page renders the preview into.
pub const LIVE_VIDEO_ID: &str = "live-video";

/// Same-origin `fetch` transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchBackend;

/// `navigator.mediaDevices`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserMedia;

#[cfg(target_arch = "wasm32")]
mod web {
    use base64::Engine;
    use js_sys::{Array, Uint8Array};
    use tracing::{debug, warn};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, DomException, FormData,
        HtmlCanvasElement, HtmlVideoElement, MediaStream, MediaStreamConstraints,
        MediaStreamTrack, PopStateEvent, Request, RequestInit, Response,
    };

    use super::*;
    use crate::api::{FormPayload, FormValue, HistoryState};

    fn js_message(value: &JsValue) -> String {
        value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{value:?}"))
    }

    fn form_data(payload: &FormPayload) -> Result<FormData, ApiError> {
        let transport = |e: JsValue| ApiError::Transport(js_message(&e));
        let form = FormData::new().map_err(transport)?;
        for (name, value) in payload.fields() {
            match value {
                FormValue::Text(text) => form.append_with_str(name, text).map_err(transport)?,
                FormValue::File(upload) => {
                    let parts = Array::new();
                    parts.push(&Uint8Array::from(upload.bytes.as_slice()));
                    let props = BlobPropertyBag::new();
                    props.set_type(&upload.content_type);
                    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props)
                        .map_err(transport)?;
                    form.append_with_blob_and_filename(name, &blob, &upload.file_name)
                        .map_err(transport)?;
                }
            }
        }
        Ok(form)
    }

    #[async_trait(?Send)]
    impl Backend for FetchBackend {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
            let transport = |e: JsValue| ApiError::Transport(js_message(&e));
            let window = web_sys::window().ok_or(ApiError::Unavailable("no window"))?;

            let init = RequestInit::new();
            init.set_method(request.method.as_str());
            if let Some(payload) = &request.body {
                let body: JsValue = form_data(payload)?.into();
                init.set_body(&body);
            }
            let req = Request::new_with_str_and_init(&request.path, &init).map_err(transport)?;

            let value = JsFuture::from(window.fetch_with_request(&req))
                .await
                .map_err(transport)?;
            let response: Response = value.dyn_into().map_err(transport)?;
            let content_type = response.headers().get("content-type").ok().flatten();
            let buffer = JsFuture::from(response.array_buffer().map_err(transport)?)
                .await
                .map_err(transport)?;

            Ok(RawResponse {
                status: response.status(),
                content_type,
                body: Uint8Array::new(&buffer).to_vec(),
            })
        }
    }

    fn camera_error(value: JsValue) -> CameraError {
        match value.dyn_ref::<DomException>().map(|e| e.name()) {
            Some(name) if name == "NotAllowedError" || name == "SecurityError" => {
                CameraError::PermissionDenied
            }
            Some(name) if name == "NotFoundError" || name == "OverconstrainedError" => {
                CameraError::NoDevice
            }
            _ => CameraError::Capture(js_message(&value)),
        }
    }

    fn live_video() -> Option<HtmlVideoElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(LIVE_VIDEO_ID)?
            .dyn_into::<HtmlVideoElement>()
            .ok()
    }

    #[async_trait(?Send)]
    impl MediaDevices for BrowserMedia {
        type Stream = MediaStream;

        async fn open_video(&self) -> Result<MediaStream, CameraError> {
            let devices = web_sys::window()
                .ok_or(CameraError::NoDevice)?
                .navigator()
                .media_devices()
                .map_err(|_| CameraError::NoDevice)?;

            let constraints = MediaStreamConstraints::new();
            constraints.set_video(&JsValue::TRUE);
            constraints.set_audio(&JsValue::FALSE);

            let promise = devices
                .get_user_media_with_constraints(&constraints)
                .map_err(camera_error)?;
            let stream = JsFuture::from(promise).await.map_err(camera_error)?;
            stream
                .dyn_into::<MediaStream>()
                .map_err(|v| CameraError::Capture(js_message(&v)))
        }

        fn bind_preview(&self, stream: &MediaStream) {
            match live_video() {
                Some(video) => {
                    video.set_src_object(Some(stream));
                    if let Err(e) = video.play() {
                        warn!("Video preview did not start: {}", js_message(&e));
                    }
                }
                None => warn!("Live preview element missing; stream held without preview"),
            }
        }

        fn stop(&self, stream: MediaStream) {
            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                    track.stop();
                }
            }
            if let Some(video) = live_video() {
                video.set_src_object(None);
            }
        }
    }

    /// The live preview, as a frame source.
    pub struct VideoFrame(HtmlVideoElement);

    impl VideoFrame {
        pub fn find() -> Option<Self> {
            live_video().map(VideoFrame)
        }
    }

    impl FrameSource for VideoFrame {
        fn frame_size(&self) -> (u32, u32) {
            (self.0.video_width(), self.0.video_height())
        }

        fn encode_jpeg(&self, width: u32, height: u32) -> Result<Vec<u8>, CameraError> {
            let capture = |e: JsValue| CameraError::Capture(js_message(&e));
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| CameraError::Capture("no document".to_string()))?;
            let canvas: HtmlCanvasElement = document
                .create_element("canvas")
                .map_err(capture)?
                .dyn_into()
                .map_err(|_| CameraError::Capture("not a canvas".to_string()))?;
            canvas.set_width(width);
            canvas.set_height(height);

            let context: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .map_err(capture)?
                .ok_or_else(|| CameraError::Capture("2d context unavailable".to_string()))?
                .dyn_into()
                .map_err(|_| CameraError::Capture("2d context unavailable".to_string()))?;
            context
                .draw_image_with_html_video_element_and_dw_and_dh(
                    &self.0,
                    0.0,
                    0.0,
                    f64::from(width),
                    f64::from(height),
                )
                .map_err(capture)?;

            let data_url = canvas
                .to_data_url_with_type("image/jpeg")
                .map_err(capture)?;
            let encoded = data_url
                .split_once(',')
                .map(|(_, data)| data)
                .ok_or_else(|| CameraError::Capture("malformed data URL".to_string()))?;
            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| CameraError::Capture(e.to_string()))
        }
    }

    fn history() -> Option<web_sys::History> {
        web_sys::window()?.history().ok()
    }

    fn history_state(page: Page) -> Option<JsValue> {
        serde_wasm_bindgen::to_value(&HistoryState {
            page: page.id().to_string(),
        })
        .ok()
    }

    pub fn push_history(page: Page) {
        let (Some(history), Some(state)) = (history(), history_state(page)) else {
            return;
        };
        if let Err(e) = history.push_state_with_url(&state, "", Some(page.fragment().as_str())) {
            warn!("pushState failed: {}", js_message(&e));
        }
    }

    pub fn replace_history(page: Page) {
        let (Some(history), Some(state)) = (history(), history_state(page)) else {
            return;
        };
        if let Err(e) = history.replace_state_with_url(&state, "", Some(page.fragment().as_str())) {
            warn!("replaceState failed: {}", js_message(&e));
        }
    }

    pub fn current_fragment() -> Option<String> {
        web_sys::window()?.location().hash().ok()
    }

    /// Register a `popstate` listener for the lifetime of the page.
    ///
    /// The callback gets the `page` from the entry's state; entries without
    /// state (hand-edited fragments) fall back to the URL fragment.
    pub fn on_pop_state(mut callback: impl FnMut(Option<String>) + 'static) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let listener = Closure::<dyn FnMut(PopStateEvent)>::new(move |event: PopStateEvent| {
            let page = serde_wasm_bindgen::from_value::<HistoryState>(event.state())
                .ok()
                .map(|state| state.page)
                .or_else(|| {
                    current_fragment()
                        .as_deref()
                        .and_then(crate::nav::fragment_id)
                        .map(str::to_string)
                });
            debug!(?page, "popstate");
            callback(page);
        });
        if let Err(e) =
            window.add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
        {
            warn!("Could not listen for popstate: {}", js_message(&e));
        }
        // Lives as long as the page
        listener.forget();
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{current_fragment, on_pop_state, push_history, replace_history, VideoFrame};

#[cfg(not(target_arch = "wasm32"))]
mod inert {
    use super::*;

    #[async_trait(?Send)]
    impl Backend for FetchBackend {
        async fn send(&self, _request: ApiRequest) -> Result<RawResponse, ApiError> {
            Err(ApiError::Unavailable("fetch requires a browser"))
        }
    }

    #[async_trait(?Send)]
    impl MediaDevices for BrowserMedia {
        type Stream = ();

        async fn open_video(&self) -> Result<(), CameraError> {
            Err(CameraError::NoDevice)
        }

        fn bind_preview(&self, _stream: &()) {}

        fn stop(&self, _stream: ()) {}
    }

    pub struct VideoFrame;

    impl VideoFrame {
        pub fn find() -> Option<Self> {
            None
        }
    }

    impl FrameSource for VideoFrame {
        fn frame_size(&self) -> (u32, u32) {
            (0, 0)
        }

        fn encode_jpeg(&self, _width: u32, _height: u32) -> Result<Vec<u8>, CameraError> {
            Err(CameraError::NoDevice)
        }
    }

    pub fn push_history(_page: Page) {}

    pub fn replace_history(_page: Page) {}

    pub fn current_fragment() -> Option<String> {
        None
    }

    pub fn on_pop_state(_callback: impl FnMut(Option<String>) + 'static) {}
}

#[cfg(not(target_arch = "wasm32"))]
pub use inert::{current_fragment, on_pop_state, push_history, replace_history, VideoFrame};
