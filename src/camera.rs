//! Camera capture for the live scan page.
//!
//! [`CameraCapture`] owns at most one stream. Acquisition is split into
//! `begin_acquire` / `complete_acquire` so a permission prompt that resolves
//! after the user has already left the page cannot leave a stream running.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::Upload;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera unavailable: permission denied")]
    PermissionDenied,
    #[error("camera unavailable: no camera found")]
    NoDevice,
    #[error("camera not ready yet, try again in a moment")]
    NotReady,
    /// The page was left before the camera came up.
    #[error("camera request superseded")]
    Superseded,
    #[error("camera error: {0}")]
    Capture(String),
}

/// Platform media access (`navigator.mediaDevices` in the browser).
#[async_trait(?Send)]
pub trait MediaDevices {
    type Stream;

    /// Request a video-only stream.
    async fn open_video(&self) -> Result<Self::Stream, CameraError>;

    /// Attach the stream to the live preview element.
    fn bind_preview(&self, stream: &Self::Stream);

    /// Stop every track and detach the preview.
    fn stop(&self, stream: Self::Stream);
}

/// Something a frame can be rasterized from (the preview `<video>`).
pub trait FrameSource {
    /// Intrinsic video size; `(0, 0)` until the first frame arrives.
    fn frame_size(&self) -> (u32, u32);

    fn encode_jpeg(&self, width: u32, height: u32) -> Result<Vec<u8>, CameraError>;
}

/// Pairs a pending acquisition with the capture state it was started under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcquireTicket(u64);

pub struct CameraCapture<M: MediaDevices> {
    devices: M,
    stream: Option<M::Stream>,
    epoch: u64,
}

impl<M: MediaDevices> CameraCapture<M> {
    pub fn new(devices: M) -> Self {
        Self {
            devices,
            stream: None,
            epoch: 0,
        }
    }

    pub fn devices(&self) -> &M {
        &self.devices
    }

    pub fn is_held(&self) -> bool {
        self.stream.is_some()
    }

    /// Start an acquisition. Any held stream is released first.
    pub fn begin_acquire(&mut self) -> AcquireTicket {
        self.release();
        AcquireTicket(self.epoch)
    }

    /// Finish an acquisition started with [`begin_acquire`](Self::begin_acquire).
    ///
    /// A stream that arrives after a release (or a newer acquisition) is
    /// stopped immediately and reported as [`CameraError::Superseded`].
    pub fn complete_acquire(
        &mut self,
        ticket: AcquireTicket,
        opened: Result<M::Stream, CameraError>,
    ) -> Result<(), CameraError> {
        if ticket.0 != self.epoch {
            if let Ok(stream) = opened {
                debug!("Camera stream arrived after release, stopping it");
                self.devices.stop(stream);
            }
            return Err(CameraError::Superseded);
        }
        match opened {
            Ok(stream) => {
                self.devices.bind_preview(&stream);
                self.stream = Some(stream);
                info!("Camera acquired");
                Ok(())
            }
            Err(e) => {
                warn!("Camera acquisition failed: {}", e);
                Err(e)
            }
        }
    }

    /// Stop the held stream, if any. Returns whether a stream was stopped.
    ///
    /// Also invalidates any acquisition still in flight.
    pub fn release(&mut self) -> bool {
        self.epoch += 1;
        match self.stream.take() {
            Some(stream) => {
                self.devices.stop(stream);
                info!("Camera released");
                true
            }
            None => false,
        }
    }

    /// Rasterize the current frame to a JPEG upload for `/api/scan_face`.
    /// Bind the held stream to the preview again, e.g. once the preview
    /// element exists. Returns whether a stream was held.
    pub fn rebind_preview(&self) -> bool {
        match &self.stream {
            Some(stream) => {
                self.devices.bind_preview(stream);
                true
            }
            None => false,
        }
    }

    pub fn capture_frame(&self, source: &impl FrameSource) -> Result<Upload, CameraError> {
        if self.stream.is_none() {
            return Err(CameraError::NotReady);
        }
        let (width, height) = source.frame_size();
        if width == 0 || height == 0 {
            return Err(CameraError::NotReady);
        }
        let bytes = source.encode_jpeg(width, height)?;
        debug!(width, height, bytes = bytes.len(), "Captured frame");
        Ok(Upload::new("capture.jpg", "image/jpeg", bytes))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Counts opens and stops; optionally denies permission.
    #[derive(Clone, Default)]
    pub struct MockDevices {
        pub opened: Rc<Cell<u32>>,
        pub stopped: Rc<Cell<u32>>,
        pub bound: Rc<Cell<u32>>,
        pub deny: bool,
    }

    impl MockDevices {
        pub fn live(&self) -> u32 {
            self.opened.get() - self.stopped.get()
        }
    }

    #[async_trait(?Send)]
    impl MediaDevices for MockDevices {
        type Stream = u32;

        async fn open_video(&self) -> Result<u32, CameraError> {
            if self.deny {
                return Err(CameraError::PermissionDenied);
            }
            self.opened.set(self.opened.get() + 1);
            Ok(self.opened.get())
        }

        fn bind_preview(&self, _stream: &u32) {
            self.bound.set(self.bound.get() + 1);
        }

        fn stop(&self, _stream: u32) {
            self.stopped.set(self.stopped.get() + 1);
        }
    }

    pub struct StillFrame(pub u32, pub u32);

    impl FrameSource for StillFrame {
        fn frame_size(&self) -> (u32, u32) {
            (self.0, self.1)
        }

        fn encode_jpeg(&self, _width: u32, _height: u32) -> Result<Vec<u8>, CameraError> {
            Ok(vec![0xFF, 0xD8, 0xFF, 0xD9])
        }
    }
}
