use std::time::Duration;

use crate::{
    config::options::MediaOptions,
    media::handle::{MediaHandle, PlaybackResult, start, stop},
    platform::{
        host::{Host, HostCallback},
        session::ObservationSession,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Autoplay;

/// Demo-video overlay: starts muted playback shortly after opening and pauses
/// on close.
///
/// The short delay lets the host mount the overlay's media element before
/// playback is requested.
#[derive(Debug)]
pub struct Lightbox<M> {
    media: M,
    session: ObservationSession<Autoplay>,
    delay: Duration,
}

impl<M: MediaHandle> Lightbox<M> {
    /// A closed lightbox around `media`.
    pub fn new(media: M, options: &MediaOptions) -> Self {
        Self {
            media,
            session: ObservationSession::new(),
            delay: options.lightbox_autoplay(),
        }
    }

    /// Open the overlay and schedule autoplay. Returns `false` if already open.
    pub fn open<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.session.is_active() {
            return false;
        }
        self.session.open();
        self.session.schedule(host, Autoplay, self.delay);
        true
    }

    /// Close the overlay, cancelling a pending autoplay and pausing playback.
    /// Returns `false` if already closed.
    pub fn close<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.session.teardown(host) {
            return false;
        }
        stop(&mut self.media);
        true
    }

    /// Process one host callback; returns the autoplay outcome when the
    /// autoplay timer fires.
    pub fn handle(&mut self, callback: &HostCallback) -> Option<PlaybackResult> {
        let HostCallback::Timer(timer) = callback else {
            return None;
        };
        self.session.take_timer(*timer)?;
        self.media.set_muted(true);
        Some(start(&mut self.media))
    }

    /// `true` while open.
    pub fn is_open(&self) -> bool {
        self.session.is_active()
    }

    /// The overlay's media handle.
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Give the media handle back.
    pub fn into_media(self) -> M {
        self.media
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/lightbox.rs"]
mod tests;
