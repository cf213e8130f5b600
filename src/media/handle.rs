use crate::foundation::{core::ElementId, error::PlaybackError};

/// Playback surface of one media element.
pub trait MediaHandle {
    /// `true` while the element is not playing.
    fn is_paused(&self) -> bool;

    /// Ask the element to start playing. May be refused by platform policy.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback.
    fn pause(&mut self);

    /// Mute or unmute the element.
    fn set_muted(&mut self, muted: bool);

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Media duration in seconds, once metadata is known.
    fn duration(&self) -> Option<f64>;

    /// Move the playback position.
    fn seek(&mut self, secs: f64);
}

/// Outcome of asking a handle to start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The handle was paused and is now playing.
    Started,
    /// The handle was already playing; nothing was requested.
    AlreadyPlaying,
    /// The platform refused; the next qualifying transition tries again.
    Deferred(PlaybackError),
}

impl PlaybackResult {
    /// `true` if the handle is playing after the request.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Started | Self::AlreadyPlaying)
    }
}

/// Start `media` if it is paused. Refusals are returned, never retried here.
pub fn start<M: MediaHandle + ?Sized>(media: &mut M) -> PlaybackResult {
    if !media.is_paused() {
        return PlaybackResult::AlreadyPlaying;
    }
    match media.play() {
        Ok(()) => PlaybackResult::Started,
        Err(e) => {
            tracing::trace!(error = %e, "playback deferred");
            PlaybackResult::Deferred(e)
        }
    }
}

/// Pause `media` if it is playing. Returns `true` if it was playing.
pub fn stop<M: MediaHandle + ?Sized>(media: &mut M) -> bool {
    if media.is_paused() {
        return false;
    }
    media.pause();
    true
}

/// A media-bearing card: the observed element and the media it controls.
#[derive(Debug)]
pub struct MediaCard<M> {
    /// Observed card element.
    pub id: ElementId,
    /// Media handle the card controls.
    pub media: M,
}

impl<M> MediaCard<M> {
    /// Pair a card element with its media handle.
    pub fn new(id: ElementId, media: M) -> Self {
        Self { id, media }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/handle.rs"]
mod tests;
