use crate::{
    foundation::math::clamp01,
    media::handle::{MediaHandle, PlaybackResult, start},
};

/// Format seconds as `M:SS`. Non-finite or negative input renders `0:00`.
pub fn format_timestamp(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_owned();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Custom play/pause/seek controls for a project detail video.
#[derive(Debug)]
pub struct PlayerControls<M> {
    media: M,
}

impl<M: MediaHandle> PlayerControls<M> {
    /// Wrap a media handle.
    pub fn new(media: M) -> Self {
        Self { media }
    }

    /// The media became playable: attempt muted autoplay.
    pub fn on_can_play(&mut self) -> PlaybackResult {
        self.media.set_muted(true);
        start(&mut self.media)
    }

    /// Toggle playback. Returns the start outcome when a start was requested.
    pub fn toggle(&mut self) -> Option<PlaybackResult> {
        if self.media.is_paused() {
            Some(start(&mut self.media))
        } else {
            self.media.pause();
            None
        }
    }

    /// Seek to `secs`, clamped to the known duration. Returns the applied time.
    pub fn seek(&mut self, secs: f64) -> f64 {
        let mut t = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        if let Some(d) = self.duration() {
            t = t.min(d);
        }
        self.media.seek(t);
        t
    }

    /// `true` while playing.
    pub fn is_playing(&self) -> bool {
        !self.media.is_paused()
    }

    /// Known, finite duration in seconds.
    pub fn duration(&self) -> Option<f64> {
        self.media.duration().filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Playback position as a fraction of the duration; `0` while unknown.
    pub fn progress(&self) -> f64 {
        match self.duration() {
            Some(d) => clamp01(self.media.current_time() / d),
            None => 0.0,
        }
    }

    /// `elapsed / total` label for the control bar.
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_timestamp(self.media.current_time()),
            format_timestamp(self.duration().unwrap_or(0.0))
        )
    }

    /// The wrapped media handle.
    pub fn media(&self) -> &M {
        &self.media
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/player.rs"]
mod tests;
