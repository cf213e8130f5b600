use std::{cell::RefCell, rc::Rc};

use crate::{
    foundation::error::PlaybackError,
    media::handle::MediaHandle,
};

/// How a [`SimMedia`] answers `play()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoplayPolicy {
    /// Every request succeeds.
    #[default]
    Allow,
    /// Requests succeed only while muted.
    MutedOnly,
    /// Every request is refused.
    Deny,
}

#[derive(Debug)]
struct SimMediaState {
    paused: bool,
    muted: bool,
    time: f64,
    duration: Option<f64>,
    policy: AutoplayPolicy,
    play_requests: u32,
    pause_requests: u32,
}

/// Scriptable in-memory [`MediaHandle`].
///
/// Clones share state, like references to one DOM node, so a test can keep a
/// clone after moving the original into a controller.
#[derive(Clone, Debug)]
pub struct SimMedia {
    state: Rc<RefCell<SimMediaState>>,
}

impl SimMedia {
    /// A paused, unmuted element with unknown duration.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SimMediaState {
                paused: true,
                muted: false,
                time: 0.0,
                duration: None,
                policy: AutoplayPolicy::Allow,
                play_requests: 0,
                pause_requests: 0,
            })),
        }
    }

    /// A paused, muted element (preview cards ship muted).
    pub fn muted() -> Self {
        let m = Self::new();
        m.state.borrow_mut().muted = true;
        m
    }

    /// Set the autoplay policy.
    pub fn with_policy(self, policy: AutoplayPolicy) -> Self {
        self.set_policy(policy);
        self
    }

    /// Change the autoplay policy.
    pub fn set_policy(&self, policy: AutoplayPolicy) {
        self.state.borrow_mut().policy = policy;
    }

    /// Report loaded metadata.
    pub fn set_duration(&self, secs: f64) {
        self.state.borrow_mut().duration = Some(secs);
    }

    /// `true` while playing.
    pub fn is_playing(&self) -> bool {
        !self.state.borrow().paused
    }

    /// Current mute state.
    pub fn is_muted(&self) -> bool {
        self.state.borrow().muted
    }

    /// Number of `play()` calls seen.
    pub fn play_requests(&self) -> u32 {
        self.state.borrow().play_requests
    }

    /// Number of `pause()` calls seen.
    pub fn pause_requests(&self) -> u32 {
        self.state.borrow().pause_requests
    }
}

impl Default for SimMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaHandle for SimMedia {
    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut s = self.state.borrow_mut();
        s.play_requests += 1;
        match s.policy {
            AutoplayPolicy::Allow => {}
            AutoplayPolicy::MutedOnly if s.muted => {}
            AutoplayPolicy::MutedOnly | AutoplayPolicy::Deny => {
                return Err(PlaybackError::NotAllowed(
                    "play() requires user activation".to_owned(),
                ));
            }
        }
        s.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.pause_requests += 1;
        s.paused = true;
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().time
    }

    fn duration(&self) -> Option<f64> {
        self.state.borrow().duration
    }

    fn seek(&mut self, secs: f64) {
        self.state.borrow_mut().time = secs;
    }
}
