use std::time::Duration;

use crate::{
    foundation::core::ElementId,
    platform::host::{FrameId, Host, HostEvent, ListenerId, ObserverId, ObserverSpec, TimerId},
};

/// How a controller ended up observing after `register`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RegisterOutcome {
    /// No targets were given; nothing is observed.
    Empty,
    /// Reduced motion: everything was revealed and nothing is observed.
    ReducedMotion,
    /// A native intersection observer drives updates.
    Observing,
    /// No native observer; scroll and resize events drive geometric checks.
    Polling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionState {
    Idle,
    Active,
    Closed,
}

/// Lifecycle owner of one viewport observer and every listener, timer and
/// frame request registered alongside it.
///
/// `K` tags timers with the purpose the owning controller scheduled them for.
/// Once [`ObservationSession::teardown`] returns, the session owns no ids, so
/// any late callback fails the ownership checks and is ignored.
#[derive(Debug)]
pub struct ObservationSession<K> {
    state: SessionState,
    observer: Option<ObserverId>,
    listeners: Vec<(ListenerId, HostEvent)>,
    timers: Vec<(TimerId, K)>,
    frame: Option<FrameId>,
}

impl<K: Copy + PartialEq> ObservationSession<K> {
    /// A session that has not been opened yet.
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            observer: None,
            listeners: Vec::new(),
            timers: Vec::new(),
            frame: None,
        }
    }

    /// Mark the session live. Reopening a closed session starts it empty.
    pub fn open(&mut self) {
        debug_assert!(self.observer.is_none() && self.listeners.is_empty());
        self.state = SessionState::Active;
    }

    /// `true` between `open` and `teardown`.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// `true` once the session has been torn down.
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Attach the session's observer.
    pub fn observe<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        spec: &ObserverSpec,
        targets: &[ElementId],
    ) -> ObserverId {
        if let Some(prev) = self.observer.take() {
            host.disconnect(prev);
        }
        let id = host.observe(spec, targets);
        self.observer = Some(id);
        id
    }

    /// `true` if `id` is this session's live observer.
    pub fn owns_observer(&self, id: ObserverId) -> bool {
        self.observer == Some(id)
    }

    /// `true` if an observer is attached.
    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Register a listener for `event`.
    pub fn listen<H: Host + ?Sized>(&mut self, host: &mut H, event: HostEvent) -> ListenerId {
        let id = host.add_listener(event);
        self.listeners.push((id, event));
        id
    }

    /// Event a listener owned by this session was registered for.
    pub fn event_for(&self, id: ListenerId) -> Option<HostEvent> {
        self.listeners
            .iter()
            .find_map(|&(l, e)| (l == id).then_some(e))
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Schedule a timer tagged with `kind`.
    pub fn schedule<H: Host + ?Sized>(&mut self, host: &mut H, kind: K, delay: Duration) -> TimerId {
        let id = host.set_timeout(delay);
        self.timers.push((id, kind));
        id
    }

    /// Cancel every pending timer tagged with `kind`.
    pub fn cancel<H: Host + ?Sized>(&mut self, host: &mut H, kind: K) {
        self.timers.retain(|&(id, k)| {
            if k == kind {
                host.clear_timeout(id);
                false
            } else {
                true
            }
        });
    }

    /// Claim an elapsed timer, returning its tag if this session owns it.
    pub fn take_timer(&mut self, id: TimerId) -> Option<K> {
        let pos = self.timers.iter().position(|&(t, _)| t == id)?;
        Some(self.timers.swap_remove(pos).1)
    }

    /// `true` if a timer tagged `kind` is pending.
    pub fn has_timer(&self, kind: K) -> bool {
        self.timers.iter().any(|&(_, k)| k == kind)
    }

    /// Request an animation frame unless one is already pending.
    ///
    /// Returns `true` if a new request was made.
    pub fn request_frame<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.frame.is_some() {
            return false;
        }
        self.frame = Some(host.request_frame());
        true
    }

    /// Claim an arrived frame, returning `true` if this session requested it.
    pub fn take_frame(&mut self, id: FrameId) -> bool {
        if self.frame == Some(id) {
            self.frame = None;
            true
        } else {
            false
        }
    }

    /// `true` if a frame request is pending.
    pub fn frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    /// Release everything the session registered. Safe to call repeatedly.
    ///
    /// Returns `false` when there was nothing left to release.
    pub fn teardown<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.state != SessionState::Active {
            return false;
        }
        if let Some(obs) = self.observer.take() {
            host.disconnect(obs);
        }
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        for (timer, _) in self.timers.drain(..) {
            host.clear_timeout(timer);
        }
        for (listener, _) in self.listeners.drain(..) {
            host.remove_listener(listener);
        }
        self.state = SessionState::Closed;
        true
    }
}

impl<K: Copy + PartialEq> Default for ObservationSession<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/session.rs"]
mod tests;
