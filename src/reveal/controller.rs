use std::{collections::HashMap, time::Duration};

use crate::{
    config::options::RevealOptions,
    foundation::{
        core::{ElementId, Rect, ScrollDirection},
        error::{ScrollcueError, ScrollcueResult},
        math::{FADE_EPSILON, fade_ratio, in_view_with_fudge, visible_height},
    },
    platform::{
        host::{Host, HostCallback, HostEvent, IntersectionEntry, ObserverSpec},
        profile::PlatformProfile,
        session::{ObservationSession, RegisterOutcome},
    },
    reveal::{
        direction::ScrollTracker,
        presentation::{Presentation, RevealState, RevealUpdate},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevealTimer {
    Bailout,
    ViewportSettle,
}

#[derive(Clone, Copy, Debug)]
struct RevealTarget {
    id: ElementId,
    presentation: Presentation,
    ever_shown: bool,
}

/// Settings resolved from [`RevealOptions`] and the [`PlatformProfile`] at
/// registration time.
#[derive(Clone, Copy, Debug)]
struct Resolved {
    threshold: f64,
    toggle_out: bool,
    fudge_top: f64,
    fudge_bottom: f64,
    force_reveal_on_bailout: bool,
    settle_delay: Duration,
}

impl Default for Resolved {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            toggle_out: false,
            fudge_top: 0.0,
            fudge_bottom: 0.0,
            force_reveal_on_bailout: false,
            settle_delay: Duration::ZERO,
        }
    }
}

/// Scroll-reveal controller.
///
/// Reveals targets as they scroll into view. With toggle-out enabled, targets
/// leaving through the viewport bottom while the user scrolls up fade out
/// progressively and are re-armed for another reveal once fully gone.
#[derive(Debug, Default)]
pub struct RevealController {
    session: ObservationSession<RevealTimer>,
    targets: Vec<RevealTarget>,
    index: HashMap<ElementId, usize>,
    tracker: ScrollTracker,
    mode: Option<RegisterOutcome>,
    cfg: Resolved,
    prime_on_frame: bool,
}

impl RevealController {
    /// An unregistered controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `targets`.
    ///
    /// Targets already in view are revealed before this returns. Registering
    /// again requires a [`RevealController::teardown`] first.
    #[tracing::instrument(skip(self, targets, options, host), fields(target_count = targets.len()))]
    pub fn register<H: Host + ?Sized>(
        &mut self,
        targets: &[ElementId],
        options: &RevealOptions,
        profile: &PlatformProfile,
        host: &mut H,
    ) -> ScrollcueResult<RegisterOutcome> {
        if self.session.is_active() {
            return Err(ScrollcueError::validation(
                "reveal controller is already registered",
            ));
        }
        options.validate()?;

        let mut index = HashMap::with_capacity(targets.len());
        for (i, &id) in targets.iter().enumerate() {
            if index.insert(id, i).is_some() {
                return Err(ScrollcueError::validation(format!(
                    "reveal target {id:?} registered twice"
                )));
            }
        }
        self.index = index;
        self.targets = targets
            .iter()
            .map(|&id| RevealTarget {
                id,
                presentation: Presentation::HIDDEN,
                ever_shown: false,
            })
            .collect();

        if self.targets.is_empty() {
            tracing::debug!("no reveal targets; nothing to observe");
            self.mode = Some(RegisterOutcome::Empty);
            return Ok(RegisterOutcome::Empty);
        }

        self.session.open();
        self.tracker = ScrollTracker::seeded(host.scroll_y());
        self.prime_on_frame = false;

        if options.respect_reduced_motion && profile.reduced_motion {
            for t in &mut self.targets {
                t.presentation = Presentation::VISIBLE;
                t.ever_shown = true;
            }
            tracing::debug!("reduced motion; all targets revealed");
            self.mode = Some(RegisterOutcome::ReducedMotion);
            return Ok(RegisterOutcome::ReducedMotion);
        }

        let (fudge_top, fudge_bottom) = profile.viewport_fudge();
        self.cfg = Resolved {
            threshold: profile.reveal_threshold(options.threshold),
            toggle_out: options.toggle_out_on_scroll_up && profile.allows_toggle_out(),
            fudge_top,
            fudge_bottom,
            force_reveal_on_bailout: profile.force_reveal_on_bailout(),
            settle_delay: options.viewport_settle(),
        };

        let mut primed = Vec::new();
        self.prime(host, &mut primed);

        for event in [
            HostEvent::Scroll,
            HostEvent::Resize,
            HostEvent::Load,
            HostEvent::VisualViewportResize,
            HostEvent::OrientationChange,
        ] {
            self.session.listen(host, event);
        }

        let mode = if profile.intersection_observer {
            let spec = ObserverSpec {
                root_margin: profile.reveal_root_margin(options.root_margin),
                thresholds: options.observer_thresholds(self.cfg.threshold)?,
            };
            let ids: Vec<ElementId> = self.targets.iter().map(|t| t.id).collect();
            self.session.observe(host, &spec, &ids);
            RegisterOutcome::Observing
        } else {
            RegisterOutcome::Polling
        };

        self.prime_on_frame = true;
        self.session.request_frame(host);
        self.session
            .schedule(host, RevealTimer::Bailout, options.bailout());

        tracing::debug!(
            ?mode,
            primed = primed.len(),
            toggle_out = self.cfg.toggle_out,
            "reveal session started"
        );
        self.mode = Some(mode);
        Ok(mode)
    }

    /// Process one host callback, returning the targets whose presentation
    /// changed. Callbacks not owned by the live session are ignored.
    pub fn handle<H: Host + ?Sized>(
        &mut self,
        callback: &HostCallback,
        host: &mut H,
    ) -> Vec<RevealUpdate> {
        let mut out = Vec::new();
        if !self.session.is_active() {
            return out;
        }
        match callback {
            HostCallback::Intersections { observer, entries } => {
                if self.session.owns_observer(*observer) {
                    self.on_entries(entries, host, &mut out);
                }
            }
            HostCallback::Event { listener, .. } => {
                if let Some(event) = self.session.event_for(*listener) {
                    self.on_event(event, host, &mut out);
                }
            }
            HostCallback::Frame(frame) => {
                if self.session.take_frame(*frame) {
                    self.on_frame(host, &mut out);
                }
            }
            HostCallback::Timer(timer) => {
                if let Some(kind) = self.session.take_timer(*timer) {
                    self.on_timer(kind, host, &mut out);
                }
            }
        }
        out
    }

    /// Stop all tracking. Safe to call any number of times.
    pub fn teardown<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.session.teardown(host) {
            self.prime_on_frame = false;
            tracing::debug!(targets = self.targets.len(), "reveal session torn down");
        }
    }

    /// Presentation of `target`, if it is registered.
    pub fn presentation(&self, target: ElementId) -> Option<Presentation> {
        self.index
            .get(&target)
            .map(|&i| self.targets[i].presentation)
    }

    /// Presentation of every target, in registration order.
    pub fn presentations(&self) -> impl Iterator<Item = (ElementId, Presentation)> + '_ {
        self.targets.iter().map(|t| (t.id, t.presentation))
    }

    /// Whether `target` has ever been revealed.
    pub fn ever_shown(&self, target: ElementId) -> bool {
        self.index
            .get(&target)
            .is_some_and(|&i| self.targets[i].ever_shown)
    }

    /// Current scroll direction.
    pub fn direction(&self) -> ScrollDirection {
        self.tracker.direction()
    }

    /// Outcome of the last registration.
    pub fn mode(&self) -> Option<RegisterOutcome> {
        self.mode
    }

    /// `true` while a session is live.
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    fn on_entries<H: Host + ?Sized>(
        &mut self,
        entries: &[IntersectionEntry],
        host: &mut H,
        out: &mut Vec<RevealUpdate>,
    ) {
        let vh = host.viewport().height;
        let direction = self.tracker.direction();
        for entry in entries {
            let Some(&i) = self.index.get(&entry.target) else {
                continue;
            };
            let hit = entry.is_intersecting
                && (entry.ratio >= self.cfg.threshold || self.covers(entry.bounds, vh));
            if hit {
                if direction == ScrollDirection::Down || !self.targets[i].ever_shown {
                    self.show(i, out);
                }
            } else if self.cfg.toggle_out
                && direction == ScrollDirection::Up
                && entry.bounds.y0 >= vh
            {
                self.hide(i, out);
            }
            tracing::trace!(
                target = entry.target.0,
                ratio = entry.ratio,
                hit,
                ?direction,
                "reveal entry"
            );
        }
    }

    fn on_event<H: Host + ?Sized>(
        &mut self,
        event: HostEvent,
        host: &mut H,
        out: &mut Vec<RevealUpdate>,
    ) {
        match event {
            HostEvent::Scroll => {
                self.tracker.sample(host.scroll_y());
                if self.mode == Some(RegisterOutcome::Polling) {
                    self.prime(host, out);
                } else {
                    self.reveal_covered(host, out);
                }
                self.request_measure(host);
            }
            HostEvent::Resize => {
                self.prime(host, out);
                self.request_measure(host);
            }
            HostEvent::Load => self.prime(host, out),
            HostEvent::VisualViewportResize | HostEvent::OrientationChange => {
                self.session.cancel(host, RevealTimer::ViewportSettle);
                self.session
                    .schedule(host, RevealTimer::ViewportSettle, self.cfg.settle_delay);
            }
            HostEvent::VisibilityChange => {}
        }
    }

    fn on_frame<H: Host + ?Sized>(&mut self, host: &mut H, out: &mut Vec<RevealUpdate>) {
        if std::mem::take(&mut self.prime_on_frame) {
            self.prime(host, out);
        }
        if self.cfg.toggle_out {
            self.measure(host, out);
        }
    }

    fn on_timer<H: Host + ?Sized>(
        &mut self,
        kind: RevealTimer,
        host: &mut H,
        out: &mut Vec<RevealUpdate>,
    ) {
        match kind {
            RevealTimer::Bailout if self.cfg.force_reveal_on_bailout => {
                tracing::debug!("bail-out timer forcing reveal");
                for i in 0..self.targets.len() {
                    self.show(i, out);
                }
            }
            RevealTimer::Bailout | RevealTimer::ViewportSettle => self.prime(host, out),
        }
    }

    fn request_measure<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.cfg.toggle_out {
            return;
        }
        let needed = match self.tracker.direction() {
            ScrollDirection::Up => self
                .targets
                .iter()
                .any(|t| t.presentation.state != RevealState::Hidden),
            ScrollDirection::Down => self
                .targets
                .iter()
                .any(|t| t.presentation.state == RevealState::Fading),
        };
        if needed {
            self.session.request_frame(host);
        }
    }

    /// Geometric reveal of targets already in view.
    fn prime<H: Host + ?Sized>(&mut self, host: &H, out: &mut Vec<RevealUpdate>) {
        let vh = host.viewport().height;
        let down = self.tracker.direction() == ScrollDirection::Down;
        for i in 0..self.targets.len() {
            let t = self.targets[i];
            if t.presentation.state == RevealState::Visible || (t.ever_shown && !down) {
                continue;
            }
            let Some(bounds) = host.bounding_rect(t.id) else {
                continue;
            };
            if in_view_with_fudge(bounds, vh, self.cfg.fudge_top, self.cfg.fudge_bottom) {
                self.show(i, out);
            }
        }
    }

    /// `true` if the visible part of `bounds` covers the reveal threshold of
    /// what the viewport can show of it. Catches targets too tall to ever reach
    /// the threshold as an intersection ratio.
    fn covers(&self, bounds: Rect, vh: f64) -> bool {
        visible_height(bounds, vh) > 0.0 && fade_ratio(bounds, vh) >= self.cfg.threshold
    }

    /// Scroll-time reveal of hidden targets that cross no observer threshold.
    fn reveal_covered<H: Host + ?Sized>(&mut self, host: &H, out: &mut Vec<RevealUpdate>) {
        let vh = host.viewport().height;
        let down = self.tracker.direction() == ScrollDirection::Down;
        for i in 0..self.targets.len() {
            let t = self.targets[i];
            if t.presentation.state != RevealState::Hidden || (t.ever_shown && !down) {
                continue;
            }
            let Some(bounds) = host.bounding_rect(t.id) else {
                continue;
            };
            if self.covers(bounds, vh) {
                self.show(i, out);
            }
        }
    }

    /// Fade pass for shown targets clipped by the viewport bottom.
    fn measure<H: Host + ?Sized>(&mut self, host: &H, out: &mut Vec<RevealUpdate>) {
        let vh = host.viewport().height;
        let direction = self.tracker.direction();
        for i in 0..self.targets.len() {
            let t = self.targets[i];
            if t.presentation.state == RevealState::Hidden {
                continue;
            }
            let Some(bounds) = host.bounding_rect(t.id) else {
                continue;
            };
            let ratio = fade_ratio(bounds, vh);
            match direction {
                ScrollDirection::Up => {
                    if bounds.y1 <= vh {
                        continue;
                    }
                    if ratio <= FADE_EPSILON {
                        self.hide(i, out);
                    } else if ratio < 1.0 {
                        self.fade(i, ratio, out);
                    } else if t.presentation.state == RevealState::Fading {
                        self.show(i, out);
                    }
                }
                ScrollDirection::Down => {
                    if t.presentation.state == RevealState::Fading && ratio > FADE_EPSILON {
                        self.show(i, out);
                    }
                }
            }
        }
    }

    fn show(&mut self, i: usize, out: &mut Vec<RevealUpdate>) {
        let t = &mut self.targets[i];
        t.ever_shown = true;
        if t.presentation != Presentation::VISIBLE {
            t.presentation = Presentation::VISIBLE;
            out.push(RevealUpdate {
                target: t.id,
                presentation: t.presentation,
            });
        }
    }

    fn hide(&mut self, i: usize, out: &mut Vec<RevealUpdate>) {
        let t = &mut self.targets[i];
        if t.presentation.state != RevealState::Hidden {
            t.presentation = Presentation::HIDDEN;
            out.push(RevealUpdate {
                target: t.id,
                presentation: t.presentation,
            });
        }
    }

    fn fade(&mut self, i: usize, ratio: f64, out: &mut Vec<RevealUpdate>) {
        let t = &mut self.targets[i];
        let next = Presentation::fading(ratio);
        if t.presentation != next {
            t.presentation = next;
            out.push(RevealUpdate {
                target: t.id,
                presentation: next,
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/controller.rs"]
mod tests;
