use std::{
    collections::{BTreeMap, VecDeque},
    time::Duration,
};

use crate::{
    foundation::{
        core::{ElementId, PageVisibility, Rect, Viewport},
        math::intersection_ratio,
    },
    platform::host::{
        FrameId, Host, HostCallback, HostEvent, IntersectionEntry, ListenerId, ObserverId,
        ObserverSpec, TimerId,
    },
};

#[derive(Debug)]
struct SimObserver {
    spec: ObserverSpec,
    // Last reported (ratio, is_intersecting) per target; `None` until the first report.
    targets: Vec<(ElementId, Option<(f64, bool)>)>,
}

#[derive(Debug)]
struct SimTimer {
    due: Duration,
}

/// Counters describing what a [`SimHost`] has seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Observers ever created.
    pub observers_created: usize,
    /// Intersection batches handed out by [`SimHost::pop`].
    pub intersection_batches: usize,
    /// Frame requests made.
    pub frames_requested: usize,
    /// Timers scheduled.
    pub timers_scheduled: usize,
}

/// Deterministic, headless [`Host`] implementation.
///
/// Elements are laid out in document coordinates; the host translates them by
/// the scroll offset. Callbacks queue up in delivery order and are handed out by
/// [`SimHost::pop`] or [`SimHost::pump`]. Frames only arrive on
/// [`SimHost::next_frame`] and timers only on [`SimHost::advance`], so tests
/// control exactly when asynchronous work happens. Releasing an id also drops
/// any of its callbacks still waiting in the queue.
#[derive(Debug)]
pub struct SimHost {
    viewport: Viewport,
    scroll_y: f64,
    visibility: PageVisibility,
    elements: BTreeMap<ElementId, Rect>,
    observers: BTreeMap<u64, SimObserver>,
    listeners: BTreeMap<u64, HostEvent>,
    frames: Vec<FrameId>,
    timers: BTreeMap<u64, SimTimer>,
    now: Duration,
    next_id: u64,
    queue: VecDeque<HostCallback>,
    stats: SimStats,
}

impl SimHost {
    /// An empty page with the given viewport, scrolled to the top.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            visibility: PageVisibility::Visible,
            elements: BTreeMap::new(),
            observers: BTreeMap::new(),
            listeners: BTreeMap::new(),
            frames: Vec::new(),
            timers: BTreeMap::new(),
            now: Duration::ZERO,
            next_id: 1,
            queue: VecDeque::new(),
            stats: SimStats::default(),
        }
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place (or move) an element at document-space `rect`.
    pub fn place(&mut self, id: ElementId, rect: Rect) {
        self.elements.insert(id, rect);
        self.refresh_observers();
    }

    /// Place a full-width block of `height` starting at document offset `top`.
    pub fn place_block(&mut self, id: ElementId, top: f64, height: f64) {
        self.place(id, Rect::new(0.0, top, self.viewport.width, top + height));
    }

    /// Detach an element.
    pub fn remove(&mut self, id: ElementId) {
        self.elements.remove(&id);
    }

    /// Scroll to document offset `y`, firing scroll listeners then observers.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.fire(HostEvent::Scroll);
        self.refresh_observers();
    }

    /// Scroll by `dy` pixels.
    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll_to(self.scroll_y + dy);
    }

    /// Resize the viewport, firing window and visual-viewport resize events.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.fire(HostEvent::Resize);
        self.fire(HostEvent::VisualViewportResize);
        self.refresh_observers();
    }

    /// Rotate the device: swap viewport axes and fire an orientation change.
    pub fn rotate(&mut self) {
        self.viewport = Viewport::new(self.viewport.height, self.viewport.width);
        self.fire(HostEvent::OrientationChange);
        self.refresh_observers();
    }

    /// Fire the page load event.
    pub fn load(&mut self) {
        self.fire(HostEvent::Load);
    }

    /// Fire `event` without changing any geometry.
    pub fn emit(&mut self, event: HostEvent) {
        self.fire(event);
    }

    /// Move the page to the foreground or background.
    pub fn set_visibility(&mut self, visibility: PageVisibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.fire(HostEvent::VisibilityChange);
        }
    }

    /// Deliver every frame requested so far, in request order.
    pub fn next_frame(&mut self) {
        for f in std::mem::take(&mut self.frames) {
            self.queue.push_back(HostCallback::Frame(f));
        }
    }

    /// Advance the virtual clock, queueing due timers by due time.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        let mut due: Vec<(Duration, u64)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= self.now)
            .map(|(&id, t)| (t.due, id))
            .collect();
        due.sort_unstable();
        for (_, id) in due {
            self.timers.remove(&id);
            self.queue.push_back(HostCallback::Timer(TimerId(id)));
        }
    }

    /// Take the next queued callback.
    pub fn pop(&mut self) -> Option<HostCallback> {
        let cb = self.queue.pop_front()?;
        if matches!(cb, HostCallback::Intersections { .. }) {
            self.stats.intersection_batches += 1;
        }
        Some(cb)
    }

    /// Deliver queued callbacks (including ones queued while delivering) until
    /// the queue is empty.
    pub fn pump(&mut self, mut deliver: impl FnMut(HostCallback, &mut Self)) {
        while let Some(cb) = self.pop() {
            deliver(cb, self);
        }
    }

    /// Number of callbacks waiting in the queue.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Observers still connected.
    pub fn live_observers(&self) -> usize {
        self.observers.len()
    }

    /// Listeners still registered.
    pub fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Frame requests not yet delivered.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Activity counters.
    pub fn stats(&self) -> SimStats {
        self.stats
    }

    fn fire(&mut self, event: HostEvent) {
        let hits: Vec<u64> = self
            .listeners
            .iter()
            .filter(|(_, e)| **e == event)
            .map(|(&id, _)| id)
            .collect();
        for id in hits {
            self.queue.push_back(HostCallback::Event {
                listener: ListenerId(id),
                event,
            });
        }
    }

    fn viewport_bounds(&self, doc: Rect) -> Rect {
        Rect::new(doc.x0, doc.y0 - self.scroll_y, doc.x1, doc.y1 - self.scroll_y)
    }

    fn refresh_observers(&mut self) {
        let mut batches = Vec::new();
        for (&id, obs) in self.observers.iter_mut() {
            let root = obs.spec.root_margin.apply(self.viewport);
            let mut entries = Vec::new();
            for (target, last) in obs.targets.iter_mut() {
                let Some(&doc) = self.elements.get(target) else {
                    continue;
                };
                let bounds = Rect::new(doc.x0, doc.y0 - self.scroll_y, doc.x1, doc.y1 - self.scroll_y);
                let (ratio, hit) = intersection_ratio(bounds, root);
                let notify = match *last {
                    None => true,
                    Some((prev, prev_hit)) => {
                        prev_hit != hit || obs.spec.thresholds.crossed(prev, ratio)
                    }
                };
                if notify {
                    *last = Some((ratio, hit));
                    entries.push(IntersectionEntry {
                        target: *target,
                        ratio,
                        is_intersecting: hit,
                        bounds,
                    });
                }
            }
            if !entries.is_empty() {
                batches.push(HostCallback::Intersections {
                    observer: ObserverId(id),
                    entries,
                });
            }
        }
        self.queue.extend(batches);
    }
}

impl Host for SimHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn bounding_rect(&self, target: ElementId) -> Option<Rect> {
        self.elements.get(&target).map(|&r| self.viewport_bounds(r))
    }

    fn page_visibility(&self) -> PageVisibility {
        self.visibility
    }

    fn observe(&mut self, spec: &ObserverSpec, targets: &[ElementId]) -> ObserverId {
        let id = self.alloc();
        self.stats.observers_created += 1;
        self.observers.insert(
            id,
            SimObserver {
                spec: spec.clone(),
                targets: targets.iter().map(|&t| (t, None)).collect(),
            },
        );
        self.refresh_observers();
        ObserverId(id)
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.observers.remove(&observer.0);
        self.queue.retain(
            |cb| !matches!(cb, HostCallback::Intersections { observer: o, .. } if *o == observer),
        );
    }

    fn add_listener(&mut self, event: HostEvent) -> ListenerId {
        let id = self.alloc();
        self.listeners.insert(id, event);
        ListenerId(id)
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener.0);
        self.queue
            .retain(|cb| !matches!(cb, HostCallback::Event { listener: l, .. } if *l == listener));
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.alloc());
        self.stats.frames_requested += 1;
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        self.frames.retain(|&f| f != frame);
        self.queue
            .retain(|cb| !matches!(cb, HostCallback::Frame(f) if *f == frame));
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = self.alloc();
        self.stats.timers_scheduled += 1;
        self.timers.insert(
            id,
            SimTimer {
                due: self.now + delay,
            },
        );
        TimerId(id)
    }

    fn clear_timeout(&mut self, timer: TimerId) {
        self.timers.remove(&timer.0);
        self.queue
            .retain(|cb| !matches!(cb, HostCallback::Timer(t) if *t == timer));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/host.rs"]
mod tests;
