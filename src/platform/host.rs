use std::time::Duration;

use crate::{
    config::options::{RootMargin, Thresholds},
    foundation::core::{ElementId, PageVisibility, Rect, Viewport},
};

/// Identifier of an intersection observer created by a [`Host`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// Identifier of an event listener registered with a [`Host`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Identifier of a pending animation-frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Identifier of a pending timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Host events a controller can listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HostEvent {
    /// Window scrolled.
    Scroll,
    /// Layout viewport resized.
    Resize,
    /// Device orientation changed.
    OrientationChange,
    /// Visual viewport resized (mobile toolbars, pinch zoom).
    VisualViewportResize,
    /// Page finished loading.
    Load,
    /// Page moved between foreground and background.
    VisibilityChange,
}

/// One observer report for one target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// Observed element.
    pub target: ElementId,
    /// Fraction of the target's box inside the (margin-adjusted) viewport.
    pub ratio: f64,
    /// The target overlaps the viewport (edge contact included).
    pub is_intersecting: bool,
    /// Target bounds in viewport coordinates at report time.
    pub bounds: Rect,
}

/// Configuration of one intersection observer.
#[derive(Clone, Debug, PartialEq)]
pub struct ObserverSpec {
    /// Margin applied to the viewport.
    pub root_margin: RootMargin,
    /// Ratios at which the observer reports.
    pub thresholds: Thresholds,
}

/// Something the host reports asynchronously to a controller.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCallback {
    /// A batch of intersection entries for one observer, in delivery order.
    Intersections {
        /// Observer the batch belongs to.
        observer: ObserverId,
        /// Entries in delivery order.
        entries: Vec<IntersectionEntry>,
    },
    /// A listened-for event fired.
    Event {
        /// Listener that fired.
        listener: ListenerId,
        /// Event kind.
        event: HostEvent,
    },
    /// A requested animation frame arrived.
    Frame(FrameId),
    /// A timer elapsed.
    Timer(TimerId),
}

/// Browser capabilities consumed by the controllers.
///
/// Implementations deliver callbacks by handing [`HostCallback`] values to the
/// owning controller's `handle`. Releasing an id must stop its callbacks from
/// being delivered.
pub trait Host {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Current vertical scroll offset of the page.
    fn scroll_y(&self) -> f64;

    /// Bounds of `target` in viewport coordinates, or `None` if it is detached.
    fn bounding_rect(&self, target: ElementId) -> Option<Rect>;

    /// Current page visibility.
    fn page_visibility(&self) -> PageVisibility;

    /// Start observing `targets` with one observer.
    fn observe(&mut self, spec: &ObserverSpec, targets: &[ElementId]) -> ObserverId;

    /// Disconnect an observer; no further entries are delivered for it.
    fn disconnect(&mut self, observer: ObserverId);

    /// Listen for `event`.
    fn add_listener(&mut self, event: HostEvent) -> ListenerId;

    /// Remove a listener.
    fn remove_listener(&mut self, listener: ListenerId);

    /// Request a callback on the next animation frame.
    fn request_frame(&mut self) -> FrameId;

    /// Cancel a pending animation frame.
    fn cancel_frame(&mut self, frame: FrameId);

    /// Schedule a one-shot timer.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer.
    fn clear_timeout(&mut self, timer: TimerId);
}
