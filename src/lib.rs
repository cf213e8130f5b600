//! scrollcue drives viewport-based UI state for a scrolling page: elements that
//! reveal as they scroll into view, and preview media that plays only while it
//! is sufficiently visible and the page is in the foreground.
//!
//! # Architecture overview
//!
//! 1. **Probe**: `EnvironmentProbe -> PlatformProfile` (iOS, reduced motion, observer support)
//! 2. **Register**: a controller takes its explicit target set and attaches one observation
//!    session to the [`Host`]
//! 3. **Handle**: the host delivers [`HostCallback`] values; controllers return what changed
//! 4. **Teardown**: every observer, listener, frame and timer is released, idempotently
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Host-agnostic**: all browser capabilities come through the [`Host`] trait; the crate
//!   ships a deterministic [`sim::SimHost`] for tests and previews.
//! - **Explicit ownership**: media handles are moved into exactly one controller and handed
//!   back on teardown.
//! - **Degradation is a value**: missing capabilities and refused playback are reported as
//!   [`RegisterOutcome`] and [`PlaybackResult`], never as errors.
//!
//! # Getting started
//!
//! See [`crate::guide`] for a walkthrough of both controllers.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod media;
mod page;
mod platform;
mod reveal;

/// High-level, standalone documentation for scrollcue's concepts and lifecycle.
pub mod guide;
pub mod sim;

pub use config::options::{
    DEFAULT_PLAY_THRESHOLD, DEFAULT_REVEAL_THRESHOLD, MEDIA_THRESHOLDS, MarginLength,
    MediaOptions, REVEAL_BASE_THRESHOLDS, RevealOptions, RootMargin, SessionConfig, Thresholds,
};
pub use foundation::core::{ElementId, PageVisibility, Point, Rect, ScrollDirection, Size, Viewport};
pub use foundation::error::{PlaybackError, ScrollcueError, ScrollcueResult};
pub use media::controller::{CardsRejected, MediaAction, MediaUpdate, MediaVisibilityController};
pub use media::handle::{MediaCard, MediaHandle, PlaybackResult, start, stop};
pub use media::lightbox::Lightbox;
pub use media::player::{PlayerControls, format_timestamp};
pub use page::view::{PageMount, PageUpdate, PageView};
pub use platform::host::{
    FrameId, Host, HostCallback, HostEvent, IntersectionEntry, ListenerId, ObserverId,
    ObserverSpec, TimerId,
};
pub use platform::profile::{EnvironmentProbe, PlatformProfile};
pub use platform::session::{ObservationSession, RegisterOutcome};
pub use reveal::controller::RevealController;
pub use reveal::direction::ScrollTracker;
pub use reveal::presentation::{Presentation, RevealState, RevealUpdate};
