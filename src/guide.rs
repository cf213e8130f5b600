//! # scrollcue guide
//!
//! This module is a standalone walkthrough of scrollcue's model and public API.
//! It covers what a controller owns, when it talks to the host, and what it
//! reports back.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Host`](crate::Host): everything the controllers need from the page (geometry,
//!   intersection observers, listeners, animation frames, timers, page visibility)
//! - [`HostCallback`](crate::HostCallback): one asynchronous occurrence, delivered back to the
//!   controllers by whoever drives the host
//! - [`PlatformProfile`](crate::PlatformProfile): platform flags resolved once from an
//!   [`EnvironmentProbe`](crate::EnvironmentProbe)
//! - [`ObservationSession`](crate::ObservationSession): the observer, listener, frame and timer
//!   ids one controller registered; releasing it is idempotent
//! - [`RevealController`](crate::RevealController) and
//!   [`MediaVisibilityController`](crate::MediaVisibilityController): the two independent
//!   controllers, composed by [`PageView`](crate::PageView)
//!
//! Every controller follows the same lifecycle:
//!
//! 1. `register` with an explicit target set, options and profile
//! 2. `handle` each callback, receiving the changes it caused
//! 3. `teardown`, after which callbacks are ignored
//!
//! ---
//!
//! ## Reveal
//!
//! A reveal target starts [`Hidden`](crate::RevealState::Hidden). Registration runs a
//! synchronous prime pass, so anything already on screen is
//! [`Visible`](crate::RevealState::Visible) before the first callback arrives. Afterwards an
//! observer entry at or above the reveal threshold (default
//! [`DEFAULT_REVEAL_THRESHOLD`](crate::DEFAULT_REVEAL_THRESHOLD)) reveals a target while the
//! user scrolls down, or the first time it is seen.
//!
//! With [`RevealOptions::toggle_out_on_scroll_up`](crate::RevealOptions::toggle_out_on_scroll_up)
//! a shown target that is pushed out through the bottom edge while scrolling up fades with
//! the fraction of it still visible, then returns to `Hidden` and can be revealed again.
//!
//! Fallbacks:
//!
//! - reduced motion: every target is shown immediately and nothing is observed
//! - no intersection observer: scroll and resize events drive the geometric prime test
//! - late layout: the first frame, `load`, a debounced viewport change and a one-shot
//!   bail-out timer each run another prime pass
//! - iOS: a near-zero threshold, a bottom root margin of `-12%`, no toggle-out, and a
//!   bail-out that reveals everything
//!
//! ---
//!
//! ## Media
//!
//! [`MediaCard`](crate::MediaCard) pairs an element with the
//! [`MediaHandle`](crate::MediaHandle) it controls. The media controller takes the cards by
//! value and returns them from `teardown`, so a handle can never be driven by two
//! controllers. A card is eligible while it intersects at or above the play threshold; its
//! media plays exactly when it is eligible and the page is in the foreground.
//!
//! Browsers may refuse `play()`. That is reported as
//! [`PlaybackResult::Deferred`](crate::PlaybackResult::Deferred) and retried on the next
//! trigger, never raised as an error.
//!
//! [`Lightbox`](crate::Lightbox) and [`PlayerControls`](crate::PlayerControls) cover the
//! demo-video overlay and the custom player controls of a project page.
//!
//! ---
//!
//! ## Driving a page headlessly
//!
//! [`SimHost`](crate::sim::SimHost) lays elements out in document space and queues callbacks
//! until they are pumped. Frames arrive on `next_frame` and timers on `advance`.
//!
//! ```rust
//! use scrollcue::sim::{SimHost, SimMedia};
//! use scrollcue::{
//!     ElementId, MediaCard, PageView, PlatformProfile, RevealState, SessionConfig, Viewport,
//! };
//!
//! # fn main() -> scrollcue::ScrollcueResult<()> {
//! let mut host = SimHost::new(Viewport::new(400.0, 800.0));
//! let hero = ElementId(1);
//! let card = ElementId(2);
//! host.place_block(hero, 1000.0, 200.0);
//! host.place_block(card, 1400.0, 400.0);
//!
//! let preview = SimMedia::muted();
//! let mut page = PageView::new(PlatformProfile::desktop());
//! page.mount(
//!     &[hero],
//!     vec![MediaCard::new(card, preview.clone())],
//!     &SessionConfig::default(),
//!     &mut host,
//! )?;
//!
//! host.scroll_to(900.0);
//! host.pump(|cb, host| {
//!     page.dispatch(&cb, host);
//! });
//!
//! assert_eq!(
//!     page.reveal().presentation(hero).map(|p| p.state),
//!     Some(RevealState::Visible)
//! );
//! assert!(preview.is_playing());
//!
//! let cards = page.unmount(&mut host);
//! assert_eq!(cards.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Configuration
//!
//! [`SessionConfig`](crate::SessionConfig) holds the options of both controllers and loads
//! from JSON. Missing fields take their defaults; unknown fields are rejected.
//!
//! ```json
//! {
//!   "reveal": { "threshold": 0.18, "toggle_out_on_scroll_up": true },
//!   "media": { "root_margin": "0px 0px -10% 0px", "play_threshold": 0.55 }
//! }
//! ```
