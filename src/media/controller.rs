use std::collections::HashMap;

use crate::{
    config::options::{MediaOptions, RootMargin},
    foundation::{
        core::ElementId,
        error::{ScrollcueError, ScrollcueResult},
        math::intersection_ratio,
    },
    media::handle::{MediaCard, MediaHandle, PlaybackResult, start, stop},
    platform::{
        host::{Host, HostCallback, HostEvent, ObserverSpec},
        profile::PlatformProfile,
        session::{ObservationSession, RegisterOutcome},
    },
};

/// What the controller did to one card's media.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaAction {
    /// A start was requested, with its outcome.
    Play(PlaybackResult),
    /// Playback was paused.
    Pause,
}

/// One playback change made while handling a callback.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaUpdate {
    /// Card whose media changed.
    pub card: ElementId,
    /// What happened.
    pub action: MediaAction,
}

/// A refused media registration. The cards come back untouched.
#[derive(Debug)]
pub struct CardsRejected<M> {
    /// Why registration was refused.
    pub error: ScrollcueError,
    /// The cards that were passed in.
    pub cards: Vec<MediaCard<M>>,
}

impl<M> From<CardsRejected<M>> for ScrollcueError {
    fn from(rejected: CardsRejected<M>) -> Self {
        rejected.error
    }
}

#[derive(Debug)]
struct CardSlot<M> {
    card: MediaCard<M>,
    ratio: f64,
    eligible: bool,
}

/// Plays media of sufficiently visible cards and pauses the rest.
///
/// A card is eligible while it intersects the viewport at or above the play
/// threshold. Its media plays exactly when it is eligible and the page is in
/// the foreground. The controller owns the media handles between `register`
/// and `teardown`.
#[derive(Debug)]
pub struct MediaVisibilityController<M> {
    session: ObservationSession<()>,
    cards: Vec<CardSlot<M>>,
    index: HashMap<ElementId, usize>,
    foreground: bool,
    play_threshold: f64,
    root_margin: RootMargin,
    mode: Option<RegisterOutcome>,
}

impl<M: MediaHandle> MediaVisibilityController<M> {
    /// An unregistered controller.
    pub fn new() -> Self {
        Self {
            session: ObservationSession::new(),
            cards: Vec::new(),
            index: HashMap::new(),
            foreground: true,
            play_threshold: 0.0,
            root_margin: RootMargin::ZERO,
            mode: None,
        }
    }

    /// Take ownership of `cards` and start observing them.
    ///
    /// A refused registration hands the cards back in [`CardsRejected`].
    #[tracing::instrument(skip(self, cards, options, host), fields(card_count = cards.len()))]
    pub fn register<H: Host + ?Sized>(
        &mut self,
        cards: Vec<MediaCard<M>>,
        options: &MediaOptions,
        profile: &PlatformProfile,
        host: &mut H,
    ) -> Result<RegisterOutcome, CardsRejected<M>> {
        let index = match self.check(&cards, options) {
            Ok(index) => index,
            Err(error) => return Err(CardsRejected { error, cards }),
        };
        self.index = index;
        // Unsampled until the first entry or poll, which always applies.
        self.cards = cards
            .into_iter()
            .map(|card| CardSlot {
                card,
                ratio: f64::NAN,
                eligible: false,
            })
            .collect();

        if self.cards.is_empty() {
            self.mode = Some(RegisterOutcome::Empty);
            return Ok(RegisterOutcome::Empty);
        }

        self.session.open();
        self.foreground = host.page_visibility().is_foreground();
        self.play_threshold = options.play_threshold;
        self.root_margin = options.root_margin;
        self.session.listen(host, HostEvent::VisibilityChange);

        let mode = if profile.intersection_observer {
            let spec = ObserverSpec {
                root_margin: options.root_margin,
                thresholds: options.thresholds.clone(),
            };
            let ids: Vec<ElementId> = self.cards.iter().map(|s| s.card.id).collect();
            self.session.observe(host, &spec, &ids);
            RegisterOutcome::Observing
        } else {
            self.session.listen(host, HostEvent::Scroll);
            self.session.listen(host, HostEvent::Resize);
            self.session.request_frame(host);
            RegisterOutcome::Polling
        };

        tracing::debug!(?mode, foreground = self.foreground, "media session started");
        self.mode = Some(mode);
        Ok(mode)
    }

    /// Process one host callback, returning the playback changes it caused.
    pub fn handle<H: Host + ?Sized>(
        &mut self,
        callback: &HostCallback,
        host: &mut H,
    ) -> Vec<MediaUpdate> {
        let mut out = Vec::new();
        if !self.session.is_active() {
            return out;
        }
        match callback {
            HostCallback::Intersections { observer, entries } => {
                if !self.session.owns_observer(*observer) {
                    return out;
                }
                for entry in entries {
                    let Some(&i) = self.index.get(&entry.target) else {
                        continue;
                    };
                    let eligible = entry.is_intersecting && entry.ratio >= self.play_threshold;
                    self.apply(i, entry.ratio, eligible, &mut out);
                }
            }
            HostCallback::Event { listener, .. } => match self.session.event_for(*listener) {
                Some(HostEvent::VisibilityChange) => {
                    self.on_visibility(host.page_visibility().is_foreground(), &mut out);
                }
                Some(HostEvent::Scroll | HostEvent::Resize) => self.poll(host, &mut out),
                _ => {}
            },
            HostCallback::Frame(frame) => {
                if self.session.take_frame(*frame) {
                    self.poll(host, &mut out);
                }
            }
            HostCallback::Timer(_) => {}
        }
        out
    }

    /// Stop observing and hand the cards back. Media is left as it is.
    ///
    /// Returns an empty list when there is no live session.
    pub fn teardown<H: Host + ?Sized>(&mut self, host: &mut H) -> Vec<MediaCard<M>> {
        if !self.session.teardown(host) {
            return Vec::new();
        }
        self.index.clear();
        tracing::debug!(cards = self.cards.len(), "media session torn down");
        self.cards.drain(..).map(|s| s.card).collect()
    }

    fn check(
        &self,
        cards: &[MediaCard<M>],
        options: &MediaOptions,
    ) -> ScrollcueResult<HashMap<ElementId, usize>> {
        if self.session.is_active() {
            return Err(ScrollcueError::validation(
                "media controller is already registered",
            ));
        }
        options.validate()?;
        let mut index = HashMap::with_capacity(cards.len());
        for (i, card) in cards.iter().enumerate() {
            if index.insert(card.id, i).is_some() {
                return Err(ScrollcueError::validation(format!(
                    "media card {:?} registered twice",
                    card.id
                )));
            }
        }
        Ok(index)
    }

    /// `true` if `card` is currently eligible to play.
    pub fn is_eligible(&self, card: ElementId) -> bool {
        self.index
            .get(&card)
            .is_some_and(|&i| self.cards[i].eligible)
    }

    /// Eligible cards, in registration order.
    pub fn eligible(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.cards
            .iter()
            .filter(|s| s.eligible)
            .map(|s| s.card.id)
    }

    /// Last observed visibility ratio of `card`; `None` until it is sampled.
    pub fn ratio(&self, card: ElementId) -> Option<f64> {
        self.index
            .get(&card)
            .map(|&i| self.cards[i].ratio)
            .filter(|r| !r.is_nan())
    }

    /// Media handle of `card`.
    pub fn media(&self, card: ElementId) -> Option<&M> {
        self.index.get(&card).map(|&i| &self.cards[i].card.media)
    }

    /// `true` while the page is in the foreground.
    pub fn is_foreground(&self) -> bool {
        self.foreground
    }

    /// Outcome of the last registration.
    pub fn mode(&self) -> Option<RegisterOutcome> {
        self.mode
    }

    /// `true` while a session is live.
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    fn apply(&mut self, i: usize, ratio: f64, eligible: bool, out: &mut Vec<MediaUpdate>) {
        let foreground = self.foreground;
        let slot = &mut self.cards[i];
        slot.ratio = ratio;
        slot.eligible = eligible;
        if eligible && foreground {
            push_play(slot, out);
        } else if stop(&mut slot.card.media) {
            out.push(MediaUpdate {
                card: slot.card.id,
                action: MediaAction::Pause,
            });
        }
        tracing::trace!(card = slot.card.id.0, ratio, eligible, "media entry");
    }

    fn on_visibility(&mut self, foreground: bool, out: &mut Vec<MediaUpdate>) {
        if foreground == self.foreground {
            return;
        }
        self.foreground = foreground;
        tracing::debug!(foreground, "page visibility changed");
        for slot in &mut self.cards {
            if !foreground {
                if stop(&mut slot.card.media) {
                    out.push(MediaUpdate {
                        card: slot.card.id,
                        action: MediaAction::Pause,
                    });
                }
            } else if slot.eligible {
                push_play(slot, out);
            }
        }
    }

    /// Geometric stand-in for observer entries on hosts without one.
    fn poll<H: Host + ?Sized>(&mut self, host: &H, out: &mut Vec<MediaUpdate>) {
        let root = self.root_margin.apply(host.viewport());
        for i in 0..self.cards.len() {
            let Some(bounds) = host.bounding_rect(self.cards[i].card.id) else {
                continue;
            };
            let (ratio, hit) = intersection_ratio(bounds, root);
            let eligible = hit && ratio >= self.play_threshold;
            let slot = &self.cards[i];
            if eligible != slot.eligible || ratio != slot.ratio {
                self.apply(i, ratio, eligible, out);
            }
        }
    }
}

impl<M: MediaHandle> Default for MediaVisibilityController<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn push_play<M: MediaHandle>(slot: &mut CardSlot<M>, out: &mut Vec<MediaUpdate>) {
    let result = start(&mut slot.card.media);
    if result != PlaybackResult::AlreadyPlaying {
        out.push(MediaUpdate {
            card: slot.card.id,
            action: MediaAction::Play(result),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/controller.rs"]
mod tests;
