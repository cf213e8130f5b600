use crate::{
    config::options::SessionConfig,
    foundation::core::ElementId,
    media::{
        controller::{CardsRejected, MediaUpdate, MediaVisibilityController},
        handle::{MediaCard, MediaHandle},
    },
    platform::{
        host::{Host, HostCallback},
        profile::PlatformProfile,
        session::RegisterOutcome,
    },
    reveal::{controller::RevealController, presentation::RevealUpdate},
};

/// How each controller came up on [`PageView::mount`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PageMount {
    /// Reveal controller outcome.
    pub reveal: RegisterOutcome,
    /// Media controller outcome.
    pub media: RegisterOutcome,
}

/// Everything that changed while dispatching one callback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageUpdate {
    /// Reveal targets whose presentation changed.
    pub reveals: Vec<RevealUpdate>,
    /// Cards whose playback changed.
    pub media: Vec<MediaUpdate>,
}

impl PageUpdate {
    /// `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.reveals.is_empty() && self.media.is_empty()
    }
}

/// One page's reveal and media controllers, mounted and unmounted together.
///
/// The two controllers share no state; the view only routes host callbacks to
/// both of them.
#[derive(Debug)]
pub struct PageView<M> {
    profile: PlatformProfile,
    reveal: RevealController,
    media: MediaVisibilityController<M>,
}

impl<M: MediaHandle> PageView<M> {
    /// An unmounted view for a page running under `profile`.
    pub fn new(profile: PlatformProfile) -> Self {
        Self {
            profile,
            reveal: RevealController::new(),
            media: MediaVisibilityController::new(),
        }
    }

    /// Register `reveal_targets` and `cards` with their controllers.
    ///
    /// The configuration is validated before anything is attached. If the
    /// media controller rejects its cards the reveal session is torn down
    /// again, so a failed mount leaves nothing registered with the host. A
    /// failed mount always hands the cards back.
    #[tracing::instrument(skip_all, fields(
        reveal_targets = reveal_targets.len(),
        cards = cards.len()
    ))]
    pub fn mount<H: Host + ?Sized>(
        &mut self,
        reveal_targets: &[ElementId],
        cards: Vec<MediaCard<M>>,
        config: &SessionConfig,
        host: &mut H,
    ) -> Result<PageMount, CardsRejected<M>> {
        let reveal = match config
            .validate()
            .and_then(|()| {
                self.reveal
                    .register(reveal_targets, &config.reveal, &self.profile, host)
            }) {
            Ok(outcome) => outcome,
            Err(error) => return Err(CardsRejected { error, cards }),
        };
        let media = match self.media.register(cards, &config.media, &self.profile, host) {
            Ok(outcome) => outcome,
            Err(rejected) => {
                self.reveal.teardown(host);
                return Err(rejected);
            }
        };
        Ok(PageMount { reveal, media })
    }

    /// Route one host callback to both controllers.
    pub fn dispatch<H: Host + ?Sized>(
        &mut self,
        callback: &HostCallback,
        host: &mut H,
    ) -> PageUpdate {
        PageUpdate {
            reveals: self.reveal.handle(callback, host),
            media: self.media.handle(callback, host),
        }
    }

    /// Tear down both controllers and hand the media cards back.
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) -> Vec<MediaCard<M>> {
        self.reveal.teardown(host);
        self.media.teardown(host)
    }

    /// Marker classes for the document root (`js-ready`, `ios`, `view-timeline-ok`).
    pub fn root_markers(&self) -> Vec<&'static str> {
        self.profile.root_markers()
    }

    /// The platform profile this view was built with.
    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    /// The reveal controller.
    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    /// The media controller.
    pub fn media(&self) -> &MediaVisibilityController<M> {
        &self.media
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/view.rs"]
mod tests;
