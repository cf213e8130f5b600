use crate::foundation::{core::ElementId, math::clamp01};

/// Presentation state of a reveal target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RevealState {
    /// Not shown (before first reveal, or after a hard hide).
    Hidden,
    /// Fully shown.
    Visible,
    /// Partially faded while leaving the viewport upward-scroll, bottom first.
    Fading,
}

/// What the presentation layer should render for one target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Presentation {
    /// Current state.
    pub state: RevealState,
    /// Fade progress in `[0, 1]`; only meaningful while `Fading`.
    pub progress: f64,
}

impl Presentation {
    /// Not shown.
    pub const HIDDEN: Self = Self {
        state: RevealState::Hidden,
        progress: 0.0,
    };

    /// Fully shown.
    pub const VISIBLE: Self = Self {
        state: RevealState::Visible,
        progress: 1.0,
    };

    /// Fading at `progress`.
    pub fn fading(progress: f64) -> Self {
        Self {
            state: RevealState::Fading,
            progress: clamp01(progress),
        }
    }

    /// Opacity the presentation layer should apply.
    pub fn opacity(&self) -> f64 {
        match self.state {
            RevealState::Hidden => 0.0,
            RevealState::Visible => 1.0,
            RevealState::Fading => self.progress,
        }
    }

    /// Marker class owned by the reveal controller, if any.
    pub fn class_name(&self) -> Option<&'static str> {
        match self.state {
            RevealState::Hidden => None,
            RevealState::Visible => Some("is-visible"),
            RevealState::Fading => Some("is-fading"),
        }
    }
}

/// A target whose presentation changed during one handler call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealUpdate {
    /// Changed target.
    pub target: ElementId,
    /// New presentation.
    pub presentation: Presentation,
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/presentation.rs"]
mod tests;
