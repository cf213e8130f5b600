pub use kurbo::{Point, Rect, Size};

/// Opaque host element identity.
///
/// The host decides how ids map onto its own nodes; controllers only compare
/// and hash them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

/// Vertical scroll direction derived from consecutive scroll samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrollDirection {
    /// Content moves toward the top; scroll offset shrinks.
    Up,
    /// Content moves toward the bottom; scroll offset grows. Session default.
    #[default]
    Down,
}

/// Page foreground/background state as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PageVisibility {
    /// The page is in the foreground.
    #[default]
    Visible,
    /// The page is backgrounded (hidden tab, minimized window).
    Hidden,
}

impl PageVisibility {
    /// `true` when the page is foregrounded.
    pub fn is_foreground(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Layout viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height (the visual viewport height when the host has one).
    pub height: f64,
}

impl Viewport {
    /// Build a viewport from width and height.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport rectangle in viewport coordinates (origin at top-left).
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
