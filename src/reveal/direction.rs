use crate::foundation::core::ScrollDirection;

/// Derives [`ScrollDirection`] from consecutive vertical scroll samples.
///
/// Equal samples keep the previous direction. Before any movement the
/// direction is [`ScrollDirection::Down`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollTracker {
    last: Option<f64>,
    direction: ScrollDirection,
}

impl ScrollTracker {
    /// A tracker with no samples yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker whose first sample is `y`.
    pub fn seeded(y: f64) -> Self {
        Self {
            last: Some(y),
            direction: ScrollDirection::Down,
        }
    }

    /// Feed a scroll offset and return the resulting direction.
    pub fn sample(&mut self, y: f64) -> ScrollDirection {
        if let Some(prev) = self.last {
            if y > prev {
                self.direction = ScrollDirection::Down;
            } else if y < prev {
                self.direction = ScrollDirection::Up;
            }
        }
        self.last = Some(y);
        self.direction
    }

    /// Current direction.
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/direction.rs"]
mod tests;
