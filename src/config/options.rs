use std::{fmt, fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context as _;
use smallvec::SmallVec;

use crate::foundation::{
    core::{Rect, Viewport},
    error::{ScrollcueError, ScrollcueResult},
};

/// Default reveal threshold (fraction of the target that must be visible).
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.18;
/// Ratios every reveal observer reports at, on top of the reveal threshold.
pub const REVEAL_BASE_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
/// Default visibility ratio at which preview media starts.
pub const DEFAULT_PLAY_THRESHOLD: f64 = 0.55;
/// Default media observer thresholds.
pub const MEDIA_THRESHOLDS: [f64; 4] = [0.0, 0.25, 0.55, 0.85];

/// One side of a [`RootMargin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginLength {
    /// Absolute CSS pixels.
    Px(f64),
    /// Percentage of the viewport axis the side belongs to.
    Percent(f64),
}

impl MarginLength {
    fn parse(token: &str) -> ScrollcueResult<Self> {
        let (num, percent) = if let Some(n) = token.strip_suffix("px") {
            (n, false)
        } else if let Some(n) = token.strip_suffix('%') {
            (n, true)
        } else if token == "0" {
            return Ok(Self::Px(0.0));
        } else {
            return Err(ScrollcueError::config(format!(
                "root margin value '{token}' must end in 'px' or '%'"
            )));
        };
        let v: f64 = num
            .parse()
            .map_err(|_| ScrollcueError::config(format!("root margin value '{token}' is not a number")))?;
        if !v.is_finite() {
            return Err(ScrollcueError::config(format!(
                "root margin value '{token}' must be finite"
            )));
        }
        Ok(if percent { Self::Percent(v) } else { Self::Px(v) })
    }

    fn resolve(self, axis_len: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => axis_len * p / 100.0,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// CSS-style margin applied to the viewport before intersection tests.
///
/// Positive values grow the root rectangle, negative values shrink it. Parses
/// the usual 1 to 4 value shorthand (`"0px 0px -12% 0px"`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    /// Top edge.
    pub top: MarginLength,
    /// Right edge.
    pub right: MarginLength,
    /// Bottom edge.
    pub bottom: MarginLength,
    /// Left edge.
    pub left: MarginLength,
}

impl RootMargin {
    /// A margin of zero on every side.
    pub const ZERO: Self = Self {
        top: MarginLength::Px(0.0),
        right: MarginLength::Px(0.0),
        bottom: MarginLength::Px(0.0),
        left: MarginLength::Px(0.0),
    };

    /// Parse CSS margin shorthand.
    pub fn parse(s: &str) -> ScrollcueResult<Self> {
        let parts = s
            .split_whitespace()
            .map(MarginLength::parse)
            .collect::<ScrollcueResult<Vec<_>>>()?;
        let (top, right, bottom, left) = match parts.as_slice() {
            [a] => (*a, *a, *a, *a),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => {
                return Err(ScrollcueError::config(format!(
                    "root margin '{s}' must have 1 to 4 values"
                )));
            }
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// Expand (or shrink) `viewport`'s rectangle by this margin.
    pub fn apply(&self, viewport: Viewport) -> Rect {
        let r = viewport.rect();
        Rect::new(
            r.x0 - self.left.resolve(viewport.width),
            r.y0 - self.top.resolve(viewport.height),
            r.x1 + self.right.resolve(viewport.width),
            r.y1 + self.bottom.resolve(viewport.height),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = ScrollcueError;

    fn try_from(s: String) -> ScrollcueResult<Self> {
        Self::parse(&s)
    }
}

impl From<RootMargin> for String {
    fn from(m: RootMargin) -> Self {
        m.to_string()
    }
}

/// Sorted, de-duplicated list of intersection ratios in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Thresholds(SmallVec<[f64; 6]>);

impl Thresholds {
    /// Validate and normalize a threshold list.
    pub fn new(values: impl IntoIterator<Item = f64>) -> ScrollcueResult<Self> {
        let mut v: SmallVec<[f64; 6]> = SmallVec::new();
        for t in values {
            if !t.is_finite() || !(0.0..=1.0).contains(&t) {
                return Err(ScrollcueError::config(format!(
                    "threshold {t} must be within [0, 1]"
                )));
            }
            v.push(t);
        }
        if v.is_empty() {
            return Err(ScrollcueError::config("threshold list must not be empty"));
        }
        v.sort_by(f64::total_cmp);
        v.dedup();
        Ok(Self(v))
    }

    /// Thresholds as a slice, ascending.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `true` if moving from `prev` to `next` crosses any threshold.
    pub fn crossed(&self, prev: f64, next: f64) -> bool {
        self.0
            .iter()
            .any(|&t| (prev < t && next >= t) || (prev >= t && next < t))
    }
}

impl TryFrom<Vec<f64>> for Thresholds {
    type Error = ScrollcueError;

    fn try_from(v: Vec<f64>) -> ScrollcueResult<Self> {
        Self::new(v)
    }
}

impl From<Thresholds> for Vec<f64> {
    fn from(t: Thresholds) -> Self {
        t.0.into_vec()
    }
}

/// Options a page passes to [`crate::RevealController::register`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealOptions {
    /// Margin applied to the viewport before intersection tests.
    pub root_margin: RootMargin,
    /// Fraction of a target that must be visible before it is revealed.
    pub threshold: f64,
    /// Fade targets out as they leave through the bottom while scrolling up.
    pub toggle_out_on_scroll_up: bool,
    /// Reveal everything immediately when the user prefers reduced motion.
    pub respect_reduced_motion: bool,
    /// Delay of the one-shot bail-out re-prime.
    pub bailout_ms: u64,
    /// Debounce applied to visual-viewport resizes and orientation changes.
    pub viewport_settle_ms: u64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::ZERO,
            threshold: DEFAULT_REVEAL_THRESHOLD,
            toggle_out_on_scroll_up: false,
            respect_reduced_motion: true,
            bailout_ms: 1200,
            viewport_settle_ms: 60,
        }
    }
}

impl RevealOptions {
    /// Validate option ranges.
    pub fn validate(&self) -> ScrollcueResult<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ScrollcueError::config(
                "reveal threshold must be finite and within [0, 1]",
            ));
        }
        Ok(())
    }

    /// Observer thresholds: the base ladder plus the reveal threshold.
    pub fn observer_thresholds(&self, reveal_threshold: f64) -> ScrollcueResult<Thresholds> {
        Thresholds::new(
            REVEAL_BASE_THRESHOLDS
                .iter()
                .copied()
                .chain(std::iter::once(reveal_threshold)),
        )
    }

    pub(crate) fn bailout(&self) -> Duration {
        Duration::from_millis(self.bailout_ms)
    }

    pub(crate) fn viewport_settle(&self) -> Duration {
        Duration::from_millis(self.viewport_settle_ms)
    }
}

/// Options for [`crate::MediaVisibilityController`] and the lightbox.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaOptions {
    /// Margin applied to the viewport before intersection tests.
    pub root_margin: RootMargin,
    /// Ratio at or above which a card becomes eligible to play.
    pub play_threshold: f64,
    /// Observer thresholds; should bracket `play_threshold`.
    pub thresholds: Thresholds,
    /// Delay between opening a lightbox and starting its media.
    pub lightbox_autoplay_ms: u64,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::ZERO,
            play_threshold: DEFAULT_PLAY_THRESHOLD,
            thresholds: Thresholds(SmallVec::from_slice(&MEDIA_THRESHOLDS)),
            lightbox_autoplay_ms: 50,
        }
    }
}

impl MediaOptions {
    /// Validate option ranges.
    pub fn validate(&self) -> ScrollcueResult<()> {
        if !self.play_threshold.is_finite() || !(0.0..=1.0).contains(&self.play_threshold) {
            return Err(ScrollcueError::config(
                "play threshold must be finite and within [0, 1]",
            ));
        }
        Ok(())
    }

    pub(crate) fn lightbox_autoplay(&self) -> Duration {
        Duration::from_millis(self.lightbox_autoplay_ms)
    }
}

/// Per-page configuration for both controllers.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Reveal controller options.
    pub reveal: RevealOptions,
    /// Media controller options.
    pub media: MediaOptions,
}

impl SessionConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollcueResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollcueError::serde(format!("parse session config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> ScrollcueResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollcueResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open session config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate both option blocks.
    pub fn validate(&self) -> ScrollcueResult<()> {
        self.reveal.validate()?;
        self.media.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
