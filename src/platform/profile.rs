use crate::config::options::{MarginLength, RootMargin};

/// Raw capability and preference signals read from the host once per session.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EnvironmentProbe {
    /// Host user agent string.
    pub user_agent: String,
    /// `prefers-reduced-motion: reduce` matched.
    pub prefers_reduced_motion: bool,
    /// The host can observe viewport intersections natively.
    pub intersection_observer: bool,
    /// The host supports scroll-driven `view()` animation timelines.
    pub css_view_timeline: bool,
}

/// Platform facts resolved once per observation session.
///
/// Replaces document-wide platform marker classes: components receive the
/// profile explicitly instead of reading ambient state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlatformProfile {
    /// Running on iPhone, iPod or iPad.
    pub ios: bool,
    /// The user prefers reduced motion.
    pub reduced_motion: bool,
    /// Native intersection observation is available.
    pub intersection_observer: bool,
    /// Scroll-driven timelines are trustworthy (never on iOS).
    pub view_timeline: bool,
}

/// Reveal threshold used on iOS, where observers fire late at coarse ratios.
pub(crate) const IOS_REVEAL_THRESHOLD: f64 = 0.001;

impl PlatformProfile {
    /// Resolve a profile from raw probe results.
    pub fn detect(probe: &EnvironmentProbe) -> Self {
        let ua = probe.user_agent.to_ascii_lowercase();
        let ios = ["iphone", "ipod", "ipad"].iter().any(|d| ua.contains(d));
        Self {
            ios,
            reduced_motion: probe.prefers_reduced_motion,
            intersection_observer: probe.intersection_observer,
            view_timeline: !ios && probe.css_view_timeline,
        }
    }

    /// Profile of a desktop browser with full capability support.
    pub fn desktop() -> Self {
        Self {
            ios: false,
            reduced_motion: false,
            intersection_observer: true,
            view_timeline: false,
        }
    }

    /// Marker classes a host may place on its document root for styling.
    pub fn root_markers(&self) -> Vec<&'static str> {
        let mut out = vec!["js-ready"];
        if self.ios {
            out.push("ios");
        }
        if self.view_timeline {
            out.push("view-timeline-ok");
        }
        out
    }

    /// `(top, bottom)` fudge factors for the geometric in-view test.
    pub fn viewport_fudge(&self) -> (f64, f64) {
        if self.ios { (0.10, 0.05) } else { (0.0, 0.0) }
    }

    /// Reveal threshold after platform adjustment.
    pub fn reveal_threshold(&self, configured: f64) -> f64 {
        if self.ios { IOS_REVEAL_THRESHOLD } else { configured }
    }

    /// Reveal root margin after platform adjustment (iOS reserves its bottom bar).
    pub fn reveal_root_margin(&self, configured: RootMargin) -> RootMargin {
        if self.ios {
            RootMargin {
                bottom: MarginLength::Percent(-12.0),
                ..RootMargin::ZERO
            }
        } else {
            configured
        }
    }

    /// Whether toggle-out may run; iOS repaint bugs make fading unreliable.
    pub fn allows_toggle_out(&self) -> bool {
        !self.ios
    }

    /// Whether the bail-out timer reveals every target instead of re-priming.
    pub fn force_reveal_on_bailout(&self) -> bool {
        self.ios
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::desktop()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/profile.rs"]
mod tests;
