use super::*;

fn probe(ua: &str) -> EnvironmentProbe {
    EnvironmentProbe {
        user_agent: ua.to_owned(),
        prefers_reduced_motion: false,
        intersection_observer: true,
        css_view_timeline: true,
    }
}

#[test]
fn detects_ios_devices_case_insensitively() {
    let p = PlatformProfile::detect(&probe(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15",
    ));
    assert!(p.ios);
    assert!(!p.view_timeline, "view timelines are never trusted on iOS");

    assert!(PlatformProfile::detect(&probe("Mozilla/5.0 (IPAD; CPU OS 16_0)")).ios);
    assert!(!PlatformProfile::detect(&probe("Mozilla/5.0 (X11; Linux x86_64)")).ios);
}

#[test]
fn desktop_view_timeline_follows_probe() {
    let p = PlatformProfile::detect(&probe("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"));
    assert!(p.view_timeline);
    assert_eq!(p.root_markers(), vec!["js-ready", "view-timeline-ok"]);
}

#[test]
fn ios_tuning_overrides_configuration() {
    let ios = PlatformProfile {
        ios: true,
        ..PlatformProfile::desktop()
    };
    assert_eq!(ios.viewport_fudge(), (0.10, 0.05));
    assert_eq!(ios.reveal_threshold(0.18), IOS_REVEAL_THRESHOLD);
    assert_eq!(
        ios.reveal_root_margin(RootMargin::ZERO).to_string(),
        "0px 0px -12% 0px"
    );
    assert!(!ios.allows_toggle_out());
    assert!(ios.force_reveal_on_bailout());
    assert_eq!(ios.root_markers(), vec!["js-ready", "ios"]);

    let desk = PlatformProfile::desktop();
    assert_eq!(desk.viewport_fudge(), (0.0, 0.0));
    assert_eq!(desk.reveal_threshold(0.18), 0.18);
    assert!(desk.allows_toggle_out());
}
