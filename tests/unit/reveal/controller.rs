use super::*;
use crate::foundation::core::Viewport;
use crate::sim::host::SimHost;

const VIEW: Viewport = Viewport {
    width: 400.0,
    height: 800.0,
};

const A: ElementId = ElementId(1);
const B: ElementId = ElementId(2);

fn pump(host: &mut SimHost, ctl: &mut RevealController) -> Vec<RevealUpdate> {
    let mut out = Vec::new();
    host.pump(|cb, host| out.extend(ctl.handle(&cb, host)));
    out
}

fn frame(host: &mut SimHost, ctl: &mut RevealController) -> Vec<RevealUpdate> {
    host.next_frame();
    pump(host, ctl)
}

fn state(ctl: &RevealController, id: ElementId) -> RevealState {
    ctl.presentation(id).map(|p| p.state).unwrap()
}

fn toggle_out() -> RevealOptions {
    RevealOptions {
        toggle_out_on_scroll_up: true,
        ..RevealOptions::default()
    }
}

fn polling() -> PlatformProfile {
    PlatformProfile {
        intersection_observer: false,
        ..PlatformProfile::desktop()
    }
}

#[test]
fn prime_reveals_in_view_targets_before_any_callback() {
    let mut host = SimHost::new(VIEW);
    host.place_block(A, 100.0, 200.0);
    host.place_block(B, 2000.0, 200.0);
    let mut ctl = RevealController::new();
    let mode = ctl
        .register(&[A, B], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    assert_eq!(mode, RegisterOutcome::Observing);
    assert_eq!(state(&ctl, A), RevealState::Visible);
    assert_eq!(state(&ctl, B), RevealState::Hidden);
    assert_eq!(host.stats().intersection_batches, 0);
    assert!(host.queued() > 0);
}

#[test]
fn reveals_once_threshold_is_crossed_scrolling_down() {
    let mut host = SimHost::new(VIEW);
    host.place_block(B, 1000.0, 200.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    pump(&mut host, &mut ctl);

    host.scroll_to(230.0); // ratio 0.15
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Hidden);

    host.scroll_to(250.0); // ratio 0.25
    let updates = pump(&mut host, &mut ctl);
    assert_eq!(
        updates,
        vec![RevealUpdate {
            target: B,
            presentation: Presentation::VISIBLE
        }]
    );
}

#[test]
fn reveal_once_survives_scrolling_back_up() {
    let mut host = SimHost::new(VIEW);
    host.place_block(B, 1000.0, 200.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    host.scroll_to(600.0);
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);

    for y in [300.0, 250.0, 100.0, 0.0] {
        host.scroll_to(y);
        pump(&mut host, &mut ctl);
        frame(&mut host, &mut ctl);
    }
    assert_eq!(ctl.direction(), ScrollDirection::Up);
    assert_eq!(state(&ctl, B), RevealState::Visible);
}

#[test]
fn toggle_out_fades_progressively_then_hides_and_rearms() {
    let mut host = SimHost::new(VIEW);
    host.place_block(B, 1000.0, 200.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &toggle_out(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    host.scroll_to(600.0);
    pump(&mut host, &mut ctl);
    frame(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);

    // Still fully inside: no fade.
    host.scroll_to(500.0);
    pump(&mut host, &mut ctl);
    frame(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);

    host.scroll_to(300.0);
    pump(&mut host, &mut ctl);
    frame(&mut host, &mut ctl);
    assert_eq!(ctl.presentation(B), Some(Presentation::fading(0.5)));

    host.scroll_to(250.0);
    pump(&mut host, &mut ctl);
    frame(&mut host, &mut ctl);
    let p = ctl.presentation(B).unwrap();
    assert_eq!(p.state, RevealState::Fading);
    assert_eq!(p.progress, 0.25);
    assert_eq!(p.opacity(), 0.25);

    host.scroll_to(200.0);
    pump(&mut host, &mut ctl);
    frame(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Hidden);
    assert!(ctl.ever_shown(B));

    host.scroll_to(400.0);
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);
}

#[test]
fn fading_target_recovers_when_direction_turns_down() {
    let mut host = SimHost::new(VIEW);
    host.place_block(B, 1000.0, 200.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &toggle_out(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    host.scroll_to(600.0);
    pump(&mut host, &mut ctl);
    host.scroll_to(300.0);
    pump(&mut host, &mut ctl);
    frame(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Fading);

    host.scroll_to(320.0);
    pump(&mut host, &mut ctl);
    assert!(host.pending_frames() > 0);
    frame(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);
}

#[test]
fn measurement_requests_coalesce_within_a_frame() {
    let mut host = SimHost::new(VIEW);
    host.place_block(B, 1000.0, 200.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &toggle_out(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    host.scroll_to(600.0);
    pump(&mut host, &mut ctl);
    frame(&mut host, &mut ctl);

    let before = host.stats().frames_requested;
    for y in [590.0, 580.0, 570.0, 560.0] {
        host.scroll_to(y);
        pump(&mut host, &mut ctl);
    }
    assert_eq!(host.stats().frames_requested, before + 1);
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn reduced_motion_reveals_everything_and_observes_nothing() {
    let mut host = SimHost::new(VIEW);
    host.place_block(A, 5000.0, 200.0);
    host.place_block(B, 9000.0, 200.0);
    let profile = PlatformProfile {
        reduced_motion: true,
        ..PlatformProfile::desktop()
    };
    let mut ctl = RevealController::new();
    let mode = ctl
        .register(&[A, B], &toggle_out(), &profile, &mut host)
        .unwrap();
    assert_eq!(mode, RegisterOutcome::ReducedMotion);
    assert!(ctl.presentations().all(|(_, p)| p == Presentation::VISIBLE));
    assert_eq!(host.stats().observers_created, 0);
    assert_eq!(host.live_listeners(), 0);
    assert_eq!(host.pending_timers(), 0);
    assert_eq!(host.pending_frames(), 0);

    host.scroll_to(8000.0);
    host.scroll_to(0.0);
    host.advance(Duration::from_secs(5));
    assert!(pump(&mut host, &mut ctl).is_empty());
    assert_eq!(host.stats().intersection_batches, 0);
}

#[test]
fn reduced_motion_can_be_ignored_by_option() {
    let mut host = SimHost::new(VIEW);
    host.place_block(A, 5000.0, 200.0);
    let profile = PlatformProfile {
        reduced_motion: true,
        ..PlatformProfile::desktop()
    };
    let opts = RevealOptions {
        respect_reduced_motion: false,
        ..RevealOptions::default()
    };
    let mut ctl = RevealController::new();
    let mode = ctl.register(&[A], &opts, &profile, &mut host).unwrap();
    assert_eq!(mode, RegisterOutcome::Observing);
    assert_eq!(state(&ctl, A), RevealState::Hidden);
}

#[test]
fn empty_target_set_is_not_an_error() {
    let mut host = SimHost::new(VIEW);
    let mut ctl = RevealController::new();
    let mode = ctl
        .register(&[], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    assert_eq!(mode, RegisterOutcome::Empty);
    assert!(!ctl.is_active());
    assert_eq!(host.live_listeners(), 0);
    ctl.teardown(&mut host);
}

#[test]
fn invalid_registration_is_rejected() {
    let mut host = SimHost::new(VIEW);
    let mut ctl = RevealController::new();
    assert!(matches!(
        ctl.register(&[A, A], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host),
        Err(ScrollcueError::Validation(_))
    ));
    let bad = RevealOptions {
        threshold: -0.5,
        ..RevealOptions::default()
    };
    assert!(matches!(
        ctl.register(&[A], &bad, &PlatformProfile::desktop(), &mut host),
        Err(ScrollcueError::Config(_))
    ));

    ctl.register(&[A], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    assert!(
        ctl.register(&[B], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
            .is_err()
    );
}

#[test]
fn teardown_is_idempotent_and_silences_late_callbacks() {
    let mut host = SimHost::new(VIEW);
    host.place_block(B, 1000.0, 200.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &toggle_out(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    pump(&mut host, &mut ctl);

    host.scroll_to(600.0);
    let late = host.pop().unwrap();
    ctl.teardown(&mut host);
    ctl.teardown(&mut host);

    assert!(ctl.handle(&late, &mut host).is_empty());
    assert_eq!(host.live_observers(), 0);
    assert_eq!(host.live_listeners(), 0);
    assert_eq!(host.pending_timers(), 0);
    assert_eq!(host.pending_frames(), 0);
    assert!(pump(&mut host, &mut ctl).is_empty());
    assert_eq!(state(&ctl, B), RevealState::Hidden);
}

#[test]
fn controller_can_register_again_after_teardown() {
    let mut host = SimHost::new(VIEW);
    host.place_block(A, 0.0, 100.0);
    let mut ctl = RevealController::new();
    ctl.register(&[A], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    ctl.teardown(&mut host);
    let mode = ctl
        .register(&[A], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    assert_eq!(mode, RegisterOutcome::Observing);
    assert_eq!(host.live_observers(), 1);
}

#[test]
fn first_frame_and_bailout_reprime_late_layout() {
    let mut host = SimHost::new(VIEW);
    let mut ctl = RevealController::new();
    ctl.register(&[A, B], &RevealOptions::default(), &polling(), &mut host)
        .unwrap();
    assert_eq!(ctl.mode(), Some(RegisterOutcome::Polling));

    host.place_block(A, 100.0, 100.0);
    frame(&mut host, &mut ctl);
    assert_eq!(state(&ctl, A), RevealState::Visible);

    host.place_block(B, 300.0, 100.0);
    host.advance(Duration::from_millis(1199));
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Hidden);
    host.advance(Duration::from_millis(1));
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);
}

#[test]
fn polling_reveals_on_scroll() {
    let mut host = SimHost::new(VIEW);
    host.place_block(B, 1000.0, 200.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &RevealOptions::default(), &polling(), &mut host)
        .unwrap();
    host.scroll_to(100.0);
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Hidden);
    host.scroll_to(300.0);
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);
    assert_eq!(host.stats().observers_created, 0);
}

#[test]
fn viewport_changes_reprime_after_debounce() {
    let mut host = SimHost::new(Viewport::new(800.0, 400.0));
    host.place_block(B, 500.0, 100.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &RevealOptions::default(), &polling(), &mut host)
        .unwrap();

    host.rotate();
    pump(&mut host, &mut ctl);
    host.advance(Duration::from_millis(30));
    host.emit(HostEvent::VisualViewportResize);
    pump(&mut host, &mut ctl);

    host.advance(Duration::from_millis(40));
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Hidden);

    host.advance(Duration::from_millis(20));
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);
}

#[test]
fn ios_bailout_forces_reveal_and_disables_toggle_out() {
    let mut host = SimHost::new(VIEW);
    host.place_block(A, 100.0, 200.0);
    host.place_block(B, 5000.0, 200.0);
    let ios = PlatformProfile {
        ios: true,
        ..PlatformProfile::desktop()
    };
    let mut ctl = RevealController::new();
    ctl.register(&[A, B], &toggle_out(), &ios, &mut host).unwrap();
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Hidden);

    host.advance(Duration::from_millis(1200));
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Visible);

    host.scroll_to(1000.0);
    pump(&mut host, &mut ctl);
    host.scroll_to(0.0);
    pump(&mut host, &mut ctl);
    frame(&mut host, &mut ctl);
    assert_eq!(ctl.direction(), ScrollDirection::Up);
    assert_eq!(state(&ctl, B), RevealState::Visible);
}

#[test]
fn load_event_primes() {
    let mut host = SimHost::new(VIEW);
    let mut ctl = RevealController::new();
    ctl.register(&[A], &RevealOptions::default(), &polling(), &mut host)
        .unwrap();
    host.place_block(A, 0.0, 50.0);
    host.load();
    let updates = pump(&mut host, &mut ctl);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].target, A);
}

#[test]
fn section_taller_than_the_threshold_allows_still_reveals() {
    // 8 viewports tall: the intersection ratio never exceeds 0.125.
    let mut host = SimHost::new(Viewport::new(400.0, 700.0));
    host.place_block(B, 1000.0, 5600.0);
    let mut ctl = RevealController::new();
    ctl.register(&[B], &RevealOptions::default(), &PlatformProfile::desktop(), &mut host)
        .unwrap();
    host.advance(Duration::from_millis(1500));
    pump(&mut host, &mut ctl);
    assert_eq!(state(&ctl, B), RevealState::Hidden);

    for step in 1..=40 {
        let y = step as f64 * 100.0;
        host.scroll_to(y);
        pump(&mut host, &mut ctl);
        frame(&mut host, &mut ctl);
        // 100px of 700 visible is below 0.18; 200px is above.
        let expected = if y < 500.0 {
            RevealState::Hidden
        } else {
            RevealState::Visible
        };
        assert_eq!(state(&ctl, B), expected, "scroll_y = {y}");
    }
}
