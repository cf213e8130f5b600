use super::*;

#[test]
fn opacity_and_class_follow_state() {
    assert_eq!(Presentation::HIDDEN.opacity(), 0.0);
    assert_eq!(Presentation::HIDDEN.class_name(), None);
    assert_eq!(Presentation::VISIBLE.opacity(), 1.0);
    assert_eq!(Presentation::VISIBLE.class_name(), Some("is-visible"));

    let p = Presentation::fading(0.4);
    assert_eq!(p.opacity(), 0.4);
    assert_eq!(p.class_name(), Some("is-fading"));
}

#[test]
fn fading_progress_is_clamped() {
    assert_eq!(Presentation::fading(1.7).progress, 1.0);
    assert_eq!(Presentation::fading(-0.2).progress, 0.0);
    assert_eq!(Presentation::fading(f64::NAN).progress, 0.0);
}
