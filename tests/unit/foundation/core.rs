use super::*;

#[test]
fn direction_defaults_down() {
    assert_eq!(ScrollDirection::default(), ScrollDirection::Down);
}

#[test]
fn page_visibility_foreground_flag() {
    assert!(PageVisibility::Visible.is_foreground());
    assert!(!PageVisibility::Hidden.is_foreground());
}

#[test]
fn viewport_rect_starts_at_origin() {
    let vp = Viewport::new(390.0, 844.0);
    let r = vp.rect();
    assert_eq!(r.x0, 0.0);
    assert_eq!(r.y0, 0.0);
    assert_eq!(r.height(), 844.0);
}
