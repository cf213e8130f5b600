use crate::foundation::core::Rect;

/// Fade ratios at or below this value count as fully faded out.
pub(crate) const FADE_EPSILON: f64 = 1e-3;

pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Height of `bounds` that lies inside the vertical band `[0, vh]`.
pub(crate) fn visible_height(bounds: Rect, vh: f64) -> f64 {
    (bounds.y1.min(vh) - bounds.y0.max(0.0)).max(0.0)
}

/// Fade progress for an element leaving through the viewport bottom.
///
/// `1.0` while the element fills as much of the viewport as it can, `0.0` once it
/// is fully outside. Elements taller than the viewport are measured against the
/// viewport height so they start fading only once they stop covering it.
pub(crate) fn fade_ratio(bounds: Rect, vh: f64) -> f64 {
    let denom = vh.min(bounds.height());
    if denom <= 0.0 {
        return 0.0;
    }
    clamp01(visible_height(bounds, vh) / denom)
}

/// Geometric in-view test used by prime passes and the polling fallback.
///
/// The fudge factors shrink the band at the top and extend it past the top edge,
/// tolerating hosts whose reported height disagrees with on-screen toolbars.
pub(crate) fn in_view_with_fudge(bounds: Rect, vh: f64, fudge_top: f64, fudge_bottom: f64) -> bool {
    bounds.y0 < vh * (1.0 - fudge_top) && bounds.y1 > vh * -fudge_bottom
}

/// Intersection of `bounds` with `root` as `(ratio, is_intersecting)`.
///
/// Follows intersection-observer semantics: edge-adjacent boxes intersect with a
/// ratio of zero, and a zero-area target that intersects reports ratio `1.0`.
pub(crate) fn intersection_ratio(bounds: Rect, root: Rect) -> (f64, bool) {
    let w = bounds.x1.min(root.x1) - bounds.x0.max(root.x0);
    let h = bounds.y1.min(root.y1) - bounds.y0.max(root.y0);
    if w < 0.0 || h < 0.0 {
        return (0.0, false);
    }
    let area = bounds.width() * bounds.height();
    if area <= 0.0 {
        return (1.0, true);
    }
    (clamp01((w * h) / area), true)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
