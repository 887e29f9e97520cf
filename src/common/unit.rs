//! Unit conversion utilities.
//!
//! DrawingML expresses positions in EMUs (English Metric Units) and font sizes
//! in hundredths of a point. The renderer works in CSS pixels and in
//! percentages of the slide, so every conversion lives here.

/// CSS reference resolution.
pub const CSS_DPI: f64 = 96.0;
pub const POINTS_PER_INCH: f64 = 72.0;

/// Default 4:3 slide width (10 in) when `p:sldSz` is absent.
pub const DEFAULT_SLIDE_WIDTH_EMU: i64 = 9_144_000;
/// Default 4:3 slide height (7.5 in) when `p:sldSz` is absent.
pub const DEFAULT_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// Convert a point size to CSS pixels (`px = pt × 96 / 72`).
#[inline]
pub fn pt_to_px(pt: f64) -> f64 {
    pt * CSS_DPI / POINTS_PER_INCH
}

/// Convert a DrawingML `sz` value (hundredths of a point) to CSS pixels.
///
/// Zero means "no explicit size" and maps to `None`, so the renderer falls
/// back to the viewer default instead of emitting `0px`.
#[inline]
pub fn centipoints_to_px(sz: u32) -> Option<f64> {
    if sz == 0 {
        return None;
    }
    Some(pt_to_px(sz as f64 / 100.0))
}

/// Offset as a percentage of `total`, clamped to be non-negative.
#[inline]
pub fn offset_percent(value: i64, total: i64) -> f64 {
    (value as f64 / total as f64 * 100.0).max(0.0)
}

/// Extent as a percentage of `total`, clamped to at most 100.
#[inline]
pub fn extent_percent(value: i64, total: i64) -> f64 {
    (value as f64 / total as f64 * 100.0).min(100.0)
}
