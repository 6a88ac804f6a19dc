//! Font scaling for the tag cloud.

/// Font size in pixels of the least used tag.
pub const MIN_FONT_SIZE: f64 = 12.0;
/// Font size in pixels of the most used tag.
pub const MAX_FONT_SIZE: f64 = 32.0;

/// Linear font size for a tag used `count` times.
///
/// `floor` is the smallest count shown in the cloud and `max_count` the largest one.
/// The divisor never drops below 1. When every tag shares one count, they all render at
/// [`MIN_FONT_SIZE`] if that count equals `floor` and at [`MAX_FONT_SIZE`] otherwise.
pub fn font_size(count: i64, floor: i64, max_count: i64) -> f64 {
    let divisor = (max_count - floor).max(1) as f64;
    MIN_FONT_SIZE + ((count - floor) as f64 / divisor) * (MAX_FONT_SIZE - MIN_FONT_SIZE)
}
