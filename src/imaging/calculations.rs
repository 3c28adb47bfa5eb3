//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the output width for a target height, preserving aspect ratio.
///
/// Uses 64-bit integer division: the width is truncated toward zero, never
/// rounded. The result is exact for every `u32` input, so it can exceed
/// `u32::MAX` for extreme aspect ratios; callers decide whether such a width
/// is usable.
///
/// # Panics
///
/// Panics if the source height or the target height is zero. Callers only
/// pass dimensions of successfully decoded images.
///
/// # Examples
/// ```
/// # use imgopty::imaging::target_width;
/// // 1920x1080 → 480p: 1920 * 480 / 1080 = 853.33 → 853
/// assert_eq!(target_width((1920, 1080), 480), 853);
/// ```
pub fn target_width(source: (u32, u32), target_height: u32) -> u64 {
    let (src_w, src_h) = source;
    assert!(src_h > 0, "source height must be non-zero");
    assert!(target_height > 0, "target height must be non-zero");

    u64::from(src_w) * u64::from(target_height) / u64::from(src_h)
}
