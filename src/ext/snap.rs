//! Pixel snapping.
//!
//! World coordinates are rounded to the nearest multiple of
//! `1 / pixels_per_unit` so sprites land on whole screen pixels.

/// Round `value` to the pixel grid. Non-positive `pixels_per_unit` leaves it unchanged.
pub fn snap_to_pixel(value: f32, pixels_per_unit: f32) -> f32 {
    if pixels_per_unit <= 0.0 {
        return value;
    }
    (value * pixels_per_unit).round() / pixels_per_unit
}

/// [`snap_to_pixel`] for both axes.
pub fn snap_point(point: (f32, f32), pixels_per_unit: f32) -> (f32, f32) {
    (
        snap_to_pixel(point.0, pixels_per_unit),
        snap_to_pixel(point.1, pixels_per_unit),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snaps_to_grid() {
        assert_eq!(snap_to_pixel(1.26, 4.0), 1.25);
        assert_eq!(snap_to_pixel(-0.6, 1.0), -1.0);
        assert_eq!(snap_point((0.49, 2.51), 2.0), (0.5, 2.5));
    }

    #[test]
    fn test_invalid_grid_passes_through() {
        assert_eq!(snap_to_pixel(1.337, 0.0), 1.337);
        assert_eq!(snap_to_pixel(1.337, -16.0), 1.337);
    }
}
