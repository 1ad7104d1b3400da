use std::f64::consts::TAU;

use crate::core::types::{PixelPoint, PolarOffset};

#[must_use]
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Angle and distance of `point` around `center`.
///
/// The angle is `atan2` shifted into positive territory (`2π + atan2`), with
/// one more turn added in the top-left quadrant. Spoke lookup on radial
/// scales depends on that offset, so callers wanting `[0, 2π)` reduce it with
/// `rem_euclid(TAU)`.
#[must_use]
pub fn angle_from_point(center: PixelPoint, point: PixelPoint) -> PolarOffset {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let distance = (dx * dx + dy * dy).sqrt();
    let mut angle = TAU + dy.atan2(dx);
    if dx < 0.0 && dy < 0.0 {
        angle += TAU;
    }
    PolarOffset { angle, distance }
}

/// Half-pixel offset that keeps odd-width strokes crisp.
#[must_use]
pub fn alias_pixel(line_width: f64) -> f64 {
    if line_width % 2.0 == 0.0 { 0.0 } else { 0.5 }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::{alias_pixel, angle_from_point};
    use crate::core::PixelPoint;

    #[test]
    fn angles_reduce_to_screen_quadrants() {
        let center = PixelPoint::new(0.0, 0.0);
        let below = angle_from_point(center, PixelPoint::new(0.0, 5.0));
        let above = angle_from_point(center, PixelPoint::new(0.0, -5.0));
        let left = angle_from_point(center, PixelPoint::new(-5.0, 0.0));

        assert!((below.angle.rem_euclid(TAU) - FRAC_PI_2).abs() <= 1e-12);
        assert!((above.angle.rem_euclid(TAU) - 3.0 * FRAC_PI_2).abs() <= 1e-12);
        assert!((left.angle.rem_euclid(TAU) - PI).abs() <= 1e-12);
        assert_eq!(below.distance, 5.0);
    }

    #[test]
    fn top_left_quadrant_gets_extra_turn() {
        let offset = angle_from_point(PixelPoint::new(0.0, 0.0), PixelPoint::new(-1.0, -1.0));
        assert!((offset.angle - (2.0 * TAU - 3.0 * PI / 4.0)).abs() <= 1e-12);
    }

    #[test]
    fn alias_pixel_only_offsets_odd_widths() {
        assert_eq!(alias_pixel(1.0), 0.5);
        assert_eq!(alias_pixel(2.0), 0.0);
        assert_eq!(alias_pixel(0.0), 0.0);
    }
}
