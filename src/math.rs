use bevy::math::Vec2;

pub type Real = f32;

pub type Vector = Vec2;
pub type Point = Vec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec2::ZERO
}

/// Exact zero check inverse (prevents NaN from division by zero)
#[inline(always)]
pub fn inv_exact(e: Real) -> Real {
    if e == 0.0 { 0.0 } else { 1.0 / e }
}

/// Splits an offset into its length and unit direction.
///
/// A zero-length offset yields a zero direction, so coincident particles
/// contribute nothing to any term that scales by the direction.
#[inline(always)]
pub fn length_and_direction(offset: Vector) -> (Real, Vector) {
    let length = offset.length();
    (length, offset * inv_exact(length))
}

/// Normalized closeness `1 - |offset| / radius`, positive inside the radius.
#[inline(always)]
pub fn closeness(distance: Real, radius: Real) -> Real {
    1.0 - distance / radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_offset_has_zero_direction() {
        let (length, direction) = length_and_direction(Vec2::ZERO);
        assert_eq!(length, 0.0);
        assert_eq!(direction, Vec2::ZERO);
        assert!(direction.is_finite());
    }

    #[test]
    fn test_direction_is_unit() {
        let (length, direction) = length_and_direction(Vec2::new(3.0, 4.0));
        assert_eq!(length, 5.0);
        assert!((direction.length() - 1.0).abs() < 1e-6);
        assert!((direction.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_closeness_bounds() {
        assert_eq!(closeness(0.0, 30.0), 1.0);
        assert_eq!(closeness(30.0, 30.0), 0.0);
        assert!(closeness(10.0, 30.0) > 0.0);
    }
}
