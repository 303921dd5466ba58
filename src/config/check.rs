//! Check if parameter values make sense

use crate::math::Real;

/// The interaction radius is divided by on every pair, so it must be strictly positive.
#[inline]
pub fn radius_ok(radius: Real) -> bool {
    radius > 0.0 && radius.is_finite()
}

/// Stiffness, viscosity and spring coefficients: zero disables the effect.
#[inline]
pub fn coefficient_ok(value: Real) -> bool {
    value >= 0.0 && value.is_finite()
}

/// Timesteps must be positive; velocity is reconstructed by dividing by `dt`.
#[inline]
pub fn timestep_ok(dt: Real) -> bool {
    dt > 0.0 && dt.is_finite()
}

/// Plastic creep is only guaranteed not to overshoot when `dt * alpha <= 1`.
#[inline]
pub fn plastic_rate_ok(dt: Real, plasticity_constant: Real) -> bool {
    dt * plasticity_constant <= 1.0
}
