// Default physical constants for the viscoelastic fluid, in screen pixels and seconds.

// Global physics (y points down, so positive gravity pulls particles down the screen)
pub const GRAVITY: f32 = 500.0;

// Neighborhood
pub const INTERACTION_RADIUS: f32 = 30.0;

// Double-density relaxation
pub const REST_DENSITY: f32 = 4.0;
pub const STIFFNESS: f32 = 400.0;
pub const NEAR_STIFFNESS: f32 = 4000.0;

// Plastic springs
pub const SPRING_CONSTANT: f32 = 2000.0;
pub const PLASTICITY_CONSTANT: f32 = 5.0;
pub const YIELD_RATIO: f32 = 0.2;

// Viscosity impulses
pub const LINEAR_VISCOSITY: f32 = 0.5;
pub const QUADRATIC_VISCOSITY: f32 = 0.01;

// Fixed simulation rate used by the plugin
pub const STEP_HZ: f64 = 60.0;
