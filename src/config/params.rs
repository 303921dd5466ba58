use super::check;
use super::constants;
use crate::math::Real;

/// Strategy used to discover particle pairs within the interaction radius.
///
/// Both strategies produce identical neighbor lists; the grid only skips
/// pairs that are trivially too far apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NeighborSearch {
    /// Pairwise distance checks over every unordered pair.
    #[default]
    BruteForce,
    /// Sparse hashed grid with cells as wide as the interaction radius.
    Grid,
}

/// Parameters controlling the viscoelastic fluid.
///
/// Supplied once when the simulation is created and readable afterwards.
/// All values are expected to be positive; the solver divides by
/// `interaction_radius` and never validates it on the hot path.
#[derive(Clone, Debug, PartialEq)]
pub struct ViscoelasticParams {
    /// Downward acceleration added to `velocity.y` every step.
    pub gravity: Real,

    /// Maximum distance at which two particles influence each other.
    pub interaction_radius: Real,

    /// Target density of the double-density relaxation.
    pub rest_density: Real,

    /// Pressure stiffness (k).
    pub stiffness: Real,

    /// Near-pressure stiffness (k near); keeps particles from clustering.
    pub near_stiffness: Real,

    /// Spring stiffness (k spring).
    pub spring_constant: Real,

    /// Rate at which rest lengths creep toward the current distance (alpha).
    pub plasticity_constant: Real,

    /// Fraction of the rest length inside which springs stay elastic (gamma).
    pub yield_ratio: Real,

    /// Linear viscosity term (sigma).
    pub linear_viscosity: Real,

    /// Quadratic viscosity term (beta).
    pub quadratic_viscosity: Real,

    pub neighbor_search: NeighborSearch,
}

impl Default for ViscoelasticParams {
    fn default() -> Self {
        Self {
            gravity: constants::GRAVITY,
            interaction_radius: constants::INTERACTION_RADIUS,
            rest_density: constants::REST_DENSITY,
            stiffness: constants::STIFFNESS,
            near_stiffness: constants::NEAR_STIFFNESS,
            spring_constant: constants::SPRING_CONSTANT,
            plasticity_constant: constants::PLASTICITY_CONSTANT,
            yield_ratio: constants::YIELD_RATIO,
            linear_viscosity: constants::LINEAR_VISCOSITY,
            quadratic_viscosity: constants::QUADRATIC_VISCOSITY,
            neighbor_search: NeighborSearch::BruteForce,
        }
    }
}

impl ViscoelasticParams {
    /// Thick fluid with strong viscosity impulses.
    pub fn viscous() -> Self {
        Self {
            linear_viscosity: 3.0,
            quadratic_viscosity: 0.1,
            ..Self::default()
        }
    }

    /// Jelly-like material: stiff springs that barely yield.
    pub fn elastic() -> Self {
        Self {
            spring_constant: 8000.0,
            plasticity_constant: 0.5,
            yield_ratio: 0.4,
            ..Self::default()
        }
    }

    pub fn with_gravity(mut self, gravity: Real) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_interaction_radius(mut self, radius: Real) -> Self {
        self.interaction_radius = radius;
        self
    }

    /// Set the relaxation targets (rest density, stiffness, near stiffness).
    pub fn with_relaxation(mut self, rest_density: Real, stiffness: Real, near_stiffness: Real) -> Self {
        self.rest_density = rest_density;
        self.stiffness = stiffness;
        self.near_stiffness = near_stiffness;
        self
    }

    /// Set the spring model (spring constant, plasticity constant, yield ratio).
    pub fn with_springs(mut self, spring_constant: Real, plasticity_constant: Real, yield_ratio: Real) -> Self {
        self.spring_constant = spring_constant;
        self.plasticity_constant = plasticity_constant;
        self.yield_ratio = yield_ratio;
        self
    }

    pub fn with_viscosity(mut self, linear: Real, quadratic: Real) -> Self {
        self.linear_viscosity = linear;
        self.quadratic_viscosity = quadratic;
        self
    }

    pub fn with_neighbor_search(mut self, search: NeighborSearch) -> Self {
        self.neighbor_search = search;
        self
    }

    #[inline]
    pub fn interaction_radius_squared(&self) -> Real {
        self.interaction_radius * self.interaction_radius
    }

    /// Names of the fields that fail their sanity check.
    ///
    /// The radius must be strictly positive; every other coefficient may be
    /// zero (which switches the corresponding effect off) but not negative.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut invalid = Vec::new();
        if !check::radius_ok(self.interaction_radius) {
            invalid.push("interaction_radius");
        }
        let coefficients = [
            ("gravity", self.gravity),
            ("rest_density", self.rest_density),
            ("stiffness", self.stiffness),
            ("near_stiffness", self.near_stiffness),
            ("spring_constant", self.spring_constant),
            ("plasticity_constant", self.plasticity_constant),
            ("yield_ratio", self.yield_ratio),
            ("linear_viscosity", self.linear_viscosity),
            ("quadratic_viscosity", self.quadratic_viscosity),
        ];
        for (name, value) in coefficients {
            if !check::coefficient_ok(value) {
                invalid.push(name);
            }
        }
        invalid
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }
}
