//! Point-mass deceleration and descent along a fixed entry angle.
//!
//! The trajectory is one-dimensional: the body travels along a straight
//! line inclined at the zenith angle, decelerated by drag and accelerated
//! by the along-track component of gravity. Lift and trajectory bending
//! are not modeled.

use crate::constants::{EARTH_RADIUS, GRAVITY_SEA_LEVEL};
use crate::control::meteoroid::MeteoroidBody;

/// Kinematic state of the body, advanced once per time step.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryState {
    pub height: f64,       // m above sea level
    pub speed: f64,        // m/s along the trajectory
    pub zenith_angle: f64, // degrees from local vertical, constant
    pub trail_length: f64, // m traveled along the trajectory
    pub elapsed_time: f64, // s since the start of the run
}

impl TrajectoryState {
    pub fn new(height: f64, speed: f64, zenith_angle: f64) -> Self {
        TrajectoryState {
            height,
            speed,
            zenith_angle,
            trail_length: 0.0,
            elapsed_time: 0.0,
        }
    }
}

/// Explicit Euler integrator for the deceleration equation.
pub struct DynamicsIntegrator;

impl DynamicsIntegrator {
    pub fn new() -> Self {
        DynamicsIntegrator
    }

    /// Gravitational acceleration at altitude, inverse-square from the
    /// sea-level value.
    pub fn gravity(&self, height: f64) -> f64 {
        let ratio = EARTH_RADIUS / (EARTH_RADIUS + height);
        GRAVITY_SEA_LEVEL * ratio * ratio
    }

    /// Advance speed, height and trail length over one time step.
    ///
    /// The cross-section is taken from the body as it stands after the
    /// thermal update, so mass loss feeds back into drag within the same
    /// step. Height descends with the updated speed.
    pub fn update(
        &self,
        state: &mut TrajectoryState,
        body: &MeteoroidBody,
        air_density: f64,
        dt: f64,
    ) {
        let cos_zenith = state.zenith_angle.to_radians().cos();

        let drag_deceleration = if body.mass > 0.0 {
            body.material.drag_coefficient * air_density * state.speed.powi(2)
                * body.cross_section()
                / body.mass
        } else {
            0.0
        };
        let gravity_pull = self.gravity(state.height) * cos_zenith;

        state.speed += (gravity_pull - drag_deceleration) * dt;
        state.height -= state.speed * cos_zenith * dt;
        state.trail_length += state.speed * dt;
        state.elapsed_time += dt;
    }
}

impl Default for DynamicsIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::ScenarioFactory;
    use approx::assert_relative_eq;

    const DT: f64 = 0.001;

    fn reference_body() -> MeteoroidBody {
        MeteoroidBody::new(
            1.691013e-4,
            290.0,
            0.0,
            ScenarioFactory::cometary_material(),
        )
    }

    #[test]
    fn test_gravity_falls_off_with_altitude() {
        let integrator = DynamicsIntegrator::new();

        assert_relative_eq!(integrator.gravity(0.0), 9.81, max_relative = 1e-12);
        assert!(integrator.gravity(100_000.0) < 9.81);
        assert!(integrator.gravity(100_000.0) > 9.3);
    }

    #[test]
    fn test_drag_only_deceleration_matches_closed_form() {
        // At a 90 degree zenith angle the gravity component vanishes and
        // dv/dt = -k v^2 has the exact solution v0 / (1 + v0 k t).
        let integrator = DynamicsIntegrator::new();
        let body = reference_body();
        let density = 1.0e-4;
        let v0 = 16_824.81;
        let mut state = TrajectoryState::new(100_000.0, v0, 90.0);

        let steps = 10_000;
        for _ in 0..steps {
            integrator.update(&mut state, &body, density, DT);
        }

        let k = body.material.drag_coefficient * density * body.cross_section() / body.mass;
        let t = steps as f64 * DT;
        let expected = v0 / (1.0 + v0 * k * t);

        // First-order scheme: the discretization error at this step size
        // sits around 1e-4 relative.
        assert_relative_eq!(state.speed, expected, max_relative = 5e-4);
    }

    #[test]
    fn test_free_fall_gains_local_gravity_per_second() {
        // No air: a vertically falling body picks up g(h) over one second.
        let integrator = DynamicsIntegrator::new();
        let body = reference_body();
        let mut state = TrajectoryState::new(100_000.0, 100.0, 0.0);

        for _ in 0..1_000 {
            integrator.update(&mut state, &body, 0.0, DT);
        }

        let expected = 100.0 + integrator.gravity(100_000.0);
        assert_relative_eq!(state.speed, expected, max_relative = 1e-3);
    }

    #[test]
    fn test_descent_shortens_height_and_grows_trail() {
        let integrator = DynamicsIntegrator::new();
        let body = reference_body();
        let mut state = TrajectoryState::new(180_000.0, 16_824.81, 75.0);

        let mut previous_height = state.height;
        for _ in 0..1_000 {
            integrator.update(&mut state, &body, 1.0e-9, DT);
            assert!(state.height < previous_height, "Height must decrease monotonically");
            previous_height = state.height;
        }

        assert!(state.trail_length > 0.0);
        assert!(
            state.trail_length > (180_000.0 - state.height),
            "Slant trail must exceed the vertical drop at a 75 degree zenith angle"
        );
        assert_relative_eq!(state.elapsed_time, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn test_burned_out_body_feels_no_drag() {
        let integrator = DynamicsIntegrator::new();
        let mut body = reference_body();
        body.mass = 0.0;
        let mut state = TrajectoryState::new(80_000.0, 5_000.0, 75.0);

        integrator.update(&mut state, &body, 1.0e-4, DT);

        // Only the gravity component acts, so the speed grows slightly.
        assert!(state.speed > 5_000.0);
    }
}
