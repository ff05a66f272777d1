use serde::Deserialize;

use crate::constants::{ATMOSPHERE_FIT_CEILING, ATMOSPHERE_FIT_FLOOR, DENSITY_FIT_SCALE};

/// Polynomial atmosphere fit.
///
/// Density and pressure are modelled as two independent 5th-order
/// polynomials in height (kilometers) giving log10 of the value. The
/// density fit produces g/cm³-equivalent units and is rescaled to kg/m³.
/// The fit is only trusted inside `[h_min, h_max]`; queries outside the
/// bounds are extrapolated rather than clamped.
#[derive(Debug, Clone, Deserialize)]
pub struct AtmosphereFit {
    pub density_coefficients: [f64; 6],
    pub pressure_coefficients: [f64; 6],
    pub h_min: f64, // m
    pub h_max: f64, // m
}

/// One atmosphere query, as consumed by the thermal and dynamics updates.
#[derive(Debug, Clone, Copy)]
pub struct AtmosphereSample {
    pub density: f64,  // kg/m³
    pub pressure: f64, // Pa
    pub extrapolated: bool,
}

/// Recoverable out-of-bounds excursion, accumulated by the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrapolationWarning {
    pub height: f64,       // m
    pub elapsed_time: f64, // s
}

impl AtmosphereFit {
    /// Earth fit valid between 60 km and 180 km.
    ///
    /// The density coefficients reproduce ~5.0e-7 kg/m³ at 100 km; the
    /// pressure coefficients are fit against standard atmosphere tables
    /// over the same interval. Both are strictly decreasing in height
    /// inside the bounds.
    pub fn earth() -> Self {
        AtmosphereFit {
            density_coefficients: [
                -9.02726494,
                0.108986696,
                -0.0005189,
                -2.0646e-5,
                1.93881e-7,
                -4.7231e-10,
            ],
            pressure_coefficients: [
                -1.8671966216e1,
                1.0357799789,
                -1.8970482015e-2,
                1.5234727509e-4,
                -5.7321306231e-7,
                8.2714056905e-10,
            ],
            h_min: ATMOSPHERE_FIT_FLOOR,
            h_max: ATMOSPHERE_FIT_CEILING,
        }
    }

    /// Air density in kg/m³ at the given height in meters.
    pub fn density(&self, height: f64) -> f64 {
        DENSITY_FIT_SCALE * 10f64.powf(Self::evaluate(&self.density_coefficients, height))
    }

    /// Air pressure in Pa at the given height in meters.
    pub fn pressure(&self, height: f64) -> f64 {
        10f64.powf(Self::evaluate(&self.pressure_coefficients, height))
    }

    pub fn in_bounds(&self, height: f64) -> bool {
        height >= self.h_min && height <= self.h_max
    }

    /// Evaluate density and pressure together, flagging out-of-bounds
    /// queries so the caller can record the excursion and continue.
    pub fn sample(&self, height: f64) -> AtmosphereSample {
        AtmosphereSample {
            density: self.density(height),
            pressure: self.pressure(height),
            extrapolated: !self.in_bounds(height),
        }
    }

    // Horner evaluation of log10(value) with x = height/1000 km.
    fn evaluate(coefficients: &[f64; 6], height: f64) -> f64 {
        let x = height / 1000.0;
        coefficients
            .iter()
            .rev()
            .fold(0.0, |sum, &c| sum * x + c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_density_matches_reference_values() {
        let fit = AtmosphereFit::earth();

        assert_relative_eq!(fit.density(100_000.0), 5.0281e-7, max_relative = 1e-3);
        assert_relative_eq!(fit.density(180_000.0), 4.4961e-10, max_relative = 1e-3);
        assert_relative_eq!(fit.density(60_000.0), 2.1369e-4, max_relative = 1e-3);
    }

    #[test]
    fn test_pressure_matches_reference_values() {
        let fit = AtmosphereFit::earth();

        assert_relative_eq!(fit.pressure(100_000.0), 3.1520e-2, max_relative = 1e-3);
        assert_relative_eq!(fit.pressure(60_000.0), 2.0066e1, max_relative = 1e-3);
    }

    #[test]
    fn test_density_and_pressure_positive_and_decreasing_inside_bounds() {
        let fit = AtmosphereFit::earth();

        let mut height = fit.h_min;
        let mut previous_density = f64::INFINITY;
        let mut previous_pressure = f64::INFINITY;

        while height <= fit.h_max {
            let sample = fit.sample(height);
            assert!(
                sample.density > 0.0 && sample.pressure > 0.0,
                "Non-physical atmosphere at {} m",
                height
            );
            assert!(
                sample.density < previous_density,
                "Density must decrease with height, violated at {} m",
                height
            );
            assert!(
                sample.pressure < previous_pressure,
                "Pressure must decrease with height, violated at {} m",
                height
            );
            previous_density = sample.density;
            previous_pressure = sample.pressure;
            height += 500.0;
        }
    }

    #[test]
    fn test_out_of_bounds_queries_extrapolate_without_clamping() {
        let fit = AtmosphereFit::earth();

        let above = fit.sample(fit.h_max + 10_000.0);
        assert!(above.extrapolated);
        assert!(above.density > 0.0);
        assert!(
            above.density < fit.density(fit.h_max),
            "Extrapolation above the ceiling should keep thinning, not clamp"
        );

        let below = fit.sample(fit.h_min - 5_000.0);
        assert!(below.extrapolated);
        assert!(below.density > fit.density(fit.h_min));
    }

    #[test]
    fn test_in_bounds_sample_is_not_flagged() {
        let fit = AtmosphereFit::earth();
        assert!(!fit.sample(120_000.0).extrapolated);
        assert!(!fit.sample(fit.h_min).extrapolated);
        assert!(!fit.sample(fit.h_max).extrapolated);
    }
}
