use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error(
        "Numerical instability: {reason} (last valid state: t={time:.3} s, h={height:.1} m, \
         v={speed:.1} m/s, m={mass:.3e} kg, T={temperature:.1} K)"
    )]
    NumericalInstability {
        reason: String,
        time: f64,
        height: f64,
        speed: f64,
        mass: f64,
        temperature: f64,
    },
}
