// Physical Constants
pub const GRAVITY_SEA_LEVEL: f64 = 9.81; // m/s²
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8; // W/(m²·K⁴)

// Luminosity Constants
pub const ZERO_MAGNITUDE_POWER: f64 = 840.0; // W, radiated power of a zero-magnitude meteor
pub const MAGNITUDE_REFERENCE_DISTANCE: f64 = 100_000.0; // m, standard absolute magnitude range

// Atmosphere Constants
pub const DENSITY_FIT_SCALE: f64 = 1000.0; // converts the g/cm³-equivalent fit output to kg/m³
pub const ATMOSPHERE_FIT_FLOOR: f64 = 60_000.0; // m, lower validity bound of the Earth fit
pub const ATMOSPHERE_FIT_CEILING: f64 = 180_000.0; // m, upper validity bound of the Earth fit

// Simulation Parameters
pub const TIME_STEP: f64 = 0.001; // s
pub const MAX_SIMULATION_STEPS: usize = 10_000_000;
pub const SPEED_FLOOR: f64 = 100.0; // m/s, integration is not meaningful below this
pub const MAX_BODIES: usize = 10; // upper bound on simultaneously integrated bodies
