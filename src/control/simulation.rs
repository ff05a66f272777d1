//! Simulation driver: couples the atmosphere, thermal, dynamics and
//! luminosity models into one fixed-step loop per body.
//!
//! Each step is computed on local copies of the body and trajectory
//! state and committed only after the sanity checks pass, so an
//! instability error always reports the last valid state. Multi-body
//! runs integrate every body independently through [`run_batch`].

use log::{debug, info, warn};

use crate::ablation_system::luminosity::LuminosityModel;
use crate::ablation_system::thermal::ThermalAblationModel;
use crate::configuration::config::{BodyConfig, SimulationConfig};
use crate::control::meteoroid::{AblationPhase, MeteoroidBody};
use crate::errors::SimulationError;
use crate::trajectory_system::atmosphere::{AtmosphereFit, ExtrapolationWarning};
use crate::trajectory_system::dynamics::{DynamicsIntegrator, TrajectoryState};

// Excursion warnings kept verbatim; the rest only counts.
const WARNING_CAP: usize = 16;

/// Why (or whether) the integration loop has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    TerminatedBurnout,
    TerminatedGround,
    TerminatedSpeed,
}

/// One committed integration step, as handed to telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    pub time: f64,        // s
    pub height: f64,      // m
    pub speed: f64,       // m/s
    pub mass: f64,        // kg
    pub temperature: f64, // K
    pub magnitude: Option<f64>,
    pub phase: AblationPhase,
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct SimulationOutput {
    pub records: Vec<SimulationRecord>,
    pub status: SimulationStatus,
    pub warnings: Vec<ExtrapolationWarning>,
    pub extrapolated_steps: usize,
}

/// Fixed-step integration of a single body through the atmosphere.
pub struct Simulation<'a> {
    atmosphere: &'a AtmosphereFit,
    thermal: ThermalAblationModel,
    dynamics: DynamicsIntegrator,
    luminosity: LuminosityModel,
    body: MeteoroidBody,
    state: TrajectoryState,
    time_step: f64,
    speed_floor: f64,
    max_steps: usize,
    steps_taken: usize,
    status: SimulationStatus,
    failed: bool,
    warnings: Vec<ExtrapolationWarning>,
    extrapolated_steps: usize,
}

impl<'a> Simulation<'a> {
    pub fn new(config: &'a SimulationConfig, body_config: &BodyConfig) -> Self {
        let initial = &config.initial;
        Simulation {
            atmosphere: &config.atmosphere,
            thermal: ThermalAblationModel::new(initial.begin_temperature),
            dynamics: DynamicsIntegrator::new(),
            luminosity: LuminosityModel::new(
                body_config.material.luminous_efficiency,
                config.magnitude_distance,
            ),
            body: MeteoroidBody::new(
                body_config.mass,
                initial.begin_temperature,
                body_config.porosity,
                body_config.material.clone(),
            ),
            state: TrajectoryState::new(
                initial.begin_height,
                initial.begin_speed,
                initial.zenith_angle,
            ),
            time_step: config.time_step,
            speed_floor: config.speed_floor,
            max_steps: config.max_steps,
            steps_taken: 0,
            status: SimulationStatus::Running,
            failed: false,
            warnings: Vec::new(),
            extrapolated_steps: 0,
        }
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    /// Advance one time step. `None` once the run has terminated.
    pub fn step(&mut self) -> Option<Result<SimulationRecord, SimulationError>> {
        if self.failed || self.status != SimulationStatus::Running {
            return None;
        }
        // A body with no mass left has nothing to integrate. This also
        // covers a zero initial mass, which terminates with no records.
        if self.body.is_burned_out() {
            self.status = SimulationStatus::TerminatedBurnout;
            return None;
        }
        if self.steps_taken >= self.max_steps {
            self.failed = true;
            return Some(Err(self.instability("maximum step count exceeded")));
        }

        let sample = self.atmosphere.sample(self.state.height);
        if sample.extrapolated {
            if self.extrapolated_steps == 0 {
                warn!(
                    "Atmosphere queried outside its fit bounds at {:.0} m, extrapolating",
                    self.state.height
                );
            }
            if self.warnings.len() < WARNING_CAP {
                self.warnings.push(ExtrapolationWarning {
                    height: self.state.height,
                    elapsed_time: self.state.elapsed_time,
                });
            }
            self.extrapolated_steps += 1;
        }

        // Work on copies so a failed sanity check leaves the committed
        // state untouched for the error report.
        let mut body = self.body.clone();
        let mut state = self.state;

        let thermal_step = self.thermal.update(&mut body, &sample, state.speed, self.time_step);
        self.dynamics
            .update(&mut state, &body, sample.density, self.time_step);
        let magnitude = self
            .luminosity
            .magnitude(thermal_step.mass_loss_rate, state.speed);

        if !state.height.is_finite()
            || !state.speed.is_finite()
            || !body.mass.is_finite()
            || !body.temperature.is_finite()
        {
            self.failed = true;
            return Some(Err(self.instability("non-finite state")));
        }
        if state.height >= self.state.height {
            self.failed = true;
            return Some(Err(self.instability("height failed to decrease")));
        }

        if body.phase != self.body.phase {
            debug!(
                "Phase transition to {:?} at t={:.3} s, h={:.0} m",
                body.phase, state.elapsed_time, state.height
            );
        }

        self.body = body;
        self.state = state;
        self.steps_taken += 1;

        let record = SimulationRecord {
            time: self.state.elapsed_time,
            height: self.state.height,
            speed: self.state.speed,
            mass: self.body.mass,
            temperature: self.body.temperature,
            magnitude,
            phase: self.body.phase,
        };

        // Checked strictly after the step is committed, so the record
        // that crossed the threshold is still emitted.
        if self.body.is_burned_out() {
            self.status = SimulationStatus::TerminatedBurnout;
        } else if self.state.height <= 0.0 {
            self.status = SimulationStatus::TerminatedGround;
        } else if self.state.speed <= self.speed_floor {
            self.status = SimulationStatus::TerminatedSpeed;
        }

        Some(Ok(record))
    }

    /// Run to termination and collect every record.
    pub fn run(mut self) -> Result<SimulationOutput, SimulationError> {
        info!(
            "Starting entry: m={:.3e} kg, h={:.0} m, v={:.1} m/s",
            self.body.mass, self.state.height, self.state.speed
        );

        let mut records = Vec::new();
        while let Some(step) = self.step() {
            records.push(step?);
        }

        info!(
            "Entry finished with {:?} after {} steps ({:.3} s)",
            self.status,
            self.steps_taken,
            self.state.elapsed_time
        );
        if self.extrapolated_steps > 0 {
            info!(
                "{} steps sampled the atmosphere outside its fit bounds",
                self.extrapolated_steps
            );
        }

        Ok(SimulationOutput {
            records,
            status: self.status,
            warnings: self.warnings,
            extrapolated_steps: self.extrapolated_steps,
        })
    }

    fn instability(&self, reason: &str) -> SimulationError {
        SimulationError::NumericalInstability {
            reason: reason.to_string(),
            time: self.state.elapsed_time,
            height: self.state.height,
            speed: self.state.speed,
            mass: self.body.mass,
            temperature: self.body.temperature,
        }
    }
}

impl Iterator for Simulation<'_> {
    type Item = Result<SimulationRecord, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

/// Integrate every configured body independently.
///
/// An invalid configuration fails the whole batch; a numerical failure
/// in one body only fails that body's entry in the result vector.
pub fn run_batch(
    config: &SimulationConfig,
) -> Result<Vec<Result<SimulationOutput, SimulationError>>, SimulationError> {
    config.validate()?;

    Ok(config
        .bodies
        .iter()
        .map(|body_config| Simulation::new(config, body_config).run())
        .collect())
}
