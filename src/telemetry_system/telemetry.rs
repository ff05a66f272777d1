use crate::control::meteoroid::AblationPhase;
use crate::control::simulation::SimulationRecord;

pub struct Telemetry {
    pub log: Vec<String>,
    sample_interval: usize,
    records_seen: usize,
    peak_magnitude: Option<(f64, f64, f64)>, // magnitude, height, time
    max_temperature: f64,
    ablation_onset: Option<(f64, f64)>, // time, height
    phase_times: Vec<(AblationPhase, f64)>,
    last_record: Option<SimulationRecord>,
}

impl Telemetry {
    /// `sample_interval` controls how often a full log entry is kept;
    /// the summary metrics are tracked on every record regardless.
    pub fn new(sample_interval: usize) -> Self {
        Telemetry {
            log: Vec::new(),
            sample_interval: sample_interval.max(1),
            records_seen: 0,
            peak_magnitude: None,
            max_temperature: 0.0,
            ablation_onset: None,
            phase_times: Vec::new(),
            last_record: None,
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_height(height: f64) -> String {
        if height >= 1000.0 {
            format!("{:.2} km", height / 1000.0)
        } else {
            format!("{:.2} m", height)
        }
    }

    fn format_magnitude(magnitude: Option<f64>) -> String {
        match magnitude {
            Some(value) => format!("{:+.2}", value),
            None => "dark".to_string(),
        }
    }

    pub fn collect_data(&mut self, record: &SimulationRecord) {
        self.records_seen += 1;

        // Update key metrics
        if let Some(magnitude) = record.magnitude {
            let brighter = match self.peak_magnitude {
                Some((peak, _, _)) => magnitude < peak,
                None => true,
            };
            if brighter {
                self.peak_magnitude = Some((magnitude, record.height, record.time));
            }
            if self.ablation_onset.is_none() {
                self.ablation_onset = Some((record.time, record.height));
            }
        }
        if record.temperature > self.max_temperature {
            self.max_temperature = record.temperature;
        }

        if self.records_seen % self.sample_interval == 0 {
            let data = format!(
                "Time: {}\n\
                     Height: {}\n\
                     Speed: {:.2} m/s\n\
                     Mass: {:.4e} kg\n\
                     Temperature: {:.1} K\n\
                     Magnitude: {}\n\
                     Phase: {:?}\n",
                Self::format_time(record.time),
                Self::format_height(record.height),
                record.speed,
                record.mass,
                record.temperature,
                Self::format_magnitude(record.magnitude),
                record.phase
            );
            self.log.push(data);
        }

        // Track phase transitions
        if let Some((last_phase, _)) = self.phase_times.last() {
            if *last_phase != record.phase {
                self.phase_times.push((record.phase, record.time));
            }
        } else {
            self.phase_times.push((record.phase, record.time));
        }

        self.last_record = Some(record.clone());
    }

    pub fn display_data(&self) {
        println!("--- Telemetry Data ---");
        for entry in &self.log {
            println!("{}", entry);
        }
        println!("--- End of Telemetry ---");

        println!("\n--- Entry Summary ---");
        match self.peak_magnitude {
            Some((magnitude, height, time)) => println!(
                "Peak Magnitude: {:+.2} at {} ({})",
                magnitude,
                Self::format_height(height),
                Self::format_time(time)
            ),
            None => println!("Peak Magnitude: none (no ablation)"),
        }
        match self.ablation_onset {
            Some((time, height)) => println!(
                "Ablation Onset: {} at {}",
                Self::format_time(time),
                Self::format_height(height)
            ),
            None => println!("Ablation Onset: never"),
        }
        println!("Max Temperature: {:.1} K", self.max_temperature);
        if let Some(record) = &self.last_record {
            println!(
                "Final State: {} at {}, {:.2} m/s, {:.4e} kg",
                Self::format_time(record.time),
                Self::format_height(record.height),
                record.speed,
                record.mass
            );
        }

        println!("\n--- Phase Transitions ---");
        for (phase, time) in &self.phase_times {
            println!("Phase {:?} reached at: {}", phase, Self::format_time(*time));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: f64, magnitude: Option<f64>, phase: AblationPhase) -> SimulationRecord {
        SimulationRecord {
            time,
            height: 100_000.0 - 4_000.0 * time,
            speed: 16_000.0,
            mass: 1.0e-4,
            temperature: 500.0,
            magnitude,
            phase,
        }
    }

    #[test]
    fn test_peak_magnitude_tracks_the_brightest_record() {
        let mut telemetry = Telemetry::new(1);
        telemetry.collect_data(&record(1.0, Some(5.0), AblationPhase::Ablating));
        telemetry.collect_data(&record(2.0, Some(3.2), AblationPhase::Ablating));
        telemetry.collect_data(&record(3.0, Some(4.1), AblationPhase::Ablating));

        let (magnitude, _, time) = telemetry.peak_magnitude.unwrap();
        assert_eq!(magnitude, 3.2);
        assert_eq!(time, 2.0);
    }

    #[test]
    fn test_ablation_onset_is_the_first_luminous_record() {
        let mut telemetry = Telemetry::new(1);
        telemetry.collect_data(&record(1.0, None, AblationPhase::Solid));
        telemetry.collect_data(&record(2.0, Some(6.0), AblationPhase::Ablating));
        telemetry.collect_data(&record(3.0, Some(4.0), AblationPhase::Ablating));

        let (time, _) = telemetry.ablation_onset.unwrap();
        assert_eq!(time, 2.0);
    }

    #[test]
    fn test_phase_transitions_are_recorded_once() {
        let mut telemetry = Telemetry::new(1);
        telemetry.collect_data(&record(1.0, None, AblationPhase::Solid));
        telemetry.collect_data(&record(2.0, None, AblationPhase::Solid));
        telemetry.collect_data(&record(3.0, None, AblationPhase::PorosityCollapsing));
        telemetry.collect_data(&record(4.0, None, AblationPhase::Molten));

        assert_eq!(telemetry.phase_times.len(), 3);
        assert_eq!(telemetry.phase_times[1].0, AblationPhase::PorosityCollapsing);
    }

    #[test]
    fn test_sampling_interval_thins_the_log() {
        let mut telemetry = Telemetry::new(10);
        for i in 0..100 {
            telemetry.collect_data(&record(i as f64 * 0.001, None, AblationPhase::Solid));
        }
        assert_eq!(telemetry.log.len(), 10);
    }
}
