use meteor_simulation::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_simulation_config(path)?,
        None => ScenarioFactory::create_reference_entry(),
    };
    config.validate()?;

    // One full log entry per simulated second.
    let sample_interval = (1.0 / config.time_step).round() as usize;

    for (index, result) in run_batch(&config)?.into_iter().enumerate() {
        println!("=== Body {} ===", index + 1);
        match result {
            Ok(output) => {
                let mut telemetry = Telemetry::new(sample_interval);
                for record in &output.records {
                    telemetry.collect_data(record);
                }
                telemetry.display_data();

                println!("\nStatus: {:?}", output.status);
                if output.extrapolated_steps > 0 {
                    println!(
                        "Atmosphere extrapolated on {} steps (first at {:.0} m)",
                        output.extrapolated_steps, output.warnings[0].height
                    );
                }
            }
            Err(e) => {
                println!("Error during simulation: {}", e);
            }
        }
        println!();
    }

    Ok(())
}
