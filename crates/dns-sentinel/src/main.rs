mod bootstrap;
mod report;

use anyhow::Result;
use clap::Parser;
use sentinel_core::settings::Settings;
use sentinel_data::analysis::analyze_queries;
use sentinel_data::generator::SampleGenerator;
use sentinel_data::writer::export_csv;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;
    tracing::info!("DNS Sentinel v{} starting", env!("CARGO_PKG_VERSION"));

    match settings.mode.as_str() {
        "simulate" => {
            tracing::info!(
                "Generating {} synthetic records to {}",
                settings.samples,
                settings.output.display()
            );

            let mut generator = SampleGenerator::new();
            let records = generator.generate(settings.samples);
            export_csv(&settings.output, &records)?;

            tracing::info!("Sample dataset exported to {}", settings.output.display());
        }

        "analyze" => {
            tracing::info!("Analyzing query log {}", settings.input.display());

            let result = analyze_queries(&settings.input, &settings.engine_config())?;

            if settings.format == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render(&result));
            }
        }

        unknown => {
            // clap's value_parser rejects anything else before we get here.
            eprintln!("Unknown mode: {}", unknown);
        }
    }

    Ok(())
}
