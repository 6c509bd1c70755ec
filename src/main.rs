use clap::Parser;
use ui_settings::cli::commands::{cmd_apply, cmd_stability};
use ui_settings::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve driver script: CLI > config > session default
    let driver_script = cli
        .driver_script
        .as_deref()
        .or(config.driver.script.as_deref());

    match cli.command {
        Commands::Apply {
            schema,
            values,
            report,
            headless,
            timeout_ms,
            trace,
        } => {
            let all_ok = cmd_apply(
                &schema,
                &values,
                &report,
                headless,
                timeout_ms,
                trace.as_deref(),
                driver_script,
                cli.verbose,
            )?;
            if !all_ok {
                std::process::exit(1);
            }
        }
        Commands::Stability {
            schema_a,
            schema_b,
            report,
            allow_drift,
        } => {
            let passed = cmd_stability(
                schema_a.as_deref(),
                schema_b.as_deref(),
                &report,
                allow_drift,
                &config.stability,
                cli.verbose,
            )?;
            if !passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
