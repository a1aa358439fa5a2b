use clap::Parser;
use ranch_core::CoreError;
use ranch_warehouse::WarehouseError;

mod bootstrap;
mod cli;
mod commands;
mod output;

/// Bad arguments, or a ranch that does not exist.
const EXIT_USAGE: i32 = 1;
/// Backend, decoding and configuration failures.
const EXIT_FAILURE: i32 = 2;

fn main() {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // --help and --version come through here and go to stdout.
            let code = if error.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = error.print();
            std::process::exit(code);
        }
    };

    if let Err(error) = run(cli) {
        eprintln!("ranchcam error: {error:#}");
        std::process::exit(exit_code(&error));
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let flags = cli.global_flags();
    init_tracing(&flags)?;

    if cli.print_schema {
        return commands::schema::handle(&flags);
    }

    let Some(ranch_name) = cli.ranch.as_deref() else {
        anyhow::bail!("missing <RANCH_NAME>");
    };

    let config = bootstrap::load_config(&flags)?;
    commands::report::handle(ranch_name, &config, &flags)
}

fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let level = if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RANCHCAM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn exit_code(error: &anyhow::Error) -> i32 {
    let usage = error.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<WarehouseError>(),
            Some(WarehouseError::RanchNotFound { .. })
        ) || matches!(cause.downcast_ref::<CoreError>(), Some(CoreError::Validation(_)))
    });
    if usage { EXIT_USAGE } else { EXIT_FAILURE }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn not_found_is_a_usage_exit() {
        let error = anyhow::Error::from(WarehouseError::RanchNotFound {
            name: "Nowhere".to_string(),
        });
        assert_eq!(exit_code(&error), EXIT_USAGE);
    }

    #[test]
    fn blank_name_is_a_usage_exit() {
        let error = anyhow::Error::from(CoreError::Validation("ranch name is empty".into()));
        assert_eq!(exit_code(&error), EXIT_USAGE);
    }

    #[test]
    fn wrapped_backend_failure_is_a_general_exit() {
        let result: Result<(), WarehouseError> = Err(WarehouseError::CommandFailed {
            label: "camera_activity".to_string(),
            status: "1".to_string(),
            stderr: "Access Denied".to_string(),
        });
        let error = result
            .context("failed to aggregate camera activity")
            .expect_err("failure");
        assert_eq!(exit_code(&error), EXIT_FAILURE);
    }
}
