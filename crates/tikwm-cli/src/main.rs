use clap::Parser;

mod cli;
mod commands;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("tikwm error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(&flags)?;

    match &cli.command {
        cli::Commands::Config { action } => commands::config::handle(action, &flags),
    }
}

/// Default log level when `TIKWM_LOG` is unset. `--quiet` wins over `--verbose`.
const fn log_level(flags: &cli::GlobalFlags) -> &'static str {
    if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TIKWM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level(flags)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
