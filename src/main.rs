use clap::Parser;
use dns_switcher::dispatch::report;
use dns_switcher::{Cli, Dispatcher, Netsh};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Prefer RUST_LOG, fall back to the CLI flag
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    #[cfg(windows)]
    let with_ansi = nu_ansi_term::enable_ansi_support().is_ok();
    #[cfg(not(windows))]
    let with_ansi = true;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(with_ansi)
        .with_writer(std::io::stderr)
        .init();

    let dispatcher = Dispatcher::new(cli.settings(), Netsh::new(), Netsh::new());
    let mut input = std::io::stdin().lock();
    let mut out = std::io::stdout().lock();

    let result = dispatcher.run(&cli.mode(), &mut input, &mut out);
    report(&result, dispatcher.store().path(), &mut std::io::stderr().lock())
}
