//! sops-age-helper - age encryption helper for SOPS.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, warn};

use sops_age_helper::cli::{self, Cli, Command};
use sops_age_helper::config::Settings;
use sops_age_helper::diagnostics::Diagnostics;
use sops_age_helper::shutdown;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if cli::is_unrecognized(&e) => return usage(),
        Err(e) => e.exit(),
    };

    if cli.version {
        return match cli::print_version(&mut std::io::stdout()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    let Some(command) = cli.command else {
        return usage();
    };

    let settings = Settings::from_env();
    let diagnostics = Diagnostics::init(&settings);
    debug!(command = command.name(), "starting");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to start runtime");
            diagnostics.flush();
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(dispatch(command, diagnostics.clone()));
    diagnostics.flush();
    code
}

/// Print the version line and usage to stdout.
fn usage() -> ExitCode {
    match cli::print_usage(&mut std::io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Run the handler on the blocking pool, racing termination signals.
async fn dispatch(command: Command, diagnostics: Diagnostics) -> ExitCode {
    let handler = tokio::task::spawn_blocking(move || cli::execute(command));

    tokio::select! {
        joined = handler => match joined {
            Ok(Ok(())) => {
                debug!(command = command.name(), "done");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                error!("{} failed: {}", command.name(), e);
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(error = %e, "{} handler aborted", command.name());
                ExitCode::FAILURE
            }
        },
        signal = shutdown::wait_for_signal() => {
            warn!(signal = signal.name(), "{} interrupted", command.name());
            diagnostics.flush();
            std::process::exit(signal.exit_code());
        }
    }
}
