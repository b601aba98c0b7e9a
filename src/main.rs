use std::process::ExitCode;

fn main() -> ExitCode {
    match skirmish_net::run_with_config() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            ExitCode::FAILURE
        }
    }
}
