use std::process::ExitCode;

fn main() -> ExitCode {
    match report_explainer_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{} exited: {e}", report_explainer_lib::config::APP_NAME);
            ExitCode::FAILURE
        }
    }
}
