use std::process::ExitCode;

use rpg_engine::{run_app_with_metrics, MetricsHandle};
use tracing::{error, info};

use super::bootstrap::AppWiring;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let metrics = MetricsHandle::default();
    if let Err(err) = run_app_with_metrics(app.config, app.factory, metrics.clone()) {
        error!(error = %err, "startup_failed");
        return ExitCode::FAILURE;
    }

    let last = metrics.snapshot();
    info!(
        tps = last.tps,
        busy_time_ms = last.busy_time_ms,
        overruns = last.overruns,
        "exited"
    );
    ExitCode::SUCCESS
}
