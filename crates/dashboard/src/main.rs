//! `tadash <config.json>`: prints the chart payload JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use tadash_dashboard::{DashboardError, ErrorResult, init_tracing, run_dashboard};
use tadash_types::DashboardConfig;
use tracing::error;

fn main() -> ExitCode {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: tadash <config.json>");
        return ExitCode::from(2);
    };

    let config = match DashboardConfig::from_file(&path) {
        Ok(config) => config,
        Err(e) => return fail(DashboardError::ConfigParse(e.to_string())),
    };
    init_tracing(&config.logging);

    let output = run_dashboard(&config).and_then(|payload| {
        serde_json::to_string(&payload).map_err(|e| DashboardError::ResultSerialize(e.to_string()))
    });
    match output {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(category = err.error_category(), error = %err, "Dashboard run failed");
            fail(err)
        }
    }
}

fn fail(err: DashboardError) -> ExitCode {
    let result = ErrorResult::from(err);
    match serde_json::to_string(&result) {
        Ok(json) => println!("{json}"),
        Err(_) => eprintln!("{}", result.message),
    }
    ExitCode::FAILURE
}
