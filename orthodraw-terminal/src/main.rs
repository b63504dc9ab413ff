/// Orthodraw - three-view drawings of stepped cylindrical parts
///
/// Usage:
///   orthodraw              render every built-in drawing to `<name>.png`
///   orthodraw <job.json>   render the part described by a job file
///
/// Set `RUST_LOG=debug` to follow layout decisions.
use std::path::PathBuf;
use std::process::ExitCode;

use orthodraw_terminal::TerminalApp;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let job = std::env::args_os().nth(1).map(PathBuf::from);
    let app = TerminalApp::new(".");

    match app.run(job.as_deref()) {
        Ok(rendered) => {
            log::info!("{} drawing(s) written", rendered.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
