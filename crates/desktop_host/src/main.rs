use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match desktop_host::run(std::env::args().nth(1)) {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "file browser host failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
