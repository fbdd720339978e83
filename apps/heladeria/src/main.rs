//! # Heladería Register Entry Point
//!
//! ## Startup Sequence
//! 1. Load `heladeria.toml` (defaults if missing or broken)
//! 2. Initialize tracing (logging)
//! 3. Open the store & create missing tables
//! 4. Print today's close-register report
//!
//! Exits with code 1 if the store can't be opened.

use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let config = heladeria::load_config();

    heladeria::init_tracing(&config.logging);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Could not start the async runtime");
            eprintln!("heladeria: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(heladeria::run(&config)) {
        Ok(report) => {
            println!("{}", report.format_with(&config.register.currency_symbol));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = ?e.kind, message = %e.message, "Register failed to start");
            eprintln!("heladeria: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
