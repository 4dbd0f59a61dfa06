//! Binary entry point: CLI parsing, logger construction, and the exit-code
//! policy (spec.md §6). All real work happens in `account_manager`.

mod cli;

use slog::{info, o, warn};
use sloggers::terminal::{Destination, TerminalLoggerBuilder};
use sloggers::types::Severity;
use sloggers::Build;
use std::str::FromStr;

fn build_logger(level: &str) -> slog::Logger {
    let severity = Severity::from_str(level).unwrap_or(Severity::Info);
    let mut builder = TerminalLoggerBuilder::new();
    builder.level(severity);
    builder.destination(Destination::Stderr);
    builder
        .build()
        .expect("terminal logger destination is always constructible")
}

fn main() {
    let args = cli::parse();
    let log = build_logger(&args.log_level);

    info!(
        log,
        "keystore_convert starting";
        "version" => env!("CARGO_PKG_VERSION"),
        "mode" => ?args.config.mode,
    );

    if args.config.uses_placeholder_kdf_strength() {
        warn!(
            log,
            "KDF parameters are still at their CLI defaults; these are placeholders for tests \
             and are far below production strength (spec.md recommends pbkdf2 c >= 2^18, \
             scrypt n >= 2^17)"
        );
    }

    match account_manager::run(&args.config, &log) {
        Ok(summary) => {
            let run_log = log.new(o!(
                "succeeded" => summary.succeeded.len(),
                "failed" => summary.failed.len(),
            ));
            if summary.is_success() {
                info!(run_log, "conversion run complete");
                std::process::exit(0);
            } else {
                for (pk, err) in &summary.failed {
                    warn!(run_log, "pair failed"; "pk" => pk, "error" => %err);
                }
                warn!(run_log, "conversion run completed with failures");
                std::process::exit(1);
            }
        }
        Err(e) => {
            warn!(log, "run aborted before any pair was processed"; "error" => %e);
            std::process::exit(1);
        }
    }
}
