//! runml driver
//!
//! Translates an ml program to C, builds it with the system C compiler and
//! runs it with the remaining command-line arguments. The exit status is the
//! program's own, or 1 when any step before running it fails.

mod cli;
mod config;
mod report;
mod toolchain;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::BuildConfig;
use log::info;
use runml_translator::Translator;
use std::fs;
use toolchain::BuildContext;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            report::report_error(&err, cli.message_format);
            1
        }
    };
    // every temporary artifact is gone once run() has returned
    std::process::exit(code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<i32> {
    let source = fs::read_to_string(&cli.source)
        .with_context(|| format!("Could not open {}", cli.source.display()))?;
    let filename = cli.source.display().to_string();

    let translation = Translator::new(cli.translator_config()).translate(&source, &filename)?;
    report::report_all(&translation.diagnostics, cli.message_format);

    if cli.emit_c {
        match &cli.output {
            Some(path) => {
                fs::write(path, &translation.c_source)
                    .with_context(|| format!("Could not create {}", path.display()))?;
                info!("C source written to {}", path.display());
            }
            None => print!("{}", translation.c_source),
        }
        return Ok(0);
    }

    let context = BuildContext::new(BuildConfig::from_cli(cli))?;
    context.build_and_run(&translation.c_source, &cli.args)
}
