//! Entry point: parses arguments, runs the selected mode, and writes the
//! resulting envelope to stdout or the `--output` file sink.

use clap::Parser;
use codemap::cancel::CancelToken;
use codemap::cli::Cli;
use codemap::orchestrate;
use codemap::output;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let cancelled = CancelToken::new();

    let (envelope, exit_code) = orchestrate::run(&cli, &cancelled);

    let format = cli.resolved_format();
    if let Err(err) = output::write_envelope(&envelope, format, cli.output.as_deref()) {
        log::error!("failed to write output: {err}");
        std::process::exit(orchestrate::EXIT_USER_ERROR);
    }

    std::process::exit(exit_code);
}
