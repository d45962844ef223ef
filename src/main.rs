use cidr_tools::commands::run;
use cidr_tools::config::Cli;
use cidr_tools::input::PrefixParser;
use cidr_tools::logging::init_logging;
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_config) {
        eprintln!("{} {e}", "warning:".yellow());
    }
    log::info!("#Start main()");

    let parser = PrefixParser::new(cli.parser_config());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = run(&cli.command, &parser, cli.format, &mut out)
        .and_then(|_| out.flush().map_err(Into::into));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{} {e}", "error:".red());
            ExitCode::FAILURE
        }
    }
}
