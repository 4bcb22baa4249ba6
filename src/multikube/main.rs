use clap::{CommandFactory, Parser};
use log::LevelFilter;
use multikube::api::{self, RunOptions};
use multikube::runner::kubectl::KubectlRunner;
use std::io;

mod args;
use args::Cli;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    // Nothing to run and nothing to list: behave like plain `mk --help`.
    if cli.command.is_empty() && !cli.list_only {
        let _ = Cli::command().print_help();
        return;
    }

    let opts = RunOptions {
        regex: cli.regex,
        negative_regex: cli.negative_regex,
        namespaces: cli.namespaces,
        list_only: cli.list_only,
        max_processes: cli.max_processes,
        output: cli.output,
    };

    let runner = KubectlRunner::new();
    if let Err(e) = api::run(&opts, &runner, &cli.command, &mut io::stdout()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
