//! CLI entrypoint for formtext.

#[path = "formtext/check.rs"]
mod check;
#[path = "formtext/cli.rs"]
mod cli;
#[path = "formtext/commit.rs"]
mod commit;
#[path = "formtext/files.rs"]
mod files;
#[path = "formtext/generate.rs"]
mod generate;
#[path = "formtext/repair.rs"]
mod repair;
#[path = "formtext/style.rs"]
mod style;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use formtext::config::{FormsConfig, CONFIG_FILE_NAME};

use cli::{Cli, Command};

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", style::error(format!("Error: {err:#}")));
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Generate {
            source,
            columns,
            schema,
            kind,
            child_object,
            link_master,
            link_child,
            instructions,
            output,
        } => generate::run_generate(
            &config,
            generate::GenerateArgs {
                source,
                columns,
                schema,
                kind,
                child_object,
                link_master,
                link_child,
                instructions,
                output,
            },
        ),
        Command::Repair {
            name,
            input,
            output,
        } => repair::run_repair(&name, input.as_deref(), output.as_deref()),
        Command::Commit {
            name,
            input,
            out_dir,
        } => commit::run_commit(&config, &name, &input, out_dir),
        Command::Check { input } => check::run_check(input.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<FormsConfig> {
    match explicit {
        Some(path) => FormsConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => FormsConfig::load_or_default(CONFIG_FILE_NAME)
            .with_context(|| format!("failed to load {CONFIG_FILE_NAME}")),
    }
}
