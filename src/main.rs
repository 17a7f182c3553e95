use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use labelproj::cli::{Cli, Commands};
use labelproj::output::{self, Verbosity};
use labelproj::{LabelContext, commands};
use std::io;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    output::set_verbosity(verbosity);
    output::init_logging(verbosity);

    if let Commands::Completion { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let mut ctx = LabelContext::new()?;
    let project = cli.project.as_deref();

    match cli.command {
        Commands::New { directory, force } => {
            let dir = ctx.project_dir(directory.as_deref().or(project))?;
            commands::new::execute(&ctx, &dir, force)?;
        }
        Commands::Status => {
            let dir = ctx.project_dir(project)?;
            commands::status::execute(&ctx, &dir)?;
        }
        Commands::List { json } => {
            let dir = ctx.project_dir(project)?;
            commands::list::execute(&ctx, &dir, json)?;
        }
        Commands::Add { files, force } => {
            let dir = ctx.project_dir(project)?;
            commands::add::execute(&ctx, &dir, &files, force)?;
        }
        Commands::Remove { names, keep_files } => {
            let dir = ctx.project_dir(project)?;
            commands::remove::execute(&ctx, &dir, &names, keep_files)?;
        }
        Commands::Cleanup { dry_run } => {
            let dir = ctx.project_dir(project)?;
            commands::cleanup::execute(&ctx, &dir, dry_run)?;
        }
        Commands::Export { data } => {
            let dir = ctx.project_dir(project)?;
            commands::export::execute(&ctx, &dir, &data)?;
        }
        Commands::IsEmpty { directory } => {
            let dir = ctx.project_dir(directory.as_deref().or(project))?;
            commands::is_empty::execute(&ctx, &dir)?;
        }
        Commands::Choose { set_default } => {
            commands::choose::execute(&mut ctx, set_default)?;
        }
        Commands::Serve => {
            commands::serve::execute(&ctx)?;
        }
        Commands::Config {
            key,
            value,
            unset,
            list,
        } => {
            commands::config::execute(&mut ctx, key.as_deref(), value, unset, list)?;
        }
        Commands::Completion { .. } => {}
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
