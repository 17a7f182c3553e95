//! Command-line interface definitions for labelproj.
//!
//! The CLI definitions are shared between the main binary and build tools
//! (xtask) for man page generation.

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for labelproj.
#[derive(Parser)]
#[command(
    name = "lproj",
    version = crate::VERSION,
    about = "Keep image labeling projects and their image folders in sync",
    long_about = "Manage image labeling projects: a project.json manifest plus the image files it references, \
                  with two-way cleanup between the two"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory (defaults to core.default_project)
    #[arg(short, long, global = true, env = "LABELPROJ_PROJECT")]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty project in a directory
    New {
        /// Directory for the new project (created if missing)
        directory: Option<PathBuf>,

        /// Use the directory even if it already contains files
        #[arg(short, long)]
        force: bool,
    },

    /// Show how the manifest and the directory differ
    Status,

    /// List images present in both the manifest and the directory
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Copy image files into the project and add them to the manifest
    Add {
        /// Image files to add
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Overwrite images whose name is already in the project
        #[arg(short, long)]
        force: bool,
    },

    /// Remove images from the manifest and delete their files
    Remove {
        /// File names as recorded in the manifest
        #[arg(required = true)]
        names: Vec<String>,

        /// Keep the files on disk (the next cleanup will delete them)
        #[arg(long)]
        keep_files: bool,
    },

    /// Delete orphan images and prune manifest entries without files
    Cleanup {
        /// Dry run - only show what would change
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Write exported_data.json from a JSON document
    Export {
        /// JSON file to export, or '-' for stdin
        #[arg(default_value = "-")]
        data: PathBuf,
    },

    /// Check whether a directory can host a new project
    IsEmpty {
        /// Directory to check (defaults to the project directory)
        directory: Option<PathBuf>,
    },

    /// Prompt for a project directory and print it
    Choose {
        /// Remember the choice as core.default_project
        #[arg(long)]
        set_default: bool,
    },

    /// Answer JSON-line requests on stdin (front-end boundary)
    Serve,

    /// Get and set configuration options
    Config {
        /// Configuration key
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// Unset the configuration key
        #[arg(long)]
        unset: bool,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
