//! Fuelhub CLI - versioned simulation models and worlds

use clap::{Parser, Subcommand};
use fuelhub_core::ResourceKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod display;
mod error;
mod exit_codes;
mod util;

use context::{Context, Overrides};
use error::Result;

#[derive(Parser)]
#[command(name = "fuelhub")]
#[command(author = "Fuelhub Contributors")]
#[command(version)]
#[command(about = "Versioned storage for simulation models and worlds", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: ~/.config/fuelhub/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root directory holding every owner's resources
    #[arg(long, global = true, env = "FUELHUB_RESOURCE_DIR")]
    resource_dir: Option<PathBuf>,

    /// Resource catalog database
    #[arg(long, global = true, env = "FUELHUB_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a resource from the files in a folder
    Create {
        /// Folder holding the initial files
        source: PathBuf,

        /// Resource name
        #[arg(short, long)]
        name: String,

        /// Owning user or organization
        #[arg(short, long)]
        owner: String,

        /// Resource kind (model or world)
        #[arg(short, long, default_value = "model")]
        kind: ResourceKind,
    },

    /// Clone a resource, with its history, into another owner's storage
    Clone {
        /// Source resource UUID
        uuid: String,

        /// Owner of the clone
        #[arg(short, long)]
        owner: String,

        /// Name of the clone (default: the source name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Replace every file of a resource, creating a new version
    Update {
        /// Resource UUID
        uuid: String,

        /// Folder holding the new files
        folder: PathBuf,

        /// Commit author name
        #[arg(long)]
        committer: Option<String>,
    },

    /// Resolve a version number
    Version {
        /// Resource UUID
        uuid: String,

        /// Version number or "tip"
        #[arg(value_name = "VERSION", default_value = "tip", allow_hyphen_values = true)]
        number: String,
    },

    /// Show the file tree of a version
    Tree {
        /// Resource UUID
        uuid: String,

        /// Version number or "tip"
        #[arg(value_name = "VERSION", default_value = "tip", allow_hyphen_values = true)]
        number: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Produce the zip snapshot of a version
    Zip {
        /// Resource UUID
        uuid: String,

        /// Version number or "tip"
        #[arg(value_name = "VERSION", default_value = "tip", allow_hyphen_values = true)]
        number: String,
    },

    /// Print one file of a version
    Cat {
        /// Resource UUID
        uuid: String,

        /// File path inside the resource
        path: String,

        /// Version number or "tip"
        #[arg(value_name = "VERSION", default_value = "tip", allow_hyphen_values = true)]
        number: String,
    },

    /// List resources
    List {
        /// Only resources of this owner
        #[arg(short, long)]
        owner: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List thumbnail images of a resource
    Thumbnails {
        /// Resource UUID
        uuid: String,
    },

    /// Remove a resource (files are kept on disk)
    Rm {
        /// Resource UUID
        uuid: String,
    },

    /// Move a resource to another owner
    Mv {
        /// Resource UUID
        uuid: String,

        /// Destination owner
        owner: String,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        config: cli.config,
        resource_dir: cli.resource_dir,
        catalog: cli.catalog,
    };
    let mut ctx = Context::load(&overrides)?;

    match cli.command {
        Commands::Create {
            source,
            name,
            owner,
            kind,
        } => commands::create::run(&mut ctx, &source, &name, &owner, kind),

        Commands::Clone { uuid, owner, name } => {
            commands::clone::run(&mut ctx, &uuid, &owner, name.as_deref())
        }

        Commands::Update {
            uuid,
            folder,
            committer,
        } => commands::update::run(&mut ctx, &uuid, &folder, committer.as_deref()),

        Commands::Version { uuid, number } => commands::version::run(&ctx, &uuid, &number),

        Commands::Tree { uuid, number, json } => commands::tree::run(&ctx, &uuid, &number, json),

        Commands::Zip { uuid, number } => commands::zip::run(&ctx, &uuid, &number),

        Commands::Cat { uuid, path, number } => commands::cat::run(&ctx, &uuid, &path, &number),

        Commands::List { owner, json } => commands::list::run(&ctx, owner.as_deref(), json),

        Commands::Thumbnails { uuid } => commands::thumbnails::run(&ctx, &uuid),

        Commands::Rm { uuid } => commands::rm::run(&mut ctx, &uuid),

        Commands::Mv { uuid, owner } => commands::mv::run(&mut ctx, &uuid, &owner),
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
