use anyhow::Result;
use clap::{Parser, Subcommand};
use pkgmap::commands::common::Workspace;
use pkgmap::commands::reverse::ReverseArgs;
use pkgmap::commands::{analyze, batch, reverse};
use pkgmap::logging::init_logging;
use pkgmap::validation::clap_package_name_validator;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pkgmap")]
#[command(about = "Resolve module loader descriptors for project dependencies", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root that descriptor paths are relative to (default: current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Print descriptions as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe an installed dependency from its package.json
    Analyze {
        /// Dependency name (e.g. "aurelia-fetch-client" or "@scope/pkg")
        #[arg(value_parser = clap_package_name_validator)]
        name: String,
    },

    /// Complete a partial loader config against the filesystem
    Reverse {
        /// Module name the loader registers
        #[arg(long)]
        name: String,

        /// Package directory or entry location, relative to the project root
        #[arg(long)]
        path: Option<String>,

        /// Entry module relative to path
        #[arg(long)]
        main: Option<String>,

        /// Package root marking the dependency as custom
        #[arg(long)]
        package_root: Option<String>,
    },

    /// Analyze several installed dependencies at once
    Batch {
        /// Dependency names
        #[arg(required = true, value_parser = clap_package_name_validator)]
        names: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace = Workspace::load(cli.root)?;
    let filter = if cli.verbose {
        Some("debug")
    } else {
        workspace.settings.log_filter.as_deref()
    };
    init_logging(filter);

    match cli.command {
        Commands::Analyze { name } => analyze::execute(&workspace, name, cli.json).await,
        Commands::Reverse {
            name,
            path,
            main,
            package_root,
        } => {
            let args = ReverseArgs {
                name,
                path,
                main,
                package_root,
            };
            reverse::execute(&workspace, args, cli.json).await
        }
        Commands::Batch { names } => batch::execute(&workspace, names, cli.json).await,
    }
}
