//! CLI module for kss

mod args;
pub mod serve;

pub use args::{Args, Command};

use crate::config::Config;
use crate::error::Result;
use crate::fs::OsFileSystem;
use crate::guide::Guide;
use crate::output::SiteBuilder;
use crate::paths::expand;
use crate::project::{self, CONFIG_FILENAME};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `--verbose` forces debug logging, otherwise RUST_LOG or warnings only
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Build {
            config,
            build_dir,
            page_ext,
        } => {
            let mut cfg = Config::load(&config)?;
            let build_dir = build_dir.map(|dir| expand(&dir)).transpose()?;
            cfg.merge_cli(build_dir, page_ext);
            cfg.validate()?;

            let guide = load_guide(&cfg)?;

            println!("Building style guide...");
            let report = SiteBuilder::new(&cfg).build(&guide)?;

            println!("{}", report.summary());
            println!("Style guide written to: {}", cfg.build_dir.display());
            Ok(())
        }

        Command::Serve { config, address } => {
            let cfg = Config::load(&config)?;
            let address = serve::parse_address(&address)?;
            let guide = load_guide(&cfg)?;

            println!("Starting server at http://{}", address);
            println!("Press Ctrl+C to stop");

            serve::serve(Arc::new(guide), &address)
        }

        Command::Create { path } => {
            let dest = project::create(&path)?;

            println!("Created style guide project at {}", dest.display());
            println!(
                "Build it with: kss build {}",
                dest.join(CONFIG_FILENAME).display()
            );
            Ok(())
        }

        Command::Version => {
            println!("kss {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_guide(cfg: &Config) -> Result<Guide> {
    let guide = Guide::from_config(cfg.clone(), Arc::new(OsFileSystem))?;
    let sections: usize = guide.pages().iter().map(|p| p.sections.len()).sum();
    println!(
        "Found {} sections on {} pages",
        sections,
        guide.pages().len()
    );
    Ok(guide)
}
