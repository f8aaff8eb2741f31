//! `javadecl` command line.
//!
//! Generates TypeScript declarations from Java sources. Settings come from an
//! optional JSON config file; flags override it.
//!
//! ```bash
//! javadecl -s src/main/java -o build/typings -p com.example.api --clean
//! ```
//!
//! Set `JAVADECL_LOG` (e.g. `JAVADECL_LOG=javadecl=debug`) to control logging
//! beyond what `-v` selects.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use javadecl::{Generator, GeneratorConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "javadecl",
    version,
    about = "Generate TypeScript declaration files from Java API sources"
)]
struct Cli {
    /// JSON config file; flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Java source root, scanned recursively. Repeatable.
    #[arg(short, long = "source", value_name = "DIR")]
    sources: Vec<PathBuf>,

    /// Output root for the generated declarations.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Package prefix whose types are imported across files. Repeatable.
    #[arg(short = 'p', long = "api-package", value_name = "PKG")]
    api_packages: Vec<String>,

    /// Delete previously generated declarations first.
    #[arg(long)]
    clean: bool,

    /// Directory of hand-written declarations copied to `<output>/patches`.
    #[arg(long, value_name = "DIR")]
    patches: Option<PathBuf>,

    /// Parse source files in parallel.
    #[arg(long)]
    parallel: bool,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if !self.sources.is_empty() {
            config.source_dirs = self.sources;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if !self.api_packages.is_empty() {
            config.api_packages = self.api_packages;
        }
        if self.clean {
            config.clean_output = true;
        }
        if let Some(patches) = self.patches {
            config.patch_dir = Some(patches);
        }
        if self.parallel {
            config.parser.parallel = true;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("JAVADECL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    let generator = Generator::new(config).context("failed to set up generator")?;
    let report = generator.run().context("generation failed")?;

    for (path, reason) in &report.failed_files {
        tracing::warn!(path = %path.display(), "not generated: {reason}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
