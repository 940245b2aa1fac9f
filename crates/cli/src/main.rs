use anyhow::Result;
use clap::{Parser, Subcommand};
use reach_renamer::commands::{init_config_command, inspect_command, rename_command};
use reach_renamer::init_tracing;

/// Renames survey points along watercourses, respecting legacy anchor names.
///
/// This CLI is a thin wrapper around `reach-core` (exposed in code as `reach_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "reach-renamer",
    version,
    about = "Renames points along watercourses around legacy anchor names",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute new point names and write them into a copy of the dataset.
    ///
    /// This will:
    /// - Copy the input GeoPackage to the output path (the input is never modified).
    /// - Dissolve the line layer by identifier and order points along each line.
    /// - Write the new names into the configured field of the point layer.
    Rename {
        /// Input GeoPackage.
        #[arg(long)]
        input: String,

        /// Output GeoPackage. Defaults to `results.gpkg` next to the input.
        #[arg(long)]
        output: Option<String>,

        /// YAML config naming layers, fields and tolerance. Defaults apply if omitted.
        #[arg(long)]
        config: Option<String>,

        /// Optional path for a JSON run report.
        #[arg(long)]
        report: Option<String>,

        /// Print the id -> name mapping as JSON and write nothing.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Show the segments and generated names per watercourse, without writing.
    Inspect {
        /// Input GeoPackage.
        #[arg(long)]
        input: String,

        /// YAML config naming layers, fields and tolerance. Defaults apply if omitted.
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write the default configuration file.
    InitConfig {
        /// Destination path.
        #[arg(long, default_value = "rename.yaml")]
        path: String,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Rename { input, output, config, report, dry_run } => {
            rename_command(
                &input,
                output.as_deref(),
                config.as_deref(),
                report.as_deref(),
                dry_run,
            )?;
        }
        Command::Inspect { input, config, json } => {
            inspect_command(&input, config.as_deref(), json)?;
        }
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
    }

    Ok(())
}
