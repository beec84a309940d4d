use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sketchboard::config::Config;
use sketchboard::input::Modality;
use sketchboard::trace::{self, Trace};

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(version, about = "Freehand drawing surface with raster export")]
struct Cli {
    /// Replay a recorded input-event trace (JSON) onto a fresh surface
    #[arg(long, short = 't', value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Write the final surface to this exact path instead of the configured
    /// export directory
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Platform descriptor for input-modality classification, overriding the
    /// trace header (e.g. "X11; Linux x86_64" or "Android 14")
    #[arg(long, short = 'p', value_name = "DESC")]
    platform: Option<String>,

    /// Load configuration from this TOML file instead of the default location
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            Config::from_toml(&raw)?
        }
        None => Config::load()?,
    };

    let Some(trace_path) = &cli.trace else {
        // No flags: show usage
        println!("sketchboard: Freehand drawing surface with raster export");
        println!();
        println!("Usage:");
        println!("  sketchboard --trace <FILE>       Replay an event trace and export the result");
        println!("  sketchboard --trace <FILE> --output out.png");
        println!("                                   Replay and write the PNG to an exact path");
        println!("  sketchboard --help               Show help");
        println!();
        println!("Trace format (JSON):");
        println!("  {{");
        println!("    \"platform\": \"X11; Linux x86_64\",");
        println!("    \"surface\": {{ \"width\": 800, \"height\": 600, \"left\": 0, \"top\": 0 }},");
        println!("    \"events\": [");
        println!("      {{ \"type\": \"pointer_down\", \"x\": 10, \"y\": 10 }},");
        println!("      {{ \"type\": \"pointer_move\", \"x\": 120, \"y\": 80 }},");
        println!("      {{ \"type\": \"pointer_up\" }},");
        println!("      {{ \"type\": \"export\" }}");
        println!("    ]");
        println!("  }}");
        println!();
        println!("Pointer coordinates are client coordinates; touch traces use");
        println!("  {{ \"type\": \"pointer_move\", \"touches\": [{{ \"x\": 10, \"y\": 10 }}] }}");
        return Ok(());
    };

    let trace = Trace::load(trace_path)
        .with_context(|| format!("Failed to load trace {}", trace_path.display()))?;

    // Modality is classified once, before any event is handled, and is
    // immutable for the rest of the run.
    let modality = match &cli.platform {
        Some(descriptor) => Modality::classify(descriptor),
        None => trace.modality(),
    };
    log::info!("Input modality: {modality:?}");

    let base_dir = trace_path.parent();
    let (controller, exports) = trace::replay(&trace, &config, modality, base_dir)
        .context("Trace replay failed")?;

    if let Some(output) = &cli.output {
        let png = controller.export_png()?;
        std::fs::write(output, png)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Wrote {}", output.display());
    } else if exports.is_empty() {
        // The trace never asked for an export; finish with one so the run
        // leaves an artifact.
        let path = controller.on_export_request(&config.export.directory)?;
        println!("Wrote {}", path.display());
    } else {
        for path in &exports {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
