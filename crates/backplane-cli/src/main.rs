//! Stack synthesizer
//!
//! Assembles the application backend stack and writes the synthesized
//! template to stdout or a file. Synthesis is the only runtime action a
//! declarative repository has; deployment belongs to the provisioning
//! engine.

use backplane::naming::{BucketName, Region};
use backplane::{AppStackConfig, app_backend_stack};

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about = "Synthesize the application backend template")]
struct Opt {
    /// Name of the asset bucket.
    #[arg(long)]
    bucket: BucketName,

    /// Stack name.
    #[arg(long, default_value = "app-backend")]
    stack_name: String,

    /// Browser origin allowed to call the bucket.
    #[arg(long, default_value = "http://localhost:3000")]
    origin: String,

    /// Deployment region recorded in the stack outputs.
    #[arg(long)]
    region: Option<Region>,

    /// Write the template to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit compact JSON.
    #[arg(long)]
    compact: bool,
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;

    // Logs go to stderr so stdout stays clean for the template itself.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    setup_tracing();
    let opt = Opt::parse();

    let mut config = AppStackConfig::new(opt.bucket);
    config.stack_name = opt.stack_name;
    config.allowed_origin = opt.origin;
    config.region = opt.region;

    let stack = app_backend_stack(&config)?;
    let template = stack.synth();
    let rendered = if opt.compact {
        template.to_json()?
    } else {
        template.to_json_pretty()?
    };

    match &opt.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!(path = %path.display(), stack = stack.name(), "template written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
