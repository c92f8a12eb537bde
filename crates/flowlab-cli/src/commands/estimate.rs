use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use flowlab_core::estimate_flow;
use flowlab_core::io::flow_io::save_flow;
use flowlab_core::io::image_io::load_gray_frame;

use super::method::MethodArgs;
use crate::summary::{print_flow_stats, print_run_header};

#[derive(Args)]
pub struct EstimateArgs {
    /// Previous frame (any format the image crate decodes)
    pub prev: PathBuf,

    /// Current frame
    pub curr: PathBuf,

    #[command(flatten)]
    pub method: MethodArgs,

    /// Write flow vectors to this file (.json for JSON, anything else CSV)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &EstimateArgs) -> Result<()> {
    let method = args.method.resolve()?;

    let prev = load_gray_frame(&args.prev)
        .with_context(|| format!("Failed to load {}", args.prev.display()))?;
    let curr = load_gray_frame(&args.curr)
        .with_context(|| format!("Failed to load {}", args.curr.display()))?;

    print_run_header(
        &[args.prev.as_path(), args.curr.as_path()],
        curr.width(),
        curr.height(),
        &method,
    );

    let field = estimate_flow(&prev, &curr, &method)?;
    print_flow_stats(&field.stats());

    if let Some(ref output) = args.output {
        save_flow(&field, output)
            .with_context(|| format!("Failed to write flow to {}", output.display()))?;
        println!("Flow saved to {}", output.display());
    }

    Ok(())
}
