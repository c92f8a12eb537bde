use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use flowlab_core::estimate_sequence;
use flowlab_core::io::flow_io::save_flow;
use flowlab_core::io::image_io::load_gray_frame;
use indicatif::{ProgressBar, ProgressStyle};

use super::method::MethodArgs;
use crate::summary::{print_run_header, print_sequence_table};

#[derive(Clone, ValueEnum)]
pub enum FlowFormatArg {
    Csv,
    Json,
}

#[derive(Args)]
pub struct SequenceArgs {
    /// Frames in temporal order (at least two)
    #[arg(num_args = 2..)]
    pub frames: Vec<PathBuf>,

    #[command(flatten)]
    pub method: MethodArgs,

    /// Directory to write one flow file per frame pair
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Flow file format used with --output-dir
    #[arg(long, value_enum, default_value = "csv")]
    pub format: FlowFormatArg,
}

pub fn run(args: &SequenceArgs) -> Result<()> {
    if args.frames.len() < 2 {
        anyhow::bail!("Sequence needs at least 2 frames, got {}", args.frames.len());
    }
    let method = args.method.resolve()?;

    let style = ProgressStyle::default_bar()
        .template("{msg:20} [{bar:40}] {pos}/{len}")?
        .progress_chars("=> ");

    let pb = ProgressBar::new(args.frames.len() as u64);
    pb.set_style(style.clone());
    pb.set_message("Reading frames");
    let frames = args
        .frames
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let frame = load_gray_frame(path)
                .with_context(|| format!("Failed to load {}", path.display()));
            pb.set_position(i as u64 + 1);
            frame
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();

    let inputs: Vec<&Path> = args.frames.iter().map(PathBuf::as_path).collect();
    print_run_header(&inputs, frames[0].width(), frames[0].height(), &method);

    let pairs = frames.len() - 1;
    let pb = ProgressBar::new(pairs as u64);
    pb.set_style(style);
    pb.set_message("Estimating flow");
    let fields = estimate_sequence(&frames, &method, |done| pb.set_position(done as u64))?;
    pb.finish_with_message("Done");
    println!();

    let stats: Vec<_> = fields.iter().map(|f| f.stats()).collect();
    print_sequence_table(&stats);

    if let Some(ref dir) = args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let ext = match args.format {
            FlowFormatArg::Csv => "csv",
            FlowFormatArg::Json => "json",
        };
        for (i, field) in fields.iter().enumerate() {
            let path = dir.join(format!("flow_{:04}.{ext}", i));
            save_flow(field, &path)
                .with_context(|| format!("Failed to write flow to {}", path.display()))?;
        }
        println!("{} flow file(s) saved to {}", fields.len(), dir.display());
    }

    Ok(())
}
