use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use flowlab_core::consts::{
    DEFAULT_ALPHA, DEFAULT_DET_THRESHOLD, DEFAULT_GRID_STEP, DEFAULT_ITERATIONS,
    DEFAULT_WINDOW_SIZE,
};
use flowlab_core::{FlowConfig, FlowMethod, HornSchunckParams, LucasKanadeParams};
use tracing::debug;

#[derive(Clone, ValueEnum)]
pub enum MethodArg {
    LucasKanade,
    HornSchunck,
    None,
}

/// Method selection flags shared by `estimate` and `sequence`.
#[derive(Args)]
pub struct MethodArgs {
    /// Flow config file (TOML); overrides the method flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Flow algorithm
    #[arg(long, value_enum, default_value = "lucas-kanade")]
    pub method: MethodArg,

    /// Spacing between sampled flow vectors in pixels
    #[arg(long, default_value_t = DEFAULT_GRID_STEP)]
    pub grid_step: usize,

    /// Lucas-Kanade window side length (odd)
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Lucas-Kanade determinant threshold below which a window gives zero flow
    #[arg(long, default_value_t = DEFAULT_DET_THRESHOLD)]
    pub det_threshold: f64,

    /// Horn-Schunck smoothness weight
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f32,

    /// Horn-Schunck iteration count
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,
}

impl MethodArgs {
    /// Resolve the method from the config file if given, otherwise from flags.
    pub fn resolve(&self) -> Result<FlowMethod> {
        let method = if let Some(ref config_path) = self.config {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            let config: FlowConfig = toml::from_str(&contents).context("Invalid flow config")?;
            debug!(path = %config_path.display(), method = %config.method, "Loaded flow config");
            config.method
        } else {
            self.method_from_flags()
        };
        method.validate()?;
        Ok(method)
    }

    fn method_from_flags(&self) -> FlowMethod {
        match self.method {
            MethodArg::LucasKanade => FlowMethod::LucasKanade(LucasKanadeParams {
                grid_step: self.grid_step,
                window_size: self.window_size,
                det_threshold: self.det_threshold,
            }),
            MethodArg::HornSchunck => FlowMethod::HornSchunck(HornSchunckParams {
                grid_step: self.grid_step,
                alpha: self.alpha,
                iterations: self.iterations,
            }),
            MethodArg::None => FlowMethod::None,
        }
    }
}
