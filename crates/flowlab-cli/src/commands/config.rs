use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use flowlab_core::{FlowConfig, FlowMethod, HornSchunckParams, LucasKanadeParams};

#[derive(Clone, ValueEnum)]
pub enum ConfigMethodArg {
    LucasKanade,
    HornSchunck,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Method whose default parameters are written
    #[arg(long, value_enum, default_value = "lucas-kanade")]
    pub method: ConfigMethodArg,

    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a default FlowConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let method = match args.method {
        ConfigMethodArg::LucasKanade => FlowMethod::LucasKanade(LucasKanadeParams::default()),
        ConfigMethodArg::HornSchunck => FlowMethod::HornSchunck(HornSchunckParams::default()),
    };
    let config = FlowConfig { method };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
