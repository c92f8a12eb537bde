use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::horn_schunck::HornSchunckParams;
use crate::lucas_kanade::LucasKanadeParams;

/// Flow estimation algorithm and its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlowMethod {
    /// Skip estimation; always yields an empty field.
    None,
    LucasKanade(LucasKanadeParams),
    HornSchunck(HornSchunckParams),
}

impl Default for FlowMethod {
    fn default() -> Self {
        Self::LucasKanade(LucasKanadeParams::default())
    }
}

impl std::fmt::Display for FlowMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::LucasKanade(p) => write!(
                f,
                "Lucas-Kanade (window {}, step {})",
                p.window_size, p.grid_step
            ),
            Self::HornSchunck(p) => write!(
                f,
                "Horn-Schunck (alpha {}, {} iterations, step {})",
                p.alpha, p.iterations, p.grid_step
            ),
        }
    }
}

impl FlowMethod {
    /// Reject out-of-range parameters before any computation.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::None => Ok(()),
            Self::LucasKanade(p) => p.validate(),
            Self::HornSchunck(p) => p.validate(),
        }
    }
}

/// Top-level configuration, loadable from TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub method: FlowMethod,
}
