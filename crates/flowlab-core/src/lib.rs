pub mod config;
pub mod consts;
pub mod error;
pub mod estimator;
pub mod flow;
pub mod frame;
pub mod gradient;
pub mod horn_schunck;
pub mod io;
pub mod lucas_kanade;

pub use config::{FlowConfig, FlowMethod};
pub use estimator::{estimate_flow, estimate_sequence};
pub use flow::{FlowField, FlowStats, FlowVector};
pub use frame::GrayFrame;
pub use horn_schunck::{estimate_horn_schunck, HornSchunckParams};
pub use lucas_kanade::{estimate_lucas_kanade, LucasKanadeParams};
