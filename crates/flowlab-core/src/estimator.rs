use tracing::{debug, info};

use crate::config::FlowMethod;
use crate::error::Result;
use crate::flow::FlowField;
use crate::frame::{ensure_same_dims, GrayFrame};
use crate::horn_schunck::estimate_horn_schunck;
use crate::lucas_kanade::estimate_lucas_kanade;

/// Estimate flow from `prev` to `curr` using the configured method.
///
/// Parameter and dimension checks happen inside each estimator.
pub fn estimate_flow(prev: &GrayFrame, curr: &GrayFrame, method: &FlowMethod) -> Result<FlowField> {
    let field = match method {
        FlowMethod::None => {
            ensure_same_dims(prev, curr)?;
            FlowField::default()
        }
        FlowMethod::LucasKanade(params) => estimate_lucas_kanade(prev, curr, params)?,
        FlowMethod::HornSchunck(params) => estimate_horn_schunck(prev, curr, params)?,
    };

    debug!(method = %method, vectors = field.len(), "Flow estimated");
    Ok(field)
}

/// Estimate flow for every consecutive pair in `frames`.
///
/// Returns `frames.len() - 1` fields (none for fewer than two frames).
/// `on_pair_done` receives the number of pairs finished so far.
pub fn estimate_sequence<F>(
    frames: &[GrayFrame],
    method: &FlowMethod,
    mut on_pair_done: F,
) -> Result<Vec<FlowField>>
where
    F: FnMut(usize),
{
    // Up front so bad parameters fail even when there are no pairs.
    method.validate()?;
    let mut fields = Vec::with_capacity(frames.len().saturating_sub(1));
    for (i, pair) in frames.windows(2).enumerate() {
        fields.push(estimate_flow(&pair[0], &pair[1], method)?);
        on_pair_done(i + 1);
    }
    info!(method = %method, pairs = fields.len(), "Sequence flow estimated");
    Ok(fields)
}
