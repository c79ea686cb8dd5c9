//! Batch evaluation: one independent decode → checksum pipeline per slot.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::codec::{decode, Crc16, DecodeError};

/// Number of slots on the IIC command form.
pub const DEFAULT_SLOT_COUNT: usize = 10;

/// Outcome for one slot.
pub type SlotResult = Result<Crc16, DecodeError>;

/// Parameters of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Exact number of results produced.
    pub slot_count: usize,
    /// Text used for slots with no input supplied.
    pub absent_text: String,
    /// Evaluate slots on the rayon pool.
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            absent_text: String::new(),
            parallel: false,
        }
    }
}

impl BatchOptions {
    pub fn with_slot_count(slot_count: usize) -> Self {
        Self {
            slot_count,
            ..Self::default()
        }
    }
}

/// Decode one text and checksum it.
pub fn evaluate_slot(text: &str) -> SlotResult {
    let bytes = decode(text)?;
    Ok(Crc16::of(&bytes))
}

/// Evaluate every slot independently.
///
/// The result has exactly `options.slot_count` entries in slot order. Slots past the
/// end of `inputs` are evaluated as `options.absent_text`; inputs past the slot count
/// are dropped.
pub fn evaluate_batch<S: AsRef<str> + Sync>(
    inputs: &[S],
    options: &BatchOptions,
) -> Vec<SlotResult> {
    if inputs.len() > options.slot_count {
        warn!(
            "Dropping {} input(s) beyond slot count {}",
            inputs.len() - options.slot_count,
            options.slot_count
        );
    }

    let run = |slot: usize| -> SlotResult {
        let text = match inputs.get(slot) {
            Some(s) => s.as_ref(),
            None => options.absent_text.as_str(),
        };
        let result = evaluate_slot(text);
        match &result {
            Ok(crc) => debug!(slot, crc = %crc, "slot evaluated"),
            Err(e) => debug!(slot, error = %e, "slot rejected"),
        }
        result
    };

    if options.parallel {
        (0..options.slot_count).into_par_iter().map(run).collect()
    } else {
        (0..options.slot_count).map(run).collect()
    }
}
