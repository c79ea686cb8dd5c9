//! Display state for the slot form: texts, result labels and reset.

use crate::batch::{evaluate_batch, BatchOptions, SlotResult};
use crate::codec::DecodeError;

/// Label shown before anything has been calculated.
pub const RESULT_PLACEHOLDER: &str = "CRC16: ";

/// Label shown for a slot with no hex data.
pub const EMPTY_MARKER: &str = "NULL";

/// Row caption for a slot.
pub fn slot_title(index: usize) -> String {
    format!("IIC command #{} 0x:", index)
}

/// Render a slot result the way the form displays it.
pub fn render_result(result: &SlotResult) -> String {
    match result {
        Ok(crc) => format!("{}{}", RESULT_PLACEHOLDER, crc),
        Err(DecodeError::Empty) => EMPTY_MARKER.to_string(),
        Err(e @ DecodeError::InvalidFormat(_)) => format!("Error: {}", e),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub text: String,
    pub label: String,
}

impl Slot {
    fn blank() -> Self {
        Self {
            text: String::new(),
            label: RESULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Owns the mutable form state; computation stays in [`crate::batch`].
#[derive(Debug, Clone)]
pub struct Panel {
    slots: Vec<Slot>,
    default_text: String,
}

impl Panel {
    /// A form with `slot_count` rows (at least one); the first holds `default_text`.
    pub fn new(slot_count: usize, default_text: impl Into<String>) -> Self {
        let mut panel = Self {
            slots: vec![Slot::blank(); slot_count.max(1)],
            default_text: default_text.into(),
        };
        panel.reset();
        panel
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.label.as_str()).collect()
    }

    /// Replace the text of one slot. Returns false if `index` is out of range.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn push_char(&mut self, index: usize, ch: char) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.text.push(ch);
        }
    }

    pub fn pop_char(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.text.pop();
        }
    }

    /// Evaluate every slot and refresh all labels.
    pub fn calculate(&mut self, options: &BatchOptions) -> Vec<SlotResult> {
        let options = BatchOptions {
            slot_count: self.slots.len(),
            ..options.clone()
        };
        let texts: Vec<&str> = self.slots.iter().map(|s| s.text.trim()).collect();
        let results = evaluate_batch(&texts, &options);
        for (slot, result) in self.slots.iter_mut().zip(&results) {
            slot.label = render_result(result);
        }
        results
    }

    /// Restore the first slot to the default text and clear everything else.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::blank();
        }
        if let Some(first) = self.slots.first_mut() {
            first.text = self.default_text.clone();
        }
    }
}
