use std::sync::atomic::{AtomicU8, Ordering};

const UNIVERSES: usize = 256;

/// Per-universe ArtDMX sequence counters.
///
/// Counters start at 0 ("never sent") and advance through 1..=255, skipping 0
/// on wrap since receivers treat 0 as "sequencing disabled".
#[derive(Debug)]
pub struct SequenceTable {
    slots: [AtomicU8; UNIVERSES],
}

impl SequenceTable {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| AtomicU8::new(0)),
        }
    }

    /// Advance the counter for `universe` and return the new value.
    pub fn advance(&self, universe: u8) -> u8 {
        let slot = &self.slots[universe as usize];
        let previous = slot
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(next_sequence(current))
            })
            .unwrap_or_else(|current| current);
        next_sequence(previous)
    }

    /// Last value handed out for `universe`, 0 if none yet.
    pub fn current(&self, universe: u8) -> u8 {
        self.slots[universe as usize].load(Ordering::Relaxed)
    }
}

impl Default for SequenceTable {
    fn default() -> Self {
        Self::new()
    }
}

fn next_sequence(current: u8) -> u8 {
    if current == u8::MAX { 1 } else { current + 1 }
}
