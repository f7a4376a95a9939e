use std::collections::BTreeMap;

use tracing::debug;

use super::sequence::NumberSequence;
use crate::core::{AuthorizationError, SequenceId};

/// External counter service drawing document numbers.
///
/// Implementations must never hand out the same value twice for a sequence.
pub trait SequenceGenerator {
    fn next_value(&mut self, sequence: SequenceId) -> Result<String, AuthorizationError>;
}

/// In-memory set of sequences keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Sequences {
    counters: BTreeMap<SequenceId, NumberSequence>,
    next_id: u64,
}

impl Sequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter and return its id.
    pub fn create(&mut self, sequence: NumberSequence) -> SequenceId {
        self.next_id += 1;
        let id = SequenceId(self.next_id);
        self.counters.insert(id, sequence);
        id
    }

    pub fn get(&self, id: SequenceId) -> Option<&NumberSequence> {
        self.counters.get(&id)
    }
}

impl SequenceGenerator for Sequences {
    fn next_value(&mut self, sequence: SequenceId) -> Result<String, AuthorizationError> {
        let counter = self
            .counters
            .get_mut(&sequence)
            .ok_or_else(|| AuthorizationError::not_found("sequence", sequence.0))?;
        let value = counter.next_number()?;
        debug!(sequence = %sequence, value = %value, "sequence value drawn");
        Ok(value)
    }
}
