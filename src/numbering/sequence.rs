use crate::core::AuthorizationError;

/// Monotonic document number counter.
///
/// Generates zero-padded numbers such as "000000001", "000000002", etc.
/// An optional prefix is prepended verbatim; drawn values that are not plain
/// digits are rejected when a document is opened.
#[derive(Debug, Clone)]
pub struct NumberSequence {
    prefix: String,
    /// `None` once the last value has been drawn.
    next_number: Option<u64>,
    zero_pad: usize,
}

impl NumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a sequence continuing from a given number, typically the
    /// authorization's `num_start`.
    pub fn starting_at(next_number: u64) -> Self {
        Self {
            prefix: String::new(),
            next_number: Some(next_number),
            zero_pad: 9,
        }
    }

    /// Set zero-padding width (default: 9).
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Draw the next number.
    ///
    /// Every value is handed out once; drawing past `u64::MAX` fails.
    pub fn next_number(&mut self) -> Result<String, AuthorizationError> {
        let current = self
            .next_number
            .ok_or(AuthorizationError::SequenceExhausted(u64::MAX))?;
        self.next_number = current.checked_add(1);
        Ok(self.format(current))
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> Option<String> {
        self.next_number.map(|n| self.format(n))
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> Option<u64> {
        self.next_number
    }

    fn format(&self, number: u64) -> String {
        format!(
            "{}{:0>width$}",
            self.prefix,
            number,
            width = self.zero_pad
        )
    }
}

impl Default for NumberSequence {
    fn default() -> Self {
        Self::new()
    }
}
