//! Decode configuration

/// Decode options
///
/// The defaults accept anything the wire format can express; tighten them
/// when decoding input from an untrusted peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeConfig {
    /// Largest element count accepted in any length prefix.
    pub max_container_len: u64,
    /// Accept input that continues past the decoded value.
    pub allow_trailing: bool,
}

impl DecodeConfig {
    /// Permissive configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_container_len: u64::MAX,
            allow_trailing: true,
        }
    }

    /// Cap the element count of every decoded container.
    #[must_use]
    pub const fn with_max_container_len(mut self, max: u64) -> Self {
        self.max_container_len = max;
        self
    }

    /// Reject (`false`) or ignore (`true`) bytes left after the value.
    #[must_use]
    pub const fn with_allow_trailing(mut self, allow: bool) -> Self {
        self.allow_trailing = allow;
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}
