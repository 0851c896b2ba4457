//! Logging for the `stockledger` binary.
//!
//! The dashboard owns stdout (text tables or the JSON view); diagnostics are
//! structured events on stderr so the two never interleave in a pipe.

pub mod tracing;

/// Install the stderr JSON subscriber. See [`tracing::init`].
pub fn init() {
    tracing::init();
}
