//! Logging utilities for openai-completions
//!
//! Re-exports the tracing macros under log_* names so call sites read the
//! same across the service, transport and error modules.

pub use tracing::{
    debug as log_debug,
    error as log_error,
    info as log_info,
    trace as log_trace,
    warn as log_warn,
};
