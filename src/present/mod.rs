//! Presentation Helpers
//!
//! Formatting for dates, durations and accuracy tiers, plus the placeholder
//! fragments shown while content loads, fails or is empty.

mod format;
mod placeholder;

pub use format::{
    display_name, format_date, format_time, performance_class, PerformanceTier, INVALID_DATE,
};
pub use placeholder::{
    empty_markup, error_markup, show_empty, show_error, show_loading, Document, MemoryDocument,
    LOADING_MARKUP,
};
