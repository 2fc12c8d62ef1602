//! Timeline layout
//!
//! Maps phase date ranges onto percentage offsets inside a padded date
//! window and produces column headers at weekly, monthly or quarterly
//! granularity. Granularity only affects headers; positions are always
//! computed against the whole window.

pub mod headers;
pub mod window;

pub use headers::{headers, Granularity, TimelineHeader};
pub use window::{phase_bar, position, TimelineBar, TimelineWindow, DEFAULT_PADDING_MONTHS, MIN_BAR_WIDTH};
