//! The schedule pipeline: normalize -> filter -> bucket.
//!
//! All three stages are pure, synchronous functions over immutable inputs,
//! recomputed from scratch per invocation. None of them can fail: malformed
//! input degrades to absent dates and empty buckets instead of errors.

pub mod bucket;
pub mod filter;
pub mod normalize;

pub use bucket::{Granularity, bucket, is_active_on, visible_range};
pub use filter::ScheduleFilter;
pub use normalize::{SourceToggles, normalize, parse_date};
