//! # Domain Services
//!
//! Pure domain computations with no infrastructure dependencies.
//!
//! - [`business_hours`]: classifies a scheduled local time as
//!   business-hours or out-of-hours

pub mod business_hours;

pub use business_hours::{is_out_of_hours, is_out_of_hours_for};
