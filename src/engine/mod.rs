//! Risk aggregation engine: pure reduction of two zones' metrics to a report payload.
//!
//! No I/O and no shared mutable state; every call is independent and
//! deterministic apart from the explicit `generated_at` stamp.

pub mod catalog;
pub mod evidence;
pub mod expansion;
pub mod locale;
pub mod metrics;
pub mod payload;
pub mod status;
pub mod zones;

#[cfg(test)]
mod test_properties;
