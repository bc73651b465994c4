//! wt-core: shared foundation for the wind tunnel workspace.
//!
//! Contains:
//! - units (uom SI types, constructors, conversion constants)
//! - numeric (Real, tolerances, closed ranges)
//! - clock (monotonic and manual time sources)
//! - error (shared error types)

pub mod clock;
pub mod error;
pub mod numeric;
pub mod units;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{WtError, WtResult};
pub use numeric::*;
pub use units::*;
