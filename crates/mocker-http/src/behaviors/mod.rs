//! Per-route response behaviors.
//!
//! - `wait` - fixed latency before every response
//! - `cycler` - rotation cursor used by the SEQUENCE strategy

mod cycler;
mod wait;

pub use cycler::SequenceCursor;
pub use wait::WaitBehavior;
