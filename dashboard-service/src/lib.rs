pub mod analysis;
pub mod config;
pub mod forecast;
pub mod metrics_snapshot;
pub mod observability;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod session;
pub mod sheet;
pub mod sinks;
pub mod sources;
pub mod transform;

pub use pipeline::{Envelope, Pipeline};
pub use session::{Session, SessionError};
