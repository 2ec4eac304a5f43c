//! Read-only schema model.
//!
//! Five linked entities plus precomputed per-(Activity, Parameter) summary
//! rows. Everything here is created by the out-of-scope ingestion pipeline
//! and is immutable from the compiler's point of view.

mod activity;
mod measurement;
mod parameter;
mod platform;
mod sample;
mod stats;

pub use activity::{Activity, ActivityId};
pub use measurement::{
    GeoPoint, InstantPoint, InstantPointId, Measurement, MeasuredParameter, MeasuredParameterId,
    MeasurementId,
};
pub use parameter::{Parameter, ParameterId};
pub use platform::{Platform, PlatformId};
pub use sample::{Sample, SampleId};
pub use stats::{ActivityParameter, ActivityParameterHistogram, ActivityParameterId};
