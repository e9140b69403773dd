//! KeyProbe: checks whether third-party API credentials are live.
//!
//! One cheap probe request per provider, classified into a uniform
//! [`ValidationResult`]. Providers are independent entries in a
//! [`Registry`]; the [`Dispatcher`] handles input checks, timing and
//! failure normalization.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod server;
pub mod validators;

pub use config::{Config, Endpoints};
pub use dispatch::{Dispatcher, ValidationResult};
pub use error::ProbeError;
pub use registry::{Category, ProviderEntry, Registry};
pub use validators::{Details, ProbeContext, ProbeOutcome, ResultType, ValidatorFn};
