//! The host-facing pair of admission validator and clock.

use std::fmt;

use gnomon_config::{ClockSource, GnomonConfig};
use gnomon_package::{MemPackage, PackageValidator, ValidationError};
use gnomon_time::{Clock, FixedClock, SystemClock, Time};
use tracing::info;

use crate::error::Result;

/// A package validator and a clock, configured together.
///
/// The deterministic crates never read configuration or the host clock on
/// their own; a `Substrate` is where a host wires both in once.
pub struct Substrate {
    validator: PackageValidator,
    clock: Box<dyn Clock>,
}

impl Substrate {
    /// Builds a substrate from a loaded configuration.
    ///
    /// The configuration is re-validated, and a fixed clock's
    /// `clock.fixed_time` is parsed as RFC 3339.
    pub fn from_config(config: &GnomonConfig) -> Result<Self> {
        config.validate()?;

        let validator =
            PackageValidator::new().with_max_path_length(config.validation.max_path_length);

        let clock: Box<dyn Clock> = match (config.clock.source, &config.clock.fixed_time) {
            (ClockSource::Fixed, Some(fixed_time)) => {
                let now = Time::parse_rfc3339(fixed_time)?;
                info!(%now, "using fixed clock");
                Box::new(FixedClock::new(now))
            }
            // validate() already rejected a fixed source without an instant
            _ => Box::new(SystemClock::new()),
        };

        Ok(Self { validator, clock })
    }

    /// Pairs an explicit validator and clock.
    pub fn with_parts(validator: PackageValidator, clock: impl Clock + 'static) -> Self {
        Self {
            validator,
            clock: Box::new(clock),
        }
    }

    /// Admits or rejects a package.
    pub fn validate(&self, package: &MemPackage) -> std::result::Result<(), ValidationError> {
        self.validator.validate(package)
    }

    /// Reads the configured clock.
    pub fn now(&self) -> Time {
        Time::now(self.clock.as_ref())
    }

    pub fn validator(&self) -> &PackageValidator {
        &self.validator
    }
}

impl Default for Substrate {
    fn default() -> Self {
        Self::with_parts(PackageValidator::default(), SystemClock::new())
    }
}

impl fmt::Debug for Substrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Substrate")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
