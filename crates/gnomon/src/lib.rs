//! # Gnomon
//!
//! Deterministic substrate for a smart-contract VM: package admission and
//! consensus-safe time.
//!
//! Every node of a chain must reach the same verdict on the same input. This
//! crate bundles the two pieces of the VM core where that is easiest to get
//! wrong:
//!
//! - **Package admission** ([`gnomon_package`]) - structural checks on
//!   uploaded packages and import isolation between libraries and realms
//! - **Deterministic time** ([`gnomon_time`]) - calendar math, durations and
//!   encodings with no dependence on host locale or time zone data
//!
//! Host policy (path limits, clock source, logging) comes from
//! [`gnomon_config`] and is wired together by [`Substrate`].
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                        Substrate                       │
//! │  ┌──────────────────┐   ┌─────────────┐   ┌─────────┐  │
//! │  │ PackageValidator │   │ dyn Clock   │ ← │ config  │  │
//! │  │ (scan_imports)   │   │ (Time::now) │   └─────────┘  │
//! │  └──────────────────┘   └─────────────┘                │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use gnomon::{GnomonConfig, MemFile, MemPackage, Month, Substrate, Time};
//!
//! let config = GnomonConfig::fixed_clock("2024-02-29T12:00:00Z");
//! let substrate = Substrate::from_config(&config)?;
//!
//! assert_eq!(substrate.now(), Time::from_date(2024, Month::FEBRUARY, 29, 12, 0, 0, 0));
//!
//! let pkg = MemPackage::new(
//!     "users",
//!     "gno.land/r/demo/users",
//!     vec![MemFile::new("users.gno", "package users\n")],
//! );
//! assert!(substrate.validate(&pkg).is_ok());
//! # Ok::<(), gnomon::SubstrateError>(())
//! ```

mod error;
mod substrate;
pub mod telemetry;


pub use error::{Result, SubstrateError};
pub use substrate::Substrate;

// Re-export the member crates for hosts that need the full API
pub use gnomon_config;
pub use gnomon_package;
pub use gnomon_time;

// Package admission
pub use gnomon_package::{
    MemFile, MemPackage, PackageValidator, ScanError, ValidationError, scan_imports,
    split_filepath,
};

// Deterministic time
pub use gnomon_time::{Clock, Duration, FixedClock, Month, SystemClock, Time, Weekday};

// Host configuration
pub use gnomon_config::{ClockSource, ConfigLoader, GnomonConfig, LogFormat, LoggingConfig};
