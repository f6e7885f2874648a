//! Netprofile - configuration core of a network connection manager.
//!
//! A connection profile is a set of typed settings, each a bundle of named
//! properties with declared kinds and defaults. The main features include:
//!
//! - Total ordering over dynamically typed property values
//! - Schema-checked settings with defaults, secrets and validation
//! - A registry resolving setting type names and error domains
//! - Connections with comparison, diffing, generic-map round trips and
//!   secret handling
//!
//! # Quick Start
//!
//! ```rust
//! use netprofile::{CompareFlags, Connection, SettingRegistry};
//!
//! let registry = SettingRegistry::with_builtin();
//!
//! let mut connection = Connection::new();
//! let setting = registry
//!     .create("connection")?
//!     .with("id", "home")?
//!     .with("type", "802-11-wireless")?;
//! connection.add_setting(setting);
//! connection.add_setting(registry.create("802-11-wireless")?.with("ssid", "MyNet")?);
//!
//! let copy = Connection::from_generic_map(&connection.to_generic_map(), &registry)?;
//! assert!(connection.compare(&copy, CompareFlags::EXACT));
//! # Ok::<(), netprofile::ProfileError>(())
//! ```

/// Library configuration for logging and comparison tuning.
pub mod config;

/// Connection profiles and their operations.
pub mod connection;

/// Core error types and result aliases.
pub mod core;

/// Setting type registry.
pub mod registry;

/// Typed property bundles and built-in setting kinds.
pub mod setting;

/// Tracing subscriber setup for host applications.
pub mod tracing_config;

/// Dynamically typed property values and their ordering.
pub mod value;

/// Re-exported core types for convenience.
pub use core::{ProfileError, Result};

pub use connection::{Connection, ConnectionScope, SecretsRequest, SettingsMap, SubscriptionId};
pub use registry::SettingRegistry;
pub use setting::{
    CompareFlags, KnownSetting, Problem, PropertyFlags, PropertySpec, SerializeFlags, Setting,
    SettingKind, Severity, VerifyContext,
};
pub use value::{Comparator, Value, ValueKind, ValueMap};
