//! Layered property environment for okta-env.
//!
//! An [`Environment`] is an ordered list of [`PropertySource`]s. Lookups walk
//! the list front to back and return the first value a source claims. Sources
//! are evaluated lazily, against the live environment, every time a key is
//! read.
//!
//! Post-processors ([`EnvironmentPostProcessor`]) append derived sources during
//! [`Bootstrap`], before logging is initialised; anything they log goes to a
//! [`DeferredLog`] that is replayed exactly once afterwards.

pub mod bootstrap;
pub mod config;
pub mod log;
pub mod tracing_setup;

pub use bootstrap::{Bootstrap, EnvironmentPostProcessor, LOWEST_PRECEDENCE};
pub use config::layer::{AliasLayer, ComputedLayer, ConditionalLayer, ConfigLayer, StaticLayer};
pub use config::source::{PropertyResolver, PropertySource, SystemEnvironmentSource};
pub use config::{ConfigError, ConfigValue, Environment, FromConfigValue};
pub use log::{DeferredLog, LogRecord, LogSink, TracingSink};
pub use tracing_setup::init_tracing;
