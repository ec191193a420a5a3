use crate::config::{ConfigError, Environment};
use crate::log::{DeferredLog, LogSink, TracingSink};

/// Order value for processors that should run after everything else.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Customises the [`Environment`] during bootstrap, before the application
/// reads any configuration.
///
/// Processors run before logging is initialised. Anything worth reporting
/// goes to the provided [`DeferredLog`].
///
/// ```ignore
/// struct Defaults;
///
/// impl EnvironmentPostProcessor for Defaults {
///     fn name(&self) -> &'static str { "defaults" }
///
///     fn post_process(&self, env: &mut Environment, log: &DeferredLog) -> Result<(), ConfigError> {
///         env.add_last(StaticLayer::new("defaults").with("server.port", 8080));
///         log.debug(self.name(), "defaults installed");
///         Ok(())
///     }
/// }
/// ```
pub trait EnvironmentPostProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Processors run in ascending order; ties keep registration order.
    fn order(&self) -> i32 {
        0
    }

    /// # Errors
    ///
    /// Any error aborts bootstrap.
    fn post_process(&self, env: &mut Environment, log: &DeferredLog) -> Result<(), ConfigError>;
}

/// Runs post-processors over an environment, then replays their deferred log.
pub struct Bootstrap {
    environment: Environment,
    processors: Vec<Box<dyn EnvironmentPostProcessor>>,
}

impl Bootstrap {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            processors: Vec::new(),
        }
    }

    /// Register a post-processor.
    pub fn processor(mut self, processor: impl EnvironmentPostProcessor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Run every processor, then flush the deferred log into `sink`.
    ///
    /// The log is flushed exactly once, whether or not a processor failed.
    ///
    /// # Errors
    ///
    /// Returns the first processor error; later processors do not run.
    pub fn run(self, sink: &dyn LogSink) -> Result<Environment, ConfigError> {
        let log = DeferredLog::new();
        let mut processors = self.processors;
        processors.sort_by_key(|p| p.order());

        let mut environment = self.environment;
        let mut outcome = Ok(());
        for processor in &processors {
            if let Err(err) = processor.post_process(&mut environment, &log) {
                outcome = Err(err);
                break;
            }
        }

        log.flush(sink);
        outcome.map(|()| environment)
    }

    /// Initialise `tracing`, then [`run`](Self::run) with a [`TracingSink`].
    pub fn run_with_tracing(self) -> Result<Environment, ConfigError> {
        crate::init_tracing();
        let environment = self.run(&TracingSink)?;
        tracing::debug!(sources = ?environment.source_names(), "Environment bootstrap complete");
        Ok(environment)
    }
}
