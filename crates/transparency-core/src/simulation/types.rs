//! Simulation scenario registrations and outcomes

use futures::future::BoxFuture;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::error::{ErrorInfo, SandboxError, panic_message};

/// Boxed scenario body
pub type ScenarioFn<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, anyhow::Result<O>> + Send + Sync>;

/// Boxed output predicate
pub type ValidateFn<O> = Arc<dyn Fn(&O) -> anyhow::Result<bool> + Send + Sync>;

/// An input, a body that turns it into an output, and an optional check on the output
pub struct SimulationScenario<I, O> {
    pub name: String,
    pub description: String,

    /// Input handed to the body on every run
    pub input: I,

    run: ScenarioFn<I, O>,
    validate: Option<ValidateFn<O>>,
}

impl<I, O> SimulationScenario<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// Create a scenario from an async body
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        input: I,
        run: F,
    ) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            input,
            run: Arc::new(move |input| Box::pin(run(input))),
            validate: None,
        }
    }

    /// Create a scenario from a synchronous body
    pub fn from_fn<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        input: I,
        run: F,
    ) -> Self
    where
        F: Fn(I) -> anyhow::Result<O> + Send + Sync + 'static,
    {
        let run = Arc::new(run);
        Self::new(name, description, input, move |input| {
            let run = Arc::clone(&run);
            async move { run(input) }
        })
    }
}

impl<I, O> SimulationScenario<I, O> {
    /// Attach an output predicate
    pub fn with_validator<V>(self, validate: V) -> Self
    where
        V: Fn(&O) -> bool + Send + Sync + 'static,
    {
        self.with_fallible_validator(move |output| Ok(validate(output)))
    }

    /// Attach an output predicate that may itself fail
    ///
    /// A failing predicate counts as `validated = false`.
    pub fn with_fallible_validator<V>(mut self, validate: V) -> Self
    where
        V: Fn(&O) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validate));
        self
    }

    pub fn has_validator(&self) -> bool {
        self.validate.is_some()
    }

    pub(crate) fn invoke(&self) -> BoxFuture<'static, anyhow::Result<O>>
    where
        I: Clone,
    {
        (self.run)(self.input.clone())
    }

    /// Run the predicate, if any. Errors and panics come back as `Validation` errors.
    pub(crate) fn check(&self, output: &O) -> Option<Result<bool, SandboxError>> {
        let validate = self.validate.as_ref()?;
        let checked = match std::panic::catch_unwind(AssertUnwindSafe(|| validate(output))) {
            Ok(Ok(valid)) => Ok(valid),
            Ok(Err(err)) => Err(SandboxError::Validation(err.to_string())),
            Err(panic) => Err(SandboxError::Validation(panic_message(panic.as_ref()))),
        };
        Some(checked)
    }
}

impl<I: Clone, O> Clone for SimulationScenario<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            input: self.input.clone(),
            run: Arc::clone(&self.run),
            validate: self.validate.clone(),
        }
    }
}

impl<I: fmt::Debug, O> fmt::Debug for SimulationScenario<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationScenario")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input", &self.input)
            .field("has_validator", &self.validate.is_some())
            .finish_non_exhaustive()
    }
}

/// Classified result of one scenario run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome<O> {
    pub scenario_name: String,

    /// Execution succeeded and the validator, if any, accepted the output
    pub succeeded: bool,

    /// Output of the body, or the execution failure
    pub result: Result<O, ErrorInfo>,

    pub elapsed_ms: u64,

    /// `None` when no validator ran
    pub validated: Option<bool>,

    /// Sandbox log lines for the underlying execution
    pub logs: Vec<String>,
}

impl<O> SimulationOutcome<O> {
    pub fn output(&self) -> Option<&O> {
        self.result.as_ref().ok()
    }

    pub fn failure(&self) -> Option<&ErrorInfo> {
        self.result.as_ref().err()
    }
}

impl<O: Serialize> Serialize for SimulationOutcome<O> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SimulationOutcome", 6)?;
        state.serialize_field("scenario_name", &self.scenario_name)?;
        state.serialize_field("succeeded", &self.succeeded)?;
        match &self.result {
            Ok(output) => state.serialize_field("output", output)?,
            Err(failure) => state.serialize_field("error", failure)?,
        }
        state.serialize_field("elapsed_ms", &self.elapsed_ms)?;
        if let Some(validated) = self.validated {
            state.serialize_field("validated", &validated)?;
        }
        state.serialize_field("logs", &self.logs)?;
        state.end()
    }
}

/// Success/failure totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl SimulationSummary {
    pub fn from_outcomes<O>(outcomes: &[SimulationOutcome<O>]) -> Self {
        let successful = outcomes.iter().filter(|o| o.succeeded).count();
        Self {
            total: outcomes.len(),
            successful,
            failed: outcomes.len() - successful,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
