//! Sequential runner for simulation scenarios

use serde_json::json;

use super::types::{SimulationOutcome, SimulationScenario, SimulationSummary};
use crate::logging::{LogLevel, Logger, SharedLogger, TracingLogger, emit};
use crate::sandbox::{SIMULATION_TIMEOUT_MS, Sandbox, SandboxOptions};

/// Default runner name
pub const DEFAULT_SIMULATION_RUNNER: &str = "simulation-runner";

/// Runs registered scenarios one after another through a single sandbox
pub struct SimulationRunner<I, O> {
    name: String,
    scenarios: Vec<SimulationScenario<I, O>>,
    sandbox: Sandbox,
    logger: SharedLogger,
}

impl<I, O> SimulationRunner<I, O>
where
    I: Clone + Send + 'static,
    O: Send + 'static,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_logger(name, TracingLogger::shared("simulation"))
    }

    pub fn with_logger(name: impl Into<String>, logger: SharedLogger) -> Self {
        let name = name.into();
        let options = SandboxOptions::new(name.clone())
            .with_timeout_ms(SIMULATION_TIMEOUT_MS)
            .with_log_level(LogLevel::Info);

        Self {
            sandbox: Sandbox::with_logger(options, logger.clone()),
            name,
            scenarios: Vec::new(),
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn register_scenario(&mut self, scenario: SimulationScenario<I, O>) {
        emit(
            self.logger.as_ref(),
            LogLevel::Debug,
            &format!("Registered simulation scenario: {}", scenario.name),
            None,
        );
        self.scenarios.push(scenario);
    }

    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Run every registered scenario in registration order
    pub async fn run_all(&mut self) -> Vec<SimulationOutcome<O>> {
        emit(
            self.logger.as_ref(),
            LogLevel::Info,
            &format!("Running {} simulation scenarios", self.scenarios.len()),
            None,
        );

        let mut results = Vec::with_capacity(self.scenarios.len());
        for scenario in &self.scenarios {
            results.push(Self::execute(&mut self.sandbox, self.logger.as_ref(), scenario).await);
        }

        let summary = SimulationSummary::from_outcomes(&results);
        emit(
            self.logger.as_ref(),
            LogLevel::Info,
            "Simulation scenarios completed",
            Some(&json!({
                "total": summary.total,
                "successful": summary.successful,
                "failed": summary.failed,
            })),
        );

        results
    }

    /// Run one scenario through this runner's sandbox
    ///
    /// The scenario does not have to be registered.
    pub async fn run_scenario(&mut self, scenario: &SimulationScenario<I, O>) -> SimulationOutcome<O> {
        Self::execute(&mut self.sandbox, self.logger.as_ref(), scenario).await
    }

    async fn execute(
        sandbox: &mut Sandbox,
        logger: &dyn Logger,
        scenario: &SimulationScenario<I, O>,
    ) -> SimulationOutcome<O> {
        emit(
            logger,
            LogLevel::Info,
            &format!("Running scenario: {}", scenario.name),
            None,
        );

        let outcome = sandbox.execute(|| scenario.invoke()).await;

        let validated = match outcome.value() {
            Some(output) => match scenario.check(output) {
                None => None,
                Some(Ok(valid)) => Some(valid),
                Some(Err(err)) => {
                    emit(
                        logger,
                        LogLevel::Warn,
                        &format!("Validation failed for scenario: {}", scenario.name),
                        Some(&json!({ "error": err.to_string() })),
                    );
                    Some(false)
                }
            },
            None => None,
        };

        SimulationOutcome {
            scenario_name: scenario.name.clone(),
            succeeded: outcome.succeeded() && validated.unwrap_or(true),
            result: outcome.result,
            elapsed_ms: outcome.elapsed_ms,
            validated,
            logs: outcome.logs,
        }
    }
}

impl<I, O> Default for SimulationRunner<I, O>
where
    I: Clone + Send + 'static,
    O: Send + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATION_RUNNER)
    }
}

/// Register `scenarios` on a fresh runner, run them and discard the runner
pub async fn run_simulations<I, O>(
    scenarios: impl IntoIterator<Item = SimulationScenario<I, O>>,
) -> Vec<SimulationOutcome<O>>
where
    I: Clone + Send + 'static,
    O: Send + 'static,
{
    let mut runner = SimulationRunner::default();
    for scenario in scenarios {
        runner.register_scenario(scenario);
    }
    runner.run_all().await
}
