use std::rc::Rc;

use rhai::Engine;
use tracing::{debug, warn};

use crate::capabilities;
use crate::client::RobotClient;
use crate::config::BridgeConfig;

/// How one script run ended. Never propagated as an error: the bridge logs it
/// and keeps it readable through [`ScriptBridge::last_outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// The script failed to parse; no robot command was dispatched.
    SyntaxError(String),
    /// The script parsed but raised during execution: an unbound name, a type
    /// mismatch, an unhandled script-level throw. Commands dispatched before
    /// the faulting statement stay dispatched.
    RuntimeFault(String),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

/// The script-to-action bridge: one per robot-client connection. Owns a
/// single `rhai::Engine` whose capability surface is bound once, at
/// construction, and never mutated afterwards.
///
/// `run` takes `&mut self`, so two in-flight runs on the same bridge cannot
/// exist; callers wanting overlap need one bridge each, or a queue.
pub struct ScriptBridge {
    engine: Engine,
    client: Rc<dyn RobotClient>,
    last_outcome: Option<RunOutcome>,
}

impl ScriptBridge {
    pub fn new(client: Rc<dyn RobotClient>) -> Self {
        Self::with_config(client, &BridgeConfig::default())
    }

    pub fn with_config(client: Rc<dyn RobotClient>, config: &BridgeConfig) -> Self {
        let mut engine = Engine::new();
        capabilities::bind(&mut engine, client.clone(), config.sleep.cap());
        Self { engine, client, last_outcome: None }
    }

    /// Runs one script to completion. Fire-and-forget: parse failures and
    /// runtime faults are logged and recorded, never raised, and actions the
    /// robot already performed are not compensated. Scripts are responsible
    /// for ordering their actions so partial execution is safe.
    ///
    /// Each run executes in a fresh scope; script variables do not survive
    /// into the next run.
    pub fn run(&mut self, source: &str) {
        self.client.update_resolver();

        let outcome = match self.engine.compile(source) {
            Err(err) => RunOutcome::SyntaxError(err.to_string()),
            Ok(ast) => match self.engine.run_ast(&ast) {
                Ok(()) => RunOutcome::Completed,
                Err(err) => RunOutcome::RuntimeFault(err.to_string()),
            },
        };

        match &outcome {
            RunOutcome::Completed => debug!("script run completed"),
            RunOutcome::SyntaxError(msg) => warn!("script rejected before execution: {msg}"),
            RunOutcome::RuntimeFault(msg) => warn!("script aborted mid-run: {msg}"),
        }
        self.last_outcome = Some(outcome);
    }

    /// Outcome of the most recent `run`, if any.
    pub fn last_outcome(&self) -> Option<&RunOutcome> {
        self.last_outcome.as_ref()
    }
}
