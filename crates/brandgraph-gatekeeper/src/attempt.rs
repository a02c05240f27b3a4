//! Generation attempt state machine
//!
//! ```text
//! Idle -> Evaluated{safe}     -> Generated
//!      -> Evaluated{at-risk}  -> ConfirmedOverride -> Generated
//!                             -> Aborted
//!      -> Evaluated{blocked}  -> Aborted
//! ```

use crate::gate::{DecisionGateResult, GateStatus};
use crate::GateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a generation attempt currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "state", content = "gate")]
pub enum AttemptState {
    /// Nothing evaluated yet
    Idle,
    /// The gate has been evaluated
    Evaluated(GateStatus),
    /// The user accepted an at-risk gate
    ConfirmedOverride,
    /// The user gave up
    Aborted,
    /// Generation went ahead
    Generated,
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptState::Idle => f.write_str("idle"),
            AttemptState::Evaluated(status) => write!(f, "evaluated({})", status),
            AttemptState::ConfirmedOverride => f.write_str("confirmed-override"),
            AttemptState::Aborted => f.write_str("aborted"),
            AttemptState::Generated => f.write_str("generated"),
        }
    }
}

/// One attempt to generate a campaign from a selection
///
/// # Examples
///
/// ```
/// use brandgraph_domain::EntityRegistry;
/// use brandgraph_gatekeeper::{calculate_decision_gate, AttemptState, GateConfig, GenerationAttempt};
///
/// let gate = calculate_decision_gate(&[], &EntityRegistry::default(), &GateConfig::default());
/// let mut attempt = GenerationAttempt::new();
/// attempt.evaluate(gate).unwrap();
/// attempt.generate().unwrap();
/// assert_eq!(attempt.state(), AttemptState::Generated);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationAttempt {
    state: AttemptState,
    gate: Option<DecisionGateResult>,
}

impl Default for GenerationAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationAttempt {
    /// Start a fresh attempt
    pub fn new() -> Self {
        Self {
            state: AttemptState::Idle,
            gate: None,
        }
    }

    /// Current state
    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Gate verdict the attempt was evaluated against
    pub fn gate(&self) -> Option<&DecisionGateResult> {
        self.gate.as_ref()
    }

    /// Record a gate verdict
    ///
    /// Allowed while idle, and again after an evaluation when the
    /// selection changed.
    pub fn evaluate(&mut self, gate: DecisionGateResult) -> Result<AttemptState, GateError> {
        match self.state {
            AttemptState::Idle | AttemptState::Evaluated(_) => {
                self.state = AttemptState::Evaluated(gate.status);
                self.gate = Some(gate);
                Ok(self.state)
            }
            _ => Err(self.illegal("evaluate")),
        }
    }

    /// Accept the risk of an at-risk gate
    ///
    /// A blocked gate has no override.
    pub fn confirm_override(&mut self) -> Result<AttemptState, GateError> {
        match self.state {
            AttemptState::Evaluated(GateStatus::AtRisk) => {
                tracing::info!("Generation override confirmed for at-risk selection");
                self.transition(AttemptState::ConfirmedOverride)
            }
            _ => Err(self.illegal("confirm override")),
        }
    }

    /// Give up on an at-risk or blocked attempt
    pub fn abort(&mut self) -> Result<AttemptState, GateError> {
        match self.state {
            AttemptState::Evaluated(GateStatus::AtRisk | GateStatus::Blocked) => {
                self.transition(AttemptState::Aborted)
            }
            _ => Err(self.illegal("abort")),
        }
    }

    /// Proceed with generation
    pub fn generate(&mut self) -> Result<AttemptState, GateError> {
        match self.state {
            AttemptState::Evaluated(GateStatus::Safe) | AttemptState::ConfirmedOverride => {
                self.transition(AttemptState::Generated)
            }
            _ => Err(self.illegal("generate")),
        }
    }

    fn transition(&mut self, next: AttemptState) -> Result<AttemptState, GateError> {
        tracing::debug!(from = %self.state, to = %next, "Generation attempt transition");
        self.state = next;
        Ok(next)
    }

    fn illegal(&self, action: &str) -> GateError {
        GateError::InvalidTransition(format!("cannot {} from {}", action, self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(status: GateStatus) -> DecisionGateResult {
        DecisionGateResult {
            status,
            can_proceed: status != GateStatus::Blocked,
            failed_items: Vec::new(),
            message: String::new(),
        }
    }

    #[test]
    fn test_safe_path() {
        let mut attempt = GenerationAttempt::new();
        assert_eq!(
            attempt.evaluate(gate(GateStatus::Safe)).unwrap(),
            AttemptState::Evaluated(GateStatus::Safe)
        );
        assert_eq!(attempt.generate().unwrap(), AttemptState::Generated);
    }

    #[test]
    fn test_at_risk_needs_confirmation() {
        let mut attempt = GenerationAttempt::new();
        attempt.evaluate(gate(GateStatus::AtRisk)).unwrap();
        assert!(attempt.generate().is_err());

        attempt.confirm_override().unwrap();
        assert_eq!(attempt.generate().unwrap(), AttemptState::Generated);
    }

    #[test]
    fn test_blocked_has_no_override() {
        let mut attempt = GenerationAttempt::new();
        attempt.evaluate(gate(GateStatus::Blocked)).unwrap();

        let err = attempt.confirm_override().unwrap_err();
        assert_eq!(
            err,
            GateError::InvalidTransition("cannot confirm override from evaluated(blocked)".into())
        );
        assert!(attempt.generate().is_err());
        assert_eq!(attempt.abort().unwrap(), AttemptState::Aborted);
    }

    #[test]
    fn test_terminal_states() {
        let mut attempt = GenerationAttempt::new();
        assert!(attempt.generate().is_err());
        assert!(attempt.abort().is_err());

        attempt.evaluate(gate(GateStatus::AtRisk)).unwrap();
        attempt.abort().unwrap();
        assert!(attempt.evaluate(gate(GateStatus::Safe)).is_err());
        assert!(attempt.confirm_override().is_err());
    }

    #[test]
    fn test_reevaluate_replaces_verdict() {
        let mut attempt = GenerationAttempt::new();
        attempt.evaluate(gate(GateStatus::Blocked)).unwrap();
        attempt.evaluate(gate(GateStatus::Safe)).unwrap();
        assert_eq!(attempt.gate().map(|g| g.status), Some(GateStatus::Safe));
        attempt.generate().unwrap();
    }
}
