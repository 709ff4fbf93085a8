//! Step navigation controller.
//!
//! A move is two-phase: [`WizardState::request`] begins the exit and
//! [`WizardState::commit`] lands on the new step. The manager sleeps for the
//! configured transition delay between the two.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::validation::{FieldErrors, StepRejection};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Basic,
    Secondary,
    Review,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Basic, Step::Secondary, Step::Review];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Basic => "Basic details",
            Step::Secondary => "Other details",
            Step::Review => "Review and Register",
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Exiting { from: Step, to: Step },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// The exit phase began; call [`WizardState::commit`] to land on `to`.
    Started { from: Step, to: Step },
    /// The gate for `step` failed; the wizard stays put.
    Blocked {
        step: Step,
        warning: String,
        errors: FieldErrors,
    },
    /// A transition is already running, or there is nowhere to go.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    current: Step,
    statuses: [StepStatus; 3],
    phase: TransitionPhase,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current: Step::Basic,
            statuses: [StepStatus::Active, StepStatus::Pending, StepStatus::Pending],
            phase: TransitionPhase::Idle,
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    pub fn status(&self, step: Step) -> StepStatus {
        self.statuses[step.index()]
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, TransitionPhase::Exiting { .. })
    }

    /// Ask to move to `target`.
    ///
    /// Forward moves run `gate` for the current step and go one step at a
    /// time; a target further ahead is clamped. Backward moves (and re-entering
    /// the current step) are never gated.
    pub fn request<G>(&mut self, target: Step, gate: G) -> NavigationOutcome
    where
        G: FnOnce(Step) -> Result<(), StepRejection>,
    {
        if let TransitionPhase::Exiting { to, .. } = self.phase {
            debug!(?target, pending = ?to, "navigation ignored during transition");
            return NavigationOutcome::Ignored;
        }

        let from = self.current;
        let to = if target > from {
            let Some(next) = from.next() else {
                return NavigationOutcome::Ignored;
            };
            if let Err(rejection) = gate(from) {
                info!(step = ?from, fields = rejection.errors.len(), "step gate rejected advance");
                return NavigationOutcome::Blocked {
                    step: from,
                    warning: rejection.warning,
                    errors: rejection.errors,
                };
            }
            self.statuses[from.index()] = StepStatus::Complete;
            next
        } else {
            for step in Step::ALL.iter().filter(|s| **s > target) {
                if self.statuses[step.index()] == StepStatus::Active {
                    self.statuses[step.index()] = StepStatus::Pending;
                }
            }
            target
        };

        self.statuses[to.index()] = StepStatus::Active;
        self.phase = TransitionPhase::Exiting { from, to };
        debug!(?from, ?to, "transition started");
        NavigationOutcome::Started { from, to }
    }

    pub fn advance<G>(&mut self, gate: G) -> NavigationOutcome
    where
        G: FnOnce(Step) -> Result<(), StepRejection>,
    {
        match self.current.next() {
            Some(next) => self.request(next, gate),
            None => NavigationOutcome::Ignored,
        }
    }

    pub fn retreat(&mut self) -> NavigationOutcome {
        match self.current.prev() {
            Some(prev) => self.request(prev, |_| Ok(())),
            None => NavigationOutcome::Ignored,
        }
    }

    /// Finish a running transition. Returns the step landed on.
    pub fn commit(&mut self) -> Option<Step> {
        match self.phase {
            TransitionPhase::Exiting { to, .. } => {
                self.current = to;
                self.phase = TransitionPhase::Idle;
                info!(step = ?to, "entered step");
                Some(to)
            }
            TransitionPhase::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(_: Step) -> Result<(), StepRejection> {
        Ok(())
    }

    fn fail(_: Step) -> Result<(), StepRejection> {
        let mut errors = FieldErrors::new();
        errors.insert("phone", "Phone number must be exactly 10 digits".to_string());
        Err(StepRejection {
            warning: "Please fill all required basic details.".to_string(),
            errors,
        })
    }

    #[test]
    fn test_fresh_wizard_is_on_basic() {
        let wizard = WizardState::new();
        assert_eq!(wizard.current(), Step::Basic);
        assert_eq!(wizard.status(Step::Basic), StepStatus::Active);
        assert_eq!(wizard.status(Step::Review), StepStatus::Pending);
        assert_eq!(wizard.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn test_step_ordering_helpers() {
        assert_eq!(Step::Basic.next(), Some(Step::Secondary));
        assert_eq!(Step::Review.next(), None);
        assert_eq!(Step::Basic.prev(), None);
        assert_eq!(Step::from_index(2), Some(Step::Review));
        assert_eq!(Step::from_index(3), None);
        assert_eq!(Step::Secondary.title(), "Other details");
    }

    #[test]
    fn test_index_changes_only_on_commit() {
        let mut wizard = WizardState::new();

        let outcome = wizard.advance(pass);
        assert_eq!(outcome, NavigationOutcome::Started { from: Step::Basic, to: Step::Secondary });
        assert_eq!(wizard.current(), Step::Basic);
        assert!(wizard.is_transitioning());
        assert_eq!(wizard.status(Step::Basic), StepStatus::Complete);
        assert_eq!(wizard.status(Step::Secondary), StepStatus::Active);

        assert_eq!(wizard.commit(), Some(Step::Secondary));
        assert_eq!(wizard.current(), Step::Secondary);
        assert_eq!(wizard.commit(), None);
    }

    #[test]
    fn test_failed_gate_keeps_step_and_statuses() {
        let mut wizard = WizardState::new();
        let before = wizard.clone();

        match wizard.advance(fail) {
            NavigationOutcome::Blocked { step, errors, .. } => {
                assert_eq!(step, Step::Basic);
                assert!(errors.contains_key("phone"));
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
        assert_eq!(wizard, before);
    }

    #[test]
    fn test_forward_jump_is_clamped_to_next_step() {
        let mut wizard = WizardState::new();
        assert_eq!(
            wizard.request(Step::Review, pass),
            NavigationOutcome::Started { from: Step::Basic, to: Step::Secondary }
        );
    }

    #[test]
    fn test_backward_move_skips_gate() {
        let mut wizard = WizardState::new();
        wizard.advance(pass);
        wizard.commit();
        wizard.advance(pass);
        wizard.commit();
        assert_eq!(wizard.current(), Step::Review);

        let outcome = wizard.request(Step::Basic, fail);
        assert_eq!(outcome, NavigationOutcome::Started { from: Step::Review, to: Step::Basic });
        wizard.commit();

        assert_eq!(wizard.current(), Step::Basic);
        assert_eq!(wizard.status(Step::Basic), StepStatus::Active);
        assert_eq!(wizard.status(Step::Secondary), StepStatus::Complete);
        assert_eq!(wizard.status(Step::Review), StepStatus::Pending);
    }

    #[test]
    fn test_requests_during_transition_are_ignored() {
        let mut wizard = WizardState::new();
        wizard.advance(pass);

        assert_eq!(wizard.retreat(), NavigationOutcome::Ignored);
        assert_eq!(wizard.advance(pass), NavigationOutcome::Ignored);
        assert_eq!(wizard.commit(), Some(Step::Secondary));
    }

    #[test]
    fn test_edges_are_ignored() {
        let mut wizard = WizardState::new();
        assert_eq!(wizard.retreat(), NavigationOutcome::Ignored);

        wizard.advance(pass);
        wizard.commit();
        wizard.advance(pass);
        wizard.commit();
        assert_eq!(wizard.advance(pass), NavigationOutcome::Ignored);
    }

    #[test]
    fn test_reentering_current_step_runs_a_transition() {
        let mut wizard = WizardState::new();
        assert_eq!(
            wizard.request(Step::Basic, fail),
            NavigationOutcome::Started { from: Step::Basic, to: Step::Basic }
        );
        assert_eq!(wizard.commit(), Some(Step::Basic));
        assert_eq!(wizard.status(Step::Basic), StepStatus::Active);
    }
}
