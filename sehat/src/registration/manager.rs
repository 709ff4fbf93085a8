use std::collections::VecDeque;
use std::time::Duration;

use super::client::RegistrationClient;
use super::context::{ActiveStep, RegistrationContext};
use super::navigation::{NavigationOutcome, Step};
use super::RegistrationAction;
use crate::config::{SehatConfig, WizardConfig};
use crate::http_client::{ApiClient, ApiError};
use crate::notify::{Notification, Notifier, Route, CONNECTIVITY_ERROR, GENERIC_FAILURE};

pub const REGISTER_SUCCESS: &str = "Registration successful";
pub const SUBMIT_TOO_EARLY: &str = "Complete all steps before registering.";

/// What the shell shows on the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

pub struct RegistrationManager {
    // Both records plus navigation state
    context: RegistrationContext,

    client: RegistrationClient,
    transition_delay: Duration,

    // Action queue for sequential processing
    pending_actions: VecDeque<RegistrationAction>,
    is_processing: bool,
    submitting: bool,

    // Outputs for the shell
    notifier: Notifier,
    navigation: Option<Route>,
}

impl RegistrationManager {
    pub fn new(client: RegistrationClient, wizard: &WizardConfig) -> Self {
        Self {
            context: RegistrationContext::new(),
            client,
            transition_delay: wizard.transition_delay(),
            pending_actions: VecDeque::new(),
            is_processing: false,
            submitting: false,
            notifier: Notifier::default(),
            navigation: None,
        }
    }

    pub fn from_config(config: &SehatConfig) -> Self {
        Self::new(RegistrationClient::new(ApiClient::new(&config.api)), &config.wizard)
    }

    /// Queue an action. A submit is dropped while the submit control is disabled.
    pub fn dispatch(&mut self, action: RegistrationAction) {
        if matches!(action, RegistrationAction::Submit) && !self.submit_control().enabled {
            tracing::debug!("Submit dropped: a submission is already in progress");
            return;
        }
        tracing::debug!("Dispatching action: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// Process one queued action.
    pub async fn update(&mut self) {
        if self.is_processing {
            return;
        }

        if let Some(action) = self.pending_actions.pop_front() {
            self.is_processing = true;
            tracing::debug!("Processing action: {}", action.description());

            self.handle_action(action).await;

            self.is_processing = false;
        }
    }

    /// Drain the queue.
    pub async fn run_pending(&mut self) {
        while self.has_pending_actions() {
            self.update().await;
        }
    }

    pub fn context(&self) -> &RegistrationContext {
        &self.context
    }

    /// Direct field access for shells that bind inputs to the active step.
    pub fn active_step(&mut self) -> ActiveStep<'_> {
        self.context.active()
    }

    pub fn submit_control(&self) -> SubmitControl {
        let queued = self
            .pending_actions
            .iter()
            .any(|a| matches!(a, RegistrationAction::Submit));
        if self.submitting || queued {
            SubmitControl { enabled: false, label: "Registering" }
        } else {
            SubmitControl { enabled: true, label: "Register" }
        }
    }

    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty() || self.is_processing
    }

    async fn handle_action(&mut self, action: RegistrationAction) {
        match action {
            RegistrationAction::SelectAccountType(account_type) => match self.context.active() {
                ActiveStep::Basic(mut basic) => basic.set_account_type(account_type),
                other => ignore_edit("account type", other.step()),
            },
            RegistrationAction::UpdateBasic { data } => match self.context.active() {
                ActiveStep::Basic(mut basic) => basic.replace(data),
                other => ignore_edit("basic details", other.step()),
            },
            RegistrationAction::UpdateSecondary { data } => match self.context.active() {
                ActiveStep::Secondary(mut secondary) => secondary.replace(data),
                other => ignore_edit("other details", other.step()),
            },
            RegistrationAction::ToggleDepartment { department } => match self.context.active() {
                ActiveStep::Secondary(mut secondary) => {
                    let selected = secondary.toggle_department(&department);
                    tracing::debug!(%department, selected, "department toggled");
                }
                other => ignore_edit("department", other.step()),
            },
            RegistrationAction::AddMedicalHistory { input } => match self.context.active() {
                ActiveStep::Secondary(mut secondary) => secondary.add_medical_history(&input),
                other => ignore_edit("medical history", other.step()),
            },
            RegistrationAction::AddAvailableServices { input } => match self.context.active() {
                ActiveStep::Secondary(mut secondary) => secondary.add_available_services(&input),
                other => ignore_edit("available services", other.step()),
            },
            RegistrationAction::Advance => {
                let outcome = self.context.advance();
                self.finish_navigation(outcome).await;
            }
            RegistrationAction::Retreat => {
                let outcome = self.context.retreat();
                self.finish_navigation(outcome).await;
            }
            RegistrationAction::GoToStep(step) => {
                let outcome = self.context.go_to(step);
                self.finish_navigation(outcome).await;
            }
            RegistrationAction::Submit => {
                self.handle_submit().await;
            }
            RegistrationAction::ClearWarning => {
                self.context.clear_warning();
            }
            RegistrationAction::Reset => {
                self.handle_reset();
            }
        }
    }

    async fn finish_navigation(&mut self, outcome: NavigationOutcome) {
        match outcome {
            NavigationOutcome::Started { from, to } => {
                if !self.transition_delay.is_zero() {
                    tokio::time::sleep(self.transition_delay).await;
                }
                self.context.settle();
                tracing::info!(?from, ?to, "step changed");
            }
            NavigationOutcome::Blocked { warning, .. } => {
                self.notifier.push(Notification::warn(warning));
            }
            NavigationOutcome::Ignored => {}
        }
    }

    async fn handle_submit(&mut self) {
        if self.context.current_step() != Step::Review {
            self.notifier.push(Notification::warn(SUBMIT_TOO_EARLY));
            return;
        }

        let payload = self.context.payload();
        self.submitting = true;
        let result = self.client.register(&payload).await;
        self.submitting = false;

        match result {
            Ok(_) => {
                tracing::info!(email = %payload.email, "registration accepted");
                self.notifier.push(Notification::success(REGISTER_SUCCESS));
                self.navigation = Some(Route::Login);
                self.context = RegistrationContext::new();
            }
            Err(ApiError::Transport(error)) => {
                tracing::error!("Registration request failed: {}", error);
                self.notifier.push(Notification::error(CONNECTIVITY_ERROR));
            }
            Err(error) => {
                let message = error.server_message().unwrap_or(GENERIC_FAILURE).to_string();
                tracing::warn!("Registration rejected: {}", message);
                self.notifier.push(Notification::warn(message));
            }
        }
    }

    fn handle_reset(&mut self) {
        self.context = RegistrationContext::new();
        self.pending_actions.clear();
        self.navigation = None;
        tracing::info!("Registration state reset");
    }
}

fn ignore_edit(what: &str, step: Step) {
    tracing::warn!(?step, "Ignoring {} edit: not on that step", what);
}
