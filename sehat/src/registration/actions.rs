use super::navigation::Step;
use super::state::{AccountType, BasicIdentity, SecondaryProfile};

#[derive(Debug, Clone)]
pub enum RegistrationAction {
    // Step 0
    SelectAccountType(AccountType),
    UpdateBasic { data: BasicIdentity },

    // Step 1
    UpdateSecondary { data: SecondaryProfile },
    ToggleDepartment { department: String },
    AddMedicalHistory { input: String },
    AddAvailableServices { input: String },

    // Navigation
    Advance,
    Retreat,
    GoToStep(Step),

    // Step 2
    Submit,

    ClearWarning,
    Reset,
}

impl RegistrationAction {
    pub fn description(&self) -> &'static str {
        match self {
            RegistrationAction::SelectAccountType(_) => "Selecting account type",
            RegistrationAction::UpdateBasic { .. } => "Updating basic details",
            RegistrationAction::UpdateSecondary { .. } => "Updating other details",
            RegistrationAction::ToggleDepartment { .. } => "Toggling department",
            RegistrationAction::AddMedicalHistory { .. } => "Adding medical history",
            RegistrationAction::AddAvailableServices { .. } => "Adding available services",
            RegistrationAction::Advance => "Advancing to next step",
            RegistrationAction::Retreat => "Going back to previous step",
            RegistrationAction::GoToStep(_) => "Jumping to step",
            RegistrationAction::Submit => "Submitting registration",
            RegistrationAction::ClearWarning => "Clearing warning",
            RegistrationAction::Reset => "Resetting registration",
        }
    }
}
