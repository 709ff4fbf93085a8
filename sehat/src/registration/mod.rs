//! Multi-step registration wizard: basic details, other details, review and submit.

pub mod actions;
pub mod client;
pub mod context;
pub mod manager;
pub mod navigation;
pub mod review;
pub mod state;
pub mod validation;


pub use actions::RegistrationAction;
pub use client::{RegisterResponse, RegistrationClient};
pub use context::{ActiveStep, BasicStep, RegistrationContext, ReviewStep, SecondaryStep};
pub use manager::{RegistrationManager, SubmitControl, REGISTER_SUCCESS};
pub use navigation::{NavigationOutcome, Step, StepStatus, TransitionPhase, WizardState};
pub use review::{ReviewEntry, ReviewSheet};
pub use state::{
    Address, AccountType, BasicIdentity, Gender, RegistrationPayload, SecondaryProfile,
    DEPARTMENTS,
};
pub use validation::{FieldErrors, StepRejection};
