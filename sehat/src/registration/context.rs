//! The wizard's context object: both records, the navigation state and the
//! transient warning. Views reach the records only through [`ActiveStep`].

use chrono::NaiveDate;

use super::navigation::{NavigationOutcome, Step, WizardState};
use super::review::ReviewSheet;
use super::state::{AccountType, BasicIdentity, Gender, RegistrationPayload, SecondaryProfile};
use super::validation::{missing_secondary_fields, step_gate, FieldErrors};

#[derive(Debug, Clone, Default)]
pub struct RegistrationContext {
    basic: BasicIdentity,
    secondary: SecondaryProfile,
    wizard: WizardState,
    warning: Option<String>,
    field_errors: FieldErrors,
}

impl RegistrationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn basic(&self) -> &BasicIdentity {
        &self.basic
    }

    pub fn secondary(&self) -> &SecondaryProfile {
        &self.secondary
    }

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn current_step(&self) -> Step {
        self.wizard.current()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn clear_warning(&mut self) {
        self.warning = None;
    }

    pub fn go_to(&mut self, target: Step) -> NavigationOutcome {
        let basic = &self.basic;
        let secondary = &self.secondary;
        let outcome = self
            .wizard
            .request(target, |step| step_gate(step, basic, secondary));
        self.absorb(&outcome);
        outcome
    }

    pub fn advance(&mut self) -> NavigationOutcome {
        match self.wizard.current().next() {
            Some(next) => self.go_to(next),
            None => NavigationOutcome::Ignored,
        }
    }

    pub fn retreat(&mut self) -> NavigationOutcome {
        let outcome = self.wizard.retreat();
        self.absorb(&outcome);
        outcome
    }

    /// Commit a running transition.
    pub fn settle(&mut self) -> Option<Step> {
        self.wizard.commit()
    }

    fn absorb(&mut self, outcome: &NavigationOutcome) {
        match outcome {
            NavigationOutcome::Started { .. } => {
                self.warning = None;
                self.field_errors.clear();
            }
            NavigationOutcome::Blocked { warning, errors, .. } => {
                self.warning = Some(warning.clone());
                self.field_errors = errors.clone();
            }
            NavigationOutcome::Ignored => {}
        }
    }

    pub fn payload(&self) -> RegistrationPayload {
        RegistrationPayload::merge(&self.basic, &self.secondary)
    }

    pub fn review(&self) -> ReviewSheet {
        ReviewSheet::build(&self.basic, &self.secondary)
    }

    /// Edit access for whichever step is on screen.
    pub fn active(&mut self) -> ActiveStep<'_> {
        match self.wizard.current() {
            Step::Basic => ActiveStep::Basic(BasicStep {
                basic: &mut self.basic,
                errors: &mut self.field_errors,
            }),
            Step::Secondary => ActiveStep::Secondary(SecondaryStep {
                account_type: self.basic.account_type,
                profile: &mut self.secondary,
                errors: &mut self.field_errors,
            }),
            Step::Review => ActiveStep::Review(ReviewStep {
                basic: &self.basic,
                secondary: &self.secondary,
            }),
        }
    }
}

pub enum ActiveStep<'a> {
    Basic(BasicStep<'a>),
    Secondary(SecondaryStep<'a>),
    Review(ReviewStep<'a>),
}

impl ActiveStep<'_> {
    pub fn step(&self) -> Step {
        match self {
            ActiveStep::Basic(_) => Step::Basic,
            ActiveStep::Secondary(_) => Step::Secondary,
            ActiveStep::Review(_) => Step::Review,
        }
    }
}

/// Step 0 view. Editing a field clears its inline error.
pub struct BasicStep<'a> {
    basic: &'a mut BasicIdentity,
    errors: &'a mut FieldErrors,
}

impl BasicStep<'_> {
    pub fn identity(&self) -> &BasicIdentity {
        self.basic
    }

    pub fn errors(&self) -> &FieldErrors {
        self.errors
    }

    pub fn set_account_type(&mut self, account_type: AccountType) {
        self.basic.account_type = account_type;
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.basic.first_name = value.into();
        self.errors.remove("name");
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.basic.last_name = if value.is_empty() { None } else { Some(value) };
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.basic.phone = value.into();
        self.errors.remove("phone");
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.basic.email = value.into();
        self.errors.remove("email");
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.basic.password = value.into();
        self.errors.remove("password");
    }

    pub fn set_password_confirmation(&mut self, value: impl Into<String>) {
        self.basic.password_confirmation = value.into();
        self.errors.remove("confirmPassword");
    }

    pub fn replace(&mut self, data: BasicIdentity) {
        *self.basic = data;
        self.errors.clear();
    }
}

/// Step 1 view. Conditional fields follow the account type chosen on step 0.
pub struct SecondaryStep<'a> {
    account_type: AccountType,
    profile: &'a mut SecondaryProfile,
    errors: &'a mut FieldErrors,
}

impl SecondaryStep<'_> {
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn profile(&self) -> &SecondaryProfile {
        self.profile
    }

    pub fn errors(&self) -> &FieldErrors {
        self.errors
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_secondary_fields(self.profile, self.account_type)
    }

    pub fn set_street(&mut self, value: impl Into<String>) {
        self.profile.address.street = value.into();
        self.errors.remove("street");
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.profile.address.city = value.into();
        self.errors.remove("city");
    }

    pub fn set_state(&mut self, value: impl Into<String>) {
        self.profile.address.state = value.into();
        self.errors.remove("state");
    }

    pub fn set_postal_code(&mut self, value: impl Into<String>) {
        self.profile.address.postal_code = value.into();
        self.errors.remove("postalCode");
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.profile.gender = Some(gender);
        self.errors.remove("gender");
    }

    pub fn set_date_of_birth(&mut self, dob: NaiveDate) {
        self.profile.date_of_birth = Some(dob);
        self.errors.remove("dob");
    }

    pub fn set_website(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.profile.website_url = if url.trim().is_empty() { None } else { Some(url) };
    }

    pub fn toggle_department(&mut self, department: &str) -> bool {
        self.errors.remove("department");
        self.profile.toggle_department(department)
    }

    pub fn add_medical_history(&mut self, input: &str) {
        self.profile.append_medical_history(input);
    }

    pub fn add_available_services(&mut self, input: &str) {
        self.profile.append_available_services(input);
        if !self.profile.available_services.is_empty() {
            self.errors.remove("availableServices");
        }
    }

    pub fn replace(&mut self, data: SecondaryProfile) {
        *self.profile = data;
        self.errors.clear();
    }
}

/// Step 2 view; read-only.
pub struct ReviewStep<'a> {
    basic: &'a BasicIdentity,
    secondary: &'a SecondaryProfile,
}

impl ReviewStep<'_> {
    pub fn sheet(&self) -> ReviewSheet {
        ReviewSheet::build(self.basic, self.secondary)
    }

    pub fn payload(&self) -> RegistrationPayload {
        RegistrationPayload::merge(self.basic, self.secondary)
    }
}
