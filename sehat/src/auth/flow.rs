use super::client::AuthClient;
use super::form::{LoginErrors, LoginForm};
use super::token_store::{FileTokenStore, TokenStore};
use crate::config::SehatConfig;
use crate::http_client::{ApiClient, ApiError};
use crate::notify::{Notification, Notifier, Route, CONNECTIVITY_ERROR, GENERIC_FAILURE};

pub const LOGIN_SUCCESS: &str = "Login successful";

/// Login page state: the form, inline errors, and the outputs for the shell.
pub struct LoginFlow {
    form: LoginForm,
    errors: LoginErrors,
    client: AuthClient,
    store: Box<dyn TokenStore>,
    submitting: bool,
    notifier: Notifier,
    navigation: Option<Route>,
}

impl LoginFlow {
    pub fn new(client: AuthClient, store: Box<dyn TokenStore>) -> Self {
        Self {
            form: LoginForm::default(),
            errors: LoginErrors::new(),
            client,
            store,
            submitting: false,
            notifier: Notifier::default(),
            navigation: None,
        }
    }

    pub fn from_config(config: &SehatConfig) -> Self {
        Self::new(
            AuthClient::new(ApiClient::new(&config.api)),
            Box::new(FileTokenStore::new(&config.storage.token_path)),
        )
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn set_form(&mut self, form: LoginForm) {
        self.form = form;
        self.errors.clear();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
        self.errors.remove("email");
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        self.errors.remove("password");
    }

    pub fn errors(&self) -> &LoginErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }

    /// Validate, call the backend, and store the token on success.
    /// Returns whether the user is now logged in.
    pub async fn submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }

        let errors = self.form.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }

        self.submitting = true;
        let result = self.client.login(&self.form).await;
        self.submitting = false;

        match result {
            Ok(response) => self.accept(response.token),
            Err(ApiError::Transport(error)) => {
                tracing::error!("Login request failed: {}", error);
                self.notifier.push(Notification::error(CONNECTIVITY_ERROR));
                false
            }
            Err(error) if !error.field_errors().is_empty() => {
                self.errors = error
                    .field_errors()
                    .iter()
                    .map(|rejection| (rejection.field.clone(), rejection.message.clone()))
                    .collect();
                tracing::warn!(fields = self.errors.len(), "login rejected with field errors");
                false
            }
            Err(error) => {
                let message = error.server_message().unwrap_or(GENERIC_FAILURE).to_string();
                tracing::warn!("Login rejected: {}", message);
                self.notifier.push(Notification::warn(message));
                false
            }
        }
    }

    fn accept(&mut self, token: Option<String>) -> bool {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            tracing::warn!("login succeeded without a token");
            self.notifier.push(Notification::warn(GENERIC_FAILURE));
            return false;
        };

        if let Err(error) = self.store.save(&token) {
            tracing::error!("{}", error);
            self.notifier.push(Notification::error(GENERIC_FAILURE));
            return false;
        }

        self.errors.clear();
        self.form.password.clear();
        self.notifier.push(Notification::success(LOGIN_SUCCESS));
        self.navigation = Some(Route::Profile);
        true
    }
}
