//! Login form state machine.
//!
//! `Idle -> Submitting -> {Success, InvalidCredentials, MissingFields}`; any
//! resolved state drops back to `Idle` on the next field edit or submission.
//! Inputs are compared exactly as entered, whitespace included.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::auth::credentials::CredentialTable;

pub const MSG_MISSING_FIELDS: &str = "Por favor, completa todos los campos";
pub const MSG_INVALID_CREDENTIALS: &str = "Credenciales inválidas";
pub const LABEL_IDLE: &str = "Iniciar Sesión";
pub const LABEL_SUBMITTING: &str = "Iniciando sesión...";
pub const MSG_TRANSPORT_ERROR: &str = "No se pudo contactar con el servidor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    Submitting,
    Success { display_name: String },
    InvalidCredentials,
    MissingFields,
}

/// Settled result of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum LoginVerdict {
    Success { display_name: String },
    InvalidCredentials,
    MissingFields,
}

impl LoginVerdict {
    pub fn message(&self) -> String {
        match self {
            LoginVerdict::Success { display_name } => welcome_message(display_name),
            LoginVerdict::InvalidCredentials => MSG_INVALID_CREDENTIALS.to_string(),
            LoginVerdict::MissingFields => MSG_MISSING_FIELDS.to_string(),
        }
    }
}

impl From<LoginVerdict> for LoginState {
    fn from(verdict: LoginVerdict) -> Self {
        match verdict {
            LoginVerdict::Success { display_name } => LoginState::Success { display_name },
            LoginVerdict::InvalidCredentials => LoginState::InvalidCredentials,
            LoginVerdict::MissingFields => LoginState::MissingFields,
        }
    }
}

/// Outcome of the current attempt as seen from outside, `Pending` until it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Pending,
    Settled(LoginVerdict),
}

pub fn welcome_message(display_name: &str) -> String {
    format!("¡Bienvenido, {display_name}!")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

/// What the submit button looks like in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

pub struct LoginForm<'a> {
    table: &'a CredentialTable,
    username: String,
    password: String,
    state: LoginState,
}

impl<'a> LoginForm<'a> {
    pub fn new(table: &'a CredentialTable) -> Self {
        Self {
            table,
            username: String::new(),
            password: String::new(),
            state: LoginState::Idle,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
        self.reset_if_resolved();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.reset_if_resolved();
    }

    /// First half of a submission: local validation, then lock the control.
    ///
    /// Ignored while a submission is already in flight.
    pub fn begin_submit(&mut self) -> &LoginState {
        if self.state == LoginState::Submitting {
            return &self.state;
        }
        self.state = if self.username.is_empty() || self.password.is_empty() {
            LoginState::MissingFields
        } else {
            LoginState::Submitting
        };
        &self.state
    }

    /// Second half: check the credential table and settle the attempt.
    pub fn resolve(&mut self) -> &LoginState {
        if self.state == LoginState::Submitting {
            self.settle();
        }
        &self.state
    }

    pub fn submit(&mut self) -> LoginVerdict {
        if *self.begin_submit() == LoginState::MissingFields {
            return LoginVerdict::MissingFields;
        }
        self.settle()
    }

    pub fn outcome(&self) -> LoginOutcome {
        let verdict = match &self.state {
            LoginState::Idle | LoginState::Submitting => return LoginOutcome::Pending,
            LoginState::Success { display_name } => LoginVerdict::Success {
                display_name: display_name.clone(),
            },
            LoginState::InvalidCredentials => LoginVerdict::InvalidCredentials,
            LoginState::MissingFields => LoginVerdict::MissingFields,
        };
        LoginOutcome::Settled(verdict)
    }

    pub fn control(&self) -> SubmitControl {
        match self.state {
            LoginState::Submitting => SubmitControl {
                enabled: false,
                label: LABEL_SUBMITTING,
            },
            // the view is navigating away, keep the button locked
            LoginState::Success { .. } => SubmitControl {
                enabled: false,
                label: LABEL_SUBMITTING,
            },
            _ => SubmitControl {
                enabled: true,
                label: LABEL_IDLE,
            },
        }
    }

    pub fn message(&self) -> Option<Message> {
        let LoginOutcome::Settled(verdict) = self.outcome() else {
            return None;
        };
        let kind = match verdict {
            LoginVerdict::Success { .. } => MessageKind::Success,
            _ => MessageKind::Error,
        };
        Some(Message {
            text: verdict.message(),
            kind,
        })
    }

    /// Where the caller should navigate after this state, if anywhere.
    pub fn redirect(&self) -> Option<&'static str> {
        matches!(self.state, LoginState::Success { .. }).then_some("/")
    }

    fn settle(&mut self) -> LoginVerdict {
        let verdict = match self.table.lookup(&self.username) {
            Some(c) if c.password == self.password => {
                info!(username = %self.username, "login succeeded");
                LoginVerdict::Success {
                    display_name: c.display_name.to_string(),
                }
            }
            Some(_) => {
                warn!(username = %self.username, "login invalid password");
                LoginVerdict::InvalidCredentials
            }
            None => {
                warn!(username = %self.username, "login unknown user");
                LoginVerdict::InvalidCredentials
            }
        };
        self.state = verdict.clone().into();
        verdict
    }

    fn reset_if_resolved(&mut self) {
        if self.state != LoginState::Submitting && self.state != LoginState::Idle {
            debug!(from = ?self.state, "login form reset");
            self.state = LoginState::Idle;
        }
    }
}

/// One-shot evaluation of a username/password pair.
pub fn attempt(table: &CredentialTable, username: &str, password: &str) -> LoginVerdict {
    let mut form = LoginForm::new(table);
    form.set_username(username);
    form.set_password(password);
    form.submit()
}
