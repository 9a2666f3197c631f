//! Contact form: local validation, submit lifecycle and status banner.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, error, info};

use crate::dictionary::{t, Dictionary};
use crate::timer::{Timer, TimerId, TimerSlot};

pub const STATUS_DISMISS_MS: u64 = 5200;
pub const DEFAULT_FORM_NAME: &str = "contact";
pub const FORM_NAME_FIELD: &str = "form-name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Subject,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Subject, Field::Email, Field::Message];

    /// Form-data name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Subject => "subject",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn input_id(self) -> &'static str {
        match self {
            Field::Subject => "contactSubject",
            Field::Email => "contactEmail",
            Field::Message => "contactMessage",
        }
    }

    pub fn error_id(self) -> &'static str {
        match self {
            Field::Subject => "errSubject",
            Field::Email => "errEmail",
            Field::Message => "errMessage",
        }
    }

    fn error_message(self, dict: Option<&Dictionary>) -> String {
        match self {
            Field::Subject => t(dict, "contact.validation.subjectRequired", "El asunto es obligatorio."),
            Field::Email => t(dict, "contact.validation.emailInvalid", "Escribe un correo válido."),
            Field::Message => t(dict, "contact.validation.messageRequired", "El mensaje es obligatorio."),
        }
    }

    /// Whether `value` satisfies this field's rule.
    pub fn accepts(self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Field::Subject | Field::Message => !value.is_empty(),
            Field::Email => is_valid_email(value),
        }
    }
}

/// Optional field: empty passes. Deliberately permissive `local@domain.tld`.
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(value)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub subject: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Subject => &self.subject,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Subject => self.subject = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }
}

/// What goes over the wire: the form identifier plus every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub fields: Vec<(String, String)>,
}

impl Submission {
    pub fn new(form_name: &str, draft: &ContactDraft) -> Self {
        let mut fields = vec![(FORM_NAME_FIELD.to_string(), form_name.to_string())];
        fields.extend(
            Field::ALL
                .iter()
                .map(|f| (f.name().to_string(), draft.get(*f).to_string())),
        );
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The external form-submission endpoint.
#[async_trait(?Send)]
pub trait FormBackend {
    /// Any non-success status is an error; the body is not inspected.
    async fn submit(&self, submission: &Submission) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn class_name(self) -> &'static str {
        match self {
            StatusKind::Success => "form-status form-status--success",
            StatusKind::Error => "form-status form-status--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub kind: StatusKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    /// A submission is already in flight.
    InFlight,
    /// Validation failed; field errors are set.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finished {
    pub sent: bool,
    /// Auto-dismiss timer for the status banner.
    pub dismiss: Timer,
}

#[derive(Debug)]
pub struct ContactForm {
    form_name: String,
    sending: bool,
    errors: BTreeMap<Field, String>,
    status: Option<StatusBanner>,
    status_timer: TimerSlot,
    submit_label: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_NAME)
    }
}

impl ContactForm {
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            sending: false,
            errors: BTreeMap::new(),
            status: None,
            status_timer: TimerSlot::new(),
            submit_label: "Enviar".to_string(),
        }
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn status(&self) -> Option<&StatusBanner> {
        self.status.as_ref()
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// Check every rule, replacing all previous field errors.
    pub fn validate(&mut self, draft: &ContactDraft, dict: Option<&Dictionary>) -> bool {
        self.errors.clear();
        for field in Field::ALL {
            if !field.accepts(draft.get(field)) {
                self.errors.insert(field, field.error_message(dict));
            }
        }
        self.errors.is_empty()
    }

    pub fn on_blur(&mut self, field: Field, value: &str, dict: Option<&Dictionary>) {
        if !field.accepts(value) {
            self.errors.insert(field, field.error_message(dict));
        }
    }

    pub fn on_input(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn begin_submit(&mut self, draft: &ContactDraft, dict: Option<&Dictionary>) -> Result<Submission, Blocked> {
        if self.sending {
            debug!("contact.submit: already sending");
            return Err(Blocked::InFlight);
        }
        self.clear_status();
        if !self.validate(draft, dict) {
            debug!("contact.submit: blocked, {} invalid fields", self.errors.len());
            return Err(Blocked::Invalid);
        }

        self.sending = true;
        self.submit_label = t(dict, "contact.sending", "Enviando…");
        info!(
            "contact.submit: sending subject_len={} message_len={} has_email={}",
            draft.subject.len(),
            draft.message.len(),
            !draft.email.trim().is_empty()
        );
        Ok(Submission::new(&self.form_name, draft))
    }

    /// Record the backend's answer. On success the caller resets its fields.
    pub fn finish_submit(&mut self, result: anyhow::Result<()>, dict: Option<&Dictionary>) -> Finished {
        let sent = match result {
            Ok(()) => {
                info!("contact.submit: sent");
                self.errors.clear();
                true
            }
            Err(err) => {
                error!("contact.submit: failed: {err:#}");
                false
            }
        };

        let dismiss = if sent {
            self.show_status(
                StatusKind::Success,
                t(dict, "contact.successTitle", "Mensaje enviado"),
                t(dict, "contact.successMessage", "Gracias, te responderé pronto."),
            )
        } else {
            self.show_status(
                StatusKind::Error,
                t(dict, "contact.errorTitle", "No se pudo enviar"),
                t(dict, "contact.errorMessage", "Intenta de nuevo."),
            )
        };

        self.sending = false;
        self.restore_label(dict);
        Finished { sent, dismiss }
    }

    /// Idle forms pick up the new submit label; any banner is dropped so
    /// languages never mix.
    pub fn on_language_changed(&mut self, dict: Option<&Dictionary>) {
        if !self.sending {
            self.restore_label(dict);
        }
        self.clear_status();
    }

    /// Auto-dismiss; ignored if a newer banner replaced the one it was armed for.
    pub fn dismiss_status(&mut self, id: TimerId) {
        if self.status_timer.take(id) {
            self.status = None;
        }
    }

    pub fn clear_status(&mut self) {
        self.status_timer.cancel();
        self.status = None;
    }

    fn show_status(&mut self, kind: StatusKind, title: String, message: String) -> Timer {
        self.status = Some(StatusBanner { kind, title, message });
        self.status_timer.arm_ms(STATUS_DISMISS_MS)
    }

    fn restore_label(&mut self, dict: Option<&Dictionary>) {
        let label = t(dict, "contact.form.send", "");
        if !label.is_empty() {
            self.submit_label = label;
        }
    }
}
