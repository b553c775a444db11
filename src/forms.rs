//! Contact and newsletter form state.
//!
//! Both forms validate locally, then hand a [`Submission`] to a [`SubmissionHandler`].
//! The handler answers asynchronously over a channel which the form drains in
//! `poll`, once per frame.

use crate::constants;
use crate::types::{FieldKind, FormFieldDef};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;
use uuid::Uuid;

/// Validation and delivery failures shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("{0} is required")]
    MissingField(String),
    #[error("Submission failed: {0}")]
    Rejected(String),
}

/// Loose email check: no whitespace, something before an `@`, and a dot with
/// at least one character on each side somewhere after it.
pub fn is_valid_email(input: &str) -> bool {
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return false;
    }
    input.match_indices('@').any(|(at, _)| {
        if at == 0 {
            return false;
        }
        let domain = &input[at + 1..];
        domain
            .match_indices('.')
            .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
    })
}

/// Which form produced a submission.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Contact,
    Newsletter,
}

/// Validated form values ready to be delivered.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub kind: SubmissionKind,
    pub fields: BTreeMap<String, String>,
}

impl Submission {
    pub fn new(kind: SubmissionKind, fields: BTreeMap<String, String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            fields,
        }
    }
}

/// Answer of a [`SubmissionHandler`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted { id: Uuid },
    Rejected { id: Uuid, reason: String },
}

impl SubmissionOutcome {
    fn id(&self) -> Uuid {
        match self {
            SubmissionOutcome::Accepted { id } | SubmissionOutcome::Rejected { id, .. } => *id,
        }
    }
}

/// Delivers submissions somewhere and reports back on `reply`.
///
/// Implementations must not block the caller; the form stays in its submitting
/// state until the outcome arrives.
pub trait SubmissionHandler {
    fn submit(&self, submission: Submission, reply: Sender<SubmissionOutcome>);
}

/// Default handler: waits a short while, logs the submission and accepts it.
#[derive(Debug, Clone)]
pub struct LoggingSubmissionHandler {
    pub delay: Duration,
}

impl Default for LoggingSubmissionHandler {
    fn default() -> Self {
        Self {
            delay: constants::SUBMISSION_DELAY,
        }
    }
}

fn deliver(submission: Submission, reply: Sender<SubmissionOutcome>) {
    match serde_json::to_string(&submission) {
        Ok(json) => log::info!("Form submitted: {}", json),
        Err(e) => log::warn!("Form submitted but could not be serialized: {}", e),
    }
    let _ = reply.send(SubmissionOutcome::Accepted { id: submission.id });
}

impl SubmissionHandler for LoggingSubmissionHandler {
    fn submit(&self, submission: Submission, reply: Sender<SubmissionOutcome>) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            match tokio::runtime::Handle::try_current() {
                Ok(runtime) => {
                    let delay = self.delay;
                    runtime.spawn(async move {
                        tokio::time::sleep(delay).await;
                        deliver(submission, reply);
                    });
                }
                Err(_) => {
                    log::warn!("No async runtime available, delivering submission immediately");
                    deliver(submission, reply);
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                deliver(submission, reply);
            });
        }
    }
}

/// Channel plumbing shared by both forms.
struct Outbox {
    sender: Sender<SubmissionOutcome>,
    receiver: Receiver<SubmissionOutcome>,
    pending: Option<Uuid>,
}

impl Outbox {
    fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            pending: None,
        }
    }

    fn send(&mut self, submission: Submission, handler: &dyn SubmissionHandler) {
        self.pending = Some(submission.id);
        handler.submit(submission, self.sender.clone());
    }

    /// Returns the outcome of the pending submission once it arrived.
    ///
    /// Outcomes of superseded submissions are dropped.
    fn poll(&mut self) -> Option<SubmissionOutcome> {
        while let Ok(outcome) = self.receiver.try_recv() {
            if self.pending == Some(outcome.id()) {
                self.pending = None;
                return Some(outcome);
            }
        }
        None
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Footer newsletter signup.
pub struct NewsletterForm {
    pub email: String,
    error: Option<FormError>,
    subscribed: bool,
    outbox: Outbox,
}

impl Default for NewsletterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsletterForm {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            error: None,
            subscribed: false,
            outbox: Outbox::new(),
        }
    }

    /// Must be called whenever the user changed [`email`](Self::email); clears the error.
    pub fn edited(&mut self) {
        self.error = None;
    }

    /// Validates the address and hands it to `handler`.
    ///
    /// On an invalid address the error is stored and returned and nothing is sent.
    pub fn submit(&mut self, handler: &dyn SubmissionHandler) -> Result<(), FormError> {
        if self.outbox.is_pending() {
            return Ok(());
        }
        if !is_valid_email(&self.email) {
            self.error = Some(FormError::InvalidEmail);
            return Err(FormError::InvalidEmail);
        }
        self.error = None;
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), self.email.trim().to_string());
        self.outbox
            .send(Submission::new(SubmissionKind::Newsletter, fields), handler);
        Ok(())
    }

    /// Applies a delivered outcome, if any.
    pub fn poll(&mut self) {
        match self.outbox.poll() {
            Some(SubmissionOutcome::Accepted { .. }) => {
                self.subscribed = true;
                self.email.clear();
            }
            Some(SubmissionOutcome::Rejected { reason, .. }) => {
                self.error = Some(FormError::Rejected(reason));
            }
            None => {}
        }
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn is_submitting(&self) -> bool {
        self.outbox.is_pending()
    }
}

/// Contact form built from the content's field definitions.
pub struct ContactForm {
    fields: Vec<FormFieldDef>,
    values: BTreeMap<String, String>,
    errors: BTreeMap<String, FormError>,
    submit_error: Option<FormError>,
    succeeded: bool,
    outbox: Outbox,
}

impl ContactForm {
    pub fn new(fields: Vec<FormFieldDef>) -> Self {
        let values = fields
            .iter()
            .map(|field| (field.id.clone(), String::new()))
            .collect();
        Self {
            fields,
            values,
            errors: BTreeMap::new(),
            submit_error: None,
            succeeded: false,
            outbox: Outbox::new(),
        }
    }

    pub fn fields(&self) -> &[FormFieldDef] {
        &self.fields
    }

    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    /// Editable buffer of one field. Call [`edited`](Self::edited) after changing it.
    pub fn value_mut(&mut self, id: &str) -> &mut String {
        self.values.entry(id.to_string()).or_default()
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        *self.value_mut(id) = value.into();
        self.edited(id);
    }

    /// Clears the field's error and any previous success message.
    pub fn edited(&mut self, id: &str) {
        self.errors.remove(id);
        self.submit_error = None;
        self.succeeded = false;
    }

    pub fn field_error(&self, id: &str) -> Option<&FormError> {
        self.errors.get(id)
    }

    pub fn submit_error(&self) -> Option<&FormError> {
        self.submit_error.as_ref()
    }

    /// Checks required fields and email fields; returns the error of every failing field.
    pub fn validate(&self) -> BTreeMap<String, FormError> {
        let mut errors = BTreeMap::new();
        for field in &self.fields {
            let value = self.value(&field.id).trim();
            if value.is_empty() {
                if field.required {
                    errors.insert(field.id.clone(), FormError::MissingField(field.label.clone()));
                }
                continue;
            }
            if field.kind == FieldKind::Email && !is_valid_email(value) {
                errors.insert(field.id.clone(), FormError::InvalidEmail);
            }
        }
        errors
    }

    /// Validates and, when every field passes, sends the values to `handler`.
    ///
    /// Ignored while a previous submission is still in flight.
    ///
    /// # Returns
    ///
    /// The first field error when validation fails.
    pub fn submit(&mut self, handler: &dyn SubmissionHandler) -> Result<(), FormError> {
        if self.outbox.is_pending() {
            return Ok(());
        }
        self.errors = self.validate();
        if let Some(first) = self.errors.values().next() {
            return Err(first.clone());
        }
        self.submit_error = None;
        self.succeeded = false;
        let fields = self
            .values
            .iter()
            .map(|(id, value)| (id.clone(), value.trim().to_string()))
            .collect();
        self.outbox
            .send(Submission::new(SubmissionKind::Contact, fields), handler);
        Ok(())
    }

    /// Applies a delivered outcome; on success every value is cleared.
    pub fn poll(&mut self) {
        match self.outbox.poll() {
            Some(SubmissionOutcome::Accepted { .. }) => {
                self.values.values_mut().for_each(String::clear);
                self.succeeded = true;
            }
            Some(SubmissionOutcome::Rejected { reason, .. }) => {
                self.submit_error = Some(FormError::Rejected(reason));
            }
            None => {}
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.outbox.is_pending()
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }
}
