//! Registration form state machine.
//!
//! Mirrors what the web form tracks (field values, field errors, the task
//! checklist and the submission status) as plain data driven by explicit
//! transitions, so the flow can be exercised without a UI.

use crate::client::RegistrationClient;
use crate::error::ClientError;
use allowlist_core::{
    validate_handle, validate_wallet_address, ErrorKind, Field, FieldError, SubmitRequest, Task,
    TaskCompletion,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Message shown when a submission fails for a reason the user cannot fix.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit form. Please try again.";

/// State of a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    Incomplete,
    Complete,
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// A request is outstanding; the submit control is disabled
    Submitting,
    Succeeded(String),
    Failed(String),
}

/// Progress steps shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    TwitterTasks,
    JoinDiscord,
    SubmitDetails,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::TwitterTasks, Step::JoinDiscord, Step::SubmitDetails];

    pub fn label(&self) -> &'static str {
        match self {
            Step::TwitterTasks => "Complete Twitter Tasks",
            Step::JoinDiscord => "Join Discord",
            Step::SubmitDetails => "Submit Details",
        }
    }
}

/// Why a submission could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Complete every task before submitting")]
    TasksIncomplete,

    #[error(transparent)]
    Invalid(#[from] FieldError),

    #[error("A submission is already in progress")]
    AlreadySubmitting,
}

/// Client-side registration form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    wallet_address: String,
    twitter_username: String,
    errors: BTreeMap<Field, String>,
    checklist: BTreeMap<Task, TaskState>,
    status: SubmissionStatus,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet_address(&self) -> &str {
        &self.wallet_address
    }

    pub fn twitter_username(&self) -> &str {
        &self.twitter_username
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::WalletAddress => &self.wallet_address,
            Field::SocialHandle => &self.twitter_username,
        }
    }

    /// Error currently shown under `field`.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Update a field and re-validate it.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let result = validate_field(field, &value);

        match field {
            Field::WalletAddress => self.wallet_address = value,
            Field::SocialHandle => self.twitter_username = value,
        }

        match result {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(kind) => {
                self.errors.insert(field, kind.message(field));
            }
        }
    }

    pub fn set_wallet_address(&mut self, value: impl Into<String>) {
        self.set_field(Field::WalletAddress, value);
    }

    pub fn set_twitter_username(&mut self, value: impl Into<String>) {
        self.set_field(Field::SocialHandle, value);
    }

    pub fn task_state(&self, task: Task) -> TaskState {
        self.checklist.get(&task).copied().unwrap_or_default()
    }

    /// Activate a checklist item.
    ///
    /// An incomplete item becomes complete and the link the user should be
    /// sent to is returned. The user's word is taken for it; nothing is
    /// checked against the platform. Activating a complete item unchecks it.
    pub fn activate_task(&mut self, task: Task) -> Option<&'static str> {
        match self.task_state(task) {
            TaskState::Incomplete => {
                self.checklist.insert(task, TaskState::Complete);
                debug!(%task, "Task marked complete");
                Some(task.link())
            }
            TaskState::Complete => {
                self.checklist.insert(task, TaskState::Incomplete);
                debug!(%task, "Task unchecked");
                None
            }
        }
    }

    pub fn all_tasks_complete(&self) -> bool {
        Task::ALL
            .iter()
            .all(|&task| self.task_state(task) == TaskState::Complete)
    }

    /// Checklist as reported to the server.
    pub fn requirements(&self) -> TaskCompletion {
        Task::ALL
            .iter()
            .map(|&task| {
                let done = self.task_state(task) == TaskState::Complete;
                (task.key().to_string(), done.into())
            })
            .collect()
    }

    pub fn step_complete(&self, step: Step) -> bool {
        match step {
            Step::TwitterTasks => Task::ALL
                .iter()
                .filter(|task| task.is_twitter())
                .all(|&task| self.task_state(task) == TaskState::Complete),
            Step::JoinDiscord => self.task_state(Task::Discord) == TaskState::Complete,
            Step::SubmitDetails => matches!(self.status, SubmissionStatus::Succeeded(_)),
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
            && self.all_tasks_complete()
            && validate_field(Field::WalletAddress, &self.wallet_address).is_ok()
            && validate_field(Field::SocialHandle, &self.twitter_username).is_ok()
    }

    /// Start a submission, producing the request body to send.
    ///
    /// On success the form is `Submitting` until [`finish_submit`] is called.
    ///
    /// [`finish_submit`]: FormState::finish_submit
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, FormError> {
        if self.is_submitting() {
            return Err(FormError::AlreadySubmitting);
        }
        if !self.all_tasks_complete() {
            return Err(FormError::TasksIncomplete);
        }

        let mut first_error = None;
        for field in [Field::WalletAddress, Field::SocialHandle] {
            if let Err(kind) = validate_field(field, self.value(field)) {
                self.errors.insert(field, kind.message(field));
                first_error.get_or_insert(FieldError::new(field, kind));
            }
        }
        if let Some(err) = first_error {
            return Err(err.into());
        }

        self.status = SubmissionStatus::Submitting;

        Ok(SubmitRequest {
            wallet_address: self.wallet_address.clone(),
            twitter_username: self.twitter_username.clone(),
            requirements: Some(self.requirements()),
        })
    }

    /// Apply the outcome of the outstanding submission.
    ///
    /// Success resets every field and checklist item. A rejection is shown
    /// under the field it names; anything else gets a generic message. The
    /// submit control is re-enabled either way. Outcomes that arrive while
    /// no submission is outstanding are ignored.
    pub fn finish_submit(&mut self, outcome: Result<String, ClientError>) {
        if !self.is_submitting() {
            warn!("Ignoring submission outcome with no submission in progress");
            return;
        }

        match outcome {
            Ok(message) => {
                info!("Submission accepted");
                self.wallet_address.clear();
                self.twitter_username.clear();
                self.errors.clear();
                self.checklist.clear();
                self.status = SubmissionStatus::Succeeded(message);
            }
            Err(ClientError::Rejected { message, field }) => {
                warn!(?field, %message, "Submission rejected");
                if let Some(field) = field {
                    self.errors.insert(field, message.clone());
                }
                self.status = SubmissionStatus::Failed(message);
            }
            Err(e) => {
                warn!(error = %e, "Submission failed");
                self.status = SubmissionStatus::Failed(GENERIC_FAILURE_MESSAGE.to_string());
            }
        }
    }

    /// Run a full submission against the API.
    pub async fn submit(&mut self, client: &RegistrationClient) -> Result<(), FormError> {
        let request = self.begin_submit()?;
        let outcome = client.submit(&request).await;
        self.finish_submit(outcome);
        Ok(())
    }
}

fn validate_field(field: Field, value: &str) -> Result<(), ErrorKind> {
    match field {
        Field::WalletAddress => validate_wallet_address(value),
        Field::SocialHandle => validate_handle(value),
    }
}
