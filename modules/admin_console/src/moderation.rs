//! Moderation Flow: `Idle -> Confirming -> Submitting -> Idle`, plus the
//! `Editing` side branch. A single tagged selection slot is shared by both.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, instrument, warn};
use users_admin::contract::{StatusChange, User, UsersAdminApi};
use uuid::Uuid;

use crate::error::{with_timeout, ConsoleError};
use crate::present::{ConfirmPrompt, ModerationAction};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Editing(User),
    ConfirmingBlock(User),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationPhase {
    Idle,
    Editing,
    Confirming,
    Submitting,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ModerationError {
    #[error("another user is already selected")]
    Busy,
    #[error("no confirmation is pending")]
    NotConfirming,
    #[error("no user is being edited")]
    NotEditing,
}

/// Mutation to issue once the admin confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub user_id: Uuid,
    pub username: String,
    pub active: bool,
}

/// Toast shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }
}

#[derive(Debug, Default)]
pub struct ModerationFlow {
    selection: Selection,
    in_flight: bool,
    notice: Option<Notice>,
}

impl ModerationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ModerationPhase {
        match (&self.selection, self.in_flight) {
            (Selection::ConfirmingBlock(_), true) => ModerationPhase::Submitting,
            (Selection::ConfirmingBlock(_), false) => ModerationPhase::Confirming,
            (Selection::Editing(_), _) => ModerationPhase::Editing,
            (Selection::None, _) => ModerationPhase::Idle,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Row controls are enabled only while idle.
    pub fn controls_enabled(&self) -> bool {
        self.phase() == ModerationPhase::Idle
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Open the confirm dialog for blocking or unblocking `user`.
    pub fn request_toggle(&mut self, user: User) -> Result<ConfirmPrompt, ModerationError> {
        if !self.controls_enabled() {
            return Err(ModerationError::Busy);
        }
        let prompt = ConfirmPrompt::for_user(&user);
        self.selection = Selection::ConfirmingBlock(user);
        Ok(prompt)
    }

    /// Close the dialog without touching the store.
    pub fn cancel(&mut self) -> Result<(), ModerationError> {
        match self.phase() {
            ModerationPhase::Confirming => {
                self.selection = Selection::None;
                Ok(())
            }
            ModerationPhase::Submitting => Err(ModerationError::Busy),
            _ => Err(ModerationError::NotConfirming),
        }
    }

    /// Explicit confirmation: `Confirming -> Submitting`.
    pub fn begin_submit(&mut self) -> Result<PendingToggle, ModerationError> {
        match (&self.selection, self.in_flight) {
            (Selection::ConfirmingBlock(user), false) => {
                let pending = PendingToggle {
                    user_id: user.id,
                    username: user.username.clone(),
                    active: ModerationAction::for_user(user).target_active(),
                };
                self.in_flight = true;
                Ok(pending)
            }
            (Selection::ConfirmingBlock(_), true) => Err(ModerationError::Busy),
            _ => Err(ModerationError::NotConfirming),
        }
    }

    /// `Submitting -> Idle`; the selection is cleared either way.
    pub fn complete(&mut self, result: Result<StatusChange, ConsoleError>) -> Notice {
        self.selection = Selection::None;
        self.in_flight = false;

        let notice = match result {
            Ok(change) if change.success => Notice::Success(change.message),
            Ok(change) => Notice::Error(change.message),
            Err(e) => Notice::Error(e.to_string()),
        };
        self.notice = Some(notice.clone());
        notice
    }

    /// Confirm and submit in one go.
    #[instrument(name = "admin_console.moderation.confirm", skip_all)]
    pub async fn confirm(
        &mut self,
        api: &dyn UsersAdminApi,
        timeout: Duration,
    ) -> Result<Notice, ModerationError> {
        let pending = self.begin_submit()?;
        let result = with_timeout(timeout, api.set_user_active(pending.user_id, pending.active)).await;

        match &result {
            Ok(change) => info!(
                user_id = %pending.user_id,
                active = pending.active,
                changed = change.changed,
                "moderation applied"
            ),
            Err(e) => warn!(user_id = %pending.user_id, error = %e, "moderation failed"),
        }
        Ok(self.complete(result))
    }

    pub fn begin_edit(&mut self, user: User) -> Result<(), ModerationError> {
        if !self.controls_enabled() {
            return Err(ModerationError::Busy);
        }
        self.selection = Selection::Editing(user);
        Ok(())
    }

    /// User under edit, if the edit modal is open.
    pub fn editing(&self) -> Option<&User> {
        match &self.selection {
            Selection::Editing(u) => Some(u),
            _ => None,
        }
    }

    pub fn finish_edit(&mut self) -> Result<User, ModerationError> {
        match std::mem::take(&mut self.selection) {
            Selection::Editing(u) => Ok(u),
            other => {
                self.selection = other;
                Err(ModerationError::NotEditing)
            }
        }
    }
}
