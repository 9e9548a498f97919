use super::Panel;
use crate::config::PanelConfig;
use crate::core::{PanelError, PanelResult, ValidationErrors};
use crate::model::user::{FIELD_EMAIL, seed_users};
use crate::model::{User, UserEdit, UserForm, UserStatus};
use crate::storage::StorageArea;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// User manager panel.
pub type UserPanel = Panel<User>;

impl Panel<User> {
    /// Open the user panel, seeding the default accounts into an empty slot.
    pub fn open(area: Arc<StorageArea>, config: &PanelConfig) -> PanelResult<Self> {
        let mut panel = Self::build(area, &config.users_key, config.users_page_size, None);
        panel.seed(&seed_users())?;
        Ok(panel)
    }

    /// Open without seeding, e.g. for a second view over existing data.
    pub fn open_existing(area: Arc<StorageArea>, config: &PanelConfig) -> Self {
        Self::build(area, &config.users_key, config.users_page_size, None)
    }

    /// Validate the add-user form and prepend a pending user.
    pub fn add_user(&mut self, form: &UserForm) -> PanelResult<User> {
        self.sync();
        let user = form.validate()?;

        if self.find(&user.email).is_some() {
            return Err(PanelError::Validation(ValidationErrors::single(
                FIELD_EMAIL,
                "Email already exists.",
            )));
        }

        let created = user.clone();
        self.store.mutate(|users| users.insert(0, user))?;
        debug!(email = %created.email, "user added");
        Ok(created)
    }

    /// Replace username and role of `email` in place.
    pub fn update_user(&mut self, email: &str, edit: &UserEdit) -> PanelResult<Option<User>> {
        self.sync();
        if self.find(email).is_none() {
            return Ok(None);
        }
        let (username, role) = edit.validate()?;
        self.modify(email, |user| {
            user.username = username;
            user.role = role;
            user.clone()
        })
    }

    /// Flip Active <-> Pending; returns the new status.
    pub fn toggle_status(&mut self, email: &str) -> PanelResult<Option<UserStatus>> {
        self.modify(email, |user| {
            user.toggle_status();
            user.status
        })
    }

    pub fn remove_user(&mut self, email: &str) -> PanelResult<bool> {
        self.delete(email)
    }

    pub fn stats(&self) -> UserStats {
        let mut stats = UserStats::default();
        for user in self.records() {
            stats.total += 1;
            match user.status {
                UserStatus::Active => stats.active += 1,
                UserStatus::Pending => stats.pending += 1,
            }
        }
        stats
    }
}

/// Statistics about users
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Active: {} | Pending: {}",
            self.total, self.active, self.pending
        )
    }
}
