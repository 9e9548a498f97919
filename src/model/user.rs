//! User schema for the admin panel.

use super::validate::{self, EMAIL_MESSAGE, USERNAME_MESSAGE};
use crate::core::ValidationErrors;
use crate::store::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_ROLE: &str = "role";

/// Admin panel account. `email` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub username: String,
    pub role: Role,
    pub status: UserStatus,
}

impl User {
    pub fn new(email: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            role,
            status: UserStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

impl Record for User {
    type Status = UserStatus;
    const EMPTY_MESSAGE: &'static str = "No users match this filter.";

    fn key(&self) -> &str {
        &self.email
    }

    fn status(&self) -> UserStatus {
        self.status
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.username, self.email, self.role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::User];

    /// Parse role from a select value
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|role| role.to_string().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Editor => write!(f, "Editor"),
            Role::User => write!(f, "User"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Pending,
}

impl UserStatus {
    pub const ALL: [UserStatus; 2] = [UserStatus::Active, UserStatus::Pending];

    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Pending,
            UserStatus::Pending => UserStatus::Active,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|status| status.to_string().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "Active"),
            UserStatus::Pending => write!(f, "Pending"),
        }
    }
}

/// Raw values of the add-user form.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub email: String,
    pub username: String,
    pub role: String,
}

impl UserForm {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            role: role.into(),
        }
    }

    /// Validate every field and build a pending user from the trimmed input.
    pub fn validate(&self) -> Result<User, ValidationErrors> {
        let email = self.email.trim();
        let mut errors = ValidationErrors::new();

        if !validate::is_valid_email(email) {
            errors.push(FIELD_EMAIL, EMAIL_MESSAGE);
        }
        let edit = UserEdit::new(self.username.clone(), self.role.clone());
        let fields = edit.check(&mut errors);

        errors.into_result()?;
        match fields {
            Some((username, role)) => Ok(User::new(email, username, role)),
            None => Err(ValidationErrors::single(FIELD_ROLE, "Select a role.")),
        }
    }
}

/// Raw values of the edit-user form; the email key is not editable.
#[derive(Debug, Clone, Default)]
pub struct UserEdit {
    pub username: String,
    pub role: String,
}

impl UserEdit {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }

    pub fn validate(&self) -> Result<(String, Role), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.check(&mut errors);
        errors.into_result()?;
        fields.ok_or_else(|| ValidationErrors::single(FIELD_ROLE, "Select a role."))
    }

    fn check(&self, errors: &mut ValidationErrors) -> Option<(String, Role)> {
        let username = self.username.trim();
        if !validate::is_valid_username(username) {
            errors.push(FIELD_USERNAME, USERNAME_MESSAGE);
        }
        let role = Role::parse(&self.role);
        if role.is_none() {
            errors.push(FIELD_ROLE, "Select a role.");
        }
        role.map(|role| (username.to_string(), role))
    }
}

/// Accounts installed on first open.
pub fn seed_users() -> Vec<User> {
    vec![
        User::new("admin@nexoria.com", "admin", Role::Admin).with_status(UserStatus::Active),
        User::new("user@nexoria.com", "user01", Role::User),
    ]
}
