//! Lead schema for the lead tracker panel.

use super::validate::{self, EMAIL_MESSAGE, WEBSITE_MESSAGE};
use crate::core::ValidationErrors;
use crate::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const FIELD_COMPANY: &str = "companyName";
pub const FIELD_CONTACT: &str = "contactName";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_WEBSITE: &str = "website";
pub const FIELD_INDUSTRY: &str = "industry";
pub const FIELD_NOTES: &str = "notes";

const MAX_COMPANY: usize = 100;
const MAX_CONTACT: usize = 80;
const MAX_INDUSTRY: usize = 60;
const MAX_NOTES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub notes: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Build a new lead from validated fields with a fresh id.
    pub fn from_fields(fields: LeadFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            company_name: fields.company_name,
            contact_name: fields.contact_name,
            email: fields.email,
            website: fields.website,
            industry: fields.industry,
            notes: fields.notes,
            status: LeadStatus::New,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields, keeping id, status and creation time.
    pub fn apply(&mut self, fields: LeadFields) {
        self.company_name = fields.company_name;
        self.contact_name = fields.contact_name;
        self.email = fields.email;
        self.website = fields.website;
        self.industry = fields.industry;
        self.notes = fields.notes;
        self.updated_at = Utc::now();
    }

    pub fn advance_status(&mut self) {
        self.status = self.status.next();
        self.updated_at = Utc::now();
    }
}

impl Record for Lead {
    type Status = LeadStatus;
    const EMPTY_MESSAGE: &'static str = "No leads match your filters.";

    fn key(&self) -> &str {
        &self.id
    }

    fn status(&self) -> LeadStatus {
        self.status
    }

    fn search_text(&self) -> String {
        [
            self.company_name.as_str(),
            self.contact_name.as_str(),
            self.email.as_str(),
            self.website.as_str(),
            self.industry.as_str(),
            self.notes.as_str(),
        ]
        .join(" ")
    }
}

/// Pipeline stage of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Closed,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Closed,
    ];

    /// Next stage; `Closed` wraps back to `New`.
    pub fn next(self) -> Self {
        match self {
            LeadStatus::New => LeadStatus::Contacted,
            LeadStatus::Contacted => LeadStatus::Qualified,
            LeadStatus::Qualified => LeadStatus::Closed,
            LeadStatus::Closed => LeadStatus::New,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|status| status.to_string().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::New => write!(f, "New"),
            LeadStatus::Contacted => write!(f, "Contacted"),
            LeadStatus::Qualified => write!(f, "Qualified"),
            LeadStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// Validated, normalized lead fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadFields {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub website: String,
    pub industry: String,
    pub notes: String,
}

/// Raw values of the lead create/edit form.
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub website: String,
    pub industry: String,
    pub notes: String,
}

impl LeadForm {
    pub fn new(
        company_name: impl Into<String>,
        contact_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            contact_name: contact_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Prefill an edit form from an existing lead.
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            company_name: lead.company_name.clone(),
            contact_name: lead.contact_name.clone(),
            email: lead.email.clone(),
            website: lead.website.clone(),
            industry: lead.industry.clone(),
            notes: lead.notes.clone(),
        }
    }

    pub fn validate(&self) -> Result<LeadFields, ValidationErrors> {
        let company_name = self.company_name.trim();
        let contact_name = self.contact_name.trim();
        let email = self.email.trim();
        let industry = self.industry.trim();
        let notes = self.notes.trim();
        let mut errors = ValidationErrors::new();

        if let Some(msg) = validate::check_required(company_name, "Company name", MAX_COMPANY) {
            errors.push(FIELD_COMPANY, msg);
        }
        if let Some(msg) = validate::check_required(contact_name, "Contact name", MAX_CONTACT) {
            errors.push(FIELD_CONTACT, msg);
        }
        if !validate::is_valid_email(email) {
            errors.push(FIELD_EMAIL, EMAIL_MESSAGE);
        }
        let website = validate::normalize_website(&self.website);
        if website.is_none() {
            errors.push(FIELD_WEBSITE, WEBSITE_MESSAGE);
        }
        if let Some(msg) = validate::check_max(industry, "Industry", MAX_INDUSTRY) {
            errors.push(FIELD_INDUSTRY, msg);
        }
        if let Some(msg) = validate::check_max(notes, "Notes", MAX_NOTES) {
            errors.push(FIELD_NOTES, msg);
        }

        errors.into_result()?;
        Ok(LeadFields {
            company_name: company_name.to_string(),
            contact_name: contact_name.to_string(),
            email: email.to_string(),
            website: website.unwrap_or_default(),
            industry: industry.to_string(),
            notes: notes.to_string(),
        })
    }
}
