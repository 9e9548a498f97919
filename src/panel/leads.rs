use super::Panel;
use crate::config::PanelConfig;
use crate::core::{PanelError, PanelResult};
use crate::model::{Lead, LeadForm, LeadStatus};
use crate::storage::StorageArea;
use crate::store::Record;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lead tracker panel.
pub type LeadPanel = Panel<Lead>;

impl Panel<Lead> {
    /// Open the lead panel with the configured capacity. Leads are not seeded.
    pub fn open(area: Arc<StorageArea>, config: &PanelConfig) -> Self {
        Self::build(
            area,
            &config.leads_key,
            config.leads_page_size,
            Some(config.lead_limit),
        )
    }

    /// Validate the lead form and prepend a new lead with status `New`.
    pub fn add_lead(&mut self, form: &LeadForm) -> PanelResult<Lead> {
        self.sync();
        let fields = form.validate()?;

        if let Some(limit) = self.limit {
            if self.len() >= limit {
                warn!(limit, "lead limit reached; create rejected");
                return Err(PanelError::CapacityReached { limit });
            }
        }

        let mut lead = Lead::from_fields(fields);
        while self.find(lead.key()).is_some() {
            lead.id = uuid::Uuid::new_v4().to_string();
        }

        let created = lead.clone();
        self.store.mutate(|leads| leads.insert(0, lead))?;
        debug!(id = %created.id, "lead added");
        Ok(created)
    }

    /// Overwrite the editable fields of lead `id`, keeping its position.
    pub fn update_lead(&mut self, id: &str, form: &LeadForm) -> PanelResult<Option<Lead>> {
        self.sync();
        if self.find(id).is_none() {
            return Ok(None);
        }
        let fields = form.validate()?;
        self.modify(id, |lead| {
            lead.apply(fields);
            lead.clone()
        })
    }

    /// Move lead `id` to the next pipeline stage; returns the new status.
    pub fn advance_status(&mut self, id: &str) -> PanelResult<Option<LeadStatus>> {
        self.modify(id, |lead| {
            lead.advance_status();
            lead.status
        })
    }

    pub fn delete_lead(&mut self, id: &str) -> PanelResult<bool> {
        self.delete(id)
    }

    /// Remaining capacity before creates are rejected.
    pub fn remaining(&self) -> usize {
        self.limit
            .map(|limit| limit.saturating_sub(self.len()))
            .unwrap_or(usize::MAX)
    }

    pub fn stats(&self) -> LeadStats {
        let mut stats = LeadStats::default();
        for lead in self.records() {
            stats.total += 1;
            match lead.status {
                LeadStatus::New => stats.new += 1,
                LeadStatus::Contacted => stats.contacted += 1,
                LeadStatus::Qualified => stats.qualified += 1,
                LeadStatus::Closed => stats.closed += 1,
            }
        }
        stats
    }
}

/// Statistics about leads
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LeadStats {
    pub total: usize,
    pub new: usize,
    pub contacted: usize,
    pub qualified: usize,
    pub closed: usize,
}

impl fmt::Display for LeadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | New: {} | Contacted: {} | Qualified: {} | Closed: {}",
            self.total, self.new, self.contacted, self.qualified, self.closed
        )
    }
}
