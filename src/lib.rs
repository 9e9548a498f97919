// ============================================================================
// panelstore Library
// ============================================================================

pub mod config;
pub mod core;
pub mod model;
pub mod panel;
pub mod storage;
pub mod store;
pub mod view;

pub use config::PanelConfig;
pub use crate::core::{FieldError, PanelError, PanelResult, Result, StoreError, ValidationErrors};
pub use model::{Lead, LeadForm, LeadStatus, Role, User, UserEdit, UserForm, UserStatus};
pub use panel::{LeadPanel, LeadStats, Panel, UserPanel, UserStats};
pub use storage::{FileStorage, InMemoryStorage, StorageArea, StorageBackend};
pub use store::{Record, RecordStore, Subscription};
pub use view::{StatusFilter, ViewPage, ViewQuery};

use std::sync::Arc;

// ============================================================================
// High-level Dashboard API
// ============================================================================

/// Both panels opened over one storage area
///
/// This is the entry point a host calls on load.
///
/// # Examples
///
/// ```
/// use panelstore::{Dashboard, PanelConfig, UserForm};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut dashboard = Dashboard::in_memory(PanelConfig::default())?;
///
/// dashboard.users.add_user(&UserForm::new("jane@nexoria.com", "jane", "User"))?;
///
/// let page = dashboard.users.render();
/// println!("{} of {} users shown", page.items.len(), page.total_count);
/// # Ok(())
/// # }
/// ```
pub struct Dashboard {
    pub users: UserPanel,
    pub leads: LeadPanel,
    area: Arc<StorageArea>,
    config: PanelConfig,
}

impl Dashboard {
    /// Open both panels over `area`
    ///
    /// Seeds the default accounts when the user slot is empty.
    pub fn with_area(area: Arc<StorageArea>, config: PanelConfig) -> PanelResult<Self> {
        config.validate().map_err(PanelError::Config)?;
        let users = UserPanel::open(Arc::clone(&area), &config)?;
        let leads = LeadPanel::open(Arc::clone(&area), &config);
        Ok(Self {
            users,
            leads,
            area,
            config,
        })
    }

    /// Open both panels over a fresh in-memory area
    pub fn in_memory(config: PanelConfig) -> PanelResult<Self> {
        Self::with_area(StorageArea::in_memory(), config)
    }

    /// Open both panels over files in `config.data_dir`
    ///
    /// # Examples
    ///
    /// ```
    /// # use panelstore::{Dashboard, PanelConfig};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let dir = tempfile::tempdir()?;
    /// let _dashboard = Dashboard::open_dir(PanelConfig::new().data_dir(dir.path()))?;
    /// assert!(dir.path().join("nexoria_users_v1.json").exists());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open_dir(config: PanelConfig) -> PanelResult<Self> {
        let area = StorageArea::open_dir(&config.data_dir)?;
        Self::with_area(area, config)
    }

    pub fn area(&self) -> &Arc<StorageArea> {
        &self.area
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }
}
