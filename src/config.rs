use std::path::PathBuf;

/// Panel configuration
///
/// Names the storage slots and sets paging and capacity limits.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Storage slot holding the user list
    pub users_key: String,

    /// Storage slot holding the lead list
    pub leads_key: String,

    /// Rows per page in the user panel
    pub users_page_size: usize,

    /// Rows per page in the lead panel
    pub leads_page_size: usize,

    /// Maximum number of leads
    pub lead_limit: usize,

    /// Directory used by file-backed storage
    pub data_dir: PathBuf,
}

impl PanelConfig {
    pub const DEFAULT_USERS_KEY: &'static str = "nexoria_users_v1";
    pub const DEFAULT_LEADS_KEY: &'static str = "nexoria_leads_v1";
    pub const DEFAULT_LEAD_LIMIT: usize = 100;

    pub fn new() -> Self {
        Self {
            users_key: Self::DEFAULT_USERS_KEY.to_string(),
            leads_key: Self::DEFAULT_LEADS_KEY.to_string(),
            users_page_size: 10,
            leads_page_size: 10,
            lead_limit: Self::DEFAULT_LEAD_LIMIT,
            data_dir: PathBuf::from(".panelstore"),
        }
    }

    pub fn users_key(mut self, key: &str) -> Self {
        self.users_key = key.to_string();
        self
    }

    pub fn leads_key(mut self, key: &str) -> Self {
        self.leads_key = key.to_string();
        self
    }

    pub fn users_page_size(mut self, size: usize) -> Self {
        self.users_page_size = size;
        self
    }

    pub fn leads_page_size(mut self, size: usize) -> Self {
        self.leads_page_size = size;
        self
    }

    pub fn lead_limit(mut self, limit: usize) -> Self {
        self.lead_limit = limit;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.users_key.is_empty() || self.leads_key.is_empty() {
            return Err("Storage keys cannot be empty".to_string());
        }

        if self.users_key == self.leads_key {
            return Err("users_key and leads_key must differ".to_string());
        }

        if self.users_page_size == 0 || self.leads_page_size == 0 {
            return Err("page sizes must be > 0".to_string());
        }

        if self.lead_limit == 0 {
            return Err("lead_limit must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PanelConfig::default();
        assert_eq!(config.users_key, "nexoria_users_v1");
        assert_eq!(config.leads_key, "nexoria_leads_v1");
        assert_eq!(config.lead_limit, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = PanelConfig::new()
            .users_key("u")
            .leads_key("l")
            .leads_page_size(25)
            .lead_limit(5)
            .data_dir("/tmp/panels");

        assert_eq!(config.users_key, "u");
        assert_eq!(config.leads_page_size, 25);
        assert_eq!(config.lead_limit, 5);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/panels"));
    }

    #[test]
    fn test_validation() {
        assert!(PanelConfig::new().users_key("").validate().is_err());
        assert!(PanelConfig::new().leads_key("nexoria_users_v1").validate().is_err());
        assert!(PanelConfig::new().users_page_size(0).validate().is_err());
        assert!(PanelConfig::new().lead_limit(0).validate().is_err());
    }
}
