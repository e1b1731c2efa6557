//! YAML persistence of the user-facing dashboard state.
//!
//! Only the parameter snapshot and run selection are saved; sample data is
//! never persisted.

use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineParams;

/// Serializable subset of the dashboard's user state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStateSerde {
    pub params: PipelineParams,
    pub selected_runs: Vec<String>,
    pub running: bool,
}

impl Default for DashboardStateSerde {
    fn default() -> Self {
        Self {
            params: PipelineParams::default(),
            selected_runs: Vec::new(),
            running: true,
        }
    }
}

impl DashboardStateSerde {
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn from_yaml(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let yaml = self
            .to_yaml()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, yaml)
    }

    pub fn load_from_file(path: &std::path::Path) -> std::io::Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
