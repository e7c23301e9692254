//! Propagation environment excess loss

use crate::{LinkBudgetError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Propagation environment around the CPE sites
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Environment {
    #[default]
    Rural,
    Suburban,
    Urban,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Rural, Environment::Suburban, Environment::Urban];

    /// Excess loss on top of free space (dB)
    pub fn excess_loss_db(&self) -> f64 {
        match self {
            Environment::Rural => 0.0,
            Environment::Suburban => 8.0,
            Environment::Urban => 15.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Environment::Rural => "Rural",
            Environment::Suburban => "Suburban",
            Environment::Urban => "Urban",
        }
    }
}

/// Look up the excess loss for an environment key
pub fn excess_loss(key: &str) -> Result<f64> {
    key.parse::<Environment>().map(|env| env.excess_loss_db())
}

impl FromStr for Environment {
    type Err = LinkBudgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rural" => Ok(Environment::Rural),
            "suburban" => Ok(Environment::Suburban),
            "urban" => Ok(Environment::Urban),
            _ => Err(LinkBudgetError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = LinkBudgetError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.name().to_string()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
