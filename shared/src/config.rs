use std::collections::BTreeSet;
use std::env;

use crate::errors::{Result, ServiceError};

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub admin_ids: BTreeSet<u64>,
    pub metrics_port: u16,
    pub health_port: u16,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("BOT_TOKEN")
            .or_else(|| lookup("TELOXIDE_TOKEN"))
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ServiceError::Config("BOT_TOKEN not set".to_string()))?;

        let admin_ids = parse_admin_ids(
            &lookup("ADMIN_IDS")
                .ok_or_else(|| ServiceError::Config("ADMIN_IDS not set".to_string()))?,
        )?;

        Ok(Self {
            token,
            admin_ids,
            metrics_port: parse_port(&lookup, "METRICS_PORT", 9091)?,
            health_port: parse_port(&lookup, "HEALTH_PORT", 8080)?,
        })
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

/// Admin ids double as private chat ids, so each must fit in an `i64`.
pub fn parse_admin_ids(raw: &str) -> Result<BTreeSet<u64>> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let id = s
                .parse::<u64>()
                .map_err(|e| ServiceError::Config(format!("Invalid admin id '{}': {}", s, e)))?;
            if id > i64::MAX as u64 {
                return Err(ServiceError::Config(format!(
                    "Invalid admin id '{}': out of range for a chat id",
                    s
                )));
            }
            Ok(id)
        })
        .collect::<Result<BTreeSet<u64>>>()?;

    if ids.is_empty() {
        return Err(ServiceError::Config(
            "ADMIN_IDS must contain at least one id".to_string(),
        ));
    }

    Ok(ids)
}

fn parse_port<F>(lookup: &F, key: &str, default: u16) -> Result<u16>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ServiceError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
