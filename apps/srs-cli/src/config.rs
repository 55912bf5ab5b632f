//! Environment configuration.
//!
//! Values come from the process environment after `.env` has been loaded.
//! Command-line flags take precedence over anything set here.

use anyhow::{anyhow, Context};
use srs_core::{Algorithm, GlobalSettings};

pub const ALGORITHM_VAR: &str = "SRS_ALGORITHM";
pub const PLAN_LIMIT_VAR: &str = "SRS_PLAN_LIMIT";

/// Global settings from the process environment.
pub fn settings_from_env() -> anyhow::Result<GlobalSettings> {
    settings_from_lookup(|key| std::env::var(key).ok())
}

/// Global settings from an arbitrary variable lookup. Unset variables keep
/// their defaults.
pub fn settings_from_lookup<F>(lookup: F) -> anyhow::Result<GlobalSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = GlobalSettings::default();

    if let Some(name) = lookup(ALGORITHM_VAR) {
        settings.algorithm = Algorithm::from_str(name.trim())
            .ok_or_else(|| anyhow!("{} has unknown algorithm {:?}", ALGORITHM_VAR, name))?;
    }

    if let Some(limit) = lookup(PLAN_LIMIT_VAR) {
        settings.plan_limit = limit
            .trim()
            .parse()
            .with_context(|| format!("{} must be a non-negative integer", PLAN_LIMIT_VAR))?;
    }

    settings.validate()?;
    Ok(settings)
}
