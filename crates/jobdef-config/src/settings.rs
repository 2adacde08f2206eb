//! Runtime settings parsing.

use crate::{ConfigError, ConfigResult};
use jobdef_core::RetryPolicy;
use kdl::{KdlDocument, KdlNode};
use std::time::Duration;

/// Settings for the code that feeds the resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Backoff schedule for configuration storage calls.
    pub storage_retry: RetryPolicy,
}

/// Parse settings from KDL text.
///
/// ```kdl
/// storage {
///     retry max-attempts=5 initial-delay-ms=500 max-delay-ms=8000 multiplier=2
/// }
/// ```
pub fn parse_settings(kdl: &str) -> ConfigResult<Settings> {
    let doc: KdlDocument = kdl.parse()?;
    let mut settings = Settings::default();

    for node in doc.nodes() {
        if node.name().value() == "storage" {
            if let Some(children) = node.children() {
                for child in children.nodes() {
                    if child.name().value() == "retry" {
                        settings.storage_retry = parse_retry(child)?;
                    }
                }
            }
        }
    }

    Ok(settings)
}

fn parse_retry(node: &KdlNode) -> ConfigResult<RetryPolicy> {
    let mut policy = RetryPolicy::default();

    if let Some(attempts) = get_u64_prop(node, "max-attempts")? {
        policy.max_attempts = to_u32("max-attempts", attempts)?;
    }
    if let Some(ms) = get_u64_prop(node, "initial-delay-ms")? {
        policy.initial_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = get_u64_prop(node, "max-delay-ms")? {
        policy.max_delay = Duration::from_millis(ms);
    }
    if let Some(multiplier) = get_u64_prop(node, "multiplier")? {
        policy.multiplier = to_u32("multiplier", multiplier)?;
    }

    if policy.max_attempts == 0 {
        return Err(ConfigError::invalid("max-attempts", "must be at least 1"));
    }
    if policy.multiplier == 0 {
        return Err(ConfigError::invalid("multiplier", "must be at least 1"));
    }

    Ok(policy)
}

fn get_u64_prop(node: &KdlNode, name: &str) -> ConfigResult<Option<u64>> {
    let Some(value) = node.get(name) else {
        return Ok(None);
    };
    let number = value
        .as_integer()
        .ok_or_else(|| ConfigError::invalid(name, "expected an integer"))?;
    u64::try_from(number)
        .map(Some)
        .map_err(|_| ConfigError::invalid(name, format!("out of range: {number}")))
}

fn to_u32(name: &str, value: u64) -> ConfigResult<u32> {
    u32::try_from(value).map_err(|_| ConfigError::invalid(name, format!("out of range: {value}")))
}
