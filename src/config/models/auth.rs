//! Authentication configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. Required, startup fails when empty.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime, e.g. `"24h"`, `"30m"`, `"7d"` or plain seconds
    #[serde(default = "default_jwt_expires_in")]
    pub jwt_expires_in: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expires_in: default_jwt_expires_in(),
        }
    }
}

impl AuthConfig {
    /// Parsed token lifetime
    pub fn token_lifetime(&self) -> Result<Duration, String> {
        parse_lifetime(&self.jwt_expires_in)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.trim().is_empty() {
            return Err("JWT_SECRET must be set".to_string());
        }

        let lifetime = self.token_lifetime()?;
        if lifetime.is_zero() {
            return Err("Token lifetime must be greater than zero".to_string());
        }

        Ok(())
    }
}

fn default_jwt_expires_in() -> String {
    "24h".to_string()
}

/// Parse a lifetime string: `<n>` seconds, or `<n>` followed by `s`, `m`, `h`, `d` or `w`.
pub fn parse_lifetime(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("Invalid token lifetime: {:?}", value))?;

    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 60 * 60 * 24,
        "w" => 60 * 60 * 24 * 7,
        other => return Err(format!("Unknown token lifetime unit: {:?}", other)),
    };

    amount
        .checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("Token lifetime out of range: {:?}", value))
}
