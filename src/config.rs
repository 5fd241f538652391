use chrono::FixedOffset;
use std::env;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Vendor API
    pub vendor_base_url: String,
    pub vendor_device_id: String,
    pub vendor_auth_token: String,
    pub vendor_timeout_seconds: u64,
    /// Offset the vendor's wall-clock timestamps are expressed in.
    /// The vendor stamps them with a `Z` suffix although they are not UTC.
    pub vendor_utc_offset: FixedOffset,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Locale
    pub default_locale: String,

    // Rate limiting
    pub disable_rate_limiting: bool,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every knob has a deployment default; the device ID and credential
    /// default to the values the deployment wrapper ships with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `VENDOR_UTC_OFFSET` is set but
    /// cannot be parsed as a `±HH:MM` offset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let offset_raw =
            env::var("VENDOR_UTC_OFFSET").unwrap_or_else(|_| "+01:00".to_string());
        let vendor_utc_offset = parse_utc_offset(&offset_raw)
            .ok_or(ConfigError::Invalid("VENDOR_UTC_OFFSET"))?;

        Ok(Self {
            // Vendor API
            vendor_base_url: env::var("VENDOR_BASE_URL")
                .unwrap_or_else(|_| "https://api.chytrejsiobec.cz".to_string()),
            vendor_device_id: env::var("VENDOR_DEVICE_ID").unwrap_or_else(|_| {
                "SCC.IOT.CZ00256552OWN-6D6F555331FFFF58".to_string()
            }),
            vendor_auth_token: env::var("VENDOR_AUTH_TOKEN")
                .unwrap_or_else(|_| "dobrany.chytrejsimesto.cz".to_string()),
            vendor_timeout_seconds: env::var("VENDOR_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            vendor_utc_offset,

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Locale
            default_locale: env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),

            // Rate limiting
            disable_rate_limiting: env::var("DISABLE_RATE_LIMITING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            rate_limit_per_second: env::var("RATE_LIMIT_PER_SECOND")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            rate_limit_burst: env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Parse a `±HH:MM` offset string into a `FixedOffset`.
fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1i32, &s[1..]),
        b'-' => (-1i32, &s[1..]),
        _ => (1i32, s),
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::parse_utc_offset;
    use chrono::FixedOffset;

    #[test]
    fn parses_signed_offsets() {
        assert_eq!(parse_utc_offset("+01:00"), FixedOffset::east_opt(3600));
        assert_eq!(parse_utc_offset("-05:30"), FixedOffset::west_opt(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset("02:00"), FixedOffset::east_opt(7200));
    }

    #[test]
    fn rejects_garbage_offsets() {
        assert_eq!(parse_utc_offset(""), None);
        assert_eq!(parse_utc_offset("+25:00"), None);
        assert_eq!(parse_utc_offset("+01:99"), None);
        assert_eq!(parse_utc_offset("UTC"), None);
    }
}
