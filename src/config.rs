use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Clone, Debug)]
#[clap(name = "nearby-places-backend", about = "Natural-language place search API")]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env = "BIND_HOST", long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[clap(env, long, default_value_t = 3001)]
    pub port: u16,

    /// Comma separated list of allowed CORS origins, or `*`.
    #[clap(env, long, default_value = "http://localhost:5173")]
    pub origin_urls: String,

    #[clap(env, long, value_enum, default_value_t = PlaceBackendKind::Mapbox)]
    pub place_backend: PlaceBackendKind,

    #[clap(env = "MAPBOX_ACCESS_TOKEN", long)]
    pub mapbox_access_token: Option<String>,

    #[clap(env = "GOOGLE_PLACES_API_KEY", long)]
    pub google_places_api_key: Option<String>,

    #[clap(env, long, default_value = "https://api.mapbox.com")]
    pub mapbox_base_url: String,

    #[clap(env, long, default_value = "https://maps.googleapis.com")]
    pub google_places_base_url: String,

    #[clap(env, long, default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    /// Where the settings endpoint persists the places-API key.
    #[clap(env, long, default_value = "settings.json")]
    pub settings_path: PathBuf,

    #[clap(env, long, default_value = "info")]
    pub log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceBackendKind {
    Mapbox,
    Google,
}

impl PlaceBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceBackendKind::Mapbox => "mapbox",
            PlaceBackendKind::Google => "google",
        }
    }
}

impl fmt::Display for PlaceBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Config {
    /// Credential configured through flags/env for the active backend.
    pub fn backend_credential(&self) -> Option<&str> {
        match self.place_backend {
            PlaceBackendKind::Mapbox => self.mapbox_access_token.as_deref(),
            PlaceBackendKind::Google => self.google_places_api_key.as_deref(),
        }
    }

    pub fn backend_base_url(&self) -> &str {
        match self.place_backend {
            PlaceBackendKind::Mapbox => &self.mapbox_base_url,
            PlaceBackendKind::Google => &self.google_places_base_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_over_defaults() {
        let config = Config::parse_from([
            "nearby-places-backend",
            "--place-backend",
            "google",
            "--google-places-api-key",
            "key-1",
            "--port",
            "8080",
        ]);

        assert_eq!(config.place_backend, PlaceBackendKind::Google);
        assert_eq!(config.backend_credential(), Some("key-1"));
        assert_eq!(config.backend_base_url(), "https://maps.googleapis.com");
        assert_eq!(config.port, 8080);
    }
}
