use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub geocoder: GeocoderSettings,
    pub routing: RoutingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

const ENV_PREFIX: &str = "TRUCKROUTE";

fn defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("geocoder.base_url", "https://nominatim.openstreetmap.org")?
        .set_default("geocoder.user_agent", "TruckRoute-Pro/1.0")?
        .set_default("geocoder.timeout_secs", 10)?
        .set_default("routing.base_url", "https://router.project-osrm.org")?
        .set_default("routing.timeout_secs", 15)?)
}

/// Defaults, then `config/app.*` if present, then `TRUCKROUTE__SECTION__KEY` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = defaults()?
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_from_toml(toml: &str) -> anyhow::Result<AppConfig> {
        let settings = defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    #[test]
    fn test_defaults() {
        let config = load_from_toml("").unwrap();
        assert_eq!(config.server.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.geocoder.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.geocoder.user_agent, "TruckRoute-Pro/1.0");
        assert_eq!(config.geocoder.timeout_secs, 10);
        assert_eq!(config.routing.base_url, "https://router.project-osrm.org");
        assert_eq!(config.routing.timeout_secs, 15);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = load_from_toml(
            r#"
            [server]
            port = 9090

            [routing]
            base_url = "http://localhost:5000"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.routing.base_url, "http://localhost:5000");
        assert_eq!(config.routing.timeout_secs, 15);
    }

    #[test]
    fn test_bad_host_is_an_error() {
        let config = load_from_toml("[server]\nhost = \"not an address\"").unwrap();
        assert!(config.server.socket_addr().is_err());
    }
}
