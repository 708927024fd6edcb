use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub database_url: String,
    pub gallery_poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/camlink.db".into(),
            // Reference cadence for store-backed views: one second of
            // worst-case staleness.
            gallery_poll_interval_ms: 1000,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("camlink.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
            if let Some(v) = file_cfg.get("gallery_poll_interval_ms") {
                if let Ok(parsed) = v.parse::<u64>() {
                    settings.gallery_poll_interval_ms = parsed;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("CAMLINK__DATABASE_URL") {
        settings.database_url = v;
    }
    if let Ok(v) = std::env::var("CAMLINK__GALLERY_POLL_INTERVAL_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.gallery_poll_interval_ms = parsed;
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_database() {
        let settings = Settings::default();
        assert_eq!(settings.database_url, "sqlite://./data/camlink.db");
        assert_eq!(settings.gallery_poll_interval_ms, 1000);
    }

    #[test]
    fn file_values_parse_into_settings() {
        let raw = "database_url = \"sqlite://./elsewhere.db\"\ngallery_poll_interval_ms = \"250\"\n";
        let file_cfg: HashMap<String, String> = toml::from_str(raw).expect("toml");
        assert_eq!(file_cfg.get("database_url").map(String::as_str), Some("sqlite://./elsewhere.db"));
        assert_eq!(file_cfg.get("gallery_poll_interval_ms").map(String::as_str), Some("250"));
    }
}
