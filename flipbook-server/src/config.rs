//! Server configuration from environment variables

use anyhow::{Context, Result};
use flipbook_core::LayoutOptions;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which browser origins may call the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `FLIPBOOK_CORS_ORIGINS=*`
    Any,
    /// Comma-separated list of origins
    List(Vec<String>),
    /// Unset: local development servers only
    LocalDev,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Root directory for blobs and book lists (`FLIPBOOK_DATA_DIR`)
    pub data_dir: PathBuf,

    /// Listen address (`FLIPBOOK_BIND_ADDR`)
    pub bind_addr: SocketAddr,

    pub cors_origins: CorsOrigins,

    /// Request body cap for uploads (`FLIPBOOK_MAX_UPLOAD_BYTES`)
    pub max_upload_bytes: usize,

    /// Front and back matter (`FLIPBOOK_COVER`, `FLIPBOOK_TOC_ENTRIES_PER_PAGE`)
    pub layout: LayoutOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./flipbook_data"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: CorsOrigins::LocalDev,
            max_upload_bytes: 50 * 1024 * 1024,
            layout: LayoutOptions::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup("FLIPBOOK_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = lookup("FLIPBOOK_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("FLIPBOOK_BIND_ADDR is not a socket address: {addr}"))?;
        }
        if let Some(origins) = lookup("FLIPBOOK_CORS_ORIGINS") {
            config.cors_origins = if origins.trim() == "*" {
                CorsOrigins::Any
            } else {
                CorsOrigins::List(
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                )
            };
        }
        if let Some(limit) = lookup("FLIPBOOK_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = limit
                .parse()
                .with_context(|| format!("FLIPBOOK_MAX_UPLOAD_BYTES is not a number: {limit}"))?;
        }
        if let Some(per_page) = lookup("FLIPBOOK_TOC_ENTRIES_PER_PAGE") {
            let per_page: usize = per_page
                .parse()
                .with_context(|| format!("FLIPBOOK_TOC_ENTRIES_PER_PAGE is not a number: {per_page}"))?;
            if per_page == 0 {
                anyhow::bail!("FLIPBOOK_TOC_ENTRIES_PER_PAGE must be at least 1");
            }
            config.layout.toc_entries_per_page = per_page;
        }
        if let Some(cover) = lookup("FLIPBOOK_COVER") {
            config.layout.cover = matches!(cover.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.cors_origins, CorsOrigins::LocalDev);
        assert_eq!(config.layout, LayoutOptions::default());
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("FLIPBOOK_DATA_DIR", "/tmp/books"),
            ("FLIPBOOK_BIND_ADDR", "0.0.0.0:8080"),
            ("FLIPBOOK_CORS_ORIGINS", "https://a.test, https://b.test"),
            ("FLIPBOOK_TOC_ENTRIES_PER_PAGE", "4"),
            ("FLIPBOOK_COVER", "true"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/books"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec!["https://a.test".into(), "https://b.test".into()])
        );
        assert_eq!(config.layout.toc_entries_per_page, 4);
        assert!(config.layout.cover);
    }

    #[test]
    fn test_invalid_values() {
        assert!(ServerConfig::from_lookup(lookup(&[("FLIPBOOK_BIND_ADDR", "nope")])).is_err());
        assert!(
            ServerConfig::from_lookup(lookup(&[("FLIPBOOK_TOC_ENTRIES_PER_PAGE", "0")])).is_err()
        );
    }
}
