use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Copy shown on the landing and about pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub version: u32,
    #[serde(default = "default_site_name")]
    pub name: String,
    pub hero: HeroContent,
    pub about: AboutContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroContent {
    pub badge: String,
    pub title: String,
    pub highlight: String,
    pub tagline: String,
    #[serde(default)]
    pub stats: Vec<Stat>,
    /// Number of recipes shown under the hero
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutContent {
    pub badge: String,
    pub title: String,
    pub intro: String,
    #[serde(default)]
    pub steps: Vec<AboutStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutStep {
    pub icon: String,
    pub title: String,
    pub description: String,
}

fn default_site_name() -> String {
    "Green Spoon".to_string()
}

fn default_featured_count() -> usize {
    4
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            version: 1,
            name: default_site_name(),
            hero: HeroContent {
                badge: "Resep & Bahan Lokal • UMKM Petani".to_string(),
                title: "Dari Ladang Lokal".to_string(),
                highlight: "ke Dapur Keluarga".to_string(),
                tagline: "Koleksi resep praktis dan teruji dari petani lokal. Mudah diikuti, \
                          bahan dari pasar terdekat, mendukung UMKM & keberlanjutan."
                    .to_string(),
                stats: vec![
                    Stat {
                        label: "Resep".to_string(),
                        value: "50+".to_string(),
                    },
                    Stat {
                        label: "Petani".to_string(),
                        value: "20+".to_string(),
                    },
                    Stat {
                        label: "Bahan Lokal".to_string(),
                        value: "100%".to_string(),
                    },
                ],
                featured_count: default_featured_count(),
            },
            about: AboutContent {
                badge: "Proses Tradisional Petani Malang".to_string(),
                title: "Dari Ladang ke Meja Makan".to_string(),
                intro: "Green Spoon menjembatani warisan kuliner petani lokal dengan dapur \
                        modern. Berikut tiga langkah sederhana yang membuatnya istimewa."
                    .to_string(),
                steps: vec![
                    AboutStep {
                        icon: "🧺".to_string(),
                        title: "Pilih Hasil Panen Segar".to_string(),
                        description: "Sayuran dan bahan organik yang dipetik langsung dari \
                                      kebun petani Malang di pagi hari."
                            .to_string(),
                    },
                    AboutStep {
                        icon: "📜".to_string(),
                        title: "Ikuti Resep Warisan".to_string(),
                        description: "Resep turun-temurun dari petani Malang, sederhana \
                                      namun kaya rasa dan budaya."
                            .to_string(),
                    },
                    AboutStep {
                        icon: "🌾".to_string(),
                        title: "Dukung Petani Lokal".to_string(),
                        description: "Setiap masakan yang Anda buat ikut memperkuat ekonomi \
                                      petani dan melestarikan budaya lokal."
                            .to_string(),
                    },
                ],
            },
        }
    }
}

impl SiteConfig {
    /// Load site content from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read site config from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: SiteConfig = serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse site config from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load site content, falling back to the built-in copy on any error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(config) => {
                info!("Loaded site content from {}", path.as_ref().display());
                config
            }
            Err(e) => {
                warn!("{}", e.log_safe());
                warn!("Using built-in site content");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported site config version: {}. Expected version 1",
                self.version
            )));
        }

        if self.name.trim().is_empty() {
            return Err(Error::Config("Site name cannot be empty".to_string()));
        }

        if self.hero.title.trim().is_empty() {
            return Err(Error::Config("Hero title cannot be empty".to_string()));
        }

        for (index, step) in self.about.steps.iter().enumerate() {
            if step.title.trim().is_empty() {
                return Err(Error::Config(format!(
                    "About step #{} has an empty title",
                    index + 1
                )));
            }
        }

        Ok(())
    }
}
