use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where gallery images come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PhotoSource {
    #[default]
    Remote,
    Local,
}

/// How the map frames each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MapStrategy {
    /// Recentre on the day's own points.
    #[default]
    Continuous,
    /// Use the fixed view of the day's region tag.
    RegionScoped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// The three axes along which the viewer can vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    pub photo_source: PhotoSource,
    pub map_strategy: MapStrategy,
    pub theme: Theme,
}

impl FromStr for PhotoSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(PhotoSource::Remote),
            "local" => Ok(PhotoSource::Local),
            other => bail!("unknown photo source '{}' (expected remote|local)", other),
        }
    }
}

impl FromStr for MapStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continuous" => Ok(MapStrategy::Continuous),
            "region-scoped" | "region_scoped" | "regions" => Ok(MapStrategy::RegionScoped),
            other => bail!(
                "unknown map strategy '{}' (expected continuous|region-scoped)",
                other
            ),
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => bail!("unknown theme '{}' (expected light|dark)", other),
        }
    }
}

impl fmt::Display for PhotoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PhotoSource::Remote => "remote",
            PhotoSource::Local => "local",
        })
    }
}

impl fmt::Display for MapStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MapStrategy::Continuous => "continuous",
            MapStrategy::RegionScoped => "region-scoped",
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}
