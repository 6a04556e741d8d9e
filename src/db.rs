//! YAML dataset format.
//!
//! A dataset file is a single mapping holding the version and one list per
//! record kind. Pattern records carry their expression in the Perl-style
//! `/body/flags` form used by the UAS data files; entities refer to patterns,
//! types and each other by id only.
//!
//! ```yaml
//! version: "20120822-01"
//! browser_types:
//!   - { id: 1, name: Browser }
//! browser_patterns:
//!   - { id: 10, position: 1, regex: '/chrome\/([0-9.]+)/si' }
//! browsers:
//!   - { id: 1, family_name: Chrome, type_id: 1, pattern_ids: [10] }
//! ```

use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;

use crate::data::Data;
use crate::data_builder::DataBuilder;
use crate::entities::*;
use crate::error::Result;
use crate::pattern::{BrowserPattern, DevicePattern, OperatingSystemPattern};

#[derive(Debug, Deserialize)]
pub(crate) struct PatternRecord {
    pub id: u32,
    pub position: u32,
    pub regex: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Dataset {
    pub version: String,
    #[serde(default)]
    pub browser_types: Vec<BrowserType>,
    #[serde(default)]
    pub browser_patterns: Vec<PatternRecord>,
    #[serde(default)]
    pub operating_system_patterns: Vec<PatternRecord>,
    #[serde(default)]
    pub device_patterns: Vec<PatternRecord>,
    #[serde(default)]
    pub browsers: Vec<BrowserBuilder>,
    #[serde(default)]
    pub operating_systems: Vec<OperatingSystemBuilder>,
    #[serde(default)]
    pub robots: Vec<Robot>,
    #[serde(default)]
    pub devices: Vec<DeviceBuilder>,
    #[serde(default)]
    pub browser_operating_system_mappings: Vec<BrowserOperatingSystemMapping>,
}

fn compile_all<P: Send>(
    records: &[PatternRecord],
    compile: impl Fn(u32, u32, &str) -> Result<P> + Sync,
) -> Result<Vec<P>> {
    records
        .par_iter()
        .map(|r| compile(r.id, r.position, &r.regex))
        .collect()
}

/// Feed every record of a decoded dataset into a fresh builder.
pub(crate) fn builder_from(dataset: Dataset) -> Result<DataBuilder> {
    // Regex compilation dominates load time; the three pattern kinds are
    // independent.
    let (browser_patterns, (operating_system_patterns, device_patterns)) = rayon::join(
        || compile_all(&dataset.browser_patterns, BrowserPattern::compile),
        || {
            rayon::join(
                || {
                    compile_all(
                        &dataset.operating_system_patterns,
                        OperatingSystemPattern::compile,
                    )
                },
                || compile_all(&dataset.device_patterns, DevicePattern::compile),
            )
        },
    );

    let mut builder = DataBuilder::new();
    builder.set_version(dataset.version);
    for pattern in browser_patterns? {
        builder.append_browser_pattern(pattern)?;
    }
    for pattern in operating_system_patterns? {
        builder.append_operating_system_pattern(pattern)?;
    }
    for pattern in device_patterns? {
        builder.append_device_pattern(pattern)?;
    }
    for browser_type in dataset.browser_types {
        builder.append_browser_type(browser_type)?;
    }
    for browser in dataset.browsers {
        builder.append_browser_builder(browser)?;
    }
    for operating_system in dataset.operating_systems {
        builder.append_operating_system_builder(operating_system)?;
    }
    for device in dataset.devices {
        builder.append_device_builder(device)?;
    }
    for robot in dataset.robots {
        builder.append_robot(robot)?;
    }
    for mapping in dataset.browser_operating_system_mappings {
        builder.append_browser_operating_system_mapping(mapping);
    }
    Ok(builder)
}

/// Decode and build a dataset from YAML text.
pub fn from_yaml_str(text: &str) -> Result<Data> {
    let dataset: Dataset = serde_yaml::from_str(text)?;
    builder_from(dataset)?.build()
}

/// Read, decode and build the YAML dataset at `path`.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<Data> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let data = from_yaml_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        version = data.version(),
        browsers = data.browsers().len(),
        operating_systems = data.operating_systems().len(),
        robots = data.robots().len(),
        devices = data.devices().len(),
        "dataset loaded"
    );
    Ok(data)
}
