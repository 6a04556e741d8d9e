//! Dataset entities.
//!
//! Entities that own patterns ([`Browser`], [`OperatingSystem`], [`Device`])
//! are only produced by [`DataBuilder`](crate::DataBuilder), which resolves
//! them from the flat `*Builder` records. The remaining records carry no
//! references and are appended as they are.

use serde::Deserialize;

use crate::pattern::{BrowserPattern, DevicePattern, OperatingSystemPattern, OrderedPattern};
use crate::types::{Category, UserAgentFamily};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct BrowserType {
    pub id: u32,
    pub name: String,
}

/// Association letting a browser inherit an operating system without
/// matching operating-system patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct BrowserOperatingSystemMapping {
    pub browser_id: u32,
    pub operating_system_id: u32,
}

/// A catalogued robot, recognised by the literal user-agent string it was
/// recorded under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Robot {
    pub id: u32,
    pub family_name: String,
    pub name: String,
    pub user_agent_string: String,
    pub icon: String,
    pub info_url: String,
    pub producer: String,
    pub producer_url: String,
    pub url: String,
}

impl Robot {
    pub fn family(&self) -> UserAgentFamily {
        UserAgentFamily::evaluate(&self.family_name)
    }
}

/// Flat browser record: references its type and patterns by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserBuilder {
    pub id: u32,
    pub family_name: String,
    pub type_id: u32,
    pub pattern_ids: Vec<u32>,
    pub icon: String,
    pub info_url: String,
    pub producer: String,
    pub producer_url: String,
    pub url: String,
}

/// Flat operating-system record: references its patterns by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OperatingSystemBuilder {
    pub id: u32,
    pub family_name: String,
    pub name: String,
    pub pattern_ids: Vec<u32>,
    pub icon: String,
    pub info_url: String,
    pub producer: String,
    pub producer_url: String,
    pub url: String,
}

/// Flat device record: references its patterns by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceBuilder {
    pub id: u32,
    pub name: String,
    pub pattern_ids: Vec<u32>,
    pub icon: String,
    pub info_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatingSystem {
    pub(crate) id: u32,
    pub(crate) family_name: String,
    pub(crate) name: String,
    pub(crate) patterns: Vec<OperatingSystemPattern>,
    pub(crate) icon: String,
    pub(crate) info_url: String,
    pub(crate) producer: String,
    pub(crate) producer_url: String,
    pub(crate) url: String,
}

impl OperatingSystem {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owned patterns in position order.
    pub fn patterns(&self) -> &[OperatingSystemPattern] {
        &self.patterns
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn info_url(&self) -> &str {
        &self.info_url
    }

    pub fn producer(&self) -> &str {
        &self.producer
    }

    pub fn producer_url(&self) -> &str {
        &self.producer_url
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Browser {
    pub(crate) id: u32,
    pub(crate) family_name: String,
    pub(crate) patterns: Vec<BrowserPattern>,
    pub(crate) browser_type: BrowserType,
    pub(crate) operating_system: Option<OperatingSystem>,
    pub(crate) icon: String,
    pub(crate) info_url: String,
    pub(crate) producer: String,
    pub(crate) producer_url: String,
    pub(crate) url: String,
}

impl Browser {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn family(&self) -> UserAgentFamily {
        UserAgentFamily::evaluate(&self.family_name)
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Owned patterns in position order.
    pub fn patterns(&self) -> &[BrowserPattern] {
        &self.patterns
    }

    pub fn browser_type(&self) -> &BrowserType {
        &self.browser_type
    }

    /// Operating system attached through a browser→OS mapping.
    pub fn operating_system(&self) -> Option<&OperatingSystem> {
        self.operating_system.as_ref()
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn info_url(&self) -> &str {
        &self.info_url
    }

    pub fn producer(&self) -> &str {
        &self.producer
    }

    pub fn producer_url(&self) -> &str {
        &self.producer_url
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) patterns: Vec<DevicePattern>,
    pub(crate) icon: String,
    pub(crate) info_url: String,
}

impl Device {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        Category::evaluate(&self.name)
    }

    pub fn patterns(&self) -> &[DevicePattern] {
        &self.patterns
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn info_url(&self) -> &str {
        &self.info_url
    }
}

fn pattern_ids<P: OrderedPattern>(patterns: &[P]) -> Vec<u32> {
    patterns.iter().map(|p| p.id()).collect()
}

impl From<&Browser> for BrowserBuilder {
    fn from(browser: &Browser) -> Self {
        Self {
            id: browser.id,
            family_name: browser.family_name.clone(),
            type_id: browser.browser_type.id,
            pattern_ids: pattern_ids(&browser.patterns),
            icon: browser.icon.clone(),
            info_url: browser.info_url.clone(),
            producer: browser.producer.clone(),
            producer_url: browser.producer_url.clone(),
            url: browser.url.clone(),
        }
    }
}

impl From<&OperatingSystem> for OperatingSystemBuilder {
    fn from(os: &OperatingSystem) -> Self {
        Self {
            id: os.id,
            family_name: os.family_name.clone(),
            name: os.name.clone(),
            pattern_ids: pattern_ids(&os.patterns),
            icon: os.icon.clone(),
            info_url: os.info_url.clone(),
            producer: os.producer.clone(),
            producer_url: os.producer_url.clone(),
            url: os.url.clone(),
        }
    }
}

impl From<&Device> for DeviceBuilder {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            name: device.name.clone(),
            pattern_ids: pattern_ids(&device.patterns),
            icon: device.icon.clone(),
            info_url: device.info_url.clone(),
        }
    }
}
