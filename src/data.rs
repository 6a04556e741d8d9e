use std::hash::{Hash, Hasher};

use aho_corasick::AhoCorasick;

use crate::entities::{
    Browser, BrowserOperatingSystemMapping, BrowserType, Device, OperatingSystem, Robot,
};
use crate::error::Result;
use crate::pattern::{BrowserPattern, DevicePattern, OperatingSystemPattern};
use crate::types::Category;

/// A pattern paired with the index of the entity owning it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PatternEntry<P> {
    pub pattern: P,
    pub owner: usize,
}

/// Literal robot signatures compiled into one automaton.
pub(crate) struct RobotIndex {
    automaton: AhoCorasick,
    /// Maps automaton pattern index → robot index.
    robots: Vec<usize>,
}

impl RobotIndex {
    pub(crate) fn build(robots: &[Robot]) -> Result<Self> {
        let (robots, signatures): (Vec<usize>, Vec<&str>) = robots
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.user_agent_string.is_empty())
            .map(|(i, r)| (i, r.user_agent_string.as_str()))
            .unzip();
        Ok(Self {
            automaton: AhoCorasick::new(signatures)?,
            robots,
        })
    }

    /// Lowest-index robot whose signature occurs in `ua`.
    fn find(&self, ua: &str) -> Option<usize> {
        self.automaton
            .find_overlapping_iter(ua)
            .map(|m| self.robots[m.pattern().as_usize()])
            .min()
    }
}

impl std::fmt::Debug for RobotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobotIndex")
            .field("signatures", &self.robots.len())
            .finish()
    }
}

/// The immutable, fully resolved dataset a classifier matches against.
///
/// Entities are stored in id order. The pattern views iterate in position
/// order, so the first match found while iterating is the one with the
/// highest priority. Equality and hashing are structural: two datasets
/// built from the same records compare equal regardless of append order.
#[derive(Debug)]
pub struct Data {
    pub(crate) version: String,
    pub(crate) browser_types: Vec<BrowserType>,
    pub(crate) browsers: Vec<Browser>,
    pub(crate) operating_systems: Vec<OperatingSystem>,
    pub(crate) robots: Vec<Robot>,
    pub(crate) devices: Vec<Device>,
    pub(crate) mappings: Vec<BrowserOperatingSystemMapping>,
    pub(crate) browser_patterns: Vec<PatternEntry<BrowserPattern>>,
    pub(crate) operating_system_patterns: Vec<PatternEntry<OperatingSystemPattern>>,
    pub(crate) device_patterns: Vec<PatternEntry<DevicePattern>>,
    pub(crate) robot_index: RobotIndex,
}

impl Data {
    /// Dataset version, lexically comparable (`YYYYMMDD-NN`).
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn browser_types(&self) -> &[BrowserType] {
        &self.browser_types
    }

    pub fn browsers(&self) -> &[Browser] {
        &self.browsers
    }

    pub fn operating_systems(&self) -> &[OperatingSystem] {
        &self.operating_systems
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Mappings that were resolved and applied to a browser.
    pub fn browser_operating_system_mappings(&self) -> &[BrowserOperatingSystemMapping] {
        &self.mappings
    }

    /// Browser patterns with their owning browser, in position order.
    pub fn browser_patterns(&self) -> impl Iterator<Item = (&BrowserPattern, &Browser)> {
        self.browser_patterns
            .iter()
            .map(|e| (&e.pattern, &self.browsers[e.owner]))
    }

    /// Operating-system patterns with their owning operating system, in
    /// position order.
    pub fn operating_system_patterns(
        &self,
    ) -> impl Iterator<Item = (&OperatingSystemPattern, &OperatingSystem)> {
        self.operating_system_patterns
            .iter()
            .map(|e| (&e.pattern, &self.operating_systems[e.owner]))
    }

    /// Device patterns with their owning device, in position order.
    pub fn device_patterns(&self) -> impl Iterator<Item = (&DevicePattern, &Device)> {
        self.device_patterns
            .iter()
            .map(|e| (&e.pattern, &self.devices[e.owner]))
    }

    /// `true` when the dataset knows nothing it could classify.
    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
            && self.operating_systems.is_empty()
            && self.robots.is_empty()
            && self.devices.is_empty()
    }

    /// First catalogued robot whose signature occurs in `ua`.
    pub fn find_robot(&self, ua: &str) -> Option<&Robot> {
        self.robot_index.find(ua).map(|i| &self.robots[i])
    }

    /// First device of the given category.
    pub fn find_device_by_category(&self, category: Category) -> Option<&Device> {
        self.devices.iter().find(|d| d.category() == category)
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.browser_types == other.browser_types
            && self.browsers == other.browsers
            && self.operating_systems == other.operating_systems
            && self.robots == other.robots
            && self.devices == other.devices
            && self.mappings == other.mappings
            && self.browser_patterns == other.browser_patterns
            && self.operating_system_patterns == other.operating_system_patterns
            && self.device_patterns == other.device_patterns
    }
}

impl Eq for Data {}

impl Hash for Data {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version.hash(state);
        self.browser_types.hash(state);
        self.browsers.hash(state);
        self.operating_systems.hash(state);
        self.robots.hash(state);
        self.devices.hash(state);
        self.mappings.hash(state);
        self.browser_patterns.hash(state);
        self.operating_system_patterns.hash(state);
        self.device_patterns.hash(state);
    }
}
