use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use crate::data::{Data, PatternEntry, RobotIndex};
use crate::entities::*;
use crate::error::{Error, Result};
use crate::pattern::{
    sort_by_position, BrowserPattern, DevicePattern, OperatingSystemPattern, OrderedPattern,
};

/// Accumulates flat dataset records in any order and resolves them into a
/// [`Data`].
///
/// Appending the same record twice is a no-op; appending a different record
/// under an id already in use fails with [`Error::DuplicateId`]. References
/// between records are only resolved in [`DataBuilder::build`], so records
/// may arrive before whatever they point at. Records whose references cannot
/// be resolved are left out of the result and reported through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct DataBuilder {
    version: Option<String>,
    browser_types: BTreeMap<u32, BrowserType>,
    browser_patterns: BTreeMap<u32, BrowserPattern>,
    operating_system_patterns: BTreeMap<u32, OperatingSystemPattern>,
    device_patterns: BTreeMap<u32, DevicePattern>,
    browsers: BTreeMap<u32, BrowserBuilder>,
    operating_systems: BTreeMap<u32, OperatingSystemBuilder>,
    robots: BTreeMap<u32, Robot>,
    devices: BTreeMap<u32, DeviceBuilder>,
    mappings: BTreeSet<BrowserOperatingSystemMapping>,
}

fn insert_unique<T: PartialEq>(
    map: &mut BTreeMap<u32, T>,
    kind: &'static str,
    id: u32,
    value: T,
) -> Result<()> {
    match map.entry(id) {
        Entry::Vacant(e) => {
            e.insert(value);
            Ok(())
        }
        Entry::Occupied(e) if *e.get() == value => Ok(()),
        Entry::Occupied(_) => Err(Error::DuplicateId { kind, id }),
    }
}

/// Pick the patterns an entity refers to. A pattern belongs to at most one
/// entity: later claims are dropped.
fn claim_patterns<P: OrderedPattern + Clone>(
    owner_kind: &'static str,
    owner_id: u32,
    pattern_ids: &[u32],
    available: &BTreeMap<u32, P>,
    claimed: &mut BTreeMap<u32, u32>,
) -> Vec<P> {
    let ids: BTreeSet<u32> = pattern_ids.iter().copied().collect();
    let mut patterns = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(pattern) = available.get(&id) else {
            tracing::warn!(
                owner.kind = owner_kind,
                owner.id = owner_id,
                pattern.id = id,
                "ignoring reference to unknown pattern"
            );
            continue;
        };
        match claimed.entry(id) {
            Entry::Vacant(e) => {
                e.insert(owner_id);
                patterns.push(pattern.clone());
            }
            Entry::Occupied(e) => {
                tracing::warn!(
                    owner.kind = owner_kind,
                    owner.id = owner_id,
                    pattern.id = id,
                    claimed_by = *e.get(),
                    "ignoring pattern already owned by another entity"
                );
            }
        }
    }
    sort_by_position(&mut patterns);
    patterns
}

/// Flatten the owned pattern sets into one position-ordered list. Patterns
/// sharing a position keep id order.
fn index_patterns<'a, P: OrderedPattern + Clone + 'a>(
    kind: &'static str,
    owned: impl Iterator<Item = (usize, &'a [P])>,
) -> Vec<PatternEntry<P>> {
    let mut entries: Vec<PatternEntry<P>> = owned
        .flat_map(|(owner, patterns)| {
            patterns.iter().map(move |pattern| PatternEntry {
                pattern: pattern.clone(),
                owner,
            })
        })
        .collect();
    entries.sort_by_key(|e| e.pattern.id());
    entries.sort_by(|a, b| a.pattern.cmp_position(&b.pattern));

    for pair in entries.windows(2) {
        if pair[0].pattern.position() == pair[1].pattern.position() {
            tracing::warn!(
                pattern.kind = kind,
                position = pair[0].pattern.position(),
                first = pair[0].pattern.id(),
                second = pair[1].pattern.id(),
                "patterns share a position, ordering them by id"
            );
        }
    }
    entries
}

impl DataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    pub fn append_browser_type(&mut self, browser_type: BrowserType) -> Result<&mut Self> {
        insert_unique(
            &mut self.browser_types,
            "browser type",
            browser_type.id,
            browser_type,
        )?;
        Ok(self)
    }

    pub fn append_browser_pattern(&mut self, pattern: BrowserPattern) -> Result<&mut Self> {
        insert_unique(
            &mut self.browser_patterns,
            "browser pattern",
            pattern.id(),
            pattern,
        )?;
        Ok(self)
    }

    pub fn append_operating_system_pattern(
        &mut self,
        pattern: OperatingSystemPattern,
    ) -> Result<&mut Self> {
        insert_unique(
            &mut self.operating_system_patterns,
            "operating system pattern",
            pattern.id(),
            pattern,
        )?;
        Ok(self)
    }

    pub fn append_device_pattern(&mut self, pattern: DevicePattern) -> Result<&mut Self> {
        insert_unique(
            &mut self.device_patterns,
            "device pattern",
            pattern.id(),
            pattern,
        )?;
        Ok(self)
    }

    pub fn append_browser_builder(&mut self, browser: BrowserBuilder) -> Result<&mut Self> {
        insert_unique(&mut self.browsers, "browser", browser.id, browser)?;
        Ok(self)
    }

    pub fn append_operating_system_builder(
        &mut self,
        operating_system: OperatingSystemBuilder,
    ) -> Result<&mut Self> {
        insert_unique(
            &mut self.operating_systems,
            "operating system",
            operating_system.id,
            operating_system,
        )?;
        Ok(self)
    }

    pub fn append_device_builder(&mut self, device: DeviceBuilder) -> Result<&mut Self> {
        insert_unique(&mut self.devices, "device", device.id, device)?;
        Ok(self)
    }

    pub fn append_robot(&mut self, robot: Robot) -> Result<&mut Self> {
        insert_unique(&mut self.robots, "robot", robot.id, robot)?;
        Ok(self)
    }

    pub fn append_browser_operating_system_mapping(
        &mut self,
        mapping: BrowserOperatingSystemMapping,
    ) -> &mut Self {
        self.mappings.insert(mapping);
        self
    }

    /// Resolve every record into a [`Data`].
    ///
    /// Fails only when no version was set (or the robot signatures cannot be
    /// compiled). Can be called any number of times.
    pub fn build(&self) -> Result<Data> {
        let version = self.version.clone().ok_or(Error::MissingVersion)?;

        let mut claimed = BTreeMap::new();
        let operating_systems: Vec<OperatingSystem> = self
            .operating_systems
            .values()
            .map(|b| OperatingSystem {
                id: b.id,
                family_name: b.family_name.clone(),
                name: b.name.clone(),
                patterns: claim_patterns(
                    "operating system",
                    b.id,
                    &b.pattern_ids,
                    &self.operating_system_patterns,
                    &mut claimed,
                ),
                icon: b.icon.clone(),
                info_url: b.info_url.clone(),
                producer: b.producer.clone(),
                producer_url: b.producer_url.clone(),
                url: b.url.clone(),
            })
            .collect();

        let mut mappings = Vec::new();
        let mut browsers = Vec::with_capacity(self.browsers.len());
        let mut claimed = BTreeMap::new();
        for b in self.browsers.values() {
            let Some(browser_type) = self.browser_types.get(&b.type_id) else {
                tracing::warn!(
                    browser.id = b.id,
                    type_id = b.type_id,
                    "dropping browser with unknown browser type"
                );
                continue;
            };
            let operating_system = self.resolve_operating_system(b.id, &operating_systems);
            if let Some(os) = &operating_system {
                mappings.push(BrowserOperatingSystemMapping {
                    browser_id: b.id,
                    operating_system_id: os.id,
                });
            }
            browsers.push(Browser {
                id: b.id,
                family_name: b.family_name.clone(),
                patterns: claim_patterns(
                    "browser",
                    b.id,
                    &b.pattern_ids,
                    &self.browser_patterns,
                    &mut claimed,
                ),
                browser_type: browser_type.clone(),
                operating_system,
                icon: b.icon.clone(),
                info_url: b.info_url.clone(),
                producer: b.producer.clone(),
                producer_url: b.producer_url.clone(),
                url: b.url.clone(),
            });
        }
        for mapping in &self.mappings {
            if !browsers.iter().any(|b| b.id == mapping.browser_id) {
                tracing::warn!(
                    browser.id = mapping.browser_id,
                    operating_system.id = mapping.operating_system_id,
                    "ignoring mapping for unknown browser"
                );
            }
        }

        let mut claimed = BTreeMap::new();
        let devices: Vec<Device> = self
            .devices
            .values()
            .map(|b| Device {
                id: b.id,
                name: b.name.clone(),
                patterns: claim_patterns(
                    "device",
                    b.id,
                    &b.pattern_ids,
                    &self.device_patterns,
                    &mut claimed,
                ),
                icon: b.icon.clone(),
                info_url: b.info_url.clone(),
            })
            .collect();

        let robots: Vec<Robot> = self.robots.values().cloned().collect();

        let browser_patterns = index_patterns(
            "browser",
            browsers.iter().map(|b| b.patterns.as_slice()).enumerate(),
        );
        let operating_system_patterns = index_patterns(
            "operating system",
            operating_systems
                .iter()
                .map(|o| o.patterns.as_slice())
                .enumerate(),
        );
        let device_patterns = index_patterns(
            "device",
            devices.iter().map(|d| d.patterns.as_slice()).enumerate(),
        );

        Ok(Data {
            version,
            browser_types: self.browser_types.values().cloned().collect(),
            robot_index: RobotIndex::build(&robots)?,
            browsers,
            operating_systems,
            robots,
            devices,
            mappings,
            browser_patterns,
            operating_system_patterns,
            device_patterns,
        })
    }

    /// Operating system a browser inherits through a mapping. The mapping
    /// with the lowest operating-system id wins.
    fn resolve_operating_system(
        &self,
        browser_id: u32,
        operating_systems: &[OperatingSystem],
    ) -> Option<OperatingSystem> {
        let lower = BrowserOperatingSystemMapping {
            browser_id,
            operating_system_id: 0,
        };
        let mut resolved: Option<OperatingSystem> = None;
        for mapping in self
            .mappings
            .range(lower..)
            .take_while(|m| m.browser_id == browser_id)
        {
            let Some(os) = operating_systems
                .iter()
                .find(|o| o.id == mapping.operating_system_id)
            else {
                tracing::warn!(
                    browser.id = browser_id,
                    operating_system.id = mapping.operating_system_id,
                    "ignoring mapping to unknown operating system"
                );
                continue;
            };
            match &resolved {
                None => resolved = Some(os.clone()),
                Some(first) => tracing::warn!(
                    browser.id = browser_id,
                    operating_system.id = mapping.operating_system_id,
                    kept = first.id,
                    "ignoring additional operating system mapping"
                ),
            }
        }
        resolved
    }
}

impl From<&Data> for DataBuilder {
    /// Flatten a dataset back into its records.
    fn from(data: &Data) -> Self {
        let mut builder = DataBuilder {
            version: Some(data.version.clone()),
            ..DataBuilder::default()
        };
        for t in &data.browser_types {
            builder.browser_types.insert(t.id, t.clone());
        }
        for b in &data.browsers {
            for p in &b.patterns {
                builder.browser_patterns.insert(p.id(), p.clone());
            }
            builder.browsers.insert(b.id, BrowserBuilder::from(b));
        }
        for o in &data.operating_systems {
            for p in &o.patterns {
                builder.operating_system_patterns.insert(p.id(), p.clone());
            }
            builder
                .operating_systems
                .insert(o.id, OperatingSystemBuilder::from(o));
        }
        for d in &data.devices {
            for p in &d.patterns {
                builder.device_patterns.insert(p.id(), p.clone());
            }
            builder.devices.insert(d.id, DeviceBuilder::from(d));
        }
        for r in &data.robots {
            builder.robots.insert(r.id, r.clone());
        }
        builder.mappings.extend(data.mappings.iter().copied());
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser(id: u32, type_id: u32, pattern_ids: Vec<u32>) -> BrowserBuilder {
        BrowserBuilder {
            id,
            family_name: "Chrome".into(),
            type_id,
            pattern_ids,
            ..Default::default()
        }
    }

    fn operating_system(id: u32, name: &str, pattern_ids: Vec<u32>) -> OperatingSystemBuilder {
        OperatingSystemBuilder {
            id,
            family_name: "Linux".into(),
            name: name.into(),
            pattern_ids,
            ..Default::default()
        }
    }

    fn populated() -> DataBuilder {
        let mut builder = DataBuilder::new();
        builder
            .set_version("20120822-01")
            .append_browser_type(BrowserType {
                id: 1,
                name: "Browser".into(),
            })
            .unwrap()
            .append_browser_pattern(BrowserPattern::compile(10, 2, "/chrome/i").unwrap())
            .unwrap()
            .append_browser_pattern(BrowserPattern::compile(11, 1, "/chromium/i").unwrap())
            .unwrap()
            .append_operating_system_pattern(
                OperatingSystemPattern::compile(20, 1, "/linux/i").unwrap(),
            )
            .unwrap()
            .append_browser_builder(browser(1, 1, vec![10, 11]))
            .unwrap()
            .append_operating_system_builder(operating_system(5, "Linux", vec![20]))
            .unwrap()
            .append_browser_operating_system_mapping(BrowserOperatingSystemMapping {
                browser_id: 1,
                operating_system_id: 5,
            });
        builder
    }

    #[test]
    fn build_requires_version() {
        let builder = DataBuilder::new();
        assert!(matches!(builder.build(), Err(Error::MissingVersion)));
    }

    #[test]
    fn identical_append_is_noop_divergent_is_error() {
        let mut builder = populated();
        builder
            .append_browser_builder(browser(1, 1, vec![10, 11]))
            .unwrap();
        let err = builder
            .append_browser_builder(browser(1, 2, vec![10]))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateId { kind: "browser", id: 1 }));
        assert_eq!(builder.build().unwrap().browsers().len(), 1);
    }

    #[test]
    fn resolves_patterns_and_mapping() {
        let data = populated().build().unwrap();
        let chrome = &data.browsers()[0];
        let ids: Vec<u32> = chrome.patterns().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![11, 10]);
        assert_eq!(chrome.operating_system().map(|o| o.id()), Some(5));
        assert_eq!(data.browser_operating_system_mappings().len(), 1);

        let order: Vec<u32> = data.browser_patterns().map(|(p, _)| p.position()).collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn pattern_append_rejects_divergent_duplicate() {
        let mut builder = DataBuilder::new();
        builder
            .append_browser_pattern(BrowserPattern::compile(10, 2, "/chrome/i").unwrap())
            .unwrap()
            .append_browser_pattern(BrowserPattern::compile(10, 2, "/chrome/i").unwrap())
            .unwrap();

        let moved = builder
            .append_browser_pattern(BrowserPattern::compile(10, 3, "/chrome/i").unwrap())
            .unwrap_err();
        assert!(matches!(
            moved,
            Error::DuplicateId { kind: "browser pattern", id: 10 }
        ));
        let rewritten = builder
            .append_browser_pattern(BrowserPattern::compile(10, 2, "/other/").unwrap())
            .unwrap_err();
        assert!(matches!(
            rewritten,
            Error::DuplicateId { kind: "browser pattern", id: 10 }
        ));

        builder
            .append_operating_system_pattern(
                OperatingSystemPattern::compile(20, 1, "/linux/i").unwrap(),
            )
            .unwrap()
            .append_operating_system_pattern(
                OperatingSystemPattern::compile(20, 1, "/linux/i").unwrap(),
            )
            .unwrap();
        assert!(matches!(
            builder.append_operating_system_pattern(
                OperatingSystemPattern::compile(20, 1, "/windows/i").unwrap()
            ),
            Err(Error::DuplicateId { kind: "operating system pattern", id: 20 })
        ));

        builder
            .append_device_pattern(DevicePattern::compile(30, 1, "/ipad/i").unwrap())
            .unwrap()
            .append_device_pattern(DevicePattern::compile(30, 1, "/ipad/i").unwrap())
            .unwrap();
        assert!(matches!(
            builder.append_device_pattern(DevicePattern::compile(30, 2, "/ipad/i").unwrap()),
            Err(Error::DuplicateId { kind: "device pattern", id: 30 })
        ));
    }

    #[test]
    fn shared_position_is_broken_by_pattern_id() {
        let mut builder = populated();
        builder
            .append_browser_pattern(BrowserPattern::compile(31, 5, "/firefox/i").unwrap())
            .unwrap()
            .append_browser_pattern(BrowserPattern::compile(30, 5, "/firefox/i").unwrap())
            .unwrap()
            .append_browser_builder(BrowserBuilder {
                family_name: "Firefox".into(),
                ..browser(2, 1, vec![31])
            })
            .unwrap()
            .append_browser_builder(BrowserBuilder {
                family_name: "Iceweasel".into(),
                ..browser(3, 1, vec![30])
            })
            .unwrap();
        let data = builder.build().unwrap();

        let ids: Vec<u32> = data.browser_patterns().map(|(p, _)| p.id()).collect();
        assert_eq!(ids, vec![11, 10, 30, 31]);

        let (pattern, owner) = data
            .browser_patterns()
            .find(|(p, _)| p.is_match("Mozilla/5.0 Firefox/15.0"))
            .unwrap();
        assert_eq!(pattern.id(), 30);
        assert_eq!(owner.id(), 3);
        assert_eq!(owner.family_name(), "Iceweasel");
    }

    #[test]
    fn browser_with_unknown_type_is_dropped() {
        let mut builder = populated();
        builder
            .append_browser_builder(browser(2, 99, vec![]))
            .unwrap();
        let data = builder.build().unwrap();
        assert!(data.browsers().iter().all(|b| b.id() != 2));
    }

    #[test]
    fn unknown_references_are_skipped() {
        let mut builder = populated();
        builder
            .append_operating_system_builder(operating_system(6, "Other", vec![404]))
            .unwrap()
            .append_browser_operating_system_mapping(BrowserOperatingSystemMapping {
                browser_id: 42,
                operating_system_id: 5,
            });
        let data = builder.build().unwrap();
        assert!(data.operating_systems()[1].patterns().is_empty());
        assert_eq!(data.browser_operating_system_mappings().len(), 1);
    }

    #[test]
    fn pattern_belongs_to_lowest_claiming_entity() {
        let mut builder = populated();
        builder
            .append_operating_system_builder(operating_system(9, "Other", vec![20]))
            .unwrap();
        let data = builder.build().unwrap();
        assert_eq!(data.operating_systems()[0].patterns().len(), 1);
        assert!(data.operating_systems()[1].patterns().is_empty());
        assert_eq!(data.operating_system_patterns().count(), 1);
    }

    #[test]
    fn lowest_operating_system_mapping_wins() {
        let mut builder = populated();
        builder
            .append_operating_system_builder(operating_system(3, "Other", vec![]))
            .unwrap()
            .append_browser_operating_system_mapping(BrowserOperatingSystemMapping {
                browser_id: 1,
                operating_system_id: 3,
            });
        let data = builder.build().unwrap();
        assert_eq!(data.browsers()[0].operating_system().map(|o| o.id()), Some(3));
    }

    #[test]
    fn build_is_repeatable() {
        let builder = populated();
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn flattened_data_rebuilds_equal() {
        let data = populated().build().unwrap();
        let rebuilt = DataBuilder::from(&data).build().unwrap();
        assert_eq!(data, rebuilt);
    }

    #[test]
    fn append_order_does_not_matter() {
        let mut builder = DataBuilder::new();
        builder
            .append_browser_operating_system_mapping(BrowserOperatingSystemMapping {
                browser_id: 1,
                operating_system_id: 5,
            })
            .append_operating_system_builder(operating_system(5, "Linux", vec![20]))
            .unwrap()
            .append_browser_builder(browser(1, 1, vec![10, 11]))
            .unwrap()
            .append_operating_system_pattern(
                OperatingSystemPattern::compile(20, 1, "/linux/i").unwrap(),
            )
            .unwrap()
            .append_browser_pattern(BrowserPattern::compile(11, 1, "/chromium/i").unwrap())
            .unwrap()
            .append_browser_pattern(BrowserPattern::compile(10, 2, "/chrome/i").unwrap())
            .unwrap()
            .append_browser_type(BrowserType {
                id: 1,
                name: "Browser".into(),
            })
            .unwrap()
            .set_version("20120822-01");
        assert_eq!(builder.build().unwrap(), populated().build().unwrap());
    }
}
