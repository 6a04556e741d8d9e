use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use fancy_regex::Captures;

use super::data::Data;
use super::db;
use super::entities::OperatingSystem;
use super::error::{Error, Result};
use super::pattern::OrderedPattern;
use super::types::*;
use super::version_parser::*;

/// Classify `ua` against `data`.
///
/// Pure function of its inputs: the same dataset and string always produce
/// the same result. Browser patterns are tried first, in position order; the
/// first match wins. Without a browser match the robot catalogue is
/// searched for a signature contained in `ua`. When neither matches the
/// result is [`UserAgent::empty`], with only the device category still taken
/// from device patterns; operating-system patterns are not consulted.
pub fn classify<'a>(data: &'a Data, ua: &str) -> UserAgent<'a> {
    let mut result = examine_browser(data, ua)
        .or_else(|| examine_robot(data, ua))
        .unwrap_or_default();
    result.device_category = examine_device_category(data, ua, result.kind);
    result
}

fn examine_browser<'a>(data: &'a Data, ua: &str) -> Option<UserAgent<'a>> {
    let (browser, captures) = data
        .browser_patterns()
        .find_map(|(pattern, browser)| pattern.captures(ua).map(|c| (browser, c)))?;

    // Version from the pattern's first group, else the last version in the UA.
    let version = match captures.get(1) {
        Some(m) => parse_version(m.as_str()),
        None => parse_last_version_number(ua),
    };

    // A mapped operating system short-cuts operating-system matching.
    let operating_system = match browser.operating_system() {
        Some(os) => resolve_operating_system(os, ua, None),
        None => examine_operating_system(data, ua),
    };

    let browser_type = browser.browser_type();
    tracing::trace!(
        browser.id = browser.id(),
        browser.family = browser.family_name(),
        %version,
        "browser pattern matched"
    );

    Some(UserAgent {
        family: browser.family(),
        name: Cow::Borrowed(browser.family_name()),
        kind: UserAgentType::evaluate(&browser_type.name),
        type_name: Cow::Borrowed(&browser_type.name),
        version,
        icon: Cow::Borrowed(browser.icon()),
        producer: Cow::Borrowed(browser.producer()),
        producer_url: Cow::Borrowed(browser.producer_url()),
        url: Cow::Borrowed(browser.url()),
        operating_system,
        device_category: DeviceCategory::default(),
    })
}

fn examine_robot<'a>(data: &'a Data, ua: &str) -> Option<UserAgent<'a>> {
    let robot = data.find_robot(ua)?;

    let mut version = parse_last_version_number(&robot.name);
    if version.is_unknown() {
        version = parse_last_version_number(&robot.user_agent_string);
    }
    tracing::trace!(robot.id = robot.id, robot.name = %robot.name, "robot signature matched");

    Some(UserAgent {
        family: robot.family(),
        name: Cow::Borrowed(&robot.name),
        kind: UserAgentType::Robot,
        type_name: Cow::Borrowed(UserAgentType::Robot.as_str()),
        version,
        icon: Cow::Borrowed(&robot.icon),
        producer: Cow::Borrowed(&robot.producer),
        producer_url: Cow::Borrowed(&robot.producer_url),
        url: Cow::Borrowed(&robot.url),
        operating_system: Os::default(),
        device_category: DeviceCategory::default(),
    })
}

fn examine_operating_system<'a>(data: &'a Data, ua: &str) -> Os<'a> {
    data.operating_system_patterns()
        .find_map(|(pattern, os)| {
            pattern
                .captures(ua)
                .map(|c| resolve_operating_system(os, ua, Some(&c)))
        })
        .unwrap_or_default()
}

/// Turn a dataset operating system into a result, detecting its version.
///
/// Order: the matched pattern's first group, the family's own version
/// marker in `ua`, the first version inside the matched text.
fn resolve_operating_system<'a>(
    os: &'a OperatingSystem,
    ua: &str,
    captures: Option<&Captures<'_>>,
) -> Os<'a> {
    let family = OperatingSystemFamily::evaluate(os.family_name());
    let version = match captures.and_then(|c| c.get(1)) {
        Some(m) => parse_version(m.as_str()),
        None => {
            let identified = parse_operating_system_version(family, ua);
            match captures.and_then(|c| c.get(0)) {
                Some(m) if identified.is_unknown() => parse_first_version_number(m.as_str()),
                _ => identified,
            }
        }
    };

    Os {
        family,
        family_name: Cow::Borrowed(os.family_name()),
        name: Cow::Borrowed(os.name()),
        version,
        icon: Cow::Borrowed(os.icon()),
        producer: Cow::Borrowed(os.producer()),
        producer_url: Cow::Borrowed(os.producer_url()),
        url: Cow::Borrowed(os.url()),
    }
}

fn examine_device_category<'a>(
    data: &'a Data,
    ua: &str,
    kind: UserAgentType,
) -> DeviceCategory<'a> {
    if kind == UserAgentType::Robot {
        return category_from_data(data, Category::Other);
    }

    if let Some((_, device)) = data.device_patterns().find(|(p, _)| p.is_match(ua)) {
        return DeviceCategory {
            category: device.category(),
            name: Cow::Borrowed(device.name()),
            icon: Cow::Borrowed(device.icon()),
            info_url: Cow::Borrowed(device.info_url()),
        };
    }

    let category = match kind {
        UserAgentType::Unknown => return DeviceCategory::default(),
        UserAgentType::Other
        | UserAgentType::Library
        | UserAgentType::Validator
        | UserAgentType::UseragentAnonymizer => Category::Other,
        UserAgentType::MobileBrowser | UserAgentType::WapBrowser => Category::Smartphone,
        _ => Category::PersonalComputer,
    };
    category_from_data(data, category)
}

fn category_from_data(data: &Data, category: Category) -> DeviceCategory<'_> {
    match data.find_device_by_category(category) {
        Some(device) => DeviceCategory {
            category,
            name: Cow::Borrowed(device.name()),
            icon: Cow::Borrowed(device.icon()),
            info_url: Cow::Borrowed(device.info_url()),
        },
        None => DeviceCategory {
            category,
            name: Cow::Borrowed(category.as_str()),
            ..DeviceCategory::default()
        },
    }
}

/// Classifier holding the current dataset.
///
/// Each [`parse`](Self::parse) call works on the snapshot that was current
/// when it started; [`set_data`](Self::set_data) publishes a replacement
/// atomically without blocking readers.
#[derive(Debug)]
pub struct UserAgentStringParser {
    data: ArcSwap<Data>,
}

impl UserAgentStringParser {
    pub fn new(data: Data) -> Self {
        Self {
            data: ArcSwap::from_pointee(data),
        }
    }

    /// Load a YAML dataset from `path` and build a parser over it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(db::load_yaml(path)?))
    }

    /// Classify a user-agent string against the current dataset.
    pub fn parse(&self, ua: &str) -> UserAgent<'static> {
        let data = self.data.load();
        classify(&data, ua).into_owned()
    }

    /// The current dataset snapshot.
    pub fn data(&self) -> Arc<Data> {
        self.data.load_full()
    }

    /// Version string of the current dataset.
    pub fn data_version(&self) -> String {
        self.data.load().version().to_owned()
    }

    /// Replace the dataset. An empty dataset is rejected and the current one
    /// stays in place.
    pub fn set_data(&self, data: Data) -> Result<()> {
        if data.is_empty() {
            return Err(Error::EmptyData);
        }
        let current = data.version().to_owned();
        let previous = self.data.swap(Arc::new(data));
        tracing::debug!(previous = previous.version(), %current, "dataset replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::*;
    use crate::pattern::{BrowserPattern, DevicePattern, OperatingSystemPattern};
    use crate::DataBuilder;

    const CHROME_ON_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_6_8) \
        AppleWebKit/535.1 (KHTML, like Gecko) Chrome/13.0.782.112 Safari/535.1";

    fn builder() -> DataBuilder {
        let mut builder = DataBuilder::new();
        builder
            .set_version("20120822-01")
            .append_browser_type(BrowserType {
                id: 1,
                name: "Browser".into(),
            })
            .unwrap()
            .append_browser_type(BrowserType {
                id: 2,
                name: "Mobile Browser".into(),
            })
            .unwrap()
            .append_browser_pattern(BrowserPattern::compile(1, 2, r"/chrome\/([0-9.]+)/si").unwrap())
            .unwrap()
            .append_browser_pattern(BrowserPattern::compile(2, 1, r"/opera mini/si").unwrap())
            .unwrap()
            .append_operating_system_pattern(
                OperatingSystemPattern::compile(3, 1, r"/Mac OS X 10[._]6/si").unwrap(),
            )
            .unwrap()
            .append_device_pattern(DevicePattern::compile(4, 1, r"/ipad/si").unwrap())
            .unwrap()
            .append_browser_builder(BrowserBuilder {
                id: 1,
                family_name: "Chrome".into(),
                type_id: 1,
                pattern_ids: vec![1],
                ..Default::default()
            })
            .unwrap()
            .append_browser_builder(BrowserBuilder {
                id: 2,
                family_name: "Opera Mini".into(),
                type_id: 2,
                pattern_ids: vec![2],
                ..Default::default()
            })
            .unwrap()
            .append_operating_system_builder(OperatingSystemBuilder {
                id: 1,
                family_name: "Mac OS X".into(),
                name: "Mac OS X 10.6 Snow Leopard".into(),
                pattern_ids: vec![3],
                ..Default::default()
            })
            .unwrap()
            .append_device_builder(DeviceBuilder {
                id: 1,
                name: "Tablet".into(),
                pattern_ids: vec![4],
                ..Default::default()
            })
            .unwrap()
            .append_device_builder(DeviceBuilder {
                id: 2,
                name: "Personal computer".into(),
                ..Default::default()
            })
            .unwrap()
            .append_robot(Robot {
                id: 1,
                family_name: "Googlebot".into(),
                name: "Googlebot/2.1".into(),
                user_agent_string: "Googlebot/2.1".into(),
                ..Default::default()
            })
            .unwrap();
        builder
    }

    fn data() -> Data {
        builder().build().unwrap()
    }

    #[test]
    fn classifies_browser_and_operating_system() {
        let data = data();
        let ua = classify(&data, CHROME_ON_MAC);
        assert_eq!(ua.family, UserAgentFamily::Chrome);
        assert_eq!(ua.kind, UserAgentType::Browser);
        assert_eq!(ua.version.to_string(), "13.0.782.112");
        assert_eq!(ua.operating_system.family, OperatingSystemFamily::MacOsX);
        assert_eq!(ua.operating_system.name, "Mac OS X 10.6 Snow Leopard");
        assert_eq!(ua.operating_system.version.to_string(), "10.6.8");
        assert_eq!(ua.device_category.category, Category::PersonalComputer);
        assert_eq!(ua.device_category.name, "Personal computer");
    }

    #[test]
    fn lowest_position_wins() {
        let data = data();
        let ua = classify(&data, "Opera/9.80 (J2ME/MIDP; Opera Mini/5.1) Chrome/1.0");
        assert_eq!(ua.name, "Opera Mini");
        assert_eq!(ua.device_category.category, Category::Smartphone);
        assert_eq!(ua.device_category.name, "Smartphone");
    }

    #[test]
    fn classifies_robot() {
        let data = data();
        let ua = classify(&data, "Googlebot/2.1 (+http://www.google.com/bot.html)");
        assert!(ua.is_robot());
        assert_eq!(ua.family, UserAgentFamily::Googlebot);
        assert_eq!(ua.name, "Googlebot/2.1");
        assert_eq!(ua.version.to_string(), "2.1");
        assert!(ua.operating_system.is_empty());
        assert_eq!(ua.device_category.category, Category::Other);
    }

    #[test]
    fn device_pattern_overrides_type_default() {
        let data = data();
        let ua = classify(&data, "Mozilla/5.0 (iPad) Chrome/20.0");
        assert_eq!(ua.device_category.category, Category::Tablet);
    }

    #[test]
    fn mapped_operating_system_skips_pattern_matching() {
        let mut builder = builder();
        builder
            .append_operating_system_builder(OperatingSystemBuilder {
                id: 2,
                family_name: "Android".into(),
                name: "Android".into(),
                ..Default::default()
            })
            .unwrap()
            .append_browser_operating_system_mapping(BrowserOperatingSystemMapping {
                browser_id: 1,
                operating_system_id: 2,
            });
        let data = builder.build().unwrap();
        let ua = classify(&data, CHROME_ON_MAC);
        assert_eq!(ua.operating_system.family, OperatingSystemFamily::Android);
        assert!(ua.operating_system.version.is_unknown());
    }

    #[test]
    fn unrecognised_input_is_empty() {
        let data = data();
        assert!(classify(&data, "").is_empty());
        assert!(classify(&data, "qwertzuiopasdfghjklyxcvbnm").is_empty());
        assert!(classify(&data, "").version.is_unknown());
    }

    #[test]
    fn operating_system_alone_yields_empty_result() {
        let data = data();
        let ua = classify(&data, "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_6_8)");
        assert!(ua.is_empty());
        assert!(ua.operating_system.is_empty());
    }

    #[test]
    fn device_pattern_applies_without_client_match() {
        let data = data();
        let ua = classify(&data, "Mozilla/5.0 (iPad; U; en)");
        assert!(ua.name.is_empty());
        assert!(ua.operating_system.is_empty());
        assert!(ua.version.is_unknown());
        assert_eq!(ua.device_category.category, Category::Tablet);
    }

    #[test]
    fn classification_is_deterministic() {
        let data = data();
        assert_eq!(classify(&data, CHROME_ON_MAC), classify(&data, CHROME_ON_MAC));
    }

    #[test]
    fn set_data_swaps_snapshot() {
        let parser = UserAgentStringParser::new(data());
        assert_eq!(parser.data_version(), "20120822-01");
        let before = parser.data();

        let mut builder = builder();
        builder.set_version("20120823-01");
        parser.set_data(builder.build().unwrap()).unwrap();
        assert_eq!(parser.data_version(), "20120823-01");
        assert_eq!(before.version(), "20120822-01");
        assert_eq!(parser.parse(CHROME_ON_MAC).family, UserAgentFamily::Chrome);
    }

    #[test]
    fn set_data_rejects_empty_dataset() {
        let parser = UserAgentStringParser::new(data());
        let empty = DataBuilder::new().set_version("20130101-01").build().unwrap();
        assert!(matches!(parser.set_data(empty), Err(Error::EmptyData)));
        assert_eq!(parser.data_version(), "20120822-01");
    }
}
