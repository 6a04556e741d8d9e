use std::borrow::Cow;

use super::{Category, OperatingSystemFamily, UserAgentFamily, UserAgentType};
use crate::VersionNumber;

/// Classification of a single user-agent string.
///
/// Every field is always present: "nothing detected" is expressed by the
/// empty values returned from [`UserAgent::empty`], never by absence. Display
/// strings borrow from the dataset the string was classified against; use
/// [`UserAgent::into_owned`] to detach the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UserAgent<'a> {
    pub family: UserAgentFamily,
    /// Family name for browsers, catalogued name for robots.
    pub name: Cow<'a, str>,
    pub kind: UserAgentType,
    pub type_name: Cow<'a, str>,
    pub version: VersionNumber,
    pub icon: Cow<'a, str>,
    pub producer: Cow<'a, str>,
    pub producer_url: Cow<'a, str>,
    pub url: Cow<'a, str>,
    pub operating_system: Os<'a>,
    pub device_category: DeviceCategory<'a>,
}

impl UserAgent<'_> {
    pub fn empty() -> UserAgent<'static> {
        UserAgent::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == UserAgent::empty()
    }

    pub fn is_robot(&self) -> bool {
        self.kind == UserAgentType::Robot
    }

    pub fn into_owned(self) -> UserAgent<'static> {
        UserAgent {
            family: self.family,
            name: Cow::Owned(self.name.into_owned()),
            kind: self.kind,
            type_name: Cow::Owned(self.type_name.into_owned()),
            version: self.version,
            icon: Cow::Owned(self.icon.into_owned()),
            producer: Cow::Owned(self.producer.into_owned()),
            producer_url: Cow::Owned(self.producer_url.into_owned()),
            url: Cow::Owned(self.url.into_owned()),
            operating_system: self.operating_system.into_owned(),
            device_category: self.device_category.into_owned(),
        }
    }
}

/// Operating system a user agent runs on, with the version detected in the
/// user-agent string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Os<'a> {
    pub family: OperatingSystemFamily,
    pub family_name: Cow<'a, str>,
    pub name: Cow<'a, str>,
    pub version: VersionNumber,
    pub icon: Cow<'a, str>,
    pub producer: Cow<'a, str>,
    pub producer_url: Cow<'a, str>,
    pub url: Cow<'a, str>,
}

impl Os<'_> {
    pub fn empty() -> Os<'static> {
        Os::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Os::empty()
    }

    pub fn into_owned(self) -> Os<'static> {
        Os {
            family: self.family,
            family_name: Cow::Owned(self.family_name.into_owned()),
            name: Cow::Owned(self.name.into_owned()),
            version: self.version,
            icon: Cow::Owned(self.icon.into_owned()),
            producer: Cow::Owned(self.producer.into_owned()),
            producer_url: Cow::Owned(self.producer_url.into_owned()),
            url: Cow::Owned(self.url.into_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DeviceCategory<'a> {
    pub category: Category,
    pub name: Cow<'a, str>,
    pub icon: Cow<'a, str>,
    pub info_url: Cow<'a, str>,
}

impl DeviceCategory<'_> {
    pub fn empty() -> DeviceCategory<'static> {
        DeviceCategory::default()
    }

    pub fn into_owned(self) -> DeviceCategory<'static> {
        DeviceCategory {
            category: self.category,
            name: Cow::Owned(self.name.into_owned()),
            icon: Cow::Owned(self.icon.into_owned()),
            info_url: Cow::Owned(self.info_url.into_owned()),
        }
    }
}
