mod comparator;
mod data;
mod data_builder;
pub mod db;
mod entities;
mod error;
mod pattern;
mod types;
mod user_agent_string_parser;
mod version_number;
mod version_parser;

pub use comparator::{alphanum_cmp, natural_order_cmp};
pub use data::Data;
pub use data_builder::DataBuilder;
pub use entities::*;
pub use error::{Error, Result};
pub use pattern::{
    compile_pattern, BrowserPattern, DevicePattern, OperatingSystemPattern, OrderedPattern,
};
pub use types::*;
pub use user_agent_string_parser::{classify, UserAgentStringParser};
pub use version_number::VersionNumber;
pub use version_parser::{
    parse_first_version_number, parse_last_version_number, parse_operating_system_version,
    parse_version,
};
