#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
    #[error("dataset version must be set before building")]
    MissingVersion,
    #[error("{kind} with id {id} appended twice with different content")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("version segment {0:?} is not numeric")]
    InvalidVersionSegment(String),
    #[error("malformed pattern {0:?}")]
    InvalidPattern(String),
    #[error("refusing to replace the dataset with an empty one")]
    EmptyData,
}

pub type Result<T> = std::result::Result<T, Error>;
