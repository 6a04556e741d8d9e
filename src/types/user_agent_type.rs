/// Kind of client, derived from the name of the dataset's browser type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserAgentType {
    Browser,
    EmailClient,
    FeedReader,
    Library,
    MobileBrowser,
    MultimediaPlayer,
    OfflineBrowser,
    Other,
    Robot,
    UseragentAnonymizer,
    Validator,
    WapBrowser,
    #[default]
    Unknown,
}

impl UserAgentType {
    /// Map a browser-type name from the dataset onto a known type.
    pub fn evaluate(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "browser" => Self::Browser,
            "email client" => Self::EmailClient,
            "feed reader" => Self::FeedReader,
            "library" => Self::Library,
            "mobile browser" => Self::MobileBrowser,
            "multimedia player" => Self::MultimediaPlayer,
            "offline browser" => Self::OfflineBrowser,
            "other" => Self::Other,
            "robot" => Self::Robot,
            "useragent anonymizer" => Self::UseragentAnonymizer,
            "validator" => Self::Validator,
            "wap browser" => Self::WapBrowser,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browser => "Browser",
            Self::EmailClient => "Email client",
            Self::FeedReader => "Feed Reader",
            Self::Library => "Library",
            Self::MobileBrowser => "Mobile Browser",
            Self::MultimediaPlayer => "Multimedia Player",
            Self::OfflineBrowser => "Offline Browser",
            Self::Other => "Other",
            Self::Robot => "Robot",
            Self::UseragentAnonymizer => "Useragent Anonymizer",
            Self::Validator => "Validator",
            Self::WapBrowser => "Wap Browser",
            Self::Unknown => "",
        }
    }
}
