/// Device category, derived from the name of a dataset device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    GameConsole,
    Other,
    Pda,
    PersonalComputer,
    SmartTv,
    Smartphone,
    Tablet,
    #[default]
    Unknown,
}

impl Category {
    pub fn evaluate(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "game console" => Self::GameConsole,
            "other" => Self::Other,
            "pda" => Self::Pda,
            "personal computer" => Self::PersonalComputer,
            "smart tv" => Self::SmartTv,
            "smartphone" => Self::Smartphone,
            "tablet" => Self::Tablet,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GameConsole => "Game console",
            Self::Other => "Other",
            Self::Pda => "PDA",
            Self::PersonalComputer => "Personal computer",
            Self::SmartTv => "Smart TV",
            Self::Smartphone => "Smartphone",
            Self::Tablet => "Tablet",
            Self::Unknown => "",
        }
    }
}
