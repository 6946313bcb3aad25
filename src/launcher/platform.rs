use std::fmt;

/// Operating system the launcher runs on. Only Windows can open URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other(String),
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            os => Self::Other(os.to_string()),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Other(os) => write!(f, "{os}"),
        }
    }
}
