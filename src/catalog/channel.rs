use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

/// A release cohort whose versions are reported on together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Daily builds from the development branch
    Nightly,

    /// Pre-release builds for the next major version
    Beta,

    /// The rolling stable channel
    Release,

    /// The long-lived extended support (ESR) track
    Maintenance,
}

impl Channel {
    /// Human-readable channel name used in report texts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nightly => "Daily",
            Self::Beta => "Beta",
            Self::Release => "Release",
            Self::Maintenance => "ESR",
        }
    }
}

/// Which slice of a channel's versions to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ResolveMode {
    /// All versions in the reporting window, including configured prior cycles
    Full,

    /// Only the latest version (or the latest minor group for the maintenance track)
    CurrentOnly,
}
