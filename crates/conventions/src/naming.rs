use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Substring every service type name is expected to carry.
pub const SERVICE_MARKER: &str = "Service";

/// How the marker is matched against a type name. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Marker may appear anywhere: `UserService`, `ServiceLocator`, `MyServiceImpl`.
    #[default]
    Contains,
    /// Marker must be the suffix: `UserService` only.
    EndsWith,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "contains" => Ok(MatchMode::Contains),
            "ends_with" => Ok(MatchMode::EndsWith),
            other => Err(format!("unknown match mode `{other}` (expected contains | ends_with)")),
        }
    }
}

/// Naming rule applied to the short type name of an injected dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRule {
    marker: Cow<'static, str>,
    mode: MatchMode,
}

impl Default for NamingRule {
    fn default() -> Self {
        Self { marker: Cow::Borrowed(SERVICE_MARKER), mode: MatchMode::Contains }
    }
}

impl NamingRule {
    pub fn new(marker: impl Into<Cow<'static, str>>, mode: MatchMode) -> Self {
        Self { marker: marker.into(), mode }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn matches(&self, type_name: &str) -> bool {
        match self.mode {
            MatchMode::Contains => type_name.contains(self.marker.as_ref()),
            MatchMode::EndsWith => type_name.ends_with(self.marker.as_ref()),
        }
    }
}

impl fmt::Display for NamingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            MatchMode::Contains => write!(f, "contain \"{}\"", self.marker),
            MatchMode::EndsWith => write!(f, "end with \"{}\"", self.marker),
        }
    }
}

/// Strip module path and generic arguments: `app::users::Cached<Db>` -> `Cached`.
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
