//! Issue state types.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Open/closed state of a single issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// Issue is open.
    Open,

    /// Issue is closed.
    Closed,
}

impl IssueState {
    /// Returns the API string for the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Which issues to list from the source repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateFilter {
    /// Only open issues.
    #[default]
    Open,

    /// Only closed issues.
    Closed,

    /// Open and closed issues.
    All,
}

impl StateFilter {
    /// Returns true if an issue in `state` falls within this filter.
    #[must_use]
    pub fn matches(&self, state: IssueState) -> bool {
        match self {
            Self::Open => state == IssueState::Open,
            Self::Closed => state == IssueState::Closed,
            Self::All => true,
        }
    }

    /// Returns the API string for the filter.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateFilter {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::InvalidState {
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_state_filter_case_insensitively() {
        assert_eq!("OPEN".parse::<StateFilter>().unwrap(), StateFilter::Open);
        assert_eq!("closed".parse::<StateFilter>().unwrap(), StateFilter::Closed);
        assert_eq!(" All ".parse::<StateFilter>().unwrap(), StateFilter::All);
        assert!(matches!(
            "merged".parse::<StateFilter>(),
            Err(ConfigError::InvalidState { .. })
        ));
    }

    #[test]
    fn filter_matches_states() {
        assert!(StateFilter::Open.matches(IssueState::Open));
        assert!(!StateFilter::Open.matches(IssueState::Closed));
        assert!(StateFilter::Closed.matches(IssueState::Closed));
        assert!(StateFilter::All.matches(IssueState::Open));
        assert!(StateFilter::All.matches(IssueState::Closed));
    }
}
