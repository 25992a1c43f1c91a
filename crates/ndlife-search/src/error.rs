//! Error type for structure searches.

use std::error::Error;
use std::fmt;

use ndlife_core::{ConfigError, ResourceError, StepError};

/// Errors from building or running a [`StructureSearch`](crate::StructureSearch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The neighborhood, rule, or search configuration is invalid.
    Config(ConfigError),
    /// The engine failed to advance the pattern.
    Step(StepError),
    /// The seen-state map overflowed under [`OverflowPolicy::Fail`](crate::OverflowPolicy::Fail).
    Resource(ResourceError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Step(e) => write!(f, "step: {e}"),
            Self::Resource(e) => write!(f, "resource: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Step(e) => Some(e),
            Self::Resource(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StepError> for SearchError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

impl From<ResourceError> for SearchError {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}
