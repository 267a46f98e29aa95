use texprobe_gen::GenError;
use thiserror::Error;

use crate::host::HostError;

/// Failure of a single test. Every variant is fatal to the whole run.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("{test}: failed to generate texture data: {source}")]
    Generation {
        test: String,
        #[source]
        source: GenError,
    },

    #[error("{test}: host rejected {what}: {source}")]
    Upload {
        test: String,
        what: &'static str,
        #[source]
        source: HostError,
    },

    #[error("{test}: failed to capture frame: {source}")]
    Capture {
        test: String,
        #[source]
        source: HostError,
    },

    #[error("no test named {0:?} in the registry")]
    UnknownTest(String),
}

impl SuiteError {
    /// Name of the test that failed, if the error came from a test run.
    pub fn test_name(&self) -> Option<&str> {
        match self {
            SuiteError::Generation { test, .. }
            | SuiteError::Upload { test, .. }
            | SuiteError::Capture { test, .. } => Some(test),
            SuiteError::UnknownTest(_) => None,
        }
    }
}
