use crate::fetch::ImageFetcher;
use crate::RuntimeError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One recorded `fetch` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub locator: String,
    pub insecure: bool,
}

/// In-memory fetcher for tests and dry runs.
///
/// Unless configured otherwise, every locator resolves to a deterministic
/// `sha512-<blake3(locator)>` id followed by a newline, like `rkt fetch` prints.
#[derive(Default)]
pub struct MockFetcher {
    outputs: HashMap<String, String>,
    default_output: Option<String>,
    failures: HashSet<String>,
    calls: Mutex<Vec<FetchCall>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `output` verbatim for every locator without an explicit output.
    #[must_use]
    pub fn with_default_output(mut self, output: &str) -> Self {
        self.default_output = Some(output.to_owned());
        self
    }

    /// Return `output` verbatim when `locator` is fetched.
    #[must_use]
    pub fn with_output(mut self, locator: &str, output: &str) -> Self {
        self.outputs.insert(locator.to_owned(), output.to_owned());
        self
    }

    /// Fail when `locator` is fetched.
    #[must_use]
    pub fn failing_on(mut self, locator: &str) -> Self {
        self.failures.insert(locator.to_owned());
        self
    }

    /// Every fetch so far, in call order.
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn deterministic_output(locator: &str) -> String {
        format!("sha512-{}\n", blake3::hash(locator.as_bytes()).to_hex())
    }
}

impl ImageFetcher for MockFetcher {
    fn fetch(&self, locator: &str, insecure: bool) -> Result<String, RuntimeError> {
        self.calls
            .lock()
            .map_err(|e| RuntimeError::ExecFailed(format!("mutex poisoned: {e}")))?
            .push(FetchCall {
                locator: locator.to_owned(),
                insecure,
            });

        if self.failures.contains(locator) {
            return Err(RuntimeError::FetchFailed {
                locator: locator.to_owned(),
                reason: "mock failure".to_owned(),
            });
        }

        Ok(self
            .outputs
            .get(locator)
            .or(self.default_output.as_ref())
            .cloned()
            .unwrap_or_else(|| Self::deterministic_output(locator)))
    }
}
