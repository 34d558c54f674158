use serde::{Deserialize, Serialize};

/// Free identifiers used by the synthesized mock calls.
///
/// `expect_identifier` is the mock receiving the expectation (`m` in
/// `m.ExpectRequest(...)`), `matcher_identifier` the package providing the
/// matchers (`test` in `test.RequestEqualTo(...)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub expect_identifier: String,
    pub matcher_identifier: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            expect_identifier: "m".to_string(),
            matcher_identifier: "test".to_string(),
        }
    }
}

impl MockConfig {
    pub fn new(expect_identifier: impl Into<String>, matcher_identifier: impl Into<String>) -> Self {
        Self {
            expect_identifier: expect_identifier.into(),
            matcher_identifier: matcher_identifier.into(),
        }
    }
}
