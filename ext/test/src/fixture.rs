//! Conformance fixture runner.
//!
//! Loads YAML fixtures and runs them against the rule engine with the
//! sample universe. A fixture either expects its rule to parse and lists
//! match checks, or expects parsing to fail with a message fragment.

use crit::{ItemPredicate, ItemStack};
use serde::Deserialize;
use serde_json::Value;

use crate::sample_registries;

/// One fixture document.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    /// The rule as it would appear in a definition file.
    pub rule: Value,
    /// Match checks, run when the rule parses.
    #[serde(default)]
    pub checks: Vec<Check>,
    /// Expected parse-error fragment. Set for invalid-rule fixtures.
    #[serde(default)]
    pub error: Option<String>,
}

/// One stack-against-rule expectation.
#[derive(Debug, Deserialize)]
pub struct Check {
    pub stack: ItemStack,
    pub matches: bool,
}

/// Result of one check.
#[derive(Debug)]
pub struct CheckResult {
    pub stack: String,
    pub passed: bool,
    pub expected: bool,
    pub actual: bool,
}

impl Fixture {
    /// Parse a single fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns the YAML error for malformed documents.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators.
    ///
    /// # Errors
    ///
    /// Returns the YAML error for malformed documents.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all checks and return results.
    ///
    /// # Panics
    ///
    /// Panics when the parse outcome contradicts the fixture: a rule that
    /// fails to parse without an `error` expectation, parses despite one,
    /// fails with the wrong message, or does not round-trip through its
    /// serialized form.
    #[must_use]
    pub fn run(&self) -> Vec<CheckResult> {
        let registries = sample_registries();

        let rule = match (ItemPredicate::from_json(&registries, &self.rule), &self.error) {
            (Err(e), Some(fragment)) => {
                let msg = e.to_string();
                assert!(
                    msg.contains(fragment.as_str()),
                    "fixture '{}': expected error containing {fragment:?}, got {msg:?}",
                    self.name
                );
                return Vec::new();
            }
            (Err(e), None) => panic!("fixture '{}': rule failed to parse: {e}", self.name),
            (Ok(_), Some(fragment)) => panic!(
                "fixture '{}': expected error containing {fragment:?}, but rule parsed",
                self.name
            ),
            (Ok(rule), None) => rule,
        };

        // every parseable rule must survive a serialize/reparse cycle
        let reparsed = ItemPredicate::from_json(&registries, &rule.to_json())
            .unwrap_or_else(|e| panic!("fixture '{}': round-trip failed: {e}", self.name));
        assert_eq!(
            reparsed, rule,
            "fixture '{}': round-trip changed the rule",
            self.name
        );

        self.checks
            .iter()
            .map(|check| {
                let actual = rule.matches(&registries, &check.stack);
                CheckResult {
                    stack: format!("{:?}", check.stack),
                    passed: actual == check.matches,
                    expected: check.matches,
                    actual,
                }
            })
            .collect()
    }

    /// Run all checks and panic on the first failure.
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "fixture '{}' stack {} expected matches={}, got {}",
                self.name, result.stack, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_fixture() {
        let yaml = r#"
name: apples only
rule:
  items: ["apple"]
checks:
  - stack: {item: apple}
    matches: true
  - stack: {item: bread}
    matches: false
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert_eq!(fixture.name, "apples only");
        assert_eq!(fixture.checks.len(), 2);
        fixture.run_and_assert();
    }

    #[test]
    fn parse_multi_document() {
        let yaml = r#"
name: first
rule: null
checks:
  - stack: {item: apple}
    matches: true
---
name: second
rule:
  count: 2
checks:
  - stack: {item: apple, count: 2}
    matches: true
"#;
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        for fixture in &fixtures {
            fixture.run_and_assert();
        }
    }

    #[test]
    fn error_fixture_matches_fragment() {
        let yaml = r#"
name: unknown item
rule:
  items: ["mythril_ore"]
error: "unknown item id"
"#;
        Fixture::from_yaml(yaml).unwrap().run_and_assert();
    }

    #[test]
    fn failed_check_is_reported_not_swallowed() {
        let yaml = r#"
name: wrong expectation
rule: {count: 1}
checks:
  - stack: {item: apple, count: 2}
    matches: true
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        let results = fixture.run();
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert!(!results[0].actual);
    }

    #[test]
    #[should_panic(expected = "failed to parse")]
    fn unexpected_parse_failure_panics() {
        let yaml = r#"
name: bad rule without error expectation
rule:
  items: ["mythril_ore"]
"#;
        Fixture::from_yaml(yaml).unwrap().run_and_assert();
    }
}
