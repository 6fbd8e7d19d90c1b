//! Test execution engine.

use crate::dispatch::execute_fixture_case;
use crate::fixtures::FixtureSet;

/// Outcome of verifying one fixture case.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub case_name: String,
    pub spec_section: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    pub diff: Option<String>,
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self { campaign: campaign.into() }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| {
                let expected = render_expectation(&case.expected_output, case.expected_errno);
                let actual = match execute_fixture_case(&case.function, &case.inputs) {
                    Ok(run) => render_expectation(&run.output, run.errno),
                    Err(err) => format!("unsupported:{err}"),
                };
                let passed = actual == expected;
                VerificationResult {
                    case_name: case.name.clone(),
                    spec_section: case.spec_section.clone(),
                    passed,
                    diff: (!passed).then(|| render_diff(&expected, &actual)),
                    expected,
                    actual,
                }
            })
            .collect()
    }
}

/// Output and status cell are compared together as one string.
fn render_expectation(output: &str, errno: i32) -> String {
    format!("{output} [errno={errno}]")
}

fn render_diff(expected: &str, actual: &str) -> String {
    format!("- {expected}\n+ {actual}")
}
