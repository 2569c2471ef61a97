//! Test utilities for sherry.
//!
//! Provides the parser and runner for the lexer test file format
//! (`tests/lexer/*.test`) and an s-expression formatter for node trees.

pub mod lexer;
pub mod sexpr;

use std::fmt;

/// The result of running a single test case.
#[derive(Debug, Clone)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with expected vs actual mismatch.
    Fail { expected: String, actual: String },
    /// Error running the test.
    Error { message: String },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, TestResult::Fail { .. })
    }
}

/// Summary of running multiple test cases.
#[derive(Debug, Default)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub failures: Vec<TestFailure>,
}

/// A single test failure with context.
#[derive(Debug, Clone)]
pub struct TestFailure {
    pub name: String,
    pub line: usize,
    pub result: TestResult,
}

impl TestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, line: usize, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                return;
            }
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.failures.push(TestFailure {
            name: name.into(),
            line,
            result,
        });
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", "═".repeat(60))?;
        writeln!(f, "Test Summary: {} total", self.total())?;
        writeln!(
            f,
            "  ✓ {} passed  ✗ {} failed  ⚠ {} errors",
            self.passed, self.failed, self.errors
        )?;

        if !self.failures.is_empty() {
            writeln!(f, "\nFailures:")?;
            for failure in &self.failures {
                writeln!(f, "\n  {} (line {})", failure.name, failure.line)?;
                match &failure.result {
                    TestResult::Fail { expected, actual } => {
                        writeln!(f, "    expected: {}", expected)?;
                        writeln!(f, "    actual:   {}", actual)?;
                    }
                    TestResult::Error { message } => {
                        writeln!(f, "    error: {}", message)?;
                    }
                    TestResult::Pass => {}
                }
            }
        }
        writeln!(f, "{}", "═".repeat(60))?;
        Ok(())
    }
}
