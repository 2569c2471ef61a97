//! Lexer test file parser and runner.
//!
//! Parses the `tests/lexer/*.test` format:
//!
//! ```text
//! # test: pipe_and_redirect
//! # expect: ok
//! ---
//! echo $foo|>2 cat
//! ---
//! (word (Term "echo"))
//! (Space " ")
//! ...
//! ===
//! ```
//!
//! The expected section holds one s-expression per top-level node (see
//! [`crate::sexpr`]), or the error message when `# expect: error`.

use sherry_lexer::tokenize;

use crate::sexpr::format_nodes;
use crate::{TestResult, TestSummary};

/// A single lexer test case.
#[derive(Debug, Clone)]
pub struct LexerTestCase {
    /// Test name from the `# test: name` line.
    pub name: String,
    /// Line number where the test starts (1-indexed).
    pub line_number: usize,
    /// The input source, lines joined with `\n`.
    pub input: String,
    /// What we expect from lexing.
    pub expected: LexerExpectation,
}

/// What we expect from lexing an input.
#[derive(Debug, Clone, PartialEq)]
pub enum LexerExpectation {
    /// One s-expression per top-level node.
    Ok(Vec<String>),
    /// Expected error message.
    Error(String),
}

/// Parse the *.test file format into test cases.
pub fn parse_lexer_tests(content: &str) -> Vec<LexerTestCase> {
    let mut cases = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = lines[i].trim().strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let start_line = i + 1;
        i += 1;

        let mut expect_ok = true;
        if let Some(expect) = lines.get(i).and_then(|l| l.trim().strip_prefix("# expect:")) {
            expect_ok = expect.trim() == "ok";
            i += 1;
        }

        // Skip to first ---
        while i < lines.len() && lines[i].trim() != "---" {
            i += 1;
        }
        i += 1;

        // Input is taken verbatim, so leading blanks are significant
        let mut input_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "---" {
            input_lines.push(lines[i]);
            i += 1;
        }
        i += 1;

        let mut expected_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "===" {
            let line = lines[i].trim();
            if !line.is_empty() {
                expected_lines.push(line.to_string());
            }
            i += 1;
        }
        i += 1;

        let expected = if expect_ok {
            LexerExpectation::Ok(expected_lines)
        } else {
            LexerExpectation::Error(expected_lines.join(" "))
        };

        cases.push(LexerTestCase {
            name,
            line_number: start_line,
            input: input_lines.join("\n"),
            expected,
        });
    }

    cases
}

impl LexerTestCase {
    /// Run this test case and return the result.
    pub fn run(&self) -> TestResult {
        match (tokenize(self.input.as_bytes()), &self.expected) {
            (Ok(nodes), LexerExpectation::Ok(expected)) => {
                let mut text = Vec::new();
                for node in &nodes {
                    node.write_text(&mut text);
                }
                if text != self.input.as_bytes() {
                    return TestResult::Error {
                        message: format!(
                            "round trip mismatch: {:?}",
                            String::from_utf8_lossy(&text)
                        ),
                    };
                }

                let actual = format_nodes(&nodes);
                if &actual == expected {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: expected.join("\n              "),
                        actual: actual.join("\n              "),
                    }
                }
            }
            (Ok(nodes), LexerExpectation::Error(expected)) => TestResult::Fail {
                expected: format!("error: {}", expected),
                actual: format_nodes(&nodes).join(" "),
            },
            (Err(err), LexerExpectation::Error(expected)) => {
                let actual = err.to_string();
                if &actual == expected {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: format!("error: {}", expected),
                        actual: format!("error: {}", actual),
                    }
                }
            }
            (Err(err), LexerExpectation::Ok(expected)) => TestResult::Fail {
                expected: expected.join(" "),
                actual: format!("error: {}", err),
            },
        }
    }
}

/// Run all lexer test cases and return a summary.
pub fn run_lexer_tests(cases: &[LexerTestCase]) -> TestSummary {
    let mut summary = TestSummary::new();

    for case in cases {
        let result = case.run();
        summary.record(&case.name, case.line_number, result);
    }

    summary
}
