//! Scenario tests for `Lexer::get`.
//!
//! Each case checks the text of every top-level node and that positions are
//! contiguous from offset 0.

use rstest::rstest;
use sherry_lexer::{Delimiter, Kind, LexError, Lexer, MAX_NESTING_DEPTH, Node, Pos, State};

/// Lex `input` to the end, checking positions, and return node texts.
fn lex_texts(input: &str) -> Vec<String> {
    let mut lexer = Lexer::new(input.as_bytes());
    let mut pos = Pos::new(0);
    let mut texts = Vec::new();
    while let Some(node) = lexer.get().unwrap() {
        assert_eq!(node.pos(), pos, "{input:?}: node {} starts at wrong offset", texts.len());
        let text = node.text();
        assert_eq!(node.end(), pos + text.len());
        pos = node.end();
        texts.push(String::from_utf8(text).unwrap());
    }
    assert_eq!(pos, Pos::new(input.len()));
    texts
}

fn lex_all(input: &str) -> Vec<Node<'_>> {
    sherry_lexer::tokenize(input.as_bytes()).unwrap()
}

fn leaf_kind(node: &Node<'_>) -> Option<Kind> {
    node.as_leaf().map(|leaf| leaf.kind())
}

#[rstest]
#[case::pipe_and_redirect("echo $foo|>2 cat", &["echo", " ", "$foo", "|", ">", "2", " ", "cat"])]
#[case::clobber("echo test >|file", &["echo", " ", "test", " ", ">|", "file"])]
#[case::nested_quotes(r#"echo "$(date "+%s")" >&2"#, &["echo", " ", r#""$(date "+%s")""#, " ", ">&", "2"])]
#[case::case_in_substitution(
    "echo $(case $i in *) echo test; esac)",
    &["echo", " ", "$(case $i in *) echo test; esac)"]
)]
#[case::nested_case(
    "case $a in foo) case $b in *) echo foo$b;; esac;; esac",
    &[
        "case", " ", "$a", " ", "in", " ", "foo", ")", " ", "case", " ", "$b", " ", "in", " ",
        "*", ")", " ", "echo", " ", "foo$b", ";;", " ", "esac", ";;", " ", "esac",
    ]
)]
#[case::case_as_argument("echo case foo bar", &["echo", " ", "case", " ", "foo", " ", "bar"])]
#[case::heredoc_operators("cat <<-a <<b <>c <&d", &["cat", " ", "<<-", "a", " ", "<<", "b", " ", "<>", "c", " ", "<&", "d"])]
#[case::output_operators("x >>a >&b >c", &["x", " ", ">>", "a", " ", ">&", "b", " ", ">", "c"])]
#[case::tabs_and_comment("a\t\t# c d\nb", &["a", "\t\t", "# c d", "\n", "b"])]
#[case::subshell_parens("(cd /; ls)", &["(", "cd", " ", "/", ";", " ", "ls", ")"])]
#[case::trailing_backslash("echo \\", &["echo", " ", "\\"])]
#[case::empty("", &[])]
fn splits_into_nodes(#[case] input: &str, #[case] expected: &[&str]) {
    assert_eq!(lex_texts(input), expected);
}

#[rstest]
#[case::if_("if", true)]
#[case::while_("while", true)]
#[case::done("done", true)]
#[case::in_("in", true)]
#[case::quoted("\"if\"", false)]
#[case::suffix("iffy", false)]
#[case::escaped("i\\f", false)]
fn keywords_only_as_plain_terms(#[case] input: &str, #[case] keyword: bool) {
    let nodes = lex_all(input);
    assert_eq!(nodes.len(), 1);
    assert_eq!(leaf_kind(&nodes[0]) == Some(Kind::Keyword), keyword);
}

#[test]
fn keywords_only_at_command_start() {
    let nodes = lex_all("if x; then echo then; fi");
    let keywords: Vec<_> = nodes
        .iter()
        .filter(|n| leaf_kind(n) == Some(Kind::Keyword))
        .map(|n| String::from_utf8(n.text()).unwrap())
        .collect();
    assert_eq!(keywords, ["if", "then"]);
}

#[test]
fn case_starts_the_case_machine() {
    let mut lexer = Lexer::new(b"case $x in");
    lexer.get().unwrap();
    assert_eq!(lexer.state(), State::CaseWaitWord);
    lexer.get().unwrap();
    lexer.get().unwrap();
    assert_eq!(lexer.state(), State::CaseWaitIn);
    lexer.get().unwrap();
    let node = lexer.get().unwrap().unwrap();
    assert_eq!(leaf_kind(&node), Some(Kind::Keyword));
    assert_eq!(lexer.state(), State::CaseWaitPattern);
}

#[test]
fn double_semicolon_reenters_pattern_mode() {
    let mut lexer = Lexer::new(b"echo;;");
    lexer.get().unwrap();
    lexer.get().unwrap();
    assert_eq!(lexer.state(), State::CaseWaitPattern);
}

#[test]
fn newline_keeps_case_states() {
    let mut lexer = Lexer::new(b"case x\nin");
    lexer.get().unwrap();
    lexer.get().unwrap();
    lexer.get().unwrap();
    assert_eq!(lexer.state(), State::CaseWaitIn);
    let newline = lexer.get().unwrap().unwrap();
    assert_eq!(leaf_kind(&newline), Some(Kind::NewLine));
    assert_eq!(lexer.state(), State::CaseWaitIn);
}

#[test]
fn bang_is_an_operator_only_at_command_start() {
    let nodes = lex_all("! true");
    assert_eq!(leaf_kind(&nodes[0]), Some(Kind::Operator));

    let nodes = lex_all("echo !");
    assert_eq!(nodes[2].type_name(), "Word");
    assert_eq!(nodes[2].text(), b"!");
}

#[test]
fn brace_group_word_is_not_an_operator() {
    let nodes = lex_all("{x}");
    assert_eq!(nodes.len(), 1);
    let Node::Word(word) = &nodes[0] else {
        panic!("expected word, got {:?}", nodes[0]);
    };
    assert_eq!(word.nodes().len(), 3);
}

#[test]
fn quoted_string_with_substitution_is_one_word() {
    let nodes = lex_all(r#""$(date "+%s")""#);
    assert_eq!(nodes.len(), 1);
    let Node::Word(word) = &nodes[0] else {
        panic!("expected word");
    };
    let [Node::QQString(qq)] = word.nodes() else {
        panic!("expected a single quoted string");
    };
    assert_eq!(qq.nodes().len(), 1);
    assert_eq!(qq.nodes()[0].type_name(), "SubshellString");
}

#[test]
fn arithmetic_has_three_body_leaves() {
    let nodes = lex_all("$((2+1))");
    let Node::Word(word) = &nodes[0] else {
        panic!("expected word");
    };
    let [Node::MathGroup(group)] = word.nodes() else {
        panic!("expected a single math group");
    };
    let body: Vec<_> = group
        .nodes()
        .iter()
        .map(|n| (leaf_kind(n), n.text()))
        .collect();
    assert_eq!(
        body,
        [
            (Some(Kind::Variable), b"2".to_vec()),
            (Some(Kind::Term), b"+".to_vec()),
            (Some(Kind::Variable), b"1".to_vec()),
        ]
    );
}

#[rstest]
#[case::expected_in("case x on", LexError::ExpectedIn { got: "on".into(), pos: Pos::new(7) })]
#[case::special_instead_of_in("case x $y", LexError::Unexpected { found: '$', pos: Pos::new(7) })]
#[case::operator_as_subject("case ;", LexError::Unexpected { found: ';', pos: Pos::new(5) })]
#[case::ampersand_in_pattern("case x in &", LexError::Unexpected { found: '&', pos: Pos::new(10) })]
#[case::braced_parameter("echo ${x}", LexError::Unsupported { what: "`${...}` parameter expansion", pos: Pos::new(5) })]
fn grammar_errors(#[case] input: &str, #[case] expected: LexError) {
    let err = sherry_lexer::tokenize(input.as_bytes()).unwrap_err();
    assert_eq!(err, expected);
    assert!(!err.is_internal());
}

#[rstest]
#[case::double_quote("echo \"abc", 5)]
#[case::substitution("x $(echo", 2)]
#[case::quote_in_substitution("$(echo \"a)", 7)]
fn unterminated_delimiters(#[case] input: &str, #[case] offset: usize) {
    let err = sherry_lexer::tokenize(input.as_bytes()).unwrap_err();
    assert!(
        matches!(err, LexError::Unterminated { pos, .. } if pos == Pos::new(offset)),
        "{input:?}: {err}"
    );
}

#[test]
fn unclosed_arithmetic_chain_fails_fast() {
    // Each level is retried as `$(`, which must not lex the inner levels again
    let input = "$((".repeat(60);
    let err = sherry_lexer::tokenize(input.as_bytes()).unwrap_err();
    assert_eq!(
        err,
        LexError::Unterminated {
            delimiter: Delimiter::CommandSubstitution,
            pos: Pos::new(3 * 59),
        }
    );
}

#[test]
fn arithmetic_retry_inside_retry() {
    let texts = lex_texts("$(($((a) ); (b))");
    assert_eq!(texts, ["$(($((a) )", ";", " ", "(", "b", ")", ")"]);
}

#[rstest]
#[case::substitutions("$(", ")")]
#[case::quoted_substitutions("\"$(", ")\"")]
#[case::arithmetic_groups("$(((", ")))")]
fn nesting_at_the_limit_is_accepted(#[case] open: &str, #[case] close: &str) {
    let levels = MAX_NESTING_DEPTH / 2;
    let input = format!("{}x{}", open.repeat(levels), close.repeat(levels));
    assert_eq!(lex_texts(&input).concat(), input);
}

#[test]
fn deep_substitutions_are_rejected_not_overflowed() {
    let input = format!("{}{}", "$(".repeat(20_000), ")".repeat(20_000));
    let err = sherry_lexer::tokenize(input.as_bytes()).unwrap_err();
    assert_eq!(
        err,
        LexError::TooDeep {
            limit: MAX_NESTING_DEPTH,
            pos: Pos::new(2 * MAX_NESTING_DEPTH),
        }
    );
    assert!(!err.is_internal());
}

#[test]
fn deep_quotes_are_rejected() {
    let input = "\"$(".repeat(MAX_NESTING_DEPTH);
    let err = sherry_lexer::tokenize(input.as_bytes()).unwrap_err();
    assert!(matches!(err, LexError::TooDeep { .. }), "{err}");
}
