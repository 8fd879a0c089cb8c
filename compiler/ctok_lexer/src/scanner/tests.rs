use super::*;
use ctok_pattern::{BudgetExceeded, MatchResult, PatternError};
use crate::Rule;
use pretty_assertions::assert_eq;

/// Helper: drain a scanner, including the final `EndOfInput`.
fn scan_with_eof<C: PatternCompiler>(registry: &Registry<C>, source: &str) -> Vec<Token> {
    let mut scanner = registry.scanner(source);
    let mut tokens = Vec::new();
    loop {
        let tok = scanner.advance().expect("default policy never fails");
        let end = tok.is_end_of_input();
        tokens.push(tok);
        if end {
            break;
        }
    }
    tokens
}

fn matched(rule: usize, text: &str, start: usize) -> Token {
    Token::Matched {
        rule: RuleIndex::new(rule),
        text: text.to_owned(),
        start,
        len: text.len(),
    }
}

fn registry(pairs: &[(&str, &str)]) -> Registry {
    Registry::from_pairs(pairs).expect("test rules compile")
}

// ─── Selection ─────────────────────────────────────────────────

#[test]
fn longest_match_wins() {
    let reg = registry(&[("DIGIT", "^[0-9]"), ("NUMBER", "^[0-9]+")]);
    let mut scanner = reg.scanner("123abc");
    assert_eq!(scanner.advance(), Ok(matched(1, "123", 0)));
}

#[test]
fn longest_match_wins_regardless_of_order() {
    let reg = registry(&[("NUMBER", "^[0-9]+"), ("DIGIT", "^[0-9]")]);
    let mut scanner = reg.scanner("123abc");
    assert_eq!(scanner.advance(), Ok(matched(0, "123", 0)));
}

#[test]
fn tie_goes_to_earlier_rule() {
    let reg = registry(&[("FIRST", "ab"), ("SECOND", "[a-z]{2}")]);
    assert_eq!(reg.scanner("ab").advance(), Ok(matched(0, "ab", 0)));

    let reg = registry(&[("SECOND", "[a-z]{2}"), ("FIRST", "ab")]);
    assert_eq!(reg.scanner("ab").advance(), Ok(matched(0, "ab", 0)));
}

#[test]
fn keyword_beats_identifier_on_tie() {
    let reg = registry(&[("LET", "let"), ("IDENT", "[a-z]+")]);
    let tokens = scan_with_eof(&reg, "let letter");
    assert_eq!(
        tokens,
        vec![
            matched(0, "let", 0),
            Token::Skipped {
                position: 3,
                ch: ' '
            },
            matched(1, "letter", 4),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn zero_length_match_never_wins() {
    let reg = registry(&[("EMPTY", "x*"), ("WORD", "[a-z]+")]);
    let tokens = scan_with_eof(&reg, "ab1");
    assert_eq!(
        tokens,
        vec![
            matched(1, "ab", 0),
            Token::Skipped {
                position: 2,
                ch: '1'
            },
            Token::EndOfInput,
        ]
    );
}

#[test]
fn only_empty_matching_rule_still_progresses() {
    let reg = registry(&[("ANYTHING", ".*?")]);
    let tokens = scan_with_eof(&reg, "abc");
    assert_eq!(tokens.len(), 4);
    assert!(tokens[..3].iter().all(Token::is_skipped));
}

// ─── Skip vs. End of Input ─────────────────────────────────────

#[test]
fn skip_is_distinct_from_end_of_input() {
    let reg = registry(&[("WORD", "[a-z]+")]);
    let tokens = scan_with_eof(&reg, "a#b");
    assert_eq!(
        tokens,
        vec![
            matched(0, "a", 0),
            Token::Skipped {
                position: 1,
                ch: '#'
            },
            matched(0, "b", 2),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn skip_consumes_whole_multibyte_char() {
    let reg = registry(&[("WORD", "[a-z]+")]);
    let mut scanner = reg.scanner("a→b");
    assert_eq!(scanner.advance(), Ok(matched(0, "a", 0)));
    assert_eq!(
        scanner.advance(),
        Ok(Token::Skipped {
            position: 1,
            ch: '→'
        })
    );
    assert_eq!(scanner.position(), 4);
    assert_eq!(scanner.advance(), Ok(matched(0, "b", 4)));
}

#[test]
fn no_rules_skips_everything() {
    let reg = Registry::new(Vec::<Rule>::new()).expect("empty registry");
    let tokens = scan_with_eof(&reg, "ab");
    assert_eq!(
        tokens,
        vec![
            Token::Skipped {
                position: 0,
                ch: 'a'
            },
            Token::Skipped {
                position: 1,
                ch: 'b'
            },
            Token::EndOfInput,
        ]
    );
}

// ─── Terminal State ────────────────────────────────────────────

#[test]
fn empty_input_is_immediately_exhausted() {
    let reg = registry(&[("WORD", "[a-z]+")]);
    let mut scanner = reg.scanner("");
    assert!(scanner.is_exhausted());
    assert_eq!(scanner.advance(), Ok(Token::EndOfInput));
}

#[test]
fn repeated_end_of_input() {
    let reg = registry(&[("WORD", "[a-z]+")]);
    let mut scanner = reg.scanner("abc");
    assert_eq!(scanner.advance(), Ok(matched(0, "abc", 0)));
    for _ in 0..5 {
        assert_eq!(scanner.advance(), Ok(Token::EndOfInput));
        assert_eq!(scanner.position(), 3);
        assert_eq!(scanner.remaining(), "");
    }
}

#[test]
fn accessors_track_position() {
    let reg = registry(&[("WORD", "[a-z]+"), ("SPACE", " +")]);
    let mut scanner = reg.scanner("ab cd");
    assert_eq!(scanner.position(), 0);
    assert_eq!(scanner.source(), "ab cd");
    scanner.advance().expect("no budget");
    assert_eq!(scanner.position(), 2);
    assert_eq!(scanner.remaining(), " cd");
    assert!(!scanner.is_exhausted());
    assert_eq!(scanner.registry().len(), 2);
    assert_eq!(scanner.config(), &ScanConfig::default());
}

#[test]
fn number_identifier_space_demo() {
    let reg = registry(&[
        ("NUMBER", "^[0-9]+"),
        ("IDENTIFIER", "^[a-zA-Z_][a-zA-Z0-9_]*"),
        ("SPACE", "^[ \t\n]+"),
    ]);
    let tokens = scan_with_eof(&reg, "foo 123 bar42");
    assert_eq!(
        tokens,
        vec![
            matched(1, "foo", 0),
            matched(2, " ", 3),
            matched(0, "123", 4),
            matched(2, " ", 7),
            matched(1, "bar42", 8),
            Token::EndOfInput,
        ]
    );
}

// ─── Iterators ─────────────────────────────────────────────────

#[test]
fn tokens_iterator_stops_before_end_of_input() {
    let reg = registry(&[("WORD", "[a-z]+")]);
    let mut scanner = reg.scanner("a#b");
    let tokens: Vec<Token> = scanner
        .tokens()
        .collect::<Result<_, _>>()
        .expect("no budget errors");
    assert_eq!(tokens.len(), 3);
    assert!(!tokens.iter().any(Token::is_end_of_input));
    assert!(scanner.is_exhausted());
}

#[test]
fn tokens_iterator_is_fused() {
    let reg = registry(&[("WORD", "[a-z]+")]);
    let mut scanner = reg.scanner("a");
    let mut iter = scanner.tokens();
    assert!(iter.next().is_some());
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn significant_tokens_drop_ignored_rules() {
    let reg = registry(&[("WORD", "[a-z]+"), ("SPACE", " +")]);
    let ignore = IgnoreList::from_names(&reg, &["SPACE"]).expect("SPACE is registered");
    let mut scanner = reg.scanner("ab  cd #");
    let tokens: Vec<Token> = scanner
        .significant_tokens(&ignore)
        .collect::<Result<_, _>>()
        .expect("no budget errors");
    assert_eq!(
        tokens,
        vec![
            matched(0, "ab", 0),
            matched(0, "cd", 4),
            Token::Skipped {
                position: 7,
                ch: '#'
            },
        ]
    );
}

// ─── Custom Matchers ───────────────────────────────────────────

/// Test engine: `"!"` always exceeds its budget, `"?"` claims a match that
/// runs past the input, `"~"` claims `usize::MAX` bytes, anything else is a
/// literal.
#[derive(Debug)]
struct ScriptedCompiler;

#[derive(Debug)]
enum Scripted {
    GiveUp,
    Overrun,
    Huge,
    Literal(String),
}

impl Matcher for Scripted {
    fn try_match(&self, subject: &str, offset: usize) -> Result<MatchResult, BudgetExceeded> {
        match self {
            Scripted::GiveUp => Err(BudgetExceeded),
            Scripted::Overrun => Ok(MatchResult::Matched {
                len: subject.len() + 10,
            }),
            Scripted::Huge => Ok(MatchResult::Matched { len: usize::MAX }),
            Scripted::Literal(lit) => Ok(match subject.get(offset..) {
                Some(rest) if rest.starts_with(lit.as_str()) => {
                    MatchResult::Matched { len: lit.len() }
                }
                _ => MatchResult::NoMatch,
            }),
        }
    }
}

impl PatternCompiler for ScriptedCompiler {
    type Matcher = Scripted;

    fn compile(&self, pattern: &str) -> Result<Scripted, PatternError> {
        Ok(match pattern {
            "!" => Scripted::GiveUp,
            "?" => Scripted::Overrun,
            "~" => Scripted::Huge,
            "" => return Err(PatternError::new(pattern, "empty literal")),
            lit => Scripted::Literal(lit.to_owned()),
        })
    }
}

fn scripted(pairs: &[(&str, &str)]) -> Registry<ScriptedCompiler> {
    Registry::with_compiler(&ScriptedCompiler, pairs.iter().copied())
        .expect("scripted rules compile")
}

#[test]
fn budget_exceeded_treated_as_no_match_by_default() {
    let reg = scripted(&[("SLOW", "!"), ("A", "a")]);
    let mut scanner = reg.scanner("ab");
    assert_eq!(scanner.advance(), Ok(matched(1, "a", 0)));
    assert_eq!(
        scanner.advance(),
        Ok(Token::Skipped {
            position: 1,
            ch: 'b'
        })
    );
}

#[test]
fn budget_exceeded_fails_under_strict_policy() {
    let reg = scripted(&[("A", "a"), ("SLOW", "!")]);
    let mut scanner = reg.scanner_with("ab", ScanConfig::strict());
    assert_eq!(
        scanner.advance(),
        Err(MatchTimeoutError {
            rule_index: RuleIndex::new(1),
            position: 0,
        })
    );
    // Position is untouched, so the error repeats rather than skipping input.
    assert_eq!(scanner.position(), 0);
}

#[test]
fn tokens_iterator_ends_after_error() {
    let reg = scripted(&[("SLOW", "!")]);
    let mut scanner = reg.scanner_with("abc", ScanConfig::strict());
    let results: Vec<_> = scanner.tokens().collect();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

#[test]
fn overlong_match_is_ignored() {
    let reg = scripted(&[("BOGUS", "?"), ("A", "a")]);
    let tokens = scan_with_eof(&reg, "a");
    assert_eq!(tokens, vec![matched(1, "a", 0), Token::EndOfInput]);
}

#[test]
fn overflowing_match_length_is_ignored_mid_source() {
    let reg = scripted(&[("HUGE", "~"), ("A", "a")]);
    let tokens = scan_with_eof(&reg, "ab");
    assert_eq!(
        tokens,
        vec![
            matched(1, "a", 0),
            Token::Skipped {
                position: 1,
                ch: 'b'
            },
            Token::EndOfInput,
        ]
    );
}

#[test]
fn custom_compiler_errors_name_rule() {
    let err = Registry::with_compiler(&ScriptedCompiler, [("A", "a"), ("B", "")])
        .expect_err("empty literal is rejected");
    assert_eq!(err.rule_index, RuleIndex::new(1));
    assert_eq!(err.name, "B");
    assert_eq!(err.detail, "empty literal");
}

// ─── Logging ──────────────────────────────────────────────────

mod logging {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
        }
    }

    #[test]
    fn registry_span_and_end_of_input_are_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let reg = registry(&[("WORD", "[a-z]+"), ("SPACE", " +")]);
            let mut scanner = reg.scanner("ab");
            assert_eq!(scanner.advance(), Ok(matched(0, "ab", 0)));
            assert_eq!(scanner.advance(), Ok(Token::EndOfInput));
        });

        let logs = captured.text();
        assert!(logs.contains("rules=2"), "logs: {logs}");
        assert!(logs.contains("registry compiled"), "logs: {logs}");
        assert!(logs.contains("end of input"), "logs: {logs}");
    }
}

// ─── Properties ────────────────────────────────────────────────

mod proptest_progress {
    use super::*;
    use proptest::prelude::*;

    fn lexer_registry() -> Registry {
        registry(&[
            ("NUMBER", "[0-9]+"),
            ("IDENT", "[a-zA-Z_][a-zA-Z0-9_]*"),
            ("SPACE", "[ \t\n]+"),
            ("EMPTY", "z*"),
            ("OP", "==|=|\\+"),
        ])
    }

    proptest! {
        #[test]
        fn position_strictly_increases_until_exhausted(source in "\\PC{0,64}") {
            let reg = lexer_registry();
            let mut scanner = reg.scanner(&source);
            let mut steps = 0usize;
            loop {
                let before = scanner.position();
                let tok = scanner.advance().expect("default policy never fails");
                if tok.is_end_of_input() {
                    prop_assert_eq!(before, source.len());
                    prop_assert_eq!(scanner.position(), before);
                    break;
                }
                prop_assert!(scanner.position() > before);
                prop_assert!(scanner.position() <= source.len());
                steps += 1;
                prop_assert!(steps <= source.len());
            }
        }

        #[test]
        fn tokens_tile_the_source(source in "[a-z0-9 =+#é]{0,48}") {
            let reg = lexer_registry();
            let tokens = crate::tokenize(&reg, &source).expect("default policy never fails");
            let mut expected_start = 0;
            let mut rebuilt = String::new();
            for tok in &tokens {
                let span = tok.span().expect("only Matched/Skipped are returned");
                prop_assert_eq!(span.start, expected_start);
                expected_start = span.end;
                match tok {
                    Token::Matched { text, len, .. } => {
                        prop_assert!(*len > 0);
                        rebuilt.push_str(text);
                    }
                    Token::Skipped { ch, .. } => rebuilt.push(*ch),
                    Token::EndOfInput => prop_assert!(false, "EndOfInput in tokenize output"),
                }
            }
            prop_assert_eq!(rebuilt, source);
        }
    }
}
