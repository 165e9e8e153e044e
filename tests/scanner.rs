#[cfg(test)]
mod scanner_tests {
    use pretty_assertions::assert_eq;

    use rox::error::{CollectingReporter, LoxError};
    use rox::scanner::*;
    use rox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    fn assert_token_matches(
        result: &Result<Token, LoxError>,
        expected_type: TokenType,
        expected_lexeme: &str,
    ) {
        match result {
            Ok(token) => {
                assert_eq!(
                    token.token_type, expected_type,
                    "Expected token type {:?}, got {:?}",
                    expected_type, token.token_type
                );
                assert_eq!(
                    token.lexeme, expected_lexeme,
                    "Expected lexeme '{}', got '{}'",
                    expected_lexeme, token.lexeme
                );
            }
            Err(e) => panic!("Expected token but got error: {}", e),
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_maximal_munch_operators() {
        assert_token_sequence(
            "! != = == < <= > >= / - ;",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::MINUS, "-"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02b_each_operator_alone() {
        let cases = [
            ("(", TokenType::LEFT_PAREN),
            (")", TokenType::RIGHT_PAREN),
            ("{", TokenType::LEFT_BRACE),
            ("}", TokenType::RIGHT_BRACE),
            (",", TokenType::COMMA),
            (".", TokenType::DOT),
            ("-", TokenType::MINUS),
            ("+", TokenType::PLUS),
            (";", TokenType::SEMICOLON),
            ("/", TokenType::SLASH),
            ("*", TokenType::STAR),
            ("!", TokenType::BANG),
            ("!=", TokenType::BANG_EQUAL),
            ("=", TokenType::EQUAL),
            ("==", TokenType::EQUAL_EQUAL),
            (">", TokenType::GREATER),
            (">=", TokenType::GREATER_EQUAL),
            ("<", TokenType::LESS),
            ("<=", TokenType::LESS_EQUAL),
        ];

        for (lexeme, kind) in cases {
            assert_token_sequence(lexeme, &[(kind, lexeme), (TokenType::EOF, "")]);
        }
    }

    #[test]
    fn test_scanner_03_keywords_match_whole_lexeme() {
        assert_token_sequence(
            "class classy orchid or _under fun9",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::IDENTIFIER, "_under"),
                (TokenType::IDENTIFIER, "fun9"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_comments_and_lines() {
        let tokens: Vec<Token> = Scanner::new("var a; // trailing (\n\nprint a;")
            .filter_map(Result::ok)
            .collect();

        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 3, 3, 3, 3]);
        assert_eq!(tokens[3].token_type, TokenType::PRINT);
    }

    #[test]
    fn test_scanner_05_number_literals() {
        let tokens: Vec<Token> = Scanner::new("123 3.25 7.").filter_map(Result::ok).collect();

        let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "NUMBER 123 123.0",
                "NUMBER 3.25 3.25",
                "NUMBER 7 7.0",
                "DOT . null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_scanner_06_string_literals_with_either_quote() {
        let tokens: Vec<Token> = Scanner::new("\"double\" 'single' \"multi\nline\"")
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens[0].to_string(), "STRING \"double\" double");
        assert_eq!(tokens[1].to_string(), "STRING 'single' single");
        assert_eq!(tokens[2].token_type, TokenType::STRING(String::new()));
        assert_eq!(tokens[2].line, 2);
        assert_eq!(tokens[3].line, 2);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        // Collect all results (both tokens and errors)
        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert_eq!(err.to_string(), "[line 1] Error: Unexpected character.");
        }
    }

    #[test]
    fn test_non_ascii_character_is_one_error() {
        let mut reporter = CollectingReporter::new();
        let tokens = scan("a é b", &mut reporter);

        assert_eq!(reporter.errors.len(), 1);
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["a", "b", ""]);
    }

    #[test]
    fn test_unterminated_string_reports_and_still_yields_token() {
        let results: Vec<_> = Scanner::new("print \"oops\nnever closed").collect();

        assert_eq!(results.len(), 4);
        assert_token_matches(&results[0], TokenType::PRINT, "print");

        match &results[1] {
            Err(e) => assert_eq!(e.to_string(), "[line 2] Error: Unterminated string."),
            Ok(t) => panic!("Expected error, got {}", t),
        }

        assert_token_matches(
            &results[2],
            TokenType::STRING(String::new()),
            "\"oops\nnever closed",
        );
        assert_token_matches(&results[3], TokenType::EOF, "");
    }

    #[test]
    fn test_scan_always_ends_with_single_eof() {
        let mut reporter = CollectingReporter::new();

        for source in ["", "   \n\t", "// only a comment", "@"] {
            let tokens = scan(source, &mut reporter);
            let eofs = tokens
                .iter()
                .filter(|t| t.token_type == TokenType::EOF)
                .count();

            assert_eq!(eofs, 1, "source {:?}", source);
            assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::EOF));
        }

        assert_eq!(reporter.messages(), vec!["[line 1] Error: Unexpected character."]);
    }

    #[test]
    fn test_scanner_is_fused() {
        let mut scanner = Scanner::new("1");

        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_tokens_serialize_to_json() {
        let token = Scanner::new("\"hi\"")
            .filter_map(Result::ok)
            .next()
            .expect("string token");

        let json = serde_json::to_value(&token).expect("serialize");
        assert_eq!(json["lexeme"], "\"hi\"");
        assert_eq!(json["line"], 1);
    }
}
