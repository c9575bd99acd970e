use proptest::prelude::*;
use reqtmpl::parse::{TokenKind, tokenize};

// Lines drawn from the characters the grammar cares about, plus filler.
fn line_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r#"[a-z #$`(){}"'\\]{0,40}"#).expect("valid regex")
}

fn ceiling_strategy() -> impl Strategy<Value = TokenKind> {
    prop_oneof![
        Just(TokenKind::Text),
        Just(TokenKind::Executable),
        Just(TokenKind::EnvVar),
    ]
}

proptest! {
    #[test]
    fn tokens_partition_the_line(line in line_strategy(), ceiling in ceiling_strategy()) {
        let out = tokenize(&line, ceiling);

        let mut cursor = 0;
        for token in &out.tokens {
            prop_assert_eq!(token.span.start, cursor);
            prop_assert!(!token.span.is_empty());
            prop_assert_eq!(&line[token.span.clone()], token.raw.as_str());
            cursor = token.span.end;
        }
        prop_assert_eq!(cursor, line.len());
    }

    #[test]
    fn nothing_follows_a_comment(line in line_strategy(), ceiling in ceiling_strategy()) {
        let out = tokenize(&line, ceiling);

        if let Some(pos) = out.tokens.iter().position(|t| t.kind == TokenKind::Comment) {
            prop_assert_eq!(pos, out.tokens.len() - 1);
            prop_assert!(out.error.is_none());
        }
    }

    #[test]
    fn error_token_iff_lex_error(line in line_strategy(), ceiling in ceiling_strategy()) {
        let out = tokenize(&line, ceiling);

        let last_is_error = out.tokens.last().is_some_and(|t| t.kind == TokenKind::Error);
        prop_assert_eq!(last_is_error, out.error.is_some());
        prop_assert!(
            out.tokens.iter().rev().skip(1).all(|t| t.kind != TokenKind::Error)
        );
    }

    #[test]
    fn kinds_above_ceiling_never_appear(line in line_strategy(), ceiling in ceiling_strategy()) {
        let out = tokenize(&line, ceiling);

        prop_assert!(out.tokens.iter().all(|t| t.kind <= ceiling));
    }

    #[test]
    fn plain_text_is_one_token(line in "[a-z ]{1,30}", ceiling in ceiling_strategy()) {
        let out = tokenize(&line, ceiling);

        prop_assert_eq!(out.tokens.len(), 1);
        prop_assert_eq!(out.tokens[0].kind, TokenKind::Text);
        prop_assert_eq!(&out.tokens[0].content, &line);
    }
}
