#![forbid(unsafe_code)]

mod lexer;
mod token;

pub use lexer::{LexError, Lexer};
pub use token::{AssignOp, Token, TokenKind};

/// Lex `src` into tokens terminated by `Eof`.
pub fn lex(src: &str) -> Result<Vec<Token>, LexError> {
	Lexer::new(src).lex()
}

#[cfg(test)]
mod tests {
	use super::*;
	use num_bigint::BigInt;

	fn kinds(src: &str) -> Vec<TokenKind> {
		lex(src).unwrap().into_iter().map(|t| t.kind).collect()
	}

	#[test]
	fn lex_int_literals_with_bases_and_underscores() {
		let src = "a := 1_000\nb := 0b1010_0110\nc := 0o755\nd := 0xDEAD_BEEF\ne := 0XFF\n";
		let ints: Vec<BigInt> = kinds(src)
			.into_iter()
			.filter_map(|k| match k {
				TokenKind::Int(n) => Some(n),
				_ => None,
			})
			.collect();
		let want: Vec<BigInt> = [1000u64, 0b1010_0110, 0o755, 0xDEAD_BEEF, 0xFF]
			.into_iter()
			.map(BigInt::from)
			.collect();
		assert_eq!(ints, want);
	}

	#[test]
	fn lex_ints_beyond_u64() {
		let toks = kinds("123456789012345678901234567890");
		let TokenKind::Int(n) = &toks[0] else {
			panic!("expected int, got {:?}", toks[0]);
		};
		assert_eq!(n.to_string(), "123456789012345678901234567890");
	}

	#[test]
	fn lex_rejects_bad_int_underscore_placement() {
		for src in ["x := 1__0\n", "x := 0x__1\n", "x := 0x_\n", "x := 0b1_\n"] {
			let err = lex(src).unwrap_err();
			assert!(err.message.contains("invalid integer literal"), "{src}: {}", err.message);
		}
	}

	#[test]
	fn lex_allows_underscore_after_radix_prefix() {
		let toks = kinds("0x_1F 0b_1 0o_7");
		assert_eq!(toks[0], TokenKind::Int(BigInt::from(0x1F)));
		assert_eq!(toks[1], TokenKind::Int(BigInt::from(1)));
		assert_eq!(toks[2], TokenKind::Int(BigInt::from(7)));
	}

	#[test]
	fn lex_floats() {
		let toks = kinds("1.5 .25 2. 1e3");
		let floats: Vec<String> = toks
			.iter()
			.filter_map(|k| match k {
				TokenKind::Float(x) => Some(x.normalized().to_string()),
				_ => None,
			})
			.collect();
		assert_eq!(floats.len(), 4);
		assert_eq!(floats[0], "1.5");
		assert_eq!(floats[1], "0.25");
	}

	#[test]
	fn lex_string_escapes_are_strict() {
		let toks = kinds("s := \"a\\n\\t\\r\\\\\\\"\"\n");
		let s = toks
			.iter()
			.find_map(|k| match k {
				TokenKind::String { value, .. } => Some(value.clone()),
				_ => None,
			})
			.unwrap();
		assert_eq!(s, "a\n\t\r\\\"");

		let err = lex("s := \"\\q\"\n").unwrap_err();
		assert!(err.message.contains("invalid string literal"));
	}

	#[test]
	fn unterminated_strings_are_reported() {
		let err = lex("s := \"abc").unwrap_err();
		assert_eq!(err.message, "unterminated string literal");
		let err = lex("s := \"abc\nt := 1").unwrap_err();
		assert_eq!(err.message, "unterminated string literal");
		let err = lex("s := `abc").unwrap_err();
		assert_eq!(err.message, "unterminated raw string literal");
	}

	#[test]
	fn lex_keeps_raw_text_of_strings() {
		let toks = kinds("`json:\"a\"` \"x\\ty\"");
		assert_eq!(
			toks[0],
			TokenKind::String {
				value: "json:\"a\"".to_string(),
				raw: "json:\"a\"".to_string(),
			}
		);
		assert_eq!(
			toks[1],
			TokenKind::String {
				value: "x\ty".to_string(),
				raw: "x\\ty".to_string(),
			}
		);
	}

	#[test]
	fn lex_keywords_and_operators() {
		let toks = kinds("methodik x := <- ... &^= [|] ++");
		assert_eq!(
			toks,
			vec![
				TokenKind::KwMethodik,
				TokenKind::Ident("x".to_string()),
				TokenKind::Define,
				TokenKind::Arrow,
				TokenKind::Ellipsis,
				TokenKind::OpAssign(AssignOp::AndNot),
				TokenKind::TableBracket,
				TokenKind::Inc,
				TokenKind::Semicolon,
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn semicolons_are_inserted_after_line_enders() {
		let toks = kinds("x\nf(\n1,\n)\nreturn\n{\n}\n");
		let semis = toks.iter().filter(|k| **k == TokenKind::Semicolon).count();
		// after `x`, `)`, `return` and `}`
		assert_eq!(semis, 4);
		// no semicolon after `(` or `,`
		assert_eq!(toks[3], TokenKind::LParen);
		assert_eq!(toks[4], TokenKind::Int(BigInt::from(1)));
		assert_eq!(toks[5], TokenKind::Comma);
		assert_eq!(toks[6], TokenKind::RParen);
	}

	#[test]
	fn comments_are_skipped() {
		let toks = kinds("f(x, // comment\ny) /* inline */ + 1");
		assert_eq!(toks[3], TokenKind::Comma);
		assert_eq!(toks[4], TokenKind::Ident("y".to_string()));
		assert_eq!(toks[6], TokenKind::Plus);
	}

	#[test]
	fn multiline_block_comment_breaks_the_line() {
		let toks = kinds("x /* a\nb */ y");
		assert_eq!(toks[1], TokenKind::Semicolon);
	}

	#[test]
	fn lex_shell_words_keep_quoting() {
		let toks = kinds(r#"($$ echo "a b \"" 'c \' \d a${VAL}c 2>&1 $$)"#);
		let words: Vec<String> = toks
			.iter()
			.filter_map(|k| match k {
				TokenKind::ShellWord(w) => Some(w.clone()),
				_ => None,
			})
			.collect();
		assert_eq!(
			words,
			vec![r#"echo"#, r#""a b \"""#, r#"'c \'"#, r#"\d"#, "a${VAL}c", "2", "1"]
		);
		assert!(toks.contains(&TokenKind::GreaterAnd));
		assert!(toks.contains(&TokenKind::ShellClose));
	}

	#[test]
	fn lex_shell_newlines_are_tokens() {
		let toks = kinds("$$ls\nwc$$");
		assert_eq!(
			toks,
			vec![
				TokenKind::ShellOpen,
				TokenKind::ShellWord("ls".to_string()),
				TokenKind::ShellNewline,
				TokenKind::ShellWord("wc".to_string()),
				TokenKind::ShellClose,
				TokenKind::Semicolon,
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn unterminated_shell_is_an_error() {
		let err = lex("$$ ls").unwrap_err();
		assert!(err.message.contains("unterminated shell escape"));
	}

	#[test]
	fn unknown_token_is_reported() {
		let err = lex("\\").unwrap_err();
		assert!(err.message.contains("unknown token: '\\'"), "{}", err.message);
	}
}
