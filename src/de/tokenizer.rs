use crate::syntax::{is_reserved, is_skip};
use crate::Error;
use log::trace;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum TokenKind {
    Identifier,
    ReservedSymbol,
    BoolLiteral,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    BinaryLiteral,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Token<'de> {
    pub(crate) kind: TokenKind,
    pub(crate) text: &'de [u8],
    pub(crate) offset: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum LiteralState {
    None,
    Opened,
    Closed,
}

// possibility space of a multi-byte lexeme
const IDENTIFIER: u8 = 0b0001;
const INT: u8 = 0b0010;
const FLOAT: u8 = 0b0100;
const BINARY: u8 = 0b1000;

pub(crate) struct Tokenizer<'de> {
    input: &'de [u8],
    pos: usize,
    literal: LiteralState,
}

impl<'de> Tokenizer<'de> {
    pub(crate) fn new(input: &'de [u8]) -> Self {
        Tokenizer {
            input,
            pos: 0,
            literal: LiteralState::None,
        }
    }

    /// Returns the input following the last token.
    pub(crate) fn remaining(&self) -> &'de [u8] {
        &self.input[self.pos..]
    }

    pub(crate) fn next_token(&mut self) -> Result<Option<Token<'de>>, Error> {
        let token = match self.literal {
            LiteralState::Opened => self.string_literal()?,
            _ => match self.lexeme()? {
                Some(token) => token,
                None => return Ok(None),
            },
        };

        trace!(
            "token {:?} {:?} at {}",
            token.kind,
            bstr::BStr::new(token.text),
            token.offset
        );
        Ok(Some(token))
    }

    fn string_literal(&mut self) -> Result<Token<'de>, Error> {
        let start = self.pos;
        let len = memchr::memchr(b'"', &self.input[start..])
            .ok_or_else(|| Error::eof_while_parsing_string(start))?;

        self.pos += len;
        self.literal = LiteralState::Closed;

        Ok(Token {
            kind: TokenKind::StringLiteral,
            text: &self.input[start..self.pos],
            offset: start,
        })
    }

    fn lexeme(&mut self) -> Result<Option<Token<'de>>, Error> {
        while self.pos < self.input.len() && is_skip(self.input[self.pos]) {
            self.pos += 1;
        }

        let start = self.pos;
        let first = match self.input.get(start) {
            Some(&b) => b,
            None => return Ok(None),
        };

        if is_reserved(first) {
            self.pos += 1;
            if first == b'"' {
                self.literal = match self.literal {
                    LiteralState::None => LiteralState::Opened,
                    _ => LiteralState::None,
                };
            }

            return Ok(Some(Token {
                kind: TokenKind::ReservedSymbol,
                text: &self.input[start..self.pos],
                offset: start,
            }));
        }

        while self.pos < self.input.len()
            && !is_skip(self.input[self.pos])
            && !is_reserved(self.input[self.pos])
        {
            self.pos += 1;
        }

        let text = &self.input[start..self.pos];
        let kind = classify(text, start)?;

        Ok(Some(Token {
            kind,
            text,
            offset: start,
        }))
    }
}

fn classify(text: &[u8], offset: usize) -> Result<TokenKind, Error> {
    if let &[b] = text {
        return match b {
            b't' | b'f' => Ok(TokenKind::BoolLiteral),
            b'0'..=b'9' => Ok(TokenKind::IntLiteral),
            b'-' | b'.' => Err(Error::tokenizer_failed(
                offset,
                "a lone '-' or '.' is not a value",
            )),
            b if is_reserved(b) => Ok(TokenKind::ReservedSymbol),
            _ => Ok(TokenKind::Identifier),
        };
    }

    let (mut mask, mut dash, mut dot) = match text[0] {
        b'b' => (BINARY | IDENTIFIER, false, false),
        b'0'..=b'9' => (INT | FLOAT, false, false),
        b'-' => (INT | FLOAT, true, false),
        b'.' => (FLOAT, false, true),
        _ => (IDENTIFIER, false, false),
    };

    for &b in &text[1..] {
        match b {
            b'0'..=b'9' => {}
            b'.' => {
                if dot {
                    return Err(Error::tokenizer_failed(offset, "more than one '.'"));
                }
                dot = true;
                mask &= FLOAT;
            }
            b'-' => {
                if dash {
                    return Err(Error::tokenizer_failed(offset, "more than one '-'"));
                }
                dash = true;
                mask &= !IDENTIFIER;
            }
            _ => mask &= IDENTIFIER,
        }

        if mask == 0 {
            return Err(Error::tokenizer_failed(offset, "unrecognized token"));
        }
    }

    if mask & IDENTIFIER != 0 {
        Ok(TokenKind::Identifier)
    } else if mask & INT != 0 {
        Ok(TokenKind::IntLiteral)
    } else if mask & FLOAT != 0 {
        Ok(TokenKind::FloatLiteral)
    } else {
        Ok(TokenKind::BinaryLiteral)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;
    use test_log::test;

    fn tokens(input: &[u8]) -> Result<Vec<(TokenKind, &str)>, Error> {
        let mut tokenizer = Tokenizer::new(input);
        let mut out = vec![];
        while let Some(token) = tokenizer.next_token()? {
            out.push((token.kind, std::str::from_utf8(token.text).unwrap()));
        }
        Ok(out)
    }

    fn kind(lexeme: &[u8]) -> Result<TokenKind, Error> {
        classify(lexeme, 0)
    }

    #[test]
    fn classification() {
        assert_eq!(kind(b"value").unwrap(), TokenKind::Identifier);
        assert_eq!(kind(b"a").unwrap(), TokenKind::Identifier);
        assert_eq!(kind(b"b").unwrap(), TokenKind::Identifier);
        assert_eq!(kind(b"bar").unwrap(), TokenKind::Identifier);
        assert_eq!(kind(b"b12").unwrap(), TokenKind::Identifier);
        assert_eq!(kind(b"t").unwrap(), TokenKind::BoolLiteral);
        assert_eq!(kind(b"f").unwrap(), TokenKind::BoolLiteral);
        assert_eq!(kind(b"7").unwrap(), TokenKind::IntLiteral);
        assert_eq!(kind(b"228").unwrap(), TokenKind::IntLiteral);
        assert_eq!(kind(b"-17").unwrap(), TokenKind::IntLiteral);
        assert_eq!(kind(b"5-1").unwrap(), TokenKind::IntLiteral);
        assert_eq!(kind(b"0.5").unwrap(), TokenKind::FloatLiteral);
        assert_eq!(kind(b"-2.25").unwrap(), TokenKind::FloatLiteral);
        assert_eq!(kind(b".5").unwrap(), TokenKind::FloatLiteral);
        assert_eq!(kind(b"b0-2").unwrap(), TokenKind::BinaryLiteral);
        assert_eq!(kind(b"b10-200").unwrap(), TokenKind::BinaryLiteral);
    }

    #[test]
    fn classification_failures() {
        for lexeme in &[
            &b"1abc"[..],
            b"a-b",
            b"ab-1",
            b"1-b",
            b"1.2.3",
            b"--1",
            b"a.b",
            b"b1.2",
            b"-",
            b".",
        ] {
            let err = kind(lexeme).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TokenizerFailed);
        }
    }

    #[test]
    fn splits_on_reserved_symbols() {
        let actual = tokens(b"list [1,2,{c 3}]").unwrap();
        let expected = vec![
            (TokenKind::Identifier, "list"),
            (TokenKind::ReservedSymbol, "["),
            (TokenKind::IntLiteral, "1"),
            (TokenKind::ReservedSymbol, ","),
            (TokenKind::IntLiteral, "2"),
            (TokenKind::ReservedSymbol, ","),
            (TokenKind::ReservedSymbol, "{"),
            (TokenKind::Identifier, "c"),
            (TokenKind::IntLiteral, "3"),
            (TokenKind::ReservedSymbol, "}"),
            (TokenKind::ReservedSymbol, "]"),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn string_literals_are_verbatim() {
        let actual = tokens(b"s \"a, [b] {c} @ d\"\r\n e \"\"").unwrap();
        let expected = vec![
            (TokenKind::Identifier, "s"),
            (TokenKind::ReservedSymbol, "\""),
            (TokenKind::StringLiteral, "a, [b] {c} @ d"),
            (TokenKind::ReservedSymbol, "\""),
            (TokenKind::Identifier, "e"),
            (TokenKind::ReservedSymbol, "\""),
            (TokenKind::StringLiteral, ""),
            (TokenKind::ReservedSymbol, "\""),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn unterminated_string() {
        let err = tokens(b"s \"abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EofWhileParsingString);
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn error_offsets() {
        let err = tokens(b"ok 1\n  bad 1abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TokenizerFailed);
        assert_eq!(err.offset(), Some(11));
    }

    #[test]
    fn remaining_after_blob_marker() {
        let mut tokenizer = Tokenizer::new(b"x b0-2\r\n@hi");
        tokenizer.next_token().unwrap();
        tokenizer.next_token().unwrap();
        let at = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(at.text, b"@");
        assert_eq!(tokenizer.remaining(), b"hi");
    }

    #[test]
    fn empty_input() {
        assert!(tokens(b"").unwrap().is_empty());
        assert!(tokens(b" \r\n\t ").unwrap().is_empty());
    }
}
