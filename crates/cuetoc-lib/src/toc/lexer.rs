use crate::toc::error::{TocError, TocResult};
use std::fmt::{self, Display, Formatter};
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Str(String),
    Number(u64),
    /// `mm:ss:ff` literal, validated by the parser
    Time(String),
    LeftBrace,
    RightBrace,
    Colon,
    Comma,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "{word}"),
            Token::Str(text) => write!(f, "\"{text}\""),
            Token::Number(number) => write!(f, "{number}"),
            Token::Time(time) => write!(f, "{time}"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

/// Splits a TOC description into tokens, dropping whitespace and `//` comments.
pub fn tokenize(source: &str) -> TocResult<Vec<Spanned>> {
    let mut lexer = Lexer {
        chars: source.chars().peekable(),
        line: 1,
    };

    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

impl Lexer<'_> {
    fn next_token(&mut self) -> TocResult<Option<Spanned>> {
        self.skip_blank();

        let Some(&c) = self.chars.peek() else {
            return Ok(None);
        };
        let line = self.line;

        let token = match c {
            '{' => self.single(Token::LeftBrace),
            '}' => self.single(Token::RightBrace),
            ':' => self.single(Token::Colon),
            ',' => self.single(Token::Comma),
            '"' => self.string()?,
            '0'..='9' => self.number_or_time(line)?,
            c if c.is_ascii_alphabetic() || c == '_' => self.word(),
            _ => return Err(TocError::UnexpectedCharacter { line, character: c }),
        };

        Ok(Some(Spanned { token, line }))
    }

    fn skip_blank(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                self.line += 1;
                self.chars.next();
            } else if c.is_whitespace() {
                self.chars.next();
            } else if c == '/' {
                let mut lookahead = self.chars.clone();
                lookahead.next();
                if lookahead.peek() != Some(&'/') {
                    return;
                }
                while self.chars.peek().is_some_and(|c| *c != '\n') {
                    self.chars.next();
                }
            } else {
                return;
            }
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.chars.next();
        token
    }

    fn string(&mut self) -> TocResult<Token> {
        let line = self.line;
        self.chars.next();

        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(Token::Str(text)),
                Some('\\') => match self.chars.next() {
                    Some(escaped) => text.push(escaped),
                    None => return Err(TocError::UnterminatedString { line }),
                },
                Some('\n') | None => return Err(TocError::UnterminatedString { line }),
                Some(c) => text.push(c),
            }
        }
    }

    fn digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }
        digits
    }

    fn number_or_time(&mut self, line: usize) -> TocResult<Token> {
        let minutes = self.digits();

        // only `d:d:d` is a time, a lone `0:9` belongs to a language map
        let mut lookahead = self.chars.clone();
        let is_time = lookahead.next() == Some(':')
            && lookahead.next().is_some_and(|c| c.is_ascii_digit())
            && {
                while lookahead.peek().is_some_and(char::is_ascii_digit) {
                    lookahead.next();
                }
                lookahead.next() == Some(':')
                    && lookahead.next().is_some_and(|c| c.is_ascii_digit())
            };

        if is_time {
            self.chars.next();
            let seconds = self.digits();
            self.chars.next();
            let frames = self.digits();
            return Ok(Token::Time(format!("{minutes}:{seconds}:{frames}")));
        }

        minutes
            .parse::<u64>()
            .map(Token::Number)
            .map_err(|_| TocError::InvalidNumber {
                line,
                value: minutes,
            })
    }

    fn word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(&c) = self.chars.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            word.push(c);
            self.chars.next();
        }
        Token::Word(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn splits_statements_and_punctuation() {
        assert_eq!(
            tokens("FILE \"a.wav\" 0 04:17:52\nLANGUAGE_MAP { 0:9 }"),
            vec![
                Token::Word("FILE".to_string()),
                Token::Str("a.wav".to_string()),
                Token::Number(0),
                Token::Time("04:17:52".to_string()),
                Token::Word("LANGUAGE_MAP".to_string()),
                Token::LeftBrace,
                Token::Number(0),
                Token::Colon,
                Token::Number(9),
                Token::RightBrace,
            ]
        );
    }

    #[test]
    fn skips_comments_and_counts_lines() {
        let spanned = tokenize("// header\nCD_DA // mode\n\nTRACK AUDIO").unwrap();
        let lines: Vec<_> = spanned.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 4, 4]);
    }

    #[test]
    fn unescapes_quotes_in_strings() {
        assert_eq!(
            tokens(r#"TITLE "say \"hi\"""#),
            vec![
                Token::Word("TITLE".to_string()),
                Token::Str("say \"hi\"".to_string())
            ]
        );
    }

    #[test]
    fn byte_lists_are_numbers_and_commas() {
        assert_eq!(
            tokens("{1, 2}"),
            vec![
                Token::LeftBrace,
                Token::Number(1),
                Token::Comma,
                Token::Number(2),
                Token::RightBrace,
            ]
        );
    }

    #[test]
    fn reports_bad_input_with_line() {
        assert!(matches!(
            tokenize("CD_DA\nTITLE \"open\n"),
            Err(TocError::UnterminatedString { line: 2 })
        ));
        assert!(matches!(
            tokenize("\n\n@"),
            Err(TocError::UnexpectedCharacter {
                line: 3,
                character: '@'
            })
        ));
    }
}
