use super::{lex, Error, Token, MAX_LINE_NUMBER};

/// One line as typed at the prompt.
#[derive(Debug, PartialEq)]
pub enum Line {
    Empty,
    /// Numbered text destined for the program store. Never executed here.
    Indirect(u16, String),
    /// A bare line number, which removes that line.
    Delete(u16),
    /// Anything else runs immediately.
    Direct(Vec<Token>),
}

impl Line {
    pub fn new(s: &str) -> Result<Line, Error> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Line::Empty);
        }
        let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return Ok(Line::Direct(lex(s)));
        }
        let rest = &s[digits..];
        let number = || match s[..digits].parse::<u16>() {
            Ok(n) if n > 0 && n <= MAX_LINE_NUMBER => Ok(n),
            _ => Err(error!(Overflow; "INVALID LINE NUMBER")),
        };
        if rest.is_empty() {
            return Ok(Line::Delete(number()?));
        }
        match rest.chars().next() {
            Some(c) if c.is_whitespace() => Ok(Line::Indirect(number()?, rest.trim().to_string())),
            _ => Ok(Line::Direct(lex(s))),
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Line::Direct(_))
    }
}
