use super::token::*;

pub fn lex(s: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = BasicLexer {
        chars: s.chars().peekable(),
    }
    .collect();
    collapse_relational(&mut tokens);
    tokens
}

fn is_basic_whitespace(c: char) -> bool {
    c.is_whitespace()
}

fn is_punctuation(c: char) -> bool {
    Token::from_char(c).is_some()
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> BasicLexer<'a> {
    fn string(&mut self) -> Token {
        let mut s = String::new();
        self.chars.next();
        for ch in self.chars.by_ref() {
            if ch == '"' {
                break;
            }
            s.push(ch);
        }
        Token::Literal(Literal::String(s))
    }

    fn word(&mut self) -> Token {
        let mut s = String::new();
        while let Some(&pk) = self.chars.peek() {
            if pk == '"' || is_basic_whitespace(pk) || is_punctuation(pk) {
                break;
            }
            s.push(pk);
            self.chars.next();
        }
        Token::from_word(&s)
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pk = *self.chars.peek()?;
            if is_basic_whitespace(pk) {
                self.chars.next();
                continue;
            }
            if pk == '"' {
                return Some(self.string());
            }
            if let Some(token) = Token::from_char(pk) {
                self.chars.next();
                return Some(token);
            }
            return Some(self.word());
        }
    }
}

fn collapse_relational(tokens: &mut Vec<Token>) {
    use Operator::*;
    let mut locs: Vec<(usize, Token)> = vec![];
    let mut tokens_iter = tokens.windows(2).enumerate();
    while let Some((index, tt)) = tokens_iter.next() {
        let pair = match (&tt[0], &tt[1]) {
            (Token::Operator(Less), Token::Operator(Equal)) => LessEqual,
            (Token::Operator(Greater), Token::Operator(Equal)) => GreaterEqual,
            (Token::Operator(Less), Token::Operator(Greater)) => NotEqual,
            _ => continue,
        };
        locs.push((index, Token::Operator(pair)));
        tokens_iter.next();
    }
    while let Some((index, token)) = locs.pop() {
        tokens.splice(index..index + 2, Some(token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_text_is_one_token() {
        let t = lex(r#"PRINT "A, B;C" ;X"#);
        assert_eq!(
            t,
            vec![
                Token::Word(Word::Print),
                Token::Literal(Literal::String("A, B;C".to_string())),
                Token::Semicolon,
                Token::Ident("X".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let t = lex(r#"PRINT "OPEN"#);
        assert_eq!(t[1], Token::Literal(Literal::String("OPEN".to_string())));
    }

    #[test]
    fn test_collapse() {
        let t = lex("A<=B<>C>=D<E");
        assert_eq!(t[1], Token::Operator(Operator::LessEqual));
        assert_eq!(t[3], Token::Operator(Operator::NotEqual));
        assert_eq!(t[5], Token::Operator(Operator::GreaterEqual));
        assert_eq!(t[7], Token::Operator(Operator::Less));
        assert_eq!(t.len(), 9);
    }
}
