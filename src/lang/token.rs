#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(String),
    LParen,
    RParen,
    Comma,
    Semicolon,
}

impl Token {
    pub fn from_char(ch: char) -> Option<Token> {
        use Operator::*;
        Some(match ch {
            '+' => Token::Operator(Plus),
            '-' => Token::Operator(Minus),
            '*' => Token::Operator(Multiply),
            '/' => Token::Operator(Divide),
            '^' => Token::Operator(Caret),
            '=' => Token::Operator(Equal),
            '<' => Token::Operator(Less),
            '>' => Token::Operator(Greater),
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            _ => return None,
        })
    }

    /// Classifies an accumulated run of non-punctuation characters.
    pub fn from_word(s: &str) -> Token {
        let upper = s.to_ascii_uppercase();
        if let Some(word) = Word::from_str(&upper) {
            return Token::Word(word);
        }
        let numeric_start = upper
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit() || c == '.');
        if numeric_start && upper.parse::<f64>().is_ok() {
            return Token::Literal(Literal::Number(upper));
        }
        Token::Ident(upper)
    }

    pub fn is_word(&self, word: Word) -> bool {
        matches!(self, Token::Word(w) if *w == word)
    }

    pub fn is_relational(&self) -> bool {
        match self {
            Token::Operator(op) => op.is_relational(),
            _ => false,
        }
    }

    /// A token that can be read as a line number.
    pub fn line_number(&self) -> Option<u16> {
        match self {
            Token::Literal(Literal::Number(s)) if s.chars().all(|c| c.is_ascii_digit()) => {
                s.parse::<u16>().ok()
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Number(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Dim,
    End,
    For,
    Gosub,
    Goto,
    If,
    Input,
    Let,
    List,
    New,
    Next,
    Print,
    Return,
    Run,
    Then,
    To,
}

impl Word {
    pub fn from_str(s: &str) -> Option<Word> {
        use Word::*;
        Some(match s {
            "DIM" => Dim,
            "END" => End,
            "FOR" => For,
            "GOSUB" => Gosub,
            "GOTO" => Goto,
            "IF" => If,
            "INPUT" => Input,
            "LET" => Let,
            "LIST" => List,
            "NEW" => New,
            "NEXT" => Next,
            "PRINT" => Print,
            "RETURN" => Return,
            "RUN" => Run,
            "THEN" => Then,
            "TO" => To,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        let s = match self {
            Dim => "DIM",
            End => "END",
            For => "FOR",
            Gosub => "GOSUB",
            Goto => "GOTO",
            If => "IF",
            Input => "INPUT",
            Let => "LET",
            List => "LIST",
            New => "NEW",
            Next => "NEXT",
            Print => "PRINT",
            Return => "RETURN",
            Run => "RUN",
            Then => "THEN",
            To => "TO",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Operator {
    pub fn is_relational(&self) -> bool {
        use Operator::*;
        matches!(
            self,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual
        )
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        let s = match self {
            Caret => "^",
            Multiply => "*",
            Divide => "/",
            Plus => "+",
            Minus => "-",
            Equal => "=",
            NotEqual => "<>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
        };
        write!(f, "{}", s)
    }
}
