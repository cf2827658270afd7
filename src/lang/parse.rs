use super::{ast::*, token::*, Error};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Parses a complete expression; trailing tokens are a syntax error.
pub fn parse(tokens: &[Token]) -> Result<Expression> {
    let mut parse = Parser {
        token_stream: tokens.iter().peekable(),
    };
    let expr = parse.expression()?;
    match parse.next() {
        None => Ok(expr),
        Some(_) => Err(error!(SyntaxError; "EXPECTED END OF EXPRESSION")),
    }
}

/// Splits condition tokens around their single relational operator.
/// Returns `None` when there is no operator or more than one.
pub fn split_condition(tokens: &[Token]) -> Option<(&[Token], Operator, &[Token])> {
    let mut found = None;
    for (index, token) in tokens.iter().enumerate() {
        if let Token::Operator(op) = token {
            if op.is_relational() {
                if found.is_some() {
                    return None;
                }
                found = Some((index, *op));
            }
        }
    }
    let (index, op) = found?;
    Some((&tokens[..index], op, &tokens[index + 1..]))
}

pub fn is_identifier(s: &str) -> bool {
    let body = s.strip_suffix('$').unwrap_or(s);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

struct Parser<'a> {
    token_stream: std::iter::Peekable<std::slice::Iter<'a, Token>>,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Option<&'a Token> {
        self.token_stream.next()
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        self.token_stream.peek()
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = match this.next() {
                Some(Token::LParen) => {
                    let expr = this.expression()?;
                    this.expect(Token::RParen)?;
                    expr
                }
                Some(Token::Operator(Operator::Minus)) => {
                    Expression::Negation(Box::new(parse(this, UNARY_PRECEDENCE)?))
                }
                Some(Token::Operator(Operator::Plus)) => parse(this, UNARY_PRECEDENCE)?,
                Some(Token::Ident(name)) => this.ident(name)?,
                Some(Token::Literal(l)) => Expression::for_literal(l)?,
                _ => return Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
            };
            loop {
                let op = match this.peek() {
                    Some(Token::Operator(op)) if !op.is_relational() => *op,
                    _ => break,
                };
                let op_precedence = Expression::op_precedence(&op);
                if op_precedence < precedence {
                    break;
                }
                this.next();
                let rhs = if op == Operator::Caret {
                    parse(this, op_precedence)?
                } else {
                    parse(this, op_precedence + 1)?
                };
                lhs = Expression::for_binary_op(&op, lhs, rhs);
            }
            Ok(lhs)
        }
        parse(self, 0)
    }

    fn ident(&mut self, name: &str) -> Result<Expression> {
        if !is_identifier(name) {
            return Err(error!(SyntaxError; "EXPECTED EXPRESSION"));
        }
        if let Some(Token::LParen) = self.peek() {
            self.next();
            let arg = self.expression()?;
            self.expect(Token::RParen)?;
            return Ok(match Function::from_name(name) {
                Some(func) => Expression::Function(func, Box::new(arg)),
                None => Expression::Array(Rc::from(name), Box::new(arg)),
            });
        }
        Ok(Expression::Var(Rc::from(name)))
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
                _ => "UNEXPECTED TOKEN",
            }
        ))
    }
}

const UNARY_PRECEDENCE: usize = 25;

impl Expression {
    fn for_binary_op(op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Plus => Expression::Add(lhs, rhs),
            Minus => Expression::Subtract(lhs, rhs),
            Multiply => Expression::Multiply(lhs, rhs),
            Divide => Expression::Divide(lhs, rhs),
            Caret => Expression::Power(lhs, rhs),
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                unreachable!("relational operators stop the expression")
            }
        }
    }

    fn op_precedence(op: &Operator) -> usize {
        use Operator::*;
        match op {
            Plus | Minus => 10,
            Multiply | Divide => 20,
            Caret => 30,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 0,
        }
    }

    fn for_literal(lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Number(s) => match s.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Expression::Number(n)),
                Ok(_) => Err(error!(Overflow)),
                Err(_) => Err(error!(SyntaxError; "INVALID NUMBER")),
            },
            Literal::String(s) => Ok(Expression::String(Rc::from(s.as_str()))),
        }
    }
}
