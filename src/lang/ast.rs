use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    String(Rc<str>),
    Var(Rc<str>),
    Array(Rc<str>, Box<Expression>),
    Function(Function, Box<Expression>),
    Negation(Box<Expression>),
    Power(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
}

/// The closed set of built-in functions, each taking one argument.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sqr,
    Rnd,
    Int,
    Abs,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Function> {
        use Function::*;
        Some(match name {
            "SIN" => Sin,
            "COS" => Cos,
            "TAN" => Tan,
            "SQR" => Sqr,
            "RND" => Rnd,
            "INT" => Int,
            "ABS" => Abs,
            _ => return None,
        })
    }
}
