use crate::error;
use crate::lang::Error;
use std::rc::Rc;

/// A scalar: every variable holds either a number or text.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    String(Rc<str>),
}

impl Default for Val {
    fn default() -> Self {
        Val::Number(0.0)
    }
}

impl Val {
    /// Reads typed input: fully numeric text becomes a number.
    pub fn from_input(s: &str) -> Val {
        let s = s.trim();
        match s.parse::<f64>() {
            Ok(n) if !s.is_empty() && n.is_finite() => Val::Number(n),
            _ => Val::String(s.into()),
        }
    }

    pub fn number(&self) -> Result<f64, Error> {
        match self {
            Val::Number(n) => Ok(*n),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl From<f64> for Val {
    fn from(n: f64) -> Self {
        Val::Number(n)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Self {
        Val::String(s.into())
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::String(s) => write!(f, "{}", s),
            Val::Number(n) if *n == 0.0 => write!(f, "0"),
            Val::Number(n) => write!(f, "{}", n),
        }
    }
}
