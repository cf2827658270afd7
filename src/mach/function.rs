use super::Val;
use crate::error;
use crate::lang::{ast, Error};
use rand::Rng;

type Result<T> = std::result::Result<T, Error>;

pub struct Function {}

impl Function {
    pub fn call<R: Rng>(func: ast::Function, arg: Val, rng: &mut R) -> Result<Val> {
        use ast::Function::*;
        let n = arg.number()?;
        match func {
            Sin => Ok(Val::Number(n.sin())),
            Cos => Ok(Val::Number(n.cos())),
            Tan => Ok(Val::Number(n.tan())),
            Sqr => Function::sqr(n),
            Rnd => Ok(Val::Number(rng.gen::<f64>())),
            Int => Ok(Val::Number(n.floor())),
            Abs => Ok(Val::Number(n.abs())),
        }
    }

    fn sqr(n: f64) -> Result<Val> {
        if n < 0.0 {
            Err(error!(IllegalFunctionCall))
        } else {
            Ok(Val::Number(n.sqrt()))
        }
    }
}
