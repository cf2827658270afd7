use super::{Function, Operation, Val, Var};
use crate::lang::{ast::Expression, Error};
use rand::Rng;

type Result<T> = std::result::Result<T, Error>;

/// Walks an expression tree against the current variables.
pub struct Evaluator<'a, R> {
    pub var: &'a Var,
    pub rng: &'a mut R,
}

impl<'a, R: Rng> Evaluator<'a, R> {
    pub fn new(var: &'a Var, rng: &'a mut R) -> Evaluator<'a, R> {
        Evaluator { var, rng }
    }

    pub fn eval(&mut self, expr: &Expression) -> Result<Val> {
        match expr {
            Expression::Number(n) => Ok(Val::Number(*n)),
            Expression::String(s) => Ok(Val::String(s.clone())),
            Expression::Var(name) => Ok(self.var.fetch(name)),
            Expression::Array(name, index) => {
                let index = self.eval(index)?;
                self.var.fetch_array(name, index)
            }
            Expression::Function(func, arg) => {
                let arg = self.eval(arg)?;
                Function::call(*func, arg, &mut *self.rng)
            }
            Expression::Negation(expr) => Operation::negate(self.eval(expr)?),
            Expression::Power(lhs, rhs) => self.binary(lhs, rhs, Operation::power),
            Expression::Multiply(lhs, rhs) => self.binary(lhs, rhs, Operation::multiply),
            Expression::Divide(lhs, rhs) => self.binary(lhs, rhs, Operation::divide),
            Expression::Add(lhs, rhs) => self.binary(lhs, rhs, Operation::sum),
            Expression::Subtract(lhs, rhs) => self.binary(lhs, rhs, Operation::subtract),
        }
    }

    fn binary(
        &mut self,
        lhs: &Expression,
        rhs: &Expression,
        op: fn(Val, Val) -> Result<Val>,
    ) -> Result<Val> {
        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;
        op(lhs, rhs)
    }
}
