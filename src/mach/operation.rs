use super::Val;
use crate::error;
use crate::lang::{Error, Operator};

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Number(n) => Ok(Number(-n)),
            String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Number(l), Number(r)) => Operation::finite(l + r),
            (String(l), String(r)) => Ok(String((l.to_string() + &r).into())),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::finite(lhs.number()? - rhs.number()?)
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::finite(lhs.number()? * rhs.number()?)
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = (lhs.number()?, rhs.number()?);
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Operation::finite(l / r)
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = (lhs.number()?, rhs.number()?);
        if l == 0.0 && r < 0.0 {
            return Err(error!(DivisionByZero));
        }
        let n = l.powf(r);
        if n.is_nan() {
            return Err(error!(IllegalFunctionCall));
        }
        Operation::finite(n)
    }

    fn finite(n: f64) -> Result<Val> {
        if n.is_finite() {
            Ok(Val::Number(n))
        } else {
            Err(error!(Overflow))
        }
    }

    /// Applies a relational operator. Numbers compare with numbers and
    /// text with text.
    pub fn compare(op: Operator, lhs: Val, rhs: Val) -> Result<bool> {
        use Operator::*;
        match op {
            Equal => Operation::equal_bool(lhs, rhs),
            NotEqual => Ok(!Operation::equal_bool(lhs, rhs)?),
            Less => Operation::less_bool(lhs, rhs),
            Greater => Operation::less_bool(rhs, lhs),
            LessEqual => Ok(!Operation::less_bool(rhs, lhs)?),
            GreaterEqual => Ok(!Operation::less_bool(lhs, rhs)?),
            Plus | Minus | Multiply | Divide | Caret => {
                Err(error!(SyntaxError; "EXPECTED RELATIONAL OPERATOR"))
            }
        }
    }

    fn equal_bool(lhs: Val, rhs: Val) -> Result<bool> {
        use Val::*;
        match (lhs, rhs) {
            (Number(l), Number(r)) => Ok(l == r),
            (String(l), String(r)) => Ok(l == r),
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn less_bool(lhs: Val, rhs: Val) -> Result<bool> {
        use Val::*;
        match (lhs, rhs) {
            (Number(l), Number(r)) => Ok(l < r),
            (String(l), String(r)) => Ok(l < r),
            _ => Err(error!(TypeMismatch)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        assert_eq!(Operation::sum(1.0.into(), 2.0.into()), Ok(Val::Number(3.0)));
        assert_eq!(Operation::sum("A".into(), "B".into()), Ok(Val::from("AB")));
        assert!(Operation::sum("A".into(), 1.0.into()).is_err());
    }

    #[test]
    fn test_divide_by_zero() {
        assert!(Operation::divide(1.0.into(), 0.0.into()).is_err());
        assert!(Operation::power(0.0.into(), (-1.0).into()).is_err());
    }

    #[test]
    fn test_compare() {
        use Operator::*;
        assert_eq!(Operation::compare(LessEqual, 2.0.into(), 2.0.into()), Ok(true));
        assert_eq!(Operation::compare(NotEqual, 2.0.into(), 2.0.into()), Ok(false));
        assert_eq!(Operation::compare(Greater, "B".into(), "A".into()), Ok(true));
        assert_eq!(
            Operation::compare(Equal, (0.1 + 0.2).into(), 0.3.into()),
            Ok(false)
        );
        assert_eq!(Operation::compare(Equal, (1e-17).into(), 0.0.into()), Ok(false));
        assert!(Operation::compare(Equal, "1".into(), 1.0.into()).is_err());
    }
}
