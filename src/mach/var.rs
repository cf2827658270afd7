use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
    dims: HashMap<Rc<str>, Vec<f64>>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.dims.clear();
    }

    /// Unset variables read as 0.
    pub fn fetch(&self, var_name: &str) -> Val {
        match self.vars.get(var_name) {
            Some(val) => val.clone(),
            None => Val::Number(0.0),
        }
    }

    pub fn store(&mut self, var_name: &str, value: Val) {
        self.vars.insert(var_name.into(), value);
    }

    /// Allocates a zeroed array, replacing any array of the same name.
    pub fn dimension_array(&mut self, var_name: &str, size: Val) -> Result<()> {
        let size = size.number()?;
        if !size.is_finite() || size < 0.0 || size > u16::max_value() as f64 {
            return Err(error!(IllegalFunctionCall; "BAD ARRAY SIZE"));
        }
        self.dims.insert(var_name.into(), vec![0.0; size as usize]);
        Ok(())
    }

    pub fn fetch_array(&self, var_name: &str, index: Val) -> Result<Val> {
        let arr = match self.dims.get(var_name) {
            Some(arr) => arr,
            None => return Err(error!(SubscriptOutOfRange; "UNDIMENSIONED ARRAY")),
        };
        let index = Var::index(arr.len(), index)?;
        Ok(Val::Number(arr[index]))
    }

    pub fn store_array(&mut self, var_name: &str, index: Val, value: Val) -> Result<()> {
        let arr = match self.dims.get_mut(var_name) {
            Some(arr) => arr,
            None => return Err(error!(SubscriptOutOfRange; "UNDIMENSIONED ARRAY")),
        };
        let index = Var::index(arr.len(), index)?;
        arr[index] = value.number()?;
        Ok(())
    }

    pub fn array_len(&self, var_name: &str) -> Option<usize> {
        self.dims.get(var_name).map(|arr| arr.len())
    }

    fn index(len: usize, index: Val) -> Result<usize> {
        let index = index.number()?.trunc();
        if index.is_nan() || index < 0.0 || index >= len as f64 {
            return Err(error!(SubscriptOutOfRange));
        }
        Ok(index as usize)
    }
}
