use super::var::Env;
use crate::error;
use crate::lang::ast::*;
use crate::lang::{Error, Number};

type Result<T> = std::result::Result<T, Error>;

impl Expression {
    /// Value of the expression under the current bindings. Terms are
    /// folded left to right; a leading minus negates the first term
    /// only, so `-2+3` is `1`.
    pub fn evaluate(&self, env: &mut Env) -> Result<Number> {
        let mut value = self.first.evaluate(env)?;
        if self.sign == Some(Sign::Minus) {
            value = value.wrapping_neg();
        }
        for (op, term) in &self.rest {
            let rhs = term.evaluate(env)?;
            value = match op {
                AddOp::Add => value.wrapping_add(rhs),
                AddOp::Subtract => value.wrapping_sub(rhs),
            };
        }
        Ok(value)
    }
}

impl Term {
    fn evaluate(&self, env: &mut Env) -> Result<Number> {
        let mut value = self.first.evaluate(env)?;
        for (op, factor) in &self.rest {
            let rhs = factor.evaluate(env)?;
            value = match op {
                MulOp::Multiply => value.wrapping_mul(rhs),
                MulOp::Divide => {
                    if rhs == 0 {
                        return Err(error!(DivisionByZero));
                    }
                    value.wrapping_div(rhs)
                }
            };
        }
        Ok(value)
    }
}

impl Factor {
    fn evaluate(&self, env: &mut Env) -> Result<Number> {
        match self {
            Factor::Literal(value) => Ok(*value),
            Factor::Var(name) => Ok(env.vars.fetch(*name)),
            Factor::Paren(e) => e.evaluate(env),
            Factor::Array(e) => {
                let index = e.evaluate(env)?;
                env.array.get(index)
            }
            Factor::Rnd(e) => {
                let bound = e.evaluate(env)?;
                env.rnd(bound)
            }
        }
    }
}

impl RelOp {
    /// Plain integer comparison, no coercion.
    pub fn holds(self, lhs: Number, rhs: Number) -> bool {
        use RelOp::*;
        match self {
            Equal => lhs == rhs,
            NotEqual => lhs != rhs,
            Less => lhs < rhs,
            LessEqual => lhs <= rhs,
            Greater => lhs > rhs,
            GreaterEqual => lhs >= rhs,
        }
    }
}
