//! Count formulas: the dynamic alternative to a static distribution
//!
//! A formula is a `;`-separated list of statements evaluated once per
//! tick with `t` (the absolute tick) and `r` (the cycle-relative tick)
//! bound. Variables assigned by the formula persist across calls for the
//! life of the run, so a formula can accumulate state:
//!
//! ```
//! use drizzle_core::Formula;
//!
//! let mut f = Formula::compile("acc = if(t == 0, 1, acc + 1); acc").unwrap();
//! assert_eq!(f.eval(0, 0).unwrap(), 1.0);
//! assert_eq!(f.eval(1, 1).unwrap(), 2.0);
//! ```
//!
//! Expressions are purely numeric: comparisons yield 1 or 0, `&&`/`||`
//! treat non-zero as true, and `if(cond, a, b)` evaluates only the taken
//! branch. The builtin functions are `abs`, `floor`, `ceil`, `round`,
//! `sqrt`, `exp`, `ln`, `sin`, `cos`, `pow`, `min`, `max`, and `if`.

mod lexer;
mod parser;

use std::collections::HashMap;

use crate::error::{Error, Result};
use parser::{BinaryOp, Expr, Stmt};

/// A compiled count formula with its persistent variable scope.
#[derive(Debug, Clone)]
pub struct Formula {
    stmts: Vec<Stmt>,
    scope: HashMap<String, f64>,
}

impl Formula {
    /// Lex and parse a formula. Errors here are configuration errors,
    /// surfaced at system initialization.
    pub fn compile(src: &str) -> Result<Self> {
        let tokens = lexer::tokenize(src)?;
        let stmts = parser::parse(&tokens)?;
        Ok(Self { stmts, scope: HashMap::new() })
    }

    /// Evaluate for one tick. `t` and `r` are rebound on every call;
    /// variables assigned by the formula survive to the next call. The
    /// result is the value of the last statement.
    pub fn eval(&mut self, t: i64, r: i64) -> Result<f64> {
        let Self { stmts, scope } = self;
        scope.insert("t".to_string(), t as f64);
        scope.insert("r".to_string(), r as f64);

        let mut last = 0.0;
        for stmt in stmts.iter() {
            last = match stmt {
                Stmt::Assign { name, value } => {
                    let v = eval_expr(value, scope)?;
                    scope.insert(name.clone(), v);
                    v
                }
                Stmt::Expr(expr) => eval_expr(expr, scope)?,
            };
        }

        if !last.is_finite() {
            return Err(Error::Eval(format!("formula produced a non-finite value ({last})")));
        }
        Ok(last)
    }
}

fn eval_expr(expr: &Expr, scope: &HashMap<String, f64>) -> Result<f64> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Var(name) => scope
            .get(name)
            .copied()
            .ok_or_else(|| Error::Eval(format!("unknown variable '{name}'"))),
        Expr::Neg(operand) => Ok(-eval_expr(operand, scope)?),
        Expr::Binary { op, left, right } => {
            let l = eval_expr(left, scope)?;
            let r = eval_expr(right, scope)?;
            Ok(match op {
                BinaryOp::Or => bool_to_f64(l != 0.0 || r != 0.0),
                BinaryOp::And => bool_to_f64(l != 0.0 && r != 0.0),
                BinaryOp::Eq => bool_to_f64(l == r),
                BinaryOp::Ne => bool_to_f64(l != r),
                BinaryOp::Lt => bool_to_f64(l < r),
                BinaryOp::Le => bool_to_f64(l <= r),
                BinaryOp::Gt => bool_to_f64(l > r),
                BinaryOp::Ge => bool_to_f64(l >= r),
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => l / r,
                BinaryOp::Mod => l % r,
                BinaryOp::Pow => l.powf(r),
            })
        }
        Expr::Call { func, args } if func == "if" => {
            // Only the taken branch is evaluated, so an accumulator can
            // be seeded on the first tick without reading itself.
            if args.len() != 3 {
                return Err(Error::Eval(format!(
                    "if expects 3 arguments, got {}",
                    args.len()
                )));
            }
            let cond = eval_expr(&args[0], scope)?;
            eval_expr(if cond != 0.0 { &args[1] } else { &args[2] }, scope)
        }
        Expr::Call { func, args } => {
            let values =
                args.iter().map(|a| eval_expr(a, scope)).collect::<Result<Vec<f64>>>()?;
            call_builtin(func, &values)
        }
    }
}

fn bool_to_f64(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn call_builtin(func: &str, args: &[f64]) -> Result<f64> {
    match (func, args) {
        ("abs", [x]) => Ok(x.abs()),
        ("floor", [x]) => Ok(x.floor()),
        ("ceil", [x]) => Ok(x.ceil()),
        ("round", [x]) => Ok(x.round()),
        ("sqrt", [x]) => Ok(x.sqrt()),
        ("exp", [x]) => Ok(x.exp()),
        ("ln", [x]) => Ok(x.ln()),
        ("sin", [x]) => Ok(x.sin()),
        ("cos", [x]) => Ok(x.cos()),
        ("pow", [x, y]) => Ok(x.powf(*y)),
        ("min", [x, y]) => Ok(x.min(*y)),
        ("max", [x, y]) => Ok(x.max(*y)),
        ("abs" | "floor" | "ceil" | "round" | "sqrt" | "exp" | "ln" | "sin" | "cos", _) => {
            Err(Error::Eval(format!("{func} expects 1 argument, got {}", args.len())))
        }
        ("pow" | "min" | "max", _) => {
            Err(Error::Eval(format!("{func} expects 2 arguments, got {}", args.len())))
        }
        _ => Err(Error::Eval(format!("unknown function '{func}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_once(src: &str, t: i64, r: i64) -> Result<f64> {
        Formula::compile(src)?.eval(t, r)
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(eval_once("1 + 2 * 3", 0, 0).unwrap(), 7.0);
        assert_eq!(eval_once("(1 + 2) * 3", 0, 0).unwrap(), 9.0);
        assert_eq!(eval_once("2 ^ 3", 0, 0).unwrap(), 8.0);
        assert_eq!(eval_once("2 ^ 3 ^ 2", 0, 0).unwrap(), 512.0);
        assert_eq!(eval_once("7 % 3", 0, 0).unwrap(), 1.0);
        assert_eq!(eval_once("-2 + 5", 0, 0).unwrap(), 3.0);
    }

    #[test]
    fn comparisons_yield_zero_or_one() {
        assert_eq!(eval_once("3 > 2", 0, 0).unwrap(), 1.0);
        assert_eq!(eval_once("3 < 2", 0, 0).unwrap(), 0.0);
        assert_eq!(eval_once("1 <= 1 && 2 != 3", 0, 0).unwrap(), 1.0);
    }

    #[test]
    fn binds_tick_variables() {
        assert_eq!(eval_once("t + r", 120, 0).unwrap(), 120.0);
        assert_eq!(eval_once("t * 0 + r", 61, 1).unwrap(), 1.0);
    }

    #[test]
    fn builtins() {
        assert_eq!(eval_once("max(min(5, 3), 2)", 0, 0).unwrap(), 3.0);
        assert_eq!(eval_once("floor(2.9)", 0, 0).unwrap(), 2.0);
        assert_eq!(eval_once("abs(0 - 4)", 0, 0).unwrap(), 4.0);
        assert_eq!(eval_once("if(t == 0, 10, 20)", 0, 0).unwrap(), 10.0);
        assert_eq!(eval_once("if(t == 0, 10, 20)", 5, 5).unwrap(), 20.0);
    }

    #[test]
    fn state_persists_across_ticks() {
        let mut f = Formula::compile("acc = if(t == 0, 1, acc + 1); acc").unwrap();
        assert_eq!(f.eval(0, 0).unwrap(), 1.0);
        assert_eq!(f.eval(1, 1).unwrap(), 2.0);
        assert_eq!(f.eval(2, 2).unwrap(), 3.0);
    }

    #[test]
    fn unknown_variable_is_an_eval_error() {
        let err = eval_once("bogus + 1", 0, 0).unwrap_err();
        assert!(matches!(err, Error::Eval(_)), "got {err:?}");
    }

    #[test]
    fn unknown_function_is_an_eval_error() {
        let err = eval_once("frobnicate(1)", 0, 0).unwrap_err();
        assert!(matches!(err, Error::Eval(_)), "got {err:?}");
    }

    #[test]
    fn wrong_arity_is_an_eval_error() {
        assert!(matches!(eval_once("min(1)", 0, 0).unwrap_err(), Error::Eval(_)));
        assert!(matches!(eval_once("if(1, 2)", 0, 0).unwrap_err(), Error::Eval(_)));
    }

    #[test]
    fn non_finite_result_is_an_eval_error() {
        assert!(matches!(eval_once("1 / 0", 0, 0).unwrap_err(), Error::Eval(_)));
        assert!(matches!(eval_once("sqrt(0 - 1)", 0, 0).unwrap_err(), Error::Eval(_)));
    }

    #[test]
    fn parse_errors_are_config_errors() {
        assert!(matches!(Formula::compile("1 +").unwrap_err(), Error::Config(_)));
        assert!(matches!(Formula::compile("").unwrap_err(), Error::Config(_)));
    }
}
