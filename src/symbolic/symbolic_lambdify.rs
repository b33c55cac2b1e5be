use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{first_non_finite, first_sign_change};
use ndarray::{Array1, Zip};
use std::f64::consts::PI;
use std::fmt;

/// Closure produced by [`Expr::lambdify_vectorized`]: takes the whole sample grid at once.
pub type VectorizedFn = Box<dyn Fn(&Array1<f64>) -> Result<Array1<f64>, EvaluationError>>;

/// Failures of numerical evaluation of an expression that parsed fine.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// the expression has a variable other than the one it was lambdified for
    UnboundVariable(String),
    /// a divisor is exactly zero at a sample point
    DivisionByZero { at: f64 },
    /// a divisor changes sign between two neighbouring samples
    Pole {
        operation: &'static str,
        between: (f64, f64),
    },
    /// NaN or infinity (domain error or overflow)
    NonFinite { operation: &'static str, at: f64 },
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvaluationError::UnboundVariable(name) => {
                write!(f, "unknown variable '{}'", name)
            }
            EvaluationError::DivisionByZero { at } => write!(f, "division by zero at x = {}", at),
            EvaluationError::Pole { operation, between } => write!(
                f,
                "{} has a singularity between x = {} and x = {} \
                 (the divisor changes sign there; removable singularities are also reported)",
                operation, between.0, between.1
            ),
            EvaluationError::NonFinite { operation, at } => write!(
                f,
                "{} is undefined or overflows at x = {}",
                operation, at
            ),
        }
    }
}

impl std::error::Error for EvaluationError {}

fn finite(
    operation: &'static str,
    x: &Array1<f64>,
    values: Array1<f64>,
) -> Result<Array1<f64>, EvaluationError> {
    match first_non_finite(&values) {
        Some(i) => Err(EvaluationError::NonFinite {
            operation,
            at: x[i],
        }),
        None => Ok(values),
    }
}

/// a divisor must neither vanish at a sample nor cross zero between two samples
fn check_divisor(
    operation: &'static str,
    x: &Array1<f64>,
    divisor: &Array1<f64>,
) -> Result<(), EvaluationError> {
    if let Some(i) = divisor.iter().position(|&d| d == 0.0) {
        return Err(EvaluationError::DivisionByZero { at: x[i] });
    }
    if let Some(i) = first_sign_change(divisor) {
        return Err(EvaluationError::Pole {
            operation,
            between: (x[i], x[i + 1]),
        });
    }
    Ok(())
}

fn unary(inner: VectorizedFn, operation: &'static str, f: fn(f64) -> f64) -> VectorizedFn {
    Box::new(move |x: &Array1<f64>| {
        let values = inner(x)?;
        finite(operation, x, values.mapv(f))
    })
}

fn binary(
    lhs: VectorizedFn,
    rhs: VectorizedFn,
    operation: &'static str,
    f: fn(f64, f64) -> f64,
) -> VectorizedFn {
    Box::new(move |x: &Array1<f64>| {
        let l = lhs(x)?;
        let r = rhs(x)?;
        finite(operation, x, Zip::from(&l).and(&r).map_collect(|&a, &b| f(a, b)))
    })
}

impl Expr {
    /// LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Converts a single-variable symbolic expression into a scalar Rust closure.
    ///
    /// Every variable is bound to the single argument, so the caller is expected to
    /// have checked `all_arguments_are_variables()` beforehand. No domain checks:
    /// `1/0` gives `inf` exactly as f64 arithmetic does.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::Var("x".to_string()).pow(Expr::Const(2.0));
    /// assert_eq!(f.lambdify1D()(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64> {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) + rhs_fn(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) - rhs_fn(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) * rhs_fn(x))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) / rhs_fn(x))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D();
                let exp_fn = exp.lambdify1D();
                Box::new(move |x| base_fn(x).powf(exp_fn(x)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).cos())
            }
            Expr::tg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).tan())
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| 1.0 / expr_fn(x).tan())
            }
            Expr::arcsin(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).asin())
            }
            Expr::arccos(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).acos())
            }
            Expr::arctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).atan())
            }
            Expr::arcctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| PI / 2.0 - expr_fn(x).atan())
            }
        }
    }

    /// Converts the expression into a closure evaluating a whole array of arguments at once.
    ///
    /// Each node of the tree works on complete `ndarray` vectors, so a grid of N points
    /// costs one pass over the tree instead of N. Unlike `lambdify1D` the returned closure
    /// refuses to produce garbage:
    /// - a divisor equal to zero at a sample or changing sign between two samples
    ///   (this covers `tg`, `ctg` and negative powers as well) is a singularity;
    /// - any NaN or infinity produced by any node is reported with the x where it appeared.
    ///
    /// Fails immediately if the expression contains a variable other than `var`.
    ///
    /// # Examples
    /// ```
    /// use ndarray::array;
    /// use RustedPlotter::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("x^2").unwrap().lambdify_vectorized("x").unwrap();
    /// assert_eq!(f(&array![1.0, 2.0, 3.0]).unwrap(), array![1.0, 4.0, 9.0]);
    /// ```
    pub fn lambdify_vectorized(&self, var: &str) -> Result<VectorizedFn, EvaluationError> {
        let compiled: VectorizedFn = match self {
            Expr::Var(name) if name == var => {
                Box::new(|x: &Array1<f64>| finite("x", x, x.clone()))
            }
            Expr::Var(name) => return Err(EvaluationError::UnboundVariable(name.clone())),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |x: &Array1<f64>| finite("constant", x, Array1::from_elem(x.len(), val)))
            }
            Expr::Add(lhs, rhs) => binary(
                lhs.lambdify_vectorized(var)?,
                rhs.lambdify_vectorized(var)?,
                "+",
                |a, b| a + b,
            ),
            Expr::Sub(lhs, rhs) => binary(
                lhs.lambdify_vectorized(var)?,
                rhs.lambdify_vectorized(var)?,
                "-",
                |a, b| a - b,
            ),
            Expr::Mul(lhs, rhs) => binary(
                lhs.lambdify_vectorized(var)?,
                rhs.lambdify_vectorized(var)?,
                "*",
                |a, b| a * b,
            ),
            Expr::Div(lhs, rhs) => {
                let lf = lhs.lambdify_vectorized(var)?;
                let rf = rhs.lambdify_vectorized(var)?;
                Box::new(move |x: &Array1<f64>| {
                    let numerator = lf(x)?;
                    let denominator = rf(x)?;
                    check_divisor("/", x, &denominator)?;
                    finite("/", x, numerator / denominator)
                })
            }
            Expr::Pow(base, exp) => {
                let bf = base.lambdify_vectorized(var)?;
                let ef = exp.lambdify_vectorized(var)?;
                Box::new(move |x: &Array1<f64>| {
                    let b = bf(x)?;
                    let e = ef(x)?;
                    // a negative power divides by the base
                    if e.iter().any(|&v| v < 0.0) {
                        let divisor = Zip::from(&b)
                            .and(&e)
                            .map_collect(|&b, &e| if e < 0.0 { b } else { 1.0 });
                        check_divisor("^", x, &divisor)?;
                    }
                    finite("^", x, Zip::from(&b).and(&e).map_collect(|&b, &e| b.powf(e)))
                })
            }
            Expr::Exp(e) => unary(e.lambdify_vectorized(var)?, "exp", f64::exp),
            Expr::Ln(e) => unary(e.lambdify_vectorized(var)?, "ln", f64::ln),
            Expr::sin(e) => unary(e.lambdify_vectorized(var)?, "sin", f64::sin),
            Expr::cos(e) => unary(e.lambdify_vectorized(var)?, "cos", f64::cos),
            Expr::tg(e) => {
                let f = e.lambdify_vectorized(var)?;
                Box::new(move |x: &Array1<f64>| {
                    let values = f(x)?;
                    check_divisor("tg", x, &values.mapv(f64::cos))?;
                    finite("tg", x, values.mapv(f64::tan))
                })
            }
            Expr::ctg(e) => {
                let f = e.lambdify_vectorized(var)?;
                Box::new(move |x: &Array1<f64>| {
                    let values = f(x)?;
                    check_divisor("ctg", x, &values.mapv(f64::sin))?;
                    finite("ctg", x, values.mapv(|v| 1.0 / v.tan()))
                })
            }
            Expr::arcsin(e) => unary(e.lambdify_vectorized(var)?, "arcsin", f64::asin),
            Expr::arccos(e) => unary(e.lambdify_vectorized(var)?, "arccos", f64::acos),
            Expr::arctg(e) => unary(e.lambdify_vectorized(var)?, "arctg", f64::atan),
            Expr::arcctg(e) => unary(e.lambdify_vectorized(var)?, "arcctg", |v| {
                PI / 2.0 - v.atan()
            }),
        };
        Ok(compiled)
    }
}
