#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedPlotter::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("x^2 + sin(x)").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.all_arguments_are_variables(), vec!["x"]);
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// the expression tree, its pretty-printing and queries on its variables
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
///________________________________________________________________________________________________________________________________________________
///
/// turn a symbolic expression into a Rust function: scalar (`lambdify1D`) or working
/// on a whole ndarray grid at once with domain checks (`lambdify_vectorized`)
/// Example#
/// ```
/// use RustedPlotter::symbolic::symbolic_engine::Expr;
/// use RustedPlotter::symbolic::utils::linspace;
/// let f = Expr::parse_expression("exp(-x)*cos(x)").unwrap();
/// let x = linspace(0.0, 10.0, 100);
/// let y = f.lambdify_vectorized("x").unwrap()(&x).unwrap();
/// assert_eq!(y.len(), 100);
/// ```
pub mod symbolic_lambdify;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions: linspace and scans over evaluated vectors
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
