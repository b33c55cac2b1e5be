use crate::symbolic::symbolic_engine::Expr;
use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{alpha1, alphanumeric0, char, digit0, digit1, multispace0, one_of},
    combinator::{opt, recognize},
    error::{Error, ErrorKind},
    sequence::{pair, preceded},
};
use std::f64::consts::{E, PI};
use std::fmt;
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use RustedPlotter::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("x^2.3 * log(x + 2)").unwrap();
/// let f = parsed_expression.lambdify1D();
/// println!("f(1) = {}", f(1.0));
/// ```
//          grammar, lowest precedence first
//   sum      := product (('+' | '-') product)*
//   product  := unary (('*' | '/') unary)*
//   unary    := ('-' | '+') unary | power
//   power    := primary ('^' unary)?          right associative: x^2^3 = x^(2^3)
//   primary  := number | '(' sum ')' | name '(' sum ')' | name
// so -x^2 is -(x^2) and 2^-1 is 0.5

/// Syntax error with the byte offset where parsing stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    fn new(message: &str, position: usize) -> Self {
        ParseError {
            message: message.to_string(),
            position,
        }
    }
    // `rest` is always a suffix of `input`
    fn at(input: &str, rest: &str, message: &str) -> Self {
        ParseError::new(message, input.len() - rest.len())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

/// function names accepted by the parser and the node each of them builds
fn function_constructor(name: &str) -> Option<fn(Box<Expr>) -> Expr> {
    let constructor: fn(Box<Expr>) -> Expr = match name {
        "exp" => Expr::Exp,
        "ln" | "log" => Expr::Ln,
        "sin" => Expr::sin,
        "cos" => Expr::cos,
        "tg" | "tan" => Expr::tg,
        "ctg" | "cot" => Expr::ctg,
        "arcsin" | "asin" => Expr::arcsin,
        "arccos" | "acos" => Expr::arccos,
        "arctg" | "atan" | "arctan" => Expr::arctg,
        "arcctg" | "acot" => Expr::arcctg,
        "sqrt" => |arg| Expr::Pow(arg, Box::new(Expr::Const(0.5))),
        _ => return None,
    };
    Some(constructor)
}

fn mantissa(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))
    .parse(input)
}

fn exponent(input: &str) -> IResult<&str, &str> {
    recognize((one_of("eE"), opt(one_of("+-")), digit1)).parse(input)
}

/// unsigned decimal literal: 2, 2.5, .5, 1e-3
fn parse_number(input: &str) -> IResult<&str, Expr> {
    let (rest, text) = recognize(pair(mantissa, opt(exponent))).parse(input)?;
    match text.parse::<f64>() {
        Ok(value) => Ok((rest, Expr::Const(value))),
        Err(_) => Err(nom::Err::Error(Error::new(input, ErrorKind::Float))),
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, alphanumeric0)).parse(input)
}

/// deepest chain of brackets, function calls, signs and exponents the parser follows
pub const MAX_NESTING: usize = 64;
/// longest accepted expression in bytes; keeps the expression tree shallow enough
/// for the recursive evaluation and printing
pub const MAX_LENGTH: usize = 1000;

fn nested(input: &str, depth: usize) -> Result<usize, nom::Err<Error<&str>>> {
    if depth >= MAX_NESTING {
        Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)))
    } else {
        Ok(depth + 1)
    }
}

fn parse_bracketed(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (rest, _) = char::<&str, Error<&str>>('(').parse(input)?;
    let depth = nested(input, depth)?;
    let (rest, expr) = parse_sum(rest, depth)?;
    let close: IResult<&str, char> = preceded(multispace0, char(')')).parse(rest);
    let (rest, _) = close?;
    Ok((rest, expr))
}

/// `sin(...)`, a named constant or a variable
fn parse_call_or_name(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (rest, name) = identifier(input)?;
    let open: IResult<&str, char> = preceded(multispace0, char('(')).parse(rest);
    match open {
        Ok(_) => {
            let Some(constructor) = function_constructor(name) else {
                // nothing else can start with a name, stop backtracking here
                return Err(nom::Err::Failure(Error::new(input, ErrorKind::Verify)));
            };
            let (rest, argument) =
                preceded(multispace0, |i| parse_bracketed(i, depth)).parse(rest)?;
            Ok((rest, constructor(argument.boxed())))
        }
        Err(nom::Err::Error(_)) => {
            let expr = match name {
                "pi" => Expr::Const(PI),
                "e" => Expr::Const(E),
                _ => Expr::Var(name.to_string()),
            };
            Ok((rest, expr))
        }
        Err(e) => Err(e),
    }
}

fn parse_primary(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, _) = multispace0::<&str, Error<&str>>(input)?;
    alt((
        parse_number,
        |i| parse_bracketed(i, depth),
        |i| parse_call_or_name(i, depth),
    ))
    .parse(input)
}

fn parse_power(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, base) = parse_primary(input, depth)?;
    let caret: IResult<&str, char> = preceded(multispace0, char('^')).parse(input);
    match caret {
        Ok((rest, _)) => {
            let (rest, exponent) = parse_unary(rest, nested(input, depth)?)?;
            Ok((rest, base.pow(exponent)))
        }
        Err(nom::Err::Error(_)) => Ok((input, base)),
        Err(e) => Err(e),
    }
}

fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Const(value) => Expr::Const(-value),
        other => -other,
    }
}

fn parse_unary(input: &str, depth: usize) -> IResult<&str, Expr> {
    let sign: IResult<&str, char> = preceded(multispace0, one_of("+-")).parse(input);
    match sign {
        Ok((rest, '-')) => {
            let (rest, operand) = parse_unary(rest, nested(input, depth)?)?;
            Ok((rest, negate(operand)))
        }
        Ok((rest, _)) => parse_unary(rest, nested(input, depth)?),
        Err(nom::Err::Error(_)) => parse_power(input, depth),
        Err(e) => Err(e),
    }
}

fn parse_product(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (mut input, mut acc) = parse_unary(input, depth)?;
    loop {
        let op: IResult<&str, char> = preceded(multispace0, one_of("*/")).parse(input);
        match op {
            Ok((rest, op)) => {
                let (rest, rhs) = parse_unary(rest, depth)?;
                acc = if op == '*' { acc * rhs } else { acc / rhs };
                input = rest;
            }
            Err(nom::Err::Error(_)) => return Ok((input, acc)),
            Err(e) => return Err(e),
        }
    }
}

fn parse_sum(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (mut input, mut acc) = parse_product(input, depth)?;
    loop {
        let op: IResult<&str, char> = preceded(multispace0, one_of("+-")).parse(input);
        match op {
            Ok((rest, op)) => {
                let (rest, rhs) = parse_product(rest, depth)?;
                acc = if op == '+' { acc + rhs } else { acc - rhs };
                input = rest;
            }
            Err(nom::Err::Error(_)) => return Ok((input, acc)),
            Err(e) => return Err(e),
        }
    }
}

/// Parses the whole input into an expression; trailing garbage is an error.
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::new("empty expression", 0));
    }
    if input.len() > MAX_LENGTH {
        return Err(ParseError::new("expression too long", MAX_LENGTH));
    }
    let (rest, expr) = match parse_sum(input, 0) {
        Ok(parsed) => parsed,
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::Verify => {
            return Err(ParseError::at(input, e.input, "unknown function"));
        }
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            return Err(ParseError::at(input, e.input, "expression nested too deeply"));
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(ParseError::at(input, e.input, "unexpected input"));
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(ParseError::new("incomplete expression", input.len()));
        }
    };
    let rest = rest.trim_start();
    if !rest.is_empty() {
        return Err(ParseError::at(input, rest, "unexpected trailing input"));
    }
    Ok(expr)
}

impl Expr {
    /// Parses a string into a symbolic expression.
    ///
    /// Accepts `+ - * / ^`, brackets, decimal numbers, the constants `pi` and `e`,
    /// variables and the functions exp, ln/log, sqrt, sin, cos, tg/tan, ctg/cot
    /// and their inverses (arcsin/asin, arccos/acos, arctg/atan/arctan, arcctg/acot).
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        match parse_expression_func(input) {
            Ok(expr) => {
                debug!("parsed '{}' into {}", input, expr);
                Ok(expr)
            }
            Err(err) => {
                debug!("failed to parse '{}': {}", input, err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn x() -> Box<Expr> {
        Box::new(Expr::Var("x".to_string()))
    }
    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_func("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(x()));
    }

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_func("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
        let expr = parse_expression_func("1.5e-3").unwrap();
        assert_eq!(expr, Expr::Const(1.5e-3));
        let expr = parse_expression_func(".5").unwrap();
        assert_eq!(expr, Expr::Const(0.5));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_func("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression_func("x + 2").unwrap();
        assert_eq!(expr, Expr::Add(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_subtraction() {
        let expr = parse_expression_func("x - 2").unwrap();
        assert_eq!(expr, Expr::Sub(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_multiplication() {
        let expr = parse_expression_func("x * 2").unwrap();
        assert_eq!(expr, Expr::Mul(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_division() {
        let expr = parse_expression_func("x / 2").unwrap();
        assert_eq!(expr, Expr::Div(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_power() {
        let expr = parse_expression_func("x^2").unwrap();
        assert_eq!(expr, Expr::Pow(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_expression_func("x^2^3").unwrap();
        let expected = Expr::Pow(
            x(),
            Box::new(Expr::Pow(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Const(3.0)),
            )),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_unary_minus_binds_weaker_than_power() {
        let expr = parse_expression_func("-x^2").unwrap();
        assert_eq!(expr, -Expr::Pow(x(), Box::new(Expr::Const(2.0))));
        let expr = parse_expression_func("2^-1").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(Box::new(Expr::Const(2.0)), Box::new(Expr::Const(-1.0)))
        );
    }

    #[test]
    fn test_precedence() {
        let expr = parse_expression_func("1 + 2 * 3").unwrap();
        let expected = Expr::Const(1.0) + Expr::Const(2.0) * Expr::Const(3.0);
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_logarithm() {
        let expr = parse_expression_func("log(x)").unwrap();
        assert_eq!(expr, Expr::Ln(x()));
        let expr = parse_expression_func("ln(x)").unwrap();
        assert_eq!(expr, Expr::Ln(x()));
    }

    #[test]
    fn test_parse_sqrt_as_power() {
        let expr = parse_expression_func("sqrt(x)").unwrap();
        assert_eq!(expr, Expr::Pow(x(), Box::new(Expr::Const(0.5))));
    }

    #[test]
    fn test_parse_named_constants() {
        assert_eq!(parse_expression_func("pi").unwrap(), Expr::Const(PI));
        assert_eq!(parse_expression_func("e").unwrap(), Expr::Const(E));
    }

    #[test]
    fn test_parse_expression_func_with_brackets() {
        let expr = parse_expression_func("(x + y) * z").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(x(), Box::new(Expr::Var("y".to_string())))),
                Box::new(Expr::Var("z".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_complex_expression() {
        let expr = parse_expression_func("(x + y) * (z - 2) / exp(w)").unwrap();
        let x = Expr::Var("x".to_string());
        let y = Expr::Var("y".to_string());
        let z = Expr::Var("z".to_string());
        let w = Expr::Var("w".to_string());
        let expected = ((x + y) * (z - Expr::Const(2.0))) / Expr::Exp(w.boxed());
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_multiple_subtraction_is_left_associative() {
        let result = parse_expression_func("x^2 - x - 1").unwrap();
        let x = Box::new(Expr::Var("x".to_string()));
        let to_check = Expr::Pow(x.clone(), Box::new(Expr::Const(2.0))) - *x - Expr::Const(1.0);
        assert_eq!(result, to_check);
    }

    #[test]
    fn test_parse_trig_aliases() {
        assert_eq!(parse_expression_func("tan(x)").unwrap(), Expr::tg(x()));
        assert_eq!(parse_expression_func("tg(x)").unwrap(), Expr::tg(x()));
        assert_eq!(parse_expression_func("cot(x)").unwrap(), Expr::ctg(x()));
        assert_eq!(parse_expression_func("asin(x)").unwrap(), Expr::arcsin(x()));
        assert_eq!(parse_expression_func("atan(x)").unwrap(), Expr::arctg(x()));
    }

    #[test]
    fn test_parse_nested_trig() {
        let expr = parse_expression_func("sin(cos(x))").unwrap();
        assert_eq!(expr, Expr::sin(Box::new(Expr::cos(x()))));
    }

    #[test]
    fn test_invalid_expression() {
        assert!(parse_expression_func("(x +").is_err());
        assert!(parse_expression_func("(x + y").is_err());
        assert!(parse_expression_func("x +* 2").is_err());
        assert!(parse_expression_func("").is_err());
        assert!(parse_expression_func("   ").is_err());
    }

    #[test]
    fn test_juxtaposition_is_not_multiplication() {
        let err = parse_expression_func("x x").unwrap_err();
        assert_eq!(err.message, "unexpected trailing input");
        assert_eq!(err.position, 2);
        assert!(parse_expression_func("(x)x").is_err());
        assert!(parse_expression_func("2x").is_err());
    }

    #[test]
    fn test_unknown_function() {
        let err = parse_expression_func("x + foo(x)").unwrap_err();
        assert_eq!(err.message, "unknown function");
        assert_eq!(err.position, 4);
    }

    fn bracketed_x(levels: usize) -> String {
        format!("{}x{}", "(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn test_nesting_limit() {
        assert_eq!(parse_expression_func(&bracketed_x(MAX_NESTING)).unwrap(), *x());

        let err = parse_expression_func(&bracketed_x(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
        assert_eq!(err.position, MAX_NESTING);

        let calls = format!("{}x{}", "sin(".repeat(100), ")".repeat(100));
        let err = parse_expression_func(&calls).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");

        let signs = format!("{}x", "-".repeat(100));
        let err = parse_expression_func(&signs).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");

        let powers = format!("x{}", "^x".repeat(100));
        let err = parse_expression_func(&powers).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
    }

    #[test]
    fn test_deep_brackets_are_an_error_not_a_crash() {
        let err = parse_expression_func(&bracketed_x(400)).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
    }

    #[test]
    fn test_length_limit() {
        let long_sum = format!("x{}", "+x".repeat(400));
        let expr = parse_expression_func(&long_sum).unwrap();
        assert_eq!(expr.all_arguments_are_variables(), vec!["x"]);

        let too_long = format!("x{}", "+x".repeat(MAX_LENGTH));
        let err = parse_expression_func(&too_long).unwrap_err();
        assert_eq!(err.message, "expression too long");
        let err = parse_expression_func(&bracketed_x(2000)).unwrap_err();
        assert_eq!(err.message, "expression too long");
    }
}
