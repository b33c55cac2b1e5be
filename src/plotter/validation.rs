//! Input validation for the plotter form.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. the function text is not empty
//! 2. (strict mode) the function text only uses allowed characters
//! 3. the normalized function text parses and its only variable is `x`
//! 4. the minimum is a finite number
//! 5. the maximum is a finite number
//! 6. minimum < maximum
use crate::symbolic::symbolic_engine::Expr;
use log::debug;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// name of the only free variable a plotted function may use
pub const VARIABLE: &str = "x";

static ALLOWED_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9^+*/.\- ()]+$").unwrap());
// a digit directly followed by x, and nothing broader: "x x", ")x" and "x(" stay errors
static IMPLICIT_MULTIPLICATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)x").unwrap());

/// How strictly the function text is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// non-empty, parseable, valid bounds
    Permissive,
    /// additionally: character allow-list and the "2x" -> "2*x" rewrite
    #[default]
    Strict,
}

/// Why the form input was rejected. `Display` gives the short reason,
/// `user_message` the sentence shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    FunctionRequired,
    InvalidCharacters,
    InvalidSyntax { detail: String },
    InvalidMinimum,
    InvalidMaximum,
    MinNotLessThanMax,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::FunctionRequired => write!(f, "function required."),
            InputError::InvalidCharacters => write!(f, "invalid characters."),
            InputError::InvalidSyntax { .. } => write!(f, "invalid function syntax."),
            InputError::InvalidMinimum => write!(f, "invalid minimum value."),
            InputError::InvalidMaximum => write!(f, "invalid maximum value."),
            InputError::MinNotLessThanMax => write!(f, "minimum must be less than maximum."),
        }
    }
}

impl std::error::Error for InputError {}

impl InputError {
    pub fn user_message(&self) -> &'static str {
        match self {
            InputError::FunctionRequired => "Please enter a function.",
            InputError::InvalidCharacters => {
                "Invalid characters in function. Use letters, digits, brackets and ^ + - * / ."
            }
            InputError::InvalidSyntax { .. } => "Invalid function syntax.",
            InputError::InvalidMinimum => "Invalid minimum value of x.",
            InputError::InvalidMaximum => "Invalid maximum value of x.",
            InputError::MinNotLessThanMax => "Minimum value must be less than maximum value.",
        }
    }
}

/// Everything the plot step needs, produced only by a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    /// the function text after rewriting, as it was handed to the parser
    pub normalized: String,
    pub expression: Expr,
    pub min: f64,
    pub max: f64,
}

/// Rewrites the function text into the parser's notation.
///
/// `**` becomes `^` in both modes (`^` already is the power operator);
/// strict mode also turns a digit followed by `x` into `digit*x`.
pub fn normalize_function(function_str: &str, mode: ValidationMode) -> String {
    let text = function_str.trim().replace("**", "^");
    match mode {
        ValidationMode::Permissive => text,
        ValidationMode::Strict => IMPLICIT_MULTIPLICATION
            .replace_all(&text, "${1}*x")
            .into_owned(),
    }
}

fn parse_bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validates the three form fields.
pub fn validate_input(
    function_str: &str,
    min_value: &str,
    max_value: &str,
    mode: ValidationMode,
) -> Result<ValidatedInput, InputError> {
    if function_str.trim().is_empty() {
        return Err(InputError::FunctionRequired);
    }

    if mode == ValidationMode::Strict && !ALLOWED_CHARACTERS.is_match(function_str.trim()) {
        return Err(InputError::InvalidCharacters);
    }

    let normalized = normalize_function(function_str, mode);
    let expression = Expr::parse_expression(&normalized).map_err(|e| InputError::InvalidSyntax {
        detail: e.to_string(),
    })?;
    if let Some(other) = expression
        .all_arguments_are_variables()
        .into_iter()
        .find(|name| name != VARIABLE)
    {
        return Err(InputError::InvalidSyntax {
            detail: format!("unknown name '{}', the variable is '{}'", other, VARIABLE),
        });
    }

    let min = parse_bound(min_value).ok_or(InputError::InvalidMinimum)?;
    let max = parse_bound(max_value).ok_or(InputError::InvalidMaximum)?;
    if min >= max {
        return Err(InputError::MinNotLessThanMax);
    }

    debug!(
        "validated f(x) = {} on [{}, {}] ({:?} mode)",
        expression, min, max, mode
    );
    Ok(ValidatedInput {
        normalized,
        expression,
        min,
        max,
    })
}
