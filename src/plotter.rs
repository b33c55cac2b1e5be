//! # Function plotter
//!
//! The input-to-plot pipeline behind the form:
//! - `validation`: checks the three text fields and parses the function,
//! - `pipeline`: samples the validated function on 1000 points and hands the
//!   arrays to a plot surface,
//! - `form`: the form itself with its Plot action and message reporting,
//! - `config`: TOML settings (validation mode, output file, logging).
//!
//! Failures come in two kinds that are reported differently: an input error
//! means the text fields need fixing, a plotting error means the function parsed
//! but could not be evaluated or drawn over the requested interval.
use crate::symbolic::symbolic_lambdify::EvaluationError;
use std::fmt;

pub mod config;
pub mod form;
pub mod pipeline;
pub mod validation;

use validation::InputError;

#[derive(Debug, Clone, PartialEq)]
pub enum PlotterError {
    /// bad or missing text in the form
    Input(InputError),
    /// evaluation or drawing failed for input that passed validation
    Plotting(String),
}

impl PlotterError {
    /// title of the message box reporting this error
    pub fn title(&self) -> &'static str {
        match self {
            PlotterError::Input(_) => "Input Error",
            PlotterError::Plotting(_) => "Plotting Error",
        }
    }

    /// text of the message box reporting this error
    pub fn user_message(&self) -> String {
        match self {
            PlotterError::Input(err) => err.user_message().to_string(),
            PlotterError::Plotting(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for PlotterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlotterError::Input(err) => write!(f, "input error: {}", err),
            PlotterError::Plotting(msg) => write!(f, "plotting error: {}", msg),
        }
    }
}

impl std::error::Error for PlotterError {}

impl From<InputError> for PlotterError {
    fn from(err: InputError) -> Self {
        PlotterError::Input(err)
    }
}

impl From<EvaluationError> for PlotterError {
    fn from(err: EvaluationError) -> Self {
        PlotterError::Plotting(err.to_string())
    }
}
