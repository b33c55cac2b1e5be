use crate::Utils::plots::{PlotData, PlotSurface};
use crate::plotter::PlotterError;
use crate::plotter::pipeline;
use crate::plotter::validation::{ValidationMode, validate_input};
use log::warn;
use std::io::{self, BufRead, Write};

/// Where the form reports problems to the user (a message box in a windowed UI).
pub trait MessageSink {
    fn warning(&mut self, title: &str, message: &str);
}

/// Prints messages to the terminal.
pub struct ConsoleMessages;

impl MessageSink for ConsoleMessages {
    fn warning(&mut self, title: &str, message: &str) {
        println!("[{}] {}", title, message);
    }
}

pub const FUNCTION_LABEL: &str = "Enter function";
pub const MIN_LABEL: &str = "Min value of x";
pub const MAX_LABEL: &str = "Max value of x";

/// The plotter form: three text fields and the Plot action.
///
/// The field texts are the only state; they are left untouched after a failed
/// plot so the user can correct them.
pub struct FunctionPlotter<S: PlotSurface, M: MessageSink> {
    pub function_text: String,
    pub min_text: String,
    pub max_text: String,
    mode: ValidationMode,
    surface: S,
    messages: M,
}

impl<S: PlotSurface, M: MessageSink> FunctionPlotter<S, M> {
    pub fn new(mode: ValidationMode, surface: S, messages: M) -> Self {
        FunctionPlotter {
            function_text: String::new(),
            min_text: String::new(),
            max_text: String::new(),
            mode,
            surface,
            messages,
        }
    }

    pub fn set_fields(&mut self, function_text: &str, min_text: &str, max_text: &str) {
        self.function_text = function_text.to_string();
        self.min_text = min_text.to_string();
        self.max_text = max_text.to_string();
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn messages(&self) -> &M {
        &self.messages
    }

    /// The Plot button: validate the fields, then sample and draw.
    ///
    /// Errors are shown through the message sink, titled "Input Error" or
    /// "Plotting Error", and also returned to the caller.
    pub fn plot_function(&mut self) -> Result<PlotData, PlotterError> {
        let result = validate_input(&self.function_text, &self.min_text, &self.max_text, self.mode)
            .map_err(PlotterError::from)
            .and_then(|input| pipeline::plot_function(&input, &mut self.surface));
        if let Err(err) = &result {
            warn!("{}", err);
            self.messages.warning(err.title(), &err.user_message());
        }
        result
    }

    /// Asks for the three fields on `output`, reading answers from `input`.
    ///
    /// An empty answer keeps the current text of the field. Returns `Ok(false)`
    /// when `input` is exhausted, i.e. the user closed the form.
    pub fn fill_fields<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<bool> {
        for (label, field) in [
            (FUNCTION_LABEL, &mut self.function_text),
            (MIN_LABEL, &mut self.min_text),
            (MAX_LABEL, &mut self.max_text),
        ] {
            if field.is_empty() {
                write!(output, "{}: ", label)?;
            } else {
                write!(output, "{} [{}]: ", label, field)?;
            }
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let answer = line.trim();
            if !answer.is_empty() {
                *field = answer.to_string();
            }
        }
        Ok(true)
    }
}
