use crate::Utils::plots::{PlotData, PlotSurface};
use crate::plotter::PlotterError;
use crate::plotter::validation::{VARIABLE, ValidatedInput};
use crate::symbolic::utils::linspace;
use log::info;

/// number of points the function is sampled on, both bounds included
pub const SAMPLES: usize = 1000;
pub const X_LABEL: &str = "x";
pub const Y_LABEL: &str = "f(x)";
pub const TITLE: &str = "Function Plot";

/// Evaluates the validated function on `SAMPLES` evenly spaced points of [min, max].
///
/// The whole grid goes through the vectorized closure in one call. Any evaluation
/// failure (singularity, domain error, overflow) is a `PlotterError::Plotting`:
/// validation only promised the text parses, not that it is defined on the interval.
pub fn sample_function(input: &ValidatedInput) -> Result<PlotData, PlotterError> {
    let x = linspace(input.min, input.max, SAMPLES);
    let f = input.expression.lambdify_vectorized(VARIABLE)?;
    let y = f(&x)?;
    Ok(PlotData {
        x,
        y,
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        title: TITLE.to_string(),
    })
}

/// Samples the function and draws it on `surface`.
pub fn plot_function(
    input: &ValidatedInput,
    surface: &mut dyn PlotSurface,
) -> Result<PlotData, PlotterError> {
    let data = sample_function(input)?;
    surface.render(&data).map_err(PlotterError::Plotting)?;
    info!(
        "plotted f(x) = {} on [{}, {}] with {} points",
        input.normalized,
        input.min,
        input.max,
        data.x.len()
    );
    Ok(data)
}
