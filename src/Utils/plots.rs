use crate::symbolic::utils::first_non_finite;
use log::info;
use ndarray::Array1;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Sampled function ready to be drawn: two arrays of equal length plus the labels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

/// Anything able to show a 2D line plot.
pub trait PlotSurface {
    fn render(&mut self, data: &PlotData) -> Result<(), String>;
}

/// Draws the plot with plotters into an image file; `.svg` paths get the SVG backend,
/// everything else is written as a bitmap (PNG for a `.png` path).
#[derive(Debug, Clone)]
pub struct FileSurface {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl FileSurface {
    pub fn new(path: &Path, width: u32, height: u32) -> Self {
        FileSurface {
            path: path.to_path_buf(),
            width,
            height,
        }
    }

    fn is_svg(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
    }
}

impl PlotSurface for FileSurface {
    fn render(&mut self, data: &PlotData) -> Result<(), String> {
        if data.x.len() != data.y.len() {
            return Err(format!(
                "x and y have different lengths: {} and {}",
                data.x.len(),
                data.y.len()
            ));
        }
        if data.x.is_empty() {
            return Err("nothing to plot".to_string());
        }
        if let Some(i) = first_non_finite(&data.x).or(first_non_finite(&data.y)) {
            return Err(format!("point {} of the plot is not finite", i));
        }
        let x_axis = checked_axis("x", bounds(&data.x))?;
        let y_axis = checked_axis("y", y_range(&data.y))?;
        let size = (self.width, self.height);
        if self.is_svg() {
            let root = SVGBackend::new(&self.path, size).into_drawing_area();
            draw(root, data, x_axis, y_axis)?;
        } else {
            let root = BitMapBackend::new(&self.path, size).into_drawing_area();
            draw(root, data, x_axis, y_axis)?;
        }
        info!("plot '{}' saved to {}", data.title, self.path.display());
        Ok(())
    }
}

/// min and max of a vector of finite values
fn bounds(values: &Array1<f64>) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// y range with a 5% margin; a constant function gets a unit margin
fn y_range(y: &Array1<f64>) -> (f64, f64) {
    let (y_min, y_max) = bounds(y);
    let margin = if y_max > y_min {
        0.05 * y_max - 0.05 * y_min
    } else {
        1.0
    };
    (y_min - margin, y_max + margin)
}

/// plotters needs a finite width for each axis
fn checked_axis(name: &str, (lo, hi): (f64, f64)) -> Result<(f64, f64), String> {
    if (hi - lo).is_finite() {
        Ok((lo, hi))
    } else {
        Err(format!(
            "the {} range [{}, {}] is too wide to draw",
            name, lo, hi
        ))
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    data: &PlotData,
    (x_min, x_max): (f64, f64),
    (y_min, y_max): (f64, f64),
) -> Result<(), String> {
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&data.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc(data.x_label.as_str())
        .y_desc(data.y_label.as_str())
        .draw()
        .map_err(|e| e.to_string())?;

    let series = data.x.iter().zip(data.y.iter()).map(|(&x, &y)| (x, y));
    chart
        .draw_series(LineSeries::new(series, &BLUE))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::utils::linspace;
    use tempfile::tempdir;

    fn parabola() -> PlotData {
        let x = linspace(-2.0, 2.0, 50);
        let y = x.mapv(|v| v * v);
        PlotData {
            x,
            y,
            x_label: "x".to_string(),
            y_label: "f(x)".to_string(),
            title: "Function Plot".to_string(),
        }
    }

    #[test]
    fn test_y_range_margins() {
        let (lo, hi) = y_range(&ndarray::array![0.0, 10.0]);
        assert_eq!((lo, hi), (-0.5, 10.5));
        let (lo, hi) = y_range(&ndarray::array![3.0, 3.0]);
        assert_eq!((lo, hi), (2.0, 4.0));
    }

    #[test]
    fn test_y_range_of_huge_values_does_not_overflow() {
        let (lo, hi) = y_range(&ndarray::array![-1e308, 1e308]);
        assert!(lo.is_finite() && hi.is_finite());
        assert!(lo < -1e308 && hi > 1e308);
        assert!(checked_axis("y", (lo, hi)).is_err());
        assert_eq!(checked_axis("x", (-5.0, 5.0)), Ok((-5.0, 5.0)));
    }

    #[test]
    fn test_too_wide_ranges_rejected_before_drawing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let mut surface = FileSurface::new(&path, 400, 300);

        let x = linspace(-1e307, 1e307, 1000);
        let wide_y = PlotData {
            y: x.mapv(|v| 10.0 * v),
            x,
            ..parabola()
        };
        let err = surface.render(&wide_y).unwrap_err();
        assert!(err.contains("y range"), "{}", err);

        let x = linspace(-1e308, 1e308, 1000);
        let wide_x = PlotData {
            y: x.mapv(|_| 1.0),
            x,
            ..parabola()
        };
        let err = surface.render(&wide_x).unwrap_err();
        assert!(err.contains("x range"), "{}", err);
        assert!(!path.exists());
    }

    #[test]
    fn test_non_finite_points_rejected() {
        let dir = tempdir().unwrap();
        let mut surface = FileSurface::new(&dir.path().join("plot.png"), 400, 300);
        let mut data = parabola();
        data.y[3] = f64::NAN;
        assert_eq!(
            surface.render(&data),
            Err("point 3 of the plot is not finite".to_string())
        );
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let dir = tempdir().unwrap();
        let mut surface = FileSurface::new(&dir.path().join("plot.png"), 400, 300);
        let mut data = parabola();
        data.y = ndarray::array![1.0];
        assert!(surface.render(&data).is_err());
        assert!(!dir.path().join("plot.png").exists());
    }

    #[test]
    fn test_svg_surface_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let mut surface = FileSurface::new(&path, 400, 300);
        assert!(surface.is_svg());
        // text layout needs a system font; without one plotters reports an error instead
        match surface.render(&parabola()) {
            Ok(()) => {
                let svg = std::fs::read_to_string(&path).unwrap();
                assert!(svg.contains("<svg"));
                assert!(svg.contains("polyline") || svg.contains("path"));
            }
            Err(message) => assert!(!message.is_empty()),
        }
    }

    #[test]
    fn test_png_surface_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let mut surface = FileSurface::new(&path, 400, 300);
        assert!(!surface.is_svg());
        match surface.render(&parabola()) {
            Ok(()) => assert!(std::fs::metadata(&path).unwrap().len() > 0),
            Err(message) => assert!(!message.is_empty()),
        }
    }
}
