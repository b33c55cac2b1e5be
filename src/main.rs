#![allow(non_snake_case)]
use RustedPlotter::Utils::logger::init_logger;
use RustedPlotter::Utils::plots::FileSurface;
use RustedPlotter::plotter::config::{CONFIG_FILE, PlotterConfig};
use RustedPlotter::plotter::form::{ConsoleMessages, FunctionPlotter};
use log::{info, warn};
use std::io;
use std::path::Path;

fn main() {
    let (config, config_error) = match PlotterConfig::load(Path::new(CONFIG_FILE)) {
        Ok(config) => (config, None),
        Err(err) => (PlotterConfig::default(), Some(err)),
    };
    if let Err(err) = init_logger(config.log_level, config.log_file.as_deref()) {
        eprintln!("logger not initialized: {}", err);
    }
    if let Some(err) = config_error {
        warn!("{}; using default settings", err);
    }
    info!(
        "function plotter started: {:?} validation, output {}",
        config.validation,
        config.output.display()
    );

    let surface = FileSurface::new(&config.output, config.width, config.height);
    let mut form = FunctionPlotter::new(config.validation, surface, ConsoleMessages);

    println!("Function Plotter (empty answer keeps the current value, Ctrl+D to quit)");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        match form.fill_fields(&mut stdin.lock(), &mut stdout) {
            Ok(true) => {
                if form.plot_function().is_ok() {
                    println!("plot saved to {}", config.output.display());
                }
            }
            Ok(false) => break,
            Err(err) => {
                warn!("cannot read the form: {}", err);
                break;
            }
        }
    }
    info!("function plotter closed");
}
