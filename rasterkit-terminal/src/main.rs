/// Rasterkit Terminal Demo
///
/// Usage: rasterkit-terminal [config.toml]
///        rasterkit-terminal --print-config
///
/// Controls:
///   - Tab: Cycle between the 2D scene, the cube and the sphere
///   - WASD / Arrow Keys: Rotate the mesh
///   - Q/ESC: Quit

use rasterkit_terminal::{logging, AppError, DemoConfig, TerminalApp, View};

fn main() -> Result<(), AppError> {
    let arg = std::env::args().nth(1);

    let config = match arg.as_deref() {
        Some("--print-config") => {
            print!("{}", DemoConfig::default().to_toml_string()?);
            return Ok(());
        }
        Some(path) => DemoConfig::load_from_file(path)?,
        None => DemoConfig::default(),
    };

    logging::init_logging(config.log_filter.as_deref(), config.log_file.as_deref())?;
    log::info!("starting with {:?}", config);

    let mut app = TerminalApp::new(config, View::Scene2D)?;
    app.run()?;

    println!("Thank you for using the rasterkit terminal renderer!");
    Ok(())
}
