/// Example: Render a UV sphere with a chosen tessellation in the terminal
///
/// Usage: cargo run --example sphere -- <stacks> <sectors>

use std::env;
use rasterkit_terminal::{AppError, DemoConfig, TerminalApp, View};

fn main() -> Result<(), AppError> {
    let args: Vec<String> = env::args().collect();
    let mut config = DemoConfig::default();

    if args.len() >= 3 {
        // Unparseable counts become 0 and are reported by the mesh generator.
        config.sphere.stacks = args[1].parse().unwrap_or(0);
        config.sphere.sectors = args[2].parse().unwrap_or(0);
    } else {
        eprintln!("Usage: {} <stacks> <sectors>", args[0]);
        eprintln!("\nNo tessellation provided, using {:?}...", config.sphere);
    }

    let mut app = TerminalApp::new(config, View::Sphere)?;
    app.run()
}
