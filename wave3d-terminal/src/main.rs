/// wave3d Terminal Demo - Icosphere viewer
///
/// Usage: wave3d-terminal [config.json]
///
/// Controls:
///   - WASD: Move, R/F: Up/Down
///   - Arrow Keys: Look around
///   - M: Toggle the mirrored view
///   - Q/ESC: Quit
///
/// Warnings are written to `wave3d-terminal.log` in the temp directory;
/// set `WAVE3D_LOG` to change the filter.
use std::env;
use std::io;
use wave3d_terminal::{init_logging, TerminalApp, ViewerConfig};

fn main() -> io::Result<()> {
    let log_path = env::temp_dir().join("wave3d-terminal.log");
    init_logging(&log_path)?;
    println!("Logging to {}", log_path.display());

    let config = match env::args().nth(1) {
        Some(path) => {
            println!("Loading viewer config from {path}...");
            ViewerConfig::load(&path)?
        }
        None => ViewerConfig::default(),
    };

    println!(
        "Starting wave3d terminal viewer ({} subdivisions, press Q to quit)...",
        config.subdivisions
    );
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(config)?;
    app.run()?;

    println!("Thank you for using the wave3d terminal viewer!");
    Ok(())
}
