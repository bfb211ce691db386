/// Terminal-based ASCII viewer for wave3d scenes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{self, stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::warn;
use wave3d_core::models::icosphere;
use wave3d_core::{Camera, EulerAngles, Mesh, Transform, Vertex};

pub mod config;
pub mod renderer;

pub use config::ViewerConfig;
pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Environment variable holding the log filter, e.g. `WAVE3D_LOG=debug`
pub const LOG_ENV: &str = "WAVE3D_LOG";

/// Logger writing to `target`, `warn` and above unless [`LOG_ENV`] says otherwise
///
/// `tracing` events from this crate and the core reach it through the `log`
/// compatibility layer.
pub fn logger_builder(target: impl Write + Send + 'static) -> env_logger::Builder {
    let env = env_logger::Env::new().filter_or(LOG_ENV, "warn");
    let mut builder = env_logger::Builder::from_env(env);
    builder.target(env_logger::Target::Pipe(Box::new(target)));
    builder
}

/// Send log output to a file; the terminal itself is owned by the renderer
pub fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    logger_builder(file)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    config: ViewerConfig,
    mesh: Mesh<Vertex>,
    spin: EulerAngles,
    camera: Camera,
    mirrored: bool,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(config, width as usize, height as usize)
    }

    /// Build the viewer for a fixed character grid
    pub fn with_size(config: ViewerConfig, width: usize, height: usize) -> io::Result<Self> {
        config
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let mesh = icosphere(config.subdivisions)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut camera = Camera::new(config.camera);
        camera.set_aspect(width as f32 / (height.max(1) as f32 * CELL_ASPECT));

        Ok(Self {
            config,
            mesh,
            spin: EulerAngles::new(0.3, 0.3, 0.0),
            camera,
            mirrored: false,
            renderer: AsciiRenderer::new(width, height),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The camera the next frame is drawn from
    ///
    /// In mirrored mode this is the reflection of the user's camera in the
    /// configured mirror plane.
    pub fn active_camera(&self) -> Camera {
        if !self.mirrored {
            return self.camera.clone();
        }
        match self.camera.reflect(&self.config.mirror_plane()) {
            Ok(camera) => camera,
            Err(err) => {
                warn!("mirror camera unavailable: {err}");
                self.camera.clone()
            }
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                    self.handle_key(code);
                }
            }

            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply one key press to the viewer state
    pub fn handle_key(&mut self, code: KeyCode) {
        let step = self.config.move_step;
        let turn = self.config.rotate_step;
        let movement = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                None
            }
            KeyCode::Char('w') => Some(Vector3::new(0.0, 0.0, -step)),
            KeyCode::Char('s') => Some(Vector3::new(0.0, 0.0, step)),
            KeyCode::Char('a') => Some(Vector3::new(-step, 0.0, 0.0)),
            KeyCode::Char('d') => Some(Vector3::new(step, 0.0, 0.0)),
            KeyCode::Char('r') => Some(Vector3::new(0.0, step, 0.0)),
            KeyCode::Char('f') => Some(Vector3::new(0.0, -step, 0.0)),
            KeyCode::Up => {
                self.camera.rotate(turn, 0.0);
                None
            }
            KeyCode::Down => {
                self.camera.rotate(-turn, 0.0);
                None
            }
            KeyCode::Left => {
                self.camera.rotate(0.0, turn);
                None
            }
            KeyCode::Right => {
                self.camera.rotate(0.0, -turn);
                None
            }
            KeyCode::Char('m') => {
                self.mirrored = !self.mirrored;
                None
            }
            _ => None,
        };

        if let Some(direction) = movement {
            if let Err(err) = self.camera.translate(&direction) {
                warn!("camera move ignored: {err}");
            }
        }
    }

    fn update(&mut self) {
        // Continuous slow spin for demo effect
        self.spin.rotate(0.01, 0.015, 0.0);
    }

    fn render(&mut self) -> io::Result<()> {
        let model = Transform::rotation_matrix(&self.spin);
        let camera = self.active_camera();

        self.renderer.clear();
        self.renderer.render_mesh(
            &self.mesh,
            &model,
            &camera.view_or_identity(),
            &camera.projection(),
        );

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // UI overlay
        let position = self.camera.position();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wave3d | FPS: {:.1} | eye ({:.1}, {:.1}, {:.1}){} | WASD/RF=Move Arrows=Look M=Mirror Q=Quit",
                self.fps,
                position.x,
                position.y,
                position.z,
                if self.mirrored { " [mirror]" } else { "" },
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
