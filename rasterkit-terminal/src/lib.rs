/// Terminal front-end for the rasterkit software rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Matrix4;
use rasterkit_core::{
    compose_records, compute_transformation, Color, MeshBuffers, MeshError, MeshShape,
    RasterError, TransformOp,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod logging;
pub mod renderer;
pub mod scene;

pub use config::{ConfigError, DemoConfig};
pub use renderer::TerminalRenderer;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("mesh generation failed: {0}")]
    Mesh(#[from] MeshError),
    #[error("rasterization failed: {0}")]
    Raster(#[from] RasterError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// What the app is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Scene2D,
    Cube,
    Sphere,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Scene2D => View::Cube,
            View::Cube => View::Sphere,
            View::Sphere => View::Scene2D,
        }
    }

    /// Object name used to select transform records. The 2D scene is
    /// drawn in screen space and takes none.
    pub fn object(self) -> Option<&'static str> {
        match self {
            View::Scene2D => None,
            View::Cube => Some("cube"),
            View::Sphere => Some("sphere"),
        }
    }
}

/// Paces frames to a target rate and measures the rate actually reached
#[derive(Debug, Clone)]
pub struct FrameClock {
    budget: Duration,
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FrameClock {
    pub fn new(target_fps: u32, now: Instant) -> Self {
        Self {
            budget: Duration::from_secs(1) / target_fps.max(1),
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Count a frame that began at `started`; returns how long to sleep
    /// before the next one. The rate is re-measured once per second.
    pub fn end_frame(&mut self, started: Instant, now: Instant) -> Duration {
        self.frames += 1;
        let window = now.saturating_duration_since(self.window_start);
        if window >= Duration::from_secs(1) {
            self.fps = self.frames as f32 / window.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
        }
        self.budget.saturating_sub(now.saturating_duration_since(started))
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    config: DemoConfig,
    cube: MeshBuffers,
    sphere: MeshBuffers,
    view: View,
    pitch: f64,
    yaw: f64,
    renderer: TerminalRenderer,
    running: bool,
    clock: FrameClock,
}

impl TerminalApp {
    pub fn new(config: DemoConfig, view: View) -> Result<Self, AppError> {
        let (width, height) = terminal::size()?;
        let cube = MeshBuffers::generate(MeshShape::Cube)?;
        let sphere = MeshBuffers::generate(MeshShape::Sphere {
            stacks: config.sphere.stacks,
            sectors: config.sphere.sectors,
        })?;
        let clock = FrameClock::new(config.fps, Instant::now());

        Ok(Self {
            config,
            cube,
            sphere,
            view,
            pitch: 20.0,
            yaw: 0.0,
            // Last row is reserved for the status line.
            renderer: TerminalRenderer::new(width as usize, height.saturating_sub(1) as usize),
            running: true,
            clock,
        })
    }

    /// Take over the terminal until the user quits. The terminal is
    /// restored even when a frame fails.
    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let mut result = Ok(());
        while self.running && result.is_ok() {
            result = self.frame();
        }

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        result
    }

    fn frame(&mut self) -> Result<(), AppError> {
        let started = Instant::now();
        while event::poll(Duration::ZERO)? {
            self.handle_input()?;
        }
        self.update();
        self.render()?;

        let pause = self.clock.end_frame(started, Instant::now());
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Tab => {
                    self.view = self.view.next();
                    log::debug!("switched to {:?}", self.view);
                }
                KeyCode::Char('w') | KeyCode::Up => self.pitch -= 5.0,
                KeyCode::Char('s') | KeyCode::Down => self.pitch += 5.0,
                KeyCode::Char('a') | KeyCode::Left => self.yaw -= 5.0,
                KeyCode::Char('d') | KeyCode::Right => self.yaw += 5.0,
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        // Continuous slow rotation for demo effect
        self.yaw = (self.yaw + self.config.spin_speed) % 360.0;
    }

    /// Model matrix for the current view: spin first, then the configured
    /// placement records for the view's object.
    pub fn model_matrix(&self) -> Matrix4<f64> {
        mesh_model_matrix(&self.config.transforms, self.view, self.yaw, self.pitch)
    }

    fn render(&mut self) -> Result<(), AppError> {
        let [r, g, b] = self.config.background;
        self.renderer.clear(Color::new(r, g, b));

        match self.view {
            View::Scene2D => {
                let fb = self.renderer.framebuffer();
                let dx = ((fb.width() as f64 - scene::SCENE_EXTENT) / 2.0).floor();
                let dy = ((fb.height() as f64 - scene::SCENE_EXTENT) / 2.0).floor();
                let (vertices, primitives) = scene::default_scene(dx, dy);
                self.renderer.render_primitives(&vertices, &primitives)?;
            }
            View::Cube => {
                let model = self.model_matrix();
                self.renderer.render_mesh(&self.cube, &model);
            }
            View::Sphere => {
                let model = self.model_matrix();
                self.renderer.render_mesh(&self.sphere, &model);
            }
        }

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Status line below the image
        let (_, height) = terminal::size()?;
        queue!(
            stdout,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "rasterkit | {:?} | FPS: {:.1} | Tab=View WASD/Arrows=Rotate Q=Quit",
                self.view,
                self.clock.fps()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Spin by yaw then pitch, then apply the records addressed to the view's
/// object. Views without an object only spin.
fn mesh_model_matrix(records: &str, view: View, yaw: f64, pitch: f64) -> Matrix4<f64> {
    let spin = compute_transformation(&[TransformOp::RotateY(yaw), TransformOp::RotateX(pitch)]);
    match view.object() {
        Some(object) => compose_records(records, object) * spin,
        None => spin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rasterkit_core::Transform;

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Scene2D.next(), View::Cube);
        assert_eq!(View::Cube.next(), View::Sphere);
        assert_eq!(View::Sphere.next(), View::Scene2D);
    }

    #[test]
    fn test_only_mesh_views_take_records() {
        assert_eq!(View::Scene2D.object(), None);
        assert_eq!(View::Cube.object(), Some("cube"));
        assert_eq!(View::Sphere.object(), Some("sphere"));

        let records = "X,cube,T,2,0,0;X,sphere,S,3,3,3;X,scene,T,9,9,9;";
        let spin =
            compute_transformation(&[TransformOp::RotateY(30.0), TransformOp::RotateX(10.0)]);

        let cube = mesh_model_matrix(records, View::Cube, 30.0, 10.0);
        let placed = Transform::translation_matrix(2.0, 0.0, 0.0) * spin;
        assert_relative_eq!(cube, placed, epsilon = 1e-12);
        let sphere = mesh_model_matrix(records, View::Sphere, 30.0, 10.0);
        let placed = Transform::scale_matrix(3.0, 3.0, 3.0) * spin;
        assert_relative_eq!(sphere, placed, epsilon = 1e-12);
        let scene = mesh_model_matrix(records, View::Scene2D, 30.0, 10.0);
        assert_relative_eq!(scene, spin, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_clock_pads_short_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::new(20, start);

        let pause = clock.end_frame(start, start + Duration::from_millis(10));
        assert_eq!(pause, Duration::from_millis(40));
        let pause = clock.end_frame(start, start + Duration::from_millis(80));
        assert_eq!(pause, Duration::ZERO);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_frame_clock_measures_rate_each_second() {
        let start = Instant::now();
        let mut clock = FrameClock::new(30, start);
        let frame = Duration::from_millis(40);

        for i in 1..=25 {
            let now = start + frame * i;
            clock.end_frame(now - frame, now);
        }
        assert_relative_eq!(clock.fps(), 25.0, epsilon = 1e-3);

        // A zero target still yields a finite budget.
        let mut clock = FrameClock::new(0, start);
        assert_eq!(clock.end_frame(start, start), Duration::from_secs(1));
    }
}
