use std::io::stdout;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::bail;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{DefaultTerminal, Frame, layout::Rect, layout::Size};
use wireframe_config::{Config, MotionConfig, PreferenceStore};
use wireframe_engine::{
    DisplayList, MotionPolicy, Point, Surface, WireFrame, WireFrameCanvas, braille_resolution,
};

mod chrome;
mod cli;
mod logging;
mod pointer;
mod seeder;

use chrome::{Chrome, NavigationAction};
use cli::Cli;
use pointer::pointer_to_canvas;
use seeder::Seeder;

/// Points added by the `a` key.
const KEY_BATCH: usize = 10;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut config = cli.load_config()?;
    cli.apply(&mut config);
    config.validate()?;

    if let Some(path) = logging::init(&config.log)? {
        tracing::info!(path = %path.display(), "logging started");
    }

    let preferences = match PreferenceStore::open_default() {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!(%err, "preferences unavailable, theme will not be saved");
            None
        }
    };

    let app = App::new(&config, preferences)?;
    let terminal = ratatui::init();
    crossterm::execute!(stdout(), EnableMouseCapture)?;
    let result = app.run(terminal);
    if let Err(err) = crossterm::execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(%err, "failed to disable mouse capture");
    }
    ratatui::restore();
    result
}

/// Motion settings from the config file.
fn motion_policy(config: &MotionConfig) -> MotionPolicy {
    MotionPolicy {
        progress_limit: config.progress_limit,
        travel_distance_min: config.travel_distance_min,
        travel_distance_max: config.travel_distance_max,
        control_points_min: config.control_points_min,
        control_points_max: config.control_points_max,
        ..MotionPolicy::default()
    }
}

/// A terminal without cells has nowhere to put the canvas.
fn check_canvas_host(size: Size) -> color_eyre::Result<()> {
    if size.width == 0 || size.height == 0 {
        bail!("unable to locate canvas host: terminal is {}x{}", size.width, size.height);
    }
    Ok(())
}

/// The stage: owns the wireframe, its surface and the chrome, and drives
/// them from the terminal event loop.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    wireframe: WireFrame,
    /// Draw calls of the current frame.
    surface: DisplayList,
    /// Screen cells covered by the canvas.
    canvas_area: Rect,
    chrome: Chrome,
    preferences: Option<PreferenceStore>,
    /// Population ramp, while it runs.
    seeder: Option<Seeder>,
    seed_steps: usize,
    seed_delay: Duration,
    frame_interval: Duration,
    /// Clicked points show the debug overlay.
    pointer_debug: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config, preferences: Option<PreferenceStore>) -> color_eyre::Result<Self> {
        let wireframe = WireFrame::new(config.base_color()?, config.wireframe.proximity_radius)
            .with_policy(motion_policy(&config.motion))
            .with_max_connections(config.wireframe.max_connections);
        let theme = preferences.as_ref().map(PreferenceStore::theme).unwrap_or_default();

        Ok(Self {
            running: false,
            wireframe,
            surface: DisplayList::new(0, 0),
            canvas_area: Rect::default(),
            chrome: Chrome::new(&config.chrome, theme),
            preferences,
            seeder: None,
            seed_steps: config.seed.steps,
            seed_delay: Duration::from_secs(config.seed.delay_secs),
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(config.stage.frame_rate.max(1))),
            pointer_debug: config.stage.pointer_debug,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        check_canvas_host(size)?;
        self.resize(size.width, size.height);

        if self.seed_steps > 0 {
            self.seeder = Some(Seeder::start(self.seed_steps, self.seed_delay));
        }
        tracing::info!(
            columns = size.width,
            rows = size.height,
            interval = ?self.frame_interval,
            "stage started"
        );

        self.running = true;
        while self.running {
            let deadline = Instant::now() + self.frame_interval;
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(deadline)?;
        }
        Ok(())
    }

    /// Advance the animation by one frame.
    fn tick(&mut self) {
        if let Some(seeder) = &self.seeder {
            let count: usize = seeder.pending().sum();
            if count > 0 {
                self.wireframe.add_points(count, &self.surface);
            }
        }
        self.wireframe.draw(&mut self.surface);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let palette = self.chrome.palette();
        let area = self.canvas_area.intersection(frame.area());
        frame.render_widget(
            WireFrameCanvas::new(&self.surface).background(palette.background),
            area,
        );
        self.chrome.render(frame, self.wireframe.color(), self.wireframe.len());
    }

    /// Reads the crossterm events until `deadline` and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(columns, rows) => self.resize(columns, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('v')) => {
                self.chrome.toggle_visibility();
            }
            (_, KeyCode::Char('d')) => self.wireframe.toggle_debug_visuals(None),
            (_, KeyCode::Char('a')) => self.wireframe.add_points(KEY_BATCH, &self.surface),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            self.on_pointer_down(mouse.column, mouse.row);
        }
    }

    /// Run a clicked navigation item, or add a point under the pointer.
    fn on_pointer_down(&mut self, column: u16, row: u16) {
        if let Some(action) = self.chrome.hit_test(column, row) {
            self.apply(action);
            return;
        }

        let surface = (self.surface.width(), self.surface.height());
        let Some(location) = pointer_to_canvas(column, row, self.canvas_area, surface) else {
            return;
        };
        let mut point = Point::new(location, self.wireframe.color()).with_policy(*self.wireframe.policy());
        if self.pointer_debug {
            point = point.with_debug_visuals();
        }
        self.wireframe.add_point(point);
        tracing::debug!(x = location.x, y = location.y, total = self.wireframe.len(), "point added at pointer");
    }

    fn apply(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::ToggleVisibility => {
                self.chrome.toggle_visibility();
            }
            NavigationAction::ToggleTheme => self.toggle_theme(),
            NavigationAction::Open { url, target } => chrome::open_url(&url, target),
        }
    }

    /// Resize the canvas. Points keep their in-flight targets.
    fn resize(&mut self, columns: u16, rows: u16) {
        self.canvas_area = Rect::new(0, 0, columns, rows);
        let (width, height) = braille_resolution(self.canvas_area);
        self.surface.resize(width, height);
        tracing::info!(columns, rows, width, height, "canvas resized");
    }

    /// Toggle the theme and remember the choice.
    fn toggle_theme(&mut self) {
        let theme = self.chrome.toggle_theme();
        if let Some(preferences) = &mut self.preferences
            && let Err(err) = preferences.set_theme(theme)
        {
            tracing::warn!(%err, "failed to save theme preference");
        }
        tracing::info!(%theme, "theme changed");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
