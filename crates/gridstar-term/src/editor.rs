//! The interactive model: grid editing, search control and rendering.

use gridstar_core::{Grid, Point, Role, Topology};
use gridstar_paths::{refresh_all, Marker, SearchEngine, SearchState};

use crate::config::VisualizerConfig;
use crate::frame::{Color, Frame, ScreenCell};
use crate::msg::{Key, MouseAction, Msg};

// Colours
const COL_EMPTY: Color = Color::WHITE;
const COL_BARRIER: Color = Color::BLACK;
const COL_START: Color = Color::from_rgb(0, 255, 255);
const COL_END: Color = Color::from_rgb(255, 0, 255);
const COL_FRONTIER: Color = Color::from_rgb(0, 255, 0);
const COL_EXPANDED: Color = Color::from_rgb(255, 0, 0);
const COL_PATH: Color = Color::from_rgb(0, 0, 255);
const COL_STATUS_FG: Color = Color::from_rgb(200, 200, 200);
const COL_STATUS_BG: Color = Color::from_rgb(30, 30, 50);

/// Terminal columns per grid cell, so cells look roughly square.
const CELL_WIDTH: i32 = 2;
/// Screen lines above the grid.
const HEADER_LINES: i32 = 1;

const HELP: &str = "click: start/end/wall  right-click: erase  space: animate  \
enter: run  n: step  t: topology  c: clear  q: quit";

/// Whether the event loop should keep going.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Grid editor and search driver.
pub struct Editor {
    grid: Grid,
    engine: SearchEngine,
    topology: Topology,
    steps_per_tick: usize,
    animating: bool,
    message: Option<String>,
}

impl Editor {
    pub fn new(config: &VisualizerConfig) -> Self {
        Self {
            grid: Grid::new(config.grid_size),
            engine: SearchEngine::new(),
            topology: config.topology,
            steps_per_tick: config.steps_per_tick.max(1),
            animating: false,
            message: None,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Whether a search is being advanced by [`tick`](Self::tick).
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Last status message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Screen size needed to show the whole grid plus the status line.
    pub fn screen_size(&self) -> (usize, usize) {
        let n = self.grid.size();
        (n * CELL_WIDTH as usize, n + HEADER_LINES as usize)
    }

    /// Map a screen position to the grid cell under it.
    pub fn cell_at(&self, screen: Point) -> Option<Point> {
        if screen.col < 0 {
            return None;
        }
        let p = Point::new(screen.row - HEADER_LINES, screen.col / CELL_WIDTH);
        self.grid.contains(p).then_some(p)
    }

    /// Handle one input message.
    pub fn update(&mut self, msg: Msg) -> Flow {
        match msg {
            Msg::Quit | Msg::KeyDown(Key::Escape | Key::Char('q')) => return Flow::Quit,
            Msg::KeyDown(Key::Space) => {
                if self.begin_search() {
                    self.animating = true;
                }
            }
            Msg::KeyDown(Key::Enter) => {
                if self.begin_search() {
                    self.finish_search();
                }
            }
            Msg::KeyDown(Key::Char('n')) => self.single_step(),
            Msg::KeyDown(Key::Char('t')) => {
                self.topology = self.topology.toggled();
                self.stop_search();
                self.message = Some(format!("movement: {}", self.topology));
            }
            Msg::KeyDown(Key::Char('c')) => {
                self.grid.clear();
                self.stop_search();
                self.message = None;
            }
            Msg::Mouse { action, pos } => {
                if let Some(p) = self.cell_at(pos) {
                    match action {
                        MouseAction::Main => self.paint(p),
                        MouseAction::Secondary => self.erase(p),
                        MouseAction::Release | MouseAction::Move => {}
                    }
                }
            }
            Msg::KeyDown(Key::Char(_)) | Msg::Screen { .. } => {}
        }
        Flow::Continue
    }

    /// Advance an animated search by the configured number of steps.
    pub fn tick(&mut self) {
        if !self.animating {
            return;
        }
        for _ in 0..self.steps_per_tick {
            match self.engine.step(&self.grid) {
                Ok(SearchState::Running) => {}
                Ok(_) => {
                    self.animating = false;
                    self.report();
                    return;
                }
                Err(e) => {
                    self.animating = false;
                    self.message = Some(e.to_string());
                    return;
                }
            }
        }
    }

    /// Left click: first the start, then the end, then barriers.
    fn paint(&mut self, p: Point) {
        let start = self.grid.start();
        let end = self.grid.end();
        let role = if start.is_none() && end != Some(p) {
            Role::Start
        } else if end.is_none() && start != Some(p) {
            Role::End
        } else if start != Some(p) && end != Some(p) {
            Role::Barrier
        } else {
            return;
        };
        if self.grid.role(p) == Some(role) {
            return;
        }
        self.stop_search();
        if let Err(e) = self.grid.set_role(p, role) {
            log::warn!("{e}");
            self.message = Some(e.to_string());
        }
    }

    fn erase(&mut self, p: Point) {
        if self.grid.role(p) == Some(Role::Empty) {
            return;
        }
        self.stop_search();
        if let Err(e) = self.grid.reset(p) {
            log::warn!("{e}");
            self.message = Some(e.to_string());
        }
    }

    /// Refresh adjacency and initialise a new search. Returns whether the
    /// search started.
    fn begin_search(&mut self) -> bool {
        self.animating = false;
        refresh_all(&mut self.grid, self.topology);
        match self.engine.initialize_marked(&self.grid, self.topology) {
            Ok(()) => {
                self.message = None;
                true
            }
            Err(e) => {
                self.message = Some(e.to_string());
                false
            }
        }
    }

    fn finish_search(&mut self) {
        self.animating = false;
        match self.engine.run_to_completion(&self.grid) {
            Ok(_) => self.report(),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn single_step(&mut self) {
        self.animating = false;
        if self.engine.state() != SearchState::Running && !self.begin_search() {
            return;
        }
        match self.engine.step(&self.grid) {
            Ok(SearchState::Running) => {}
            Ok(_) => self.report(),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn stop_search(&mut self) {
        self.animating = false;
        self.engine.abandon();
    }

    fn report(&mut self) {
        self.message = Some(match self.engine.state() {
            SearchState::Found => format!(
                "path found: {} steps, cost {:.2}",
                self.engine.path().map_or(0, <[Point]>::len),
                self.engine.path_cost().unwrap_or(f64::NAN)
            ),
            SearchState::Exhausted => "no path".to_string(),
            SearchState::Running | SearchState::Uninitialized => return,
        });
    }

    /// Colour of a grid cell: the role wins over search markers.
    pub fn cell_color(&self, p: Point) -> Color {
        match self.grid.role(p) {
            Some(Role::Start) => COL_START,
            Some(Role::End) => COL_END,
            Some(Role::Barrier) => COL_BARRIER,
            Some(Role::Empty) => match self.engine.marker(p) {
                Marker::Unvisited => COL_EMPTY,
                Marker::Frontier => COL_FRONTIER,
                Marker::Expanded => COL_EXPANDED,
                Marker::Path => COL_PATH,
            },
            None => COL_BARRIER,
        }
    }

    fn status_line(&self) -> String {
        let state = match self.engine.state() {
            SearchState::Uninitialized => "idle",
            SearchState::Running => "searching",
            SearchState::Found => "found",
            SearchState::Exhausted => "exhausted",
        };
        let tail = self.message.as_deref().unwrap_or(HELP);
        format!(
            " {} | {} | expanded {} | {}",
            self.topology,
            state,
            self.engine.expansions(),
            tail
        )
    }

    /// Render the status line and grid.
    pub fn draw(&self) -> Frame {
        let (w, h) = self.screen_size();
        let mut frame = Frame::new(w, h);

        frame.print(Point::ZERO, &" ".repeat(w), COL_STATUS_FG, COL_STATUS_BG);
        frame.print(Point::ZERO, &self.status_line(), COL_STATUS_FG, COL_STATUS_BG);

        for cell in self.grid.iter() {
            let p = cell.pos();
            let bg = self.cell_color(p);
            let screen = Point::new(p.row + HEADER_LINES, p.col * CELL_WIDTH);
            for dx in 0..CELL_WIDTH {
                frame.set(
                    screen.shift(0, dx),
                    ScreenCell {
                        ch: ' ',
                        fg: bg,
                        bg,
                    },
                );
            }
        }
        frame
    }
}
