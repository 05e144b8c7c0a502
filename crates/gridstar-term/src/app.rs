//! The event loop tying an [`Editor`] to a [`Driver`].

use std::error::Error;
use std::time::Instant;

use crate::config::VisualizerConfig;
use crate::driver::{CrosstermDriver, Driver};
use crate::editor::{Editor, Flow};
use crate::frame::Frame;

/// Run the visualiser in the terminal until the user quits.
pub fn run(config: &VisualizerConfig) -> Result<(), Box<dyn Error>> {
    let driver = CrosstermDriver::new().with_mouse(config.mouse);
    run_with(config, driver)
}

/// Run the visualiser on an arbitrary back-end.
///
/// 1. Initialises the driver.
/// 2. Polls input, feeding each message to the editor.
/// 3. Ticks the editor once per `step_interval`.
/// 4. Draws, diffs against the previous frame and flushes the changes.
///
/// The driver is closed on every exit path.
pub fn run_with<D: Driver>(config: &VisualizerConfig, mut driver: D) -> Result<(), Box<dyn Error>> {
    config.validate()?;
    let mut editor = Editor::new(config);

    driver.init()?;
    let result = event_loop(config, &mut editor, &mut driver);
    driver.close();
    result
}

fn event_loop<D: Driver>(
    config: &VisualizerConfig,
    editor: &mut Editor,
    driver: &mut D,
) -> Result<(), Box<dyn Error>> {
    let interval = config.step_interval();
    let (w, h) = editor.screen_size();
    log::debug!("visualiser started: {}x{} screen", w, h);

    let mut prev = Frame::new(0, 0);
    let mut msgs = Vec::new();
    let mut last_tick = Instant::now();

    loop {
        let frame = editor.draw();
        let changed = frame.diff(&prev);
        if !changed.is_empty() {
            driver.flush(&changed)?;
        }
        prev = frame;

        let timeout = if editor.is_animating() {
            interval.saturating_sub(last_tick.elapsed())
        } else {
            interval
        };
        msgs.clear();
        driver.poll_msgs(timeout, &mut msgs)?;
        for msg in msgs.drain(..) {
            if editor.update(msg) == Flow::Quit {
                return Ok(());
            }
        }

        if last_tick.elapsed() >= interval {
            editor.tick();
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    use gridstar_core::Point;
    use gridstar_paths::SearchState;

    use crate::frame::FrameCell;
    use crate::msg::{Key, MouseAction, Msg};

    #[derive(Default)]
    struct Log {
        init: bool,
        closed: bool,
        flushed: Vec<Vec<FrameCell>>,
    }

    /// Replays a fixed script of input batches, then quits.
    struct ScriptedDriver {
        script: VecDeque<Vec<Msg>>,
        log: Rc<RefCell<Log>>,
        fail_flush: bool,
    }

    impl ScriptedDriver {
        fn new(script: Vec<Vec<Msg>>) -> (Self, Rc<RefCell<Log>>) {
            let log = Rc::new(RefCell::new(Log::default()));
            let driver = Self {
                script: script.into(),
                log: Rc::clone(&log),
                fail_flush: false,
            };
            (driver, log)
        }
    }

    impl Driver for ScriptedDriver {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            self.log.borrow_mut().init = true;
            Ok(())
        }

        fn poll_msgs(&mut self, _: Duration, out: &mut Vec<Msg>) -> Result<(), Box<dyn Error>> {
            out.extend(self.script.pop_front().unwrap_or_else(|| vec![Msg::Quit]));
            Ok(())
        }

        fn flush(&mut self, cells: &[FrameCell]) -> Result<(), Box<dyn Error>> {
            if self.fail_flush {
                return Err("flush failed".into());
            }
            self.log.borrow_mut().flushed.push(cells.to_vec());
            Ok(())
        }

        fn close(&mut self) {
            self.log.borrow_mut().closed = true;
        }
    }

    fn click(row: i32, col: i32) -> Msg {
        Msg::Mouse {
            action: MouseAction::Main,
            pos: Point::new(row + 1, col * 2),
        }
    }

    fn config() -> VisualizerConfig {
        VisualizerConfig::default()
            .with_grid_size(4)
            .with_step_interval(Duration::ZERO)
    }

    #[test]
    fn first_frame_is_full_then_diffs() {
        let (driver, log) = ScriptedDriver::new(vec![vec![click(0, 0)]]);
        run_with(&config(), driver).unwrap();
        let log = log.borrow();
        assert!(log.init && log.closed);
        // full 8x5 screen, then only the two columns of the start cell
        assert_eq!(log.flushed[0].len(), 40);
        assert_eq!(log.flushed.len(), 2);
        let cols: Vec<Point> = log.flushed[1].iter().map(|fc| fc.pos).collect();
        assert_eq!(cols, vec![Point::new(1, 0), Point::new(1, 1)]);
    }

    #[test]
    fn animated_search_redraws_every_tick() {
        let mut script = vec![vec![click(0, 0), click(3, 3), Msg::KeyDown(Key::Space)]];
        script.extend((0..20).map(|_| Vec::new()));
        let (driver, log) = ScriptedDriver::new(script);
        run_with(&config(), driver).unwrap();
        // one full frame, one for the edits, then at least one per step
        let log = log.borrow();
        assert!(log.flushed.len() > 3);
        assert!(log.closed);
    }

    #[test]
    fn driver_is_closed_on_error() {
        let (mut driver, log) = ScriptedDriver::new(vec![]);
        driver.fail_flush = true;
        assert!(run_with(&config(), driver).is_err());
        assert!(log.borrow().closed);
    }

    #[test]
    fn invalid_config_is_rejected_before_init() {
        let (driver, log) = ScriptedDriver::new(vec![]);
        let err = run_with(&config().with_grid_size(0), driver).unwrap_err();
        assert!(err.to_string().contains("too small"));
        assert!(!log.borrow().init);
    }

    #[test]
    fn editor_state_after_scripted_run() {
        let mut editor = Editor::new(&config());
        for msg in [click(0, 0), click(3, 3), Msg::KeyDown(Key::Enter)] {
            editor.update(msg);
        }
        assert_eq!(editor.engine().state(), SearchState::Found);
    }
}
