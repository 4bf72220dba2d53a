//! The decide → render → present → commit loop.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::core::{Engine, EngineError, FrameView, ViewError};
use crate::sink::FrameSink;
use crate::term::{Canvas, CanvasError, GameView, RenderReport};
use crate::types::{GridSize, DEFAULT_FRAME_DELAY_MS};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("failed to present frame: {0:#}")]
    Present(anyhow::Error),
    #[error("canvas grid {canvas:?} does not match engine grid {engine:?}")]
    GridMismatch { canvas: GridSize, engine: GridSize },
    #[error("no canvas size configured and the sink reports no viewport")]
    NoViewport,
    #[error("driver has already stopped")]
    Stopped,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The engine reported that no move remains.
    EngineFinished,
    /// A [`StopHandle`] asked the driver to stop.
    Cancelled,
    /// A cycle failed; the pending move was not committed.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    /// Terminal.
    Stopped(StopReason),
}

/// Outcome of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// A frame was rendered, presented and its move committed.
    Rendered(RenderReport),
    /// The engine had no move; nothing was rendered or committed.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub final_score: i64,
    pub reason: StopReason,
}

/// Cancellation token shared between the driver and outside code.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl StopHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request a stop. The driver observes it at its next suspension point.
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Drives one engine session onto one canvas.
pub struct FrameDriver<E, S> {
    engine: E,
    sink: S,
    canvas: Canvas,
    view: GameView,
    state: DriverState,
    frames: u64,
    frame_delay: Duration,
    stop: StopHandle,
    stop_rx: watch::Receiver<bool>,
}

impl<E, S> FrameDriver<E, S>
where
    E: Engine,
    S: FrameSink,
{
    /// The canvas must be built for the engine's grid.
    ///
    /// Engines keep their grid fixed for the whole session, so every decoded
    /// cell lands on the canvas. An engine that changes its grid anyway fails
    /// the cycle with [`DriverError::Canvas`] before the move is committed.
    pub fn new(engine: E, canvas: Canvas, sink: S) -> Result<Self, DriverError> {
        if canvas.grid() != engine.grid() {
            return Err(DriverError::GridMismatch {
                canvas: canvas.grid(),
                engine: engine.grid(),
            });
        }

        let stop = StopHandle::new();
        let stop_rx = stop.subscribe();
        Ok(Self {
            engine,
            sink,
            canvas,
            view: GameView::new(),
            state: DriverState::Idle,
            frames: 0,
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
            stop,
            stop_rx,
        })
    }

    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    /// Listen to an existing handle instead of the driver's own.
    pub fn with_stop_handle(mut self, stop: &StopHandle) -> Self {
        self.stop = stop.clone();
        self.stop_rx = stop.subscribe();
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Frames rendered and committed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Read-only access; only the driver may mutate the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Run exactly one cycle synchronously.
    ///
    /// On the first call the driver moves from `Idle` to `Running`. When the
    /// engine has no move, or any step fails, the driver stops for good.
    pub fn cycle(&mut self) -> Result<Cycle, DriverError> {
        match self.state {
            DriverState::Stopped(_) => return Err(DriverError::Stopped),
            DriverState::Idle => {
                info!(cols = self.canvas.grid().cols, rows = self.canvas.grid().rows, "driver running");
                self.state = DriverState::Running;
            }
            DriverState::Running => {}
        }

        match self.step() {
            Ok(Cycle::Finished) => {
                self.halt(StopReason::EngineFinished);
                Ok(Cycle::Finished)
            }
            Ok(cycle) => Ok(cycle),
            Err(err) => {
                error!(error = %err, frame = self.frames, "cycle failed, halting before commit");
                self.halt(StopReason::Failed);
                Err(err)
            }
        }
    }

    fn step(&mut self) -> Result<Cycle, DriverError> {
        let Some(mv) = self.engine.decide_next_move()? else {
            return Ok(Cycle::Finished);
        };

        // The view borrows the engine, so it must be gone before `commit`.
        let report = {
            let frame = FrameView::acquire(&self.engine)?;
            self.view.render(&frame, &mut self.canvas)?
        };

        self.sink
            .present(self.canvas.frame_buffer_mut())
            .map_err(DriverError::Present)?;

        self.engine.commit(mv)?;
        self.frames += 1;

        debug!(
            frame = self.frames,
            score = report.score,
            drawn = report.drawn,
            anomalies = report.anomalies,
            "cycle complete"
        );
        Ok(Cycle::Rendered(report))
    }

    fn halt(&mut self, reason: StopReason) {
        if !matches!(self.state, DriverState::Stopped(_)) {
            info!(?reason, frames = self.frames, score = self.engine.score(), "driver stopped");
            self.state = DriverState::Stopped(reason);
        }
    }

    /// Cycle until the engine finishes, a cycle fails, or a stop is requested.
    ///
    /// Yields once per cycle for `frame_delay`. Consumes the driver, so no
    /// mutable engine access survives the session.
    pub async fn run(mut self) -> Result<SessionSummary, DriverError> {
        loop {
            if *self.stop_rx.borrow_and_update() {
                self.halt(StopReason::Cancelled);
                break;
            }

            if let Cycle::Finished = self.cycle()? {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.frame_delay) => {}
                // The driver holds its own sender, so this only wakes on `stop()`.
                _ = self.stop_rx.changed() => {}
            }
        }

        Ok(self.summary())
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            final_score: self.engine.score(),
            reason: match self.state {
                DriverState::Stopped(reason) => reason,
                _ => StopReason::Cancelled,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::term::{FrameBuffer, Viewport};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Decide,
        View,
        Present,
        Commit,
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    #[derive(Debug, PartialEq, Eq)]
    struct Token(usize);

    struct Scripted {
        grid: GridSize,
        memory: Vec<u8>,
        bad_len: bool,
        grow_on_commit: bool,
        moves_left: usize,
        step: usize,
        log: Log,
    }

    impl Scripted {
        fn new(moves_left: usize, log: &Log) -> Self {
            Self {
                grid: GridSize::new(2, 1),
                memory: vec![0, 4],
                bad_len: false,
                grow_on_commit: false,
                moves_left,
                step: 0,
                log: log.clone(),
            }
        }
    }

    impl Engine for Scripted {
        type Move = Token;

        fn cols(&self) -> u16 {
            self.grid.cols
        }

        fn rows(&self) -> u16 {
            self.grid.rows
        }

        fn decide_next_move(&self) -> Result<Option<Token>, EngineError> {
            self.log.borrow_mut().push(Call::Decide);
            Ok((self.moves_left > 0).then_some(Token(self.step)))
        }

        fn commit(&mut self, mv: Token) -> Result<(), EngineError> {
            self.log.borrow_mut().push(Call::Commit);
            if mv != Token(self.step) {
                return Err(EngineError::UnexpectedMove);
            }
            self.step += 1;
            self.moves_left -= 1;
            if self.grow_on_commit {
                self.grid = GridSize::new(3, 1);
                self.memory = vec![0, 0, 4];
            }
            Ok(())
        }

        fn score(&self) -> i64 {
            self.step as i64 * 10
        }

        fn frame_ptr(&self) -> usize {
            self.log.borrow_mut().push(Call::View);
            0
        }

        fn frame_len(&self) -> usize {
            if self.bad_len {
                1
            } else {
                self.grid.cell_count()
            }
        }

        fn memory(&self) -> &[u8] {
            &self.memory
        }
    }

    struct Recorder {
        log: Log,
        fail: bool,
    }

    impl FrameSink for Recorder {
        fn viewport(&self) -> Option<Viewport> {
            None
        }

        fn present(&mut self, _fb: &mut FrameBuffer) -> anyhow::Result<()> {
            self.log.borrow_mut().push(Call::Present);
            if self.fail {
                anyhow::bail!("display gone");
            }
            Ok(())
        }
    }

    fn driver(engine: Scripted, fail: bool) -> FrameDriver<Scripted, Recorder> {
        let log = engine.log.clone();
        let canvas = Canvas::new(8, 4, engine.grid).unwrap();
        FrameDriver::new(engine, canvas, Recorder { log, fail }).unwrap()
    }

    #[test]
    fn no_move_stops_without_render_or_commit() {
        let log = Log::default();
        let mut d = driver(Scripted::new(0, &log), false);
        assert_eq!(d.state(), DriverState::Idle);

        assert_eq!(d.cycle().unwrap(), Cycle::Finished);
        assert_eq!(*log.borrow(), vec![Call::Decide]);
        assert_eq!(d.state(), DriverState::Stopped(StopReason::EngineFinished));
        assert!(matches!(d.cycle(), Err(DriverError::Stopped)));
    }

    #[test]
    fn cycles_are_strictly_ordered() {
        let log = Log::default();
        let mut d = driver(Scripted::new(2, &log), false);

        assert!(matches!(d.cycle().unwrap(), Cycle::Rendered(_)));
        assert_eq!(d.state(), DriverState::Running);
        assert!(matches!(d.cycle().unwrap(), Cycle::Rendered(_)));
        assert_eq!(d.cycle().unwrap(), Cycle::Finished);

        use Call::*;
        assert_eq!(
            *log.borrow(),
            vec![Decide, View, Present, Commit, Decide, View, Present, Commit, Decide]
        );
        assert_eq!(d.frames(), 2);
        assert_eq!(d.engine().score(), 20);
    }

    #[test]
    fn render_reports_the_pre_commit_score() {
        let log = Log::default();
        let mut d = driver(Scripted::new(1, &log), false);
        let Cycle::Rendered(report) = d.cycle().unwrap() else {
            panic!("expected a rendered frame");
        };
        assert_eq!(report.score, 0);
        assert_eq!(d.engine().score(), 10);
    }

    #[test]
    fn view_failure_halts_before_commit() {
        let log = Log::default();
        let mut engine = Scripted::new(3, &log);
        engine.bad_len = true;
        let mut d = driver(engine, false);

        assert!(matches!(d.cycle(), Err(DriverError::View(_))));
        assert!(!log.borrow().contains(&Call::Commit));
        assert!(!log.borrow().contains(&Call::Present));
        assert_eq!(d.state(), DriverState::Stopped(StopReason::Failed));
    }

    #[test]
    fn present_failure_halts_before_commit() {
        let log = Log::default();
        let mut d = driver(Scripted::new(3, &log), true);

        let err = d.cycle().unwrap_err();
        assert!(err.to_string().contains("display gone"));
        assert_eq!(*log.borrow(), vec![Call::Decide, Call::View, Call::Present]);
        assert_eq!(d.state(), DriverState::Stopped(StopReason::Failed));
    }

    #[test]
    fn off_canvas_cell_halts_before_commit() {
        let log = Log::default();
        let mut engine = Scripted::new(3, &log);
        engine.grow_on_commit = true;
        let mut d = driver(engine, false);

        assert!(matches!(d.cycle().unwrap(), Cycle::Rendered(_)));
        log.borrow_mut().clear();

        assert!(matches!(
            d.cycle(),
            Err(DriverError::Canvas(CanvasError::OutOfBounds { col: 2, row: 0, .. }))
        ));
        assert_eq!(*log.borrow(), vec![Call::Decide, Call::View]);
        assert_eq!(d.frames(), 1);
        assert_eq!(d.state(), DriverState::Stopped(StopReason::Failed));
    }

    #[test]
    fn canvas_must_match_engine_grid() {
        let log = Log::default();
        let canvas = Canvas::new(8, 4, GridSize::new(3, 1)).unwrap();
        let sink = Recorder {
            log: log.clone(),
            fail: false,
        };
        assert!(matches!(
            FrameDriver::new(Scripted::new(1, &log), canvas, sink),
            Err(DriverError::GridMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn run_drives_until_engine_finishes() {
        let log = Log::default();
        let summary = driver(Scripted::new(3, &log), false).run().await.unwrap();
        assert_eq!(
            summary,
            SessionSummary {
                frames: 3,
                final_score: 30,
                reason: StopReason::EngineFinished,
            }
        );
    }

    #[tokio::test]
    async fn stop_before_run_renders_nothing() {
        let log = Log::default();
        let d = driver(Scripted::new(usize::MAX, &log), false);
        d.stop_handle().stop();

        let summary = d.run().await.unwrap();
        assert_eq!(summary.reason, StopReason::Cancelled);
        assert_eq!(summary.frames, 0);
        assert!(log.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_handle_cancels_a_running_session() {
        let log = Log::default();
        let stop = StopHandle::new();
        let d = driver(Scripted::new(usize::MAX, &log), false)
            .with_frame_delay(Duration::from_millis(10))
            .with_stop_handle(&stop);

        let (summary, _) = tokio::join!(d.run(), async {
            tokio::time::sleep(Duration::from_millis(35)).await;
            stop.stop();
        });

        let summary = summary.unwrap();
        assert_eq!(summary.reason, StopReason::Cancelled);
        assert!(summary.frames >= 1);
        assert!(stop.is_stopped());
        // The last call is always a commit: cancellation never splits a cycle.
        assert_eq!(log.borrow().last(), Some(&Call::Commit));
    }
}
