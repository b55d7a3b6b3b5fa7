//! Animated single-line status spinner.
//!
//! A [`Spinner`] draws `\r{frame} {message}` to its sink on a fixed period
//! from a background thread while the caller does blocking work. All mutable
//! fields live behind one mutex shared with the render thread; the lock is
//! only held for a single read, write, or sink write and never across the
//! wait between ticks.
//!
//! # Lifecycle
//! 1. [`Spinner::start`] spawns the render thread with a fresh stop channel
//! 2. The thread hides the cursor, then redraws the line once per interval
//! 3. [`Spinner::stop`] signals the thread and joins it, so the line is
//!    cleared and the cursor restored before `stop` returns
//!
//! Dropping a running spinner stops it.

pub mod ansi;
pub mod frames;
pub mod sink;

use std::fmt;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::error::SpinnerError;

pub use frames::{FrameSet, FrameStyle};
pub use sink::SharedBuffer;

/// Delay between frames unless overridden.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(80);

const RENDER_THREAD_NAME: &str = "termspin-render";

/// Terminal spinner with a background render loop.
///
/// ```no_run
/// use std::time::Duration;
/// use termspin::spinner::{Spinner, frames};
///
/// let mut sp = Spinner::new("Scanning repositories...")
///     .with_frames(frames::PACMAN_GHOST)
///     .with_interval(Duration::from_millis(100))?;
/// sp.start();
/// // blocking work
/// sp.update_message("Fetching commits...");
/// sp.stop();
/// # Ok::<(), termspin::SpinnerError>(())
/// ```
pub struct Spinner {
    shared: Arc<Mutex<State>>,
    worker: Option<Worker>,
}

/// Fields shared with the render thread.
struct State {
    frames: FrameSet,
    interval: Duration,
    message: String,
    sink: Box<dyn Write + Send>,
    running: bool,
}

/// The render thread of the current run and its stop channel.
struct Worker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

fn lock(shared: &Mutex<State>) -> MutexGuard<'_, State> {
    // A panic in a sink write must not wedge the lifecycle calls
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Spinner {
    /// Create a stopped spinner with default frames, interval, and stderr
    /// as its sink.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(State {
                frames: FrameSet::default(),
                interval: DEFAULT_INTERVAL,
                message: message.into(),
                sink: Box::new(io::stderr()),
                running: false,
            })),
            worker: None,
        }
    }

    /// Use a different frame set.
    #[must_use]
    pub fn with_frames(self, frames: FrameSet) -> Self {
        self.set_frames(frames);
        self
    }

    /// Use one of the built-in frame sets by name.
    #[must_use]
    pub fn with_style(self, style: FrameStyle) -> Self {
        self.with_frames(style.frames())
    }

    /// Set the delay between frames. A zero interval is rejected.
    pub fn with_interval(self, interval: Duration) -> Result<Self, SpinnerError> {
        self.set_interval(interval)?;
        Ok(self)
    }

    /// Send output to `writer` instead of stderr.
    #[must_use]
    pub fn with_writer<W>(self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.set_writer(writer);
        self
    }

    /// Replace the frame set. While running, the next tick uses it.
    pub fn set_frames(&self, frames: FrameSet) {
        lock(&self.shared).frames = frames;
    }

    /// Replace the interval. While running, it applies from the next tick.
    pub fn set_interval(&self, interval: Duration) -> Result<(), SpinnerError> {
        if interval.is_zero() {
            return Err(SpinnerError::ZeroInterval);
        }
        lock(&self.shared).interval = interval;
        Ok(())
    }

    /// Replace the sink. While running, the next write goes to it.
    pub fn set_writer<W>(&self, writer: W)
    where
        W: Write + Send + 'static,
    {
        lock(&self.shared).sink = Box::new(writer);
    }

    /// Change the text shown next to the frame.
    ///
    /// Only stored; the render loop picks it up on its next tick. A message
    /// set while stopped is shown by the next run.
    pub fn update_message(&self, message: impl Into<String>) {
        lock(&self.shared).message = message.into();
    }

    pub fn message(&self) -> String {
        lock(&self.shared).message.clone()
    }

    pub fn interval(&self) -> Duration {
        lock(&self.shared).interval
    }

    pub fn frames(&self) -> FrameSet {
        lock(&self.shared).frames.clone()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).running
    }

    /// Start the render loop. No-op if already running.
    ///
    /// Returns without waiting for the first frame.
    pub fn start(&mut self) {
        let mut state = lock(&self.shared);
        if state.running {
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(RENDER_THREAD_NAME.to_string())
            .spawn(move || render_loop(&shared, &stop_rx));

        match spawned {
            Ok(handle) => {
                state.running = true;
                debug!(
                    interval_ms = state.interval.as_millis(),
                    frames = state.frames.len(),
                    "spinner:start"
                );
                self.worker = Some(Worker { stop_tx, handle });
            }
            Err(e) => {
                // Run without animation rather than fail the caller's work
                warn!(error = %e, "spinner:failed to spawn render thread");
            }
        }
    }

    /// Stop the render loop and wait for it to restore the terminal.
    ///
    /// No-op if not running. When this returns the sink has received the
    /// line clear and show-cursor sequence and nothing else will be written
    /// until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        {
            let mut state = lock(&self.shared);
            if !state.running {
                return;
            }
            state.running = false;
        }

        let Some(worker) = self.worker.take() else {
            return;
        };

        // The loop may already have seen `running == false` and exited;
        // a closed channel is fine then.
        let _ = worker.stop_tx.send(());
        if worker.handle.join().is_err() {
            warn!("spinner:render thread panicked");
        }
        debug!("spinner:stop");
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.shared);
        f.debug_struct("Spinner")
            .field("frames", &state.frames)
            .field("interval", &state.interval)
            .field("message", &state.message)
            .field("running", &state.running)
            .finish_non_exhaustive()
    }
}

/// Tracks sink failures so a broken sink is logged once per run.
///
/// Writes happen with the state lock held: the sink is one of the shared
/// fields, so a caller's setter or `is_running` may wait for at most one
/// in-flight write.
#[derive(Default)]
struct SinkHealth {
    failed: bool,
}

impl SinkHealth {
    fn write(&mut self, state: &mut State, bytes: &str) {
        let result = state
            .sink
            .write_all(bytes.as_bytes())
            .and_then(|()| state.sink.flush());
        if let Err(e) = result
            && !self.failed
        {
            self.failed = true;
            debug!(error = %e, "spinner:sink write failed");
        }
    }
}

/// Body of the render thread.
///
/// Each iteration races the next tick deadline against the stop channel.
/// A pending stop always wins: `recv_timeout` returns a queued message
/// before considering the deadline, and the `running` flag is checked again
/// under the lock before drawing.
fn render_loop(shared: &Mutex<State>, stop_rx: &Receiver<()>) {
    let mut health = SinkHealth::default();

    let mut interval = {
        let mut state = lock(shared);
        health.write(&mut state, &ansi::begin());
        state.interval
    };

    let mut tick: usize = 0;
    let mut deadline = Instant::now().checked_add(interval);

    loop {
        // No representable deadline: the next tick never comes
        let Some(due) = deadline else {
            let _ = stop_rx.recv();
            break;
        };
        let wait = due.saturating_duration_since(Instant::now());
        match stop_rx.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        {
            let mut state = lock(shared);
            if !state.running {
                break;
            }
            let line = ansi::tick_line(state.frames.frame(tick), &state.message);
            health.write(&mut state, &line);
            interval = state.interval;
        }

        tick = tick.wrapping_add(1);
        deadline = next_deadline(due, interval, Instant::now());
    }

    let mut state = lock(shared);
    health.write(&mut state, &ansi::finish());
    trace!(ticks = tick, "spinner:render loop exited");
}

/// Deadline for the tick after the one due at `due`.
///
/// A loop that fell behind (slow sink, suspended process) skips the missed
/// ticks and schedules from `now`. `None` when the result is past what
/// `Instant` can represent.
fn next_deadline(due: Instant, interval: Duration, now: Instant) -> Option<Instant> {
    let next = due.checked_add(interval)?;
    if next < now {
        now.checked_add(interval)
    } else {
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    const FAST: Duration = Duration::from_millis(10);

    /// Split captured output into the per-tick lines, checking the start and
    /// end sequences along the way.
    fn ticks(output: &str) -> Vec<String> {
        let body = output
            .strip_prefix(ansi::begin().as_str())
            .expect("output should start with hide-cursor");
        let body = body
            .strip_suffix(ansi::finish().as_str())
            .expect("output should end with clear-line and show-cursor");
        body.split('\r')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn fast_spinner(message: &str, buf: &SharedBuffer) -> Spinner {
        Spinner::new(message)
            .with_writer(buf.clone())
            .with_interval(FAST)
            .unwrap()
    }

    #[test]
    fn test_new_is_stopped_with_defaults() {
        let sp = Spinner::new("test");
        assert!(!sp.is_running());
        assert_eq!(sp.message(), "test");
        assert_eq!(sp.interval(), DEFAULT_INTERVAL);
        assert_eq!(sp.frames(), frames::DOTS);
    }

    #[test]
    fn test_start_stop_toggles_running() {
        let buf = SharedBuffer::new();
        let mut sp = fast_spinner("testing", &buf);

        sp.start();
        assert!(sp.is_running());

        thread::sleep(Duration::from_millis(50));
        sp.stop();

        assert!(!sp.is_running());
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_loading_scenario_with_defaults() {
        let buf = SharedBuffer::new();
        let mut sp = Spinner::new("Loading").with_writer(buf.clone());

        sp.start();
        thread::sleep(DEFAULT_INTERVAL * 6);
        sp.stop();

        let output = buf.to_string_lossy();
        let lines = ticks(&output);
        let loading: Vec<_> = lines.iter().filter(|l| l.contains("Loading")).collect();
        let mut distinct = loading.clone();
        distinct.sort();
        distinct.dedup();

        assert!(loading.len() >= 3, "expected at least 3 ticks, got {lines:?}");
        assert!(distinct.len() >= 3, "expected distinct frames, got {lines:?}");
        assert!(output.ends_with("\r\x1b[K\x1b[?25h"));
    }

    #[test]
    fn test_stop_without_start_writes_nothing() {
        let buf = SharedBuffer::new();
        let mut sp = Spinner::new("idle").with_writer(buf.clone());

        sp.stop();

        assert!(buf.is_empty());
        assert!(!sp.is_running());
    }

    #[test]
    fn test_immediate_stop_still_cleans_up() {
        let buf = SharedBuffer::new();
        let mut sp = Spinner::new("quick").with_writer(buf.clone());

        for _ in 0..25 {
            sp.start();
            sp.stop();
        }

        let output = buf.to_string_lossy();
        assert_eq!(output.matches(&ansi::begin()).count(), 25);
        assert_eq!(output.matches(&ansi::finish()).count(), 25);
        assert!(output.ends_with(&ansi::finish()));
    }

    #[test]
    fn test_double_start_runs_one_loop() {
        let buf = SharedBuffer::new();
        let mut sp = Spinner::new("once")
            .with_writer(buf.clone())
            .with_interval(Duration::from_millis(20))
            .unwrap();

        sp.start();
        sp.start();
        thread::sleep(Duration::from_millis(200));
        sp.stop();

        let output = buf.to_string_lossy();
        assert_eq!(output.matches(&ansi::begin()).count(), 1);
        // 200ms at 20ms per tick; a second loop would roughly double this
        assert!(ticks(&output).len() <= 14, "too many ticks: {output:?}");
    }

    #[test]
    fn test_double_stop_is_noop() {
        let buf = SharedBuffer::new();
        let mut sp = fast_spinner("twice", &buf);

        sp.start();
        thread::sleep(Duration::from_millis(30));
        sp.stop();
        let after_first = buf.contents();
        sp.stop();

        assert_eq!(buf.contents(), after_first);
        assert_eq!(buf.to_string_lossy().matches(&ansi::finish()).count(), 1);
    }

    #[test]
    fn test_no_writes_after_stop() {
        let buf = SharedBuffer::new();
        let mut sp = fast_spinner("quiet", &buf);

        sp.start();
        thread::sleep(Duration::from_millis(40));
        sp.stop();

        let len = buf.len();
        thread::sleep(FAST * 5);
        assert_eq!(buf.len(), len);
        assert!(buf.to_string_lossy().ends_with(&ansi::finish()));
    }

    #[test]
    fn test_update_message_while_running() {
        let buf = SharedBuffer::new();
        let mut sp = fast_spinner("first", &buf);

        sp.start();
        thread::sleep(Duration::from_millis(60));
        sp.update_message("second");
        thread::sleep(Duration::from_millis(60));
        sp.stop();

        let output = buf.to_string_lossy();
        let lines = ticks(&output);
        let switch = lines
            .iter()
            .position(|l| l.ends_with(" second"))
            .expect("updated message should be rendered");

        assert!(lines[..switch].iter().all(|l| l.ends_with(" first")));
        assert!(lines[switch..].iter().all(|l| l.ends_with(" second")));
    }

    #[test]
    fn test_update_message_while_stopped_is_kept_for_next_run() {
        let buf = SharedBuffer::new();
        let mut sp = fast_spinner("old", &buf);

        sp.update_message("new");
        assert!(buf.is_empty());
        assert_eq!(sp.message(), "new");

        sp.start();
        thread::sleep(Duration::from_millis(50));
        sp.stop();

        let lines = ticks(&buf.to_string_lossy());
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.ends_with(" new")));
    }

    #[test]
    fn test_single_frame_set() {
        let buf = SharedBuffer::new();
        let mut sp =
            fast_spinner("solo", &buf).with_frames(FrameSet::new(["*"]).unwrap());

        sp.start();
        thread::sleep(FAST * 10);
        sp.stop();

        let lines = ticks(&buf.to_string_lossy());
        assert!(lines.len() >= 5, "expected at least 5 ticks, got {lines:?}");
        assert!(lines.iter().all(|l| l == "* solo"));
    }

    #[test]
    fn test_frames_follow_tick_order() {
        let buf = SharedBuffer::new();
        let frames = FrameSet::new(["a", "b", "c"]).unwrap();
        let mut sp = fast_spinner("x", &buf).with_frames(frames.clone());

        sp.start();
        thread::sleep(FAST * 12);
        sp.stop();

        let lines = ticks(&buf.to_string_lossy());
        for (k, line) in lines.iter().enumerate() {
            assert_eq!(line, &format!("{} x", frames.frame(k)));
        }
    }

    #[test]
    fn test_restart_runs_a_fresh_loop() {
        let buf = SharedBuffer::new();
        let mut sp = fast_spinner("again", &buf);

        sp.start();
        thread::sleep(Duration::from_millis(30));
        sp.stop();
        sp.start();
        assert!(sp.is_running());
        thread::sleep(Duration::from_millis(30));
        sp.stop();

        let output = buf.to_string_lossy();
        assert_eq!(output.matches(&ansi::begin()).count(), 2);
        assert_eq!(output.matches(&ansi::finish()).count(), 2);
    }

    #[test]
    fn test_reconfigure_frames_while_running() {
        let buf = SharedBuffer::new();
        let mut sp = fast_spinner("swap", &buf).with_frames(FrameSet::new(["-"]).unwrap());

        sp.start();
        thread::sleep(Duration::from_millis(50));
        sp.set_frames(FrameSet::new(["#"]).unwrap());
        thread::sleep(Duration::from_millis(50));
        sp.stop();

        let lines = ticks(&buf.to_string_lossy());
        assert_eq!(lines.first().map(String::as_str), Some("- swap"));
        assert_eq!(lines.last().map(String::as_str), Some("# swap"));
    }

    #[test]
    fn test_writer_swap_while_running() {
        let first = SharedBuffer::new();
        let second = SharedBuffer::new();
        let mut sp = fast_spinner("move", &first);

        sp.start();
        thread::sleep(Duration::from_millis(40));
        sp.set_writer(second.clone());
        thread::sleep(Duration::from_millis(40));
        sp.stop();

        assert!(first.to_string_lossy().starts_with(&ansi::begin()));
        assert!(second.to_string_lossy().ends_with(&ansi::finish()));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = Spinner::new("x").with_interval(Duration::ZERO);
        assert_eq!(result.unwrap_err(), SpinnerError::ZeroInterval);

        let sp = Spinner::new("x");
        assert_eq!(sp.set_interval(Duration::ZERO), Err(SpinnerError::ZeroInterval));
        assert_eq!(sp.interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn test_drop_restores_terminal() {
        let buf = SharedBuffer::new();
        {
            let mut sp = fast_spinner("scoped", &buf);
            sp.start();
            thread::sleep(Duration::from_millis(30));
        }

        assert!(buf.to_string_lossy().ends_with(&ansi::finish()));
    }

    /// A sink that fails every write.
    #[test]
    fn test_reconfigure_interval_while_running() {
        let buf = SharedBuffer::new();
        let mut sp = fast_spinner("slow down", &buf);

        sp.start();
        thread::sleep(Duration::from_millis(80));
        sp.set_interval(Duration::from_millis(200)).unwrap();
        let fast_ticks = buf.to_string_lossy().matches('\r').count();
        thread::sleep(Duration::from_millis(300));
        sp.stop();

        let total = ticks(&buf.to_string_lossy()).len();
        let slow_ticks = total - fast_ticks;
        assert!(fast_ticks >= 3, "only {fast_ticks} ticks at 10ms");
        // One tick may already be scheduled on the old period
        assert!(slow_ticks <= 3, "{slow_ticks} ticks in 300ms at 200ms");
        assert_eq!(sp.interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_huge_interval_still_cleans_up() {
        let buf = SharedBuffer::new();
        let mut sp = Spinner::new("never")
            .with_writer(buf.clone())
            .with_interval(Duration::MAX)
            .unwrap();

        sp.start();
        thread::sleep(Duration::from_millis(50));
        sp.stop();

        assert_eq!(buf.to_string_lossy(), ansi::begin() + &ansi::finish());
    }

    #[test]
    fn test_next_deadline() {
        let start = Instant::now();
        let step = Duration::from_millis(10);

        let on_time = next_deadline(start, step, start).unwrap();
        assert_eq!(on_time, start + step);

        let late = start + Duration::from_secs(1);
        assert_eq!(next_deadline(start, step, late).unwrap(), late + step);

        assert_eq!(next_deadline(start, Duration::MAX, start), None);
    }

    struct SlowSink {
        delay: Duration,
    }

    impl Write for SlowSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            thread::sleep(self.delay);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_slow_sink_holds_setters_for_one_write_at_most() {
        let mut sp = Spinner::new("slow")
            .with_writer(SlowSink {
                delay: Duration::from_millis(30),
            })
            .with_interval(FAST)
            .unwrap();

        sp.start();
        for i in 0..5 {
            let started = Instant::now();
            sp.update_message(format!("slow {i}"));
            assert!(sp.is_running());
            assert!(
                started.elapsed() < Duration::from_millis(500),
                "setter waited {:?}",
                started.elapsed()
            );
            thread::sleep(Duration::from_millis(20));
        }
        sp.stop();

        assert_eq!(sp.message(), "slow 4");
    }

    struct BrokenSink {
        hit: Arc<AtomicBool>,
    }

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.hit.store(true, Ordering::SeqCst);
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failing_sink_does_not_disturb_caller() {
        let hit = Arc::new(AtomicBool::new(false));
        let mut sp = Spinner::new("broken")
            .with_writer(BrokenSink { hit: hit.clone() })
            .with_interval(FAST)
            .unwrap();

        sp.start();
        thread::sleep(Duration::from_millis(40));
        sp.stop();

        assert!(hit.load(Ordering::SeqCst));
        assert!(!sp.is_running());
    }
}
