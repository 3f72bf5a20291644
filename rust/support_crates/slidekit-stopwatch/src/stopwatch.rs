use crate::{TimeStamp, time_stamp};

/// Measures elapsed wall-clock time across one or more start/stop intervals.
///
/// # Example
///
/// ```
/// use slidekit_stopwatch::Stopwatch;
///
/// let mut sw = Stopwatch::start_new();
/// // ... do some work ...
/// sw.stop();
/// assert!(sw.elapsed() >= 0.0);
/// ```
#[derive(Default, Clone, Debug)]
pub struct Stopwatch {
    start: TimeStamp,
    elapsed: TimeStamp,
    running: bool,
}

impl Stopwatch {
    /// Creates a stopped stopwatch with zero elapsed time.
    pub fn new() -> Stopwatch {
        Stopwatch::default()
    }

    /// Creates a stopwatch and starts it.
    pub fn start_new() -> Stopwatch {
        let mut sw = Stopwatch::new();
        sw.start();
        sw
    }

    /// Starts (or resumes) measuring. No effect if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.start = time_stamp();
            self.running = true;
        }
    }

    /// Stops measuring and accumulates the current interval. No effect if stopped.
    pub fn stop(&mut self) {
        if self.running {
            self.elapsed += time_stamp() - self.start;
            self.running = false;
        }
    }

    /// Stops the stopwatch and clears the accumulated time.
    pub fn reset(&mut self) {
        *self = Stopwatch::default();
    }

    /// Returns `true` while the stopwatch is measuring.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the accumulated time in seconds, including the current interval
    /// if running.
    pub fn elapsed(&self) -> TimeStamp {
        if self.running {
            self.elapsed + (time_stamp() - self.start)
        } else {
            self.elapsed
        }
    }
}
