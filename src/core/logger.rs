//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_message::LogMessage,
    metrics::LoggerMetrics,
};
use crate::writers::{Sink, Writer};
use crossbeam_channel::{bounded, unbounded, Sender};
use parking_lot::Mutex;
use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when the logger is dropped while async writes are still queued.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Default repeat count at which an identical message is muted
pub const DEFAULT_MUTE: usize = 3;

enum Job {
    Write(LogMessage),
    Flush(Sender<()>),
}

struct Dispatcher {
    sender: Sender<Job>,
    handle: thread::JoinHandle<()>,
}

struct LoggerState {
    out: Sink,
    caller: bool,
    async_mode: bool,
    mute: usize,
    last: Option<LogMessage>,
    repeats: usize,
    dispatcher: Option<Dispatcher>,
}

/// Leveled logger writing to a single [`Sink`].
///
/// All configuration and the repeat-detection state sit behind one mutex.
/// The level filter is checked before that lock is taken.
///
/// # Example
///
/// ```
/// use rust_frame_logger::{Logger, LogLevel, Writer};
///
/// let logger = Logger::builder()
///     .output(Writer::text(Vec::new()))
///     .level(LogLevel::Info)
///     .caller(true)
///     .build();
///
/// logger.info("service started");
/// logger.group("db").warn("pool exhausted");
/// logger.debug("not written");
/// ```
pub struct Logger {
    state: Arc<Mutex<LoggerState>>,
    level: AtomicU8,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with `out` as its sink, every level enabled and the default
    /// mute threshold
    #[must_use]
    pub fn new(out: impl Into<Sink>, caller: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(LoggerState {
                out: out.into(),
                caller,
                async_mode: false,
                mute: DEFAULT_MUTE,
                last: None,
                repeats: 0,
                dispatcher: None,
            })),
            level: AtomicU8::new(LogLevel::Debug.as_u8()),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Text output on stdout with caller capture, the configuration most
    /// applications start from
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Writer::stdout(), true)
    }

    pub fn set_output(&self, out: impl Into<Sink>) {
        self.state.lock().out = out.into();
    }

    /// Install a new sink and hand back the previous one
    pub fn replace_output(&self, out: impl Into<Sink>) -> Sink {
        std::mem::replace(&mut self.state.lock().out, out.into())
    }

    /// Most verbose level that is still written
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or(LogLevel::Debug)
    }

    /// Repeat count at which identical messages are muted, 0 disables
    pub fn set_mute(&self, mute: usize) {
        self.state.lock().mute = mute;
    }

    pub fn mute(&self) -> usize {
        self.state.lock().mute
    }

    pub fn set_caller(&self, caller: bool) {
        self.state.lock().caller = caller;
    }

    pub fn captures_caller(&self) -> bool {
        self.state.lock().caller
    }

    pub fn set_async(&self, async_mode: bool) {
        self.state.lock().async_mode = async_mode;
    }

    pub fn is_async(&self) -> bool {
        self.state.lock().async_mode
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.as_u8() <= self.level.load(Ordering::Relaxed)
    }

    /// Build and deliver one message.
    ///
    /// `location` is only used when caller capture is on; `None` then yields
    /// the `???`/0 placeholder. In async mode this returns once the message
    /// is queued and sink errors are reported on stderr instead.
    pub fn output(
        &self,
        location: Option<&Location<'_>>,
        group: &str,
        level: LogLevel,
        text: impl Into<String>,
    ) -> Result<()> {
        if !self.enabled(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let mut msg = LogMessage::new(level, text).with_group(group);
        let mut state = self.state.lock();
        if state.caller {
            msg = msg.with_caller(location);
        }

        let repeated = state
            .last
            .as_ref()
            .is_some_and(|last| last.same_origin(&msg));
        if repeated {
            state.repeats += 1;
        } else {
            state.repeats = 1;
            state.last = Some(msg.clone());
        }

        if state.mute > 0 && state.repeats >= state.mute {
            self.metrics.record_muted();
            return Ok(());
        }

        if state.async_mode {
            let sender = self.dispatcher(&mut state)?;
            if let Err(unsent) = sender.send(Job::Write(msg)) {
                // The worker is gone; a fresh one takes this and later messages.
                state.dispatcher = None;
                let sender = self.dispatcher(&mut state)?;
                return sender
                    .send(unsent.into_inner())
                    .map_err(|_| LoggerError::ChannelSendError);
            }
            return Ok(());
        }

        let result = state.out.write_message(&msg);
        match result {
            Ok(()) => self.metrics.record_written(),
            Err(_) => self.metrics.record_failed(),
        };
        result
    }

    /// Sender of the async worker, starting the worker on first use
    fn dispatcher(&self, state: &mut LoggerState) -> Result<Sender<Job>> {
        if let Some(ref dispatcher) = state.dispatcher {
            return Ok(dispatcher.sender.clone());
        }

        let (sender, receiver) = unbounded::<Job>();
        let shared = Arc::clone(&self.state);
        let metrics = Arc::clone(&self.metrics);

        let handle = thread::Builder::new()
            .name("log-dispatch".to_string())
            .spawn(move || {
                for job in receiver {
                    match job {
                        Job::Write(msg) => {
                            let mut state = shared.lock();
                            match state.out.write_message(&msg) {
                                Ok(()) => {
                                    metrics.record_written();
                                }
                                Err(e) => {
                                    metrics.record_failed();
                                    eprintln!(
                                        "[LOGGER ERROR] Async write to {} sink failed: {}",
                                        state.out.name(),
                                        e
                                    );
                                }
                            }
                        }
                        Job::Flush(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            })?;

        state.dispatcher = Some(Dispatcher {
            sender: sender.clone(),
            handle,
        });
        Ok(sender)
    }

    /// Wait for queued async writes, then flush the sink
    pub fn flush(&self) -> Result<()> {
        let pending = {
            let mut state = self.state.lock();
            let (ack, done) = bounded(1);
            match state.dispatcher.as_ref() {
                Some(dispatcher) if dispatcher.sender.send(Job::Flush(ack)).is_ok() => Some(done),
                Some(_) => {
                    state.dispatcher = None;
                    None
                }
                None => None,
            }
        };
        if let Some(done) = pending {
            let _ = done.recv();
        }

        self.state.lock().out.flush()
    }

    /// Stop the async worker after it drains its queue, then flush
    ///
    /// Returns `false` if the worker did not finish within `timeout` or the
    /// final flush failed. A later async call starts a new worker.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let dispatcher = self.state.lock().dispatcher.take();

        if let Some(Dispatcher { sender, handle }) = dispatcher {
            drop(sender);

            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Async worker thread panicked during shutdown: {:?}",
                            e
                        );
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Async worker thread did not finish within {:?}. \
                         Some logs may be lost.",
                        timeout
                    );
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        if let Err(e) = self.state.lock().out.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }
        true
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, group: &str, message: impl Into<String>) {
        report(self.output(Some(Location::caller()), group, level, message));
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, "", message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, "", message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, "", message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, "", message);
    }

    /// Log at Error, flush, and exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) -> ! {
        self.log(LogLevel::Error, "", message);
        report(self.flush());
        std::process::exit(1)
    }

    /// Handle that tags every message with `group`
    pub fn group<'a>(&'a self, group: &'a str) -> GroupLogger<'a> {
        GroupLogger {
            logger: self,
            group,
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::standard()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("[LOGGER ERROR] {}", e);
    }
}

/// Logger handle bound to one group
pub struct GroupLogger<'a> {
    logger: &'a Logger,
    group: &'a str,
}

impl GroupLogger<'_> {
    pub fn name(&self) -> &str {
        self.group
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.logger.log(level, self.group, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_frame_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .output(ColorWriter::stdout())
///     .level(LogLevel::Warn)
///     .mute(5)
///     .async_mode(true)
///     .build();
/// ```
pub struct LoggerBuilder {
    output: Option<Sink>,
    level: LogLevel,
    caller: bool,
    async_mode: bool,
    mute: usize,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            output: None,
            level: LogLevel::Debug,
            caller: false,
            async_mode: false,
            mute: DEFAULT_MUTE,
        }
    }

    /// Set the sink; text on stdout when never called
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, out: impl Into<Sink>) -> Self {
        self.output = Some(out.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller(mut self, caller: bool) -> Self {
        self.caller = caller;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, async_mode: bool) -> Self {
        self.async_mode = async_mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn mute(mut self, mute: usize) -> Self {
        self.mute = mute;
        self
    }

    pub fn build(self) -> Logger {
        let out = self.output.unwrap_or_else(|| Writer::stdout().into());
        let logger = Logger::new(out, self.caller);
        logger.set_level(self.level);
        logger.set_mute(self.mute);
        logger.set_async(self.async_mode);
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
