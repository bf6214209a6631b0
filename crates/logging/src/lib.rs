#![cfg_attr(not(test), no_std)]

use core::fmt::Write;
use core::panic::PanicInfo;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

/// `log` sink writing `[LEVEL] target message` lines into any `fmt::Write`,
/// e.g. a serial port or a text console.
pub struct Logger<T> {
    level: LevelFilter,
    writer: Mutex<T>,
}

impl<T: Write + Send> Logger<T> {
    pub const fn new(target: T) -> Logger<T> {
        Logger {
            level: LevelFilter::Info,
            writer: Mutex::new(target),
        }
    }

    pub fn set_max_level(mut self, level: LevelFilter) -> Logger<T> {
        self.level = level;
        self
    }

    #[inline]
    pub fn max_level(&self) -> LevelFilter {
        self.level
    }

    /// Installs the logger globally. Fails when a logger is already set.
    pub fn init(&'static self) -> Result<(), SetLoggerError>
    where
        T: 'static,
    {
        log::set_logger(self)?;
        log::set_max_level(self.level);
        Ok(())
    }

    /// Reports a panic through the same writer. Output is dropped when the
    /// panic happened while the writer was held.
    pub fn panic(&self, info: &PanicInfo) {
        if let Some(mut writer) = self.writer.try_lock() {
            let _ = writeln!(writer, "PANIC! {}", info);
        }
    }

    pub fn with_writer<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.writer.lock())
    }

    pub fn into_inner(self) -> T {
        self.writer.into_inner()
    }
}

impl<T: Write + Send> Log for Logger<T> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = if !record.target().is_empty() {
            record.target()
        } else {
            record.module_path().unwrap_or_default()
        };

        let mut writer = self.writer.lock();
        // nowhere to report a failing sink
        let _ = writeln!(writer, "[{}] {} {}", record.level(), target, record.args());
    }

    fn flush(&self) {}
}
