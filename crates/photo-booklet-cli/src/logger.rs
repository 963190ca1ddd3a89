use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

/// Writes `[HH:MM:SS] LEVEL message` lines to stderr
#[derive(Clone)]
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN ",
                Level::Info => "INFO ",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            eprintln!(
                "[{}] {} {}",
                Local::now().format("%H:%M:%S"),
                level,
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
