use chrono::Local;
use std::fmt::Arguments;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Leveled log lines on stderr; stdout carries prompts and the decklist
pub struct Logger;

impl Logger {
    pub fn set_verbose(verbose: bool) {
        VERBOSE.store(verbose, Ordering::Relaxed);
    }

    pub fn is_verbose() -> bool {
        VERBOSE.load(Ordering::Relaxed)
    }

    pub fn info(args: Arguments) {
        Self::write("INFO ", args);
    }

    pub fn debug(args: Arguments) {
        if Self::is_verbose() {
            Self::write("DEBUG", args);
        }
    }

    pub fn warn(args: Arguments) {
        Self::write("WARN ", args);
    }

    pub fn error(args: Arguments) {
        Self::write("ERROR", args);
    }

    fn write(level: &str, args: Arguments) {
        let local = Local::now().format("%d/%m/%Y %H:%M:%S");
        eprintln!("[{level}] [{local}] {args}");
    }
}

#[macro_export]
macro_rules! logger {
    (INFO, $($arg:tt)*) => {
        $crate::logger::Logger::info(format_args!($($arg)*))
    };
    (DEBUG, $($arg:tt)*) => {
        $crate::logger::Logger::debug(format_args!($($arg)*))
    };
    (WARN, $($arg:tt)*) => {
        $crate::logger::Logger::warn(format_args!($($arg)*))
    };
    (ERROR, $($arg:tt)*) => {
        $crate::logger::Logger::error(format_args!($($arg)*))
    };
}
