//! FILENAME: core/engine/src/logging.rs
// PURPOSE: Category-tagged logging macros shared by the engine crates.
// CONTEXT: Lines go through the `log` facade as `seq|level|category|message`.
//          The host decides where they end up by installing a logger.

use std::sync::atomic::{AtomicU64, Ordering};

pub use log::Level;

/// Global sequence counter so interleaved lines can be re-ordered later.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Target used for every line emitted by these macros.
pub const LOG_TARGET: &str = "result_display";

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

fn level_code(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

/// Write a log line in unified format
pub fn write_log(level: Level, category: &str, message: &str) {
    if !log::log_enabled!(target: LOG_TARGET, level) {
        return;
    }
    let seq = next_seq();
    log::log!(
        target: LOG_TARGET,
        level,
        "{}|{}|{}|{}",
        seq,
        level_code(level),
        category,
        message
    );
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: Level, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(level, category, &message);
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: Level, category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(level, category, &message);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Debug, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Info, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Warn, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Error, $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter($crate::logging::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter($crate::logging::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit($crate::logging::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit($crate::logging::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_level_codes() {
        assert_eq!(level_code(Level::Error), "E");
        assert_eq!(level_code(Level::Debug), "D");
    }

    #[test]
    fn test_macros_expand_without_logger() {
        crate::log_debug!("TEST", "value={}", 1);
        crate::log_enter!("TEST", "fn_name");
        crate::log_exit!("TEST", "fn_name", "rows={}", 3);
    }
}
