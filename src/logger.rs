//! Process-wide output levels for the CLI.
//!
//! The library logs through the macros below instead of printing directly,
//! so `--quiet` silences everything except errors and `--verbose` adds the
//! orchestrator's state transitions.

use std::sync::atomic::{AtomicBool, Ordering};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLevel {
    Quiet,
    Normal,
    Verbose,
}

impl OutputLevel {
    /// `--quiet` wins when both flags are given.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => OutputLevel::Quiet,
            (false, true) => OutputLevel::Verbose,
            (false, false) => OutputLevel::Normal,
        }
    }
}

pub fn init(level: OutputLevel) {
    set_quiet_mode(level == OutputLevel::Quiet);
    set_verbose_mode(level == OutputLevel::Verbose);
}

pub fn level() -> OutputLevel {
    OutputLevel::from_flags(is_quiet(), is_verbose())
}

pub fn set_quiet_mode(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose_mode(verbose: bool) {
    VERBOSE_MODE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::Relaxed)
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            println!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose() && !$crate::logger::is_quiet() {
            println!("{} {}", $crate::constants::VERBOSE_PREFIX, format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("{} {}", $crate::constants::ERROR_PREFIX, format!($($arg)*));
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            eprintln!("{} {}", $crate::constants::WARNING_PREFIX, format!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_level_from_flags() {
        assert_eq!(OutputLevel::from_flags(false, false), OutputLevel::Normal);
        assert_eq!(OutputLevel::from_flags(false, true), OutputLevel::Verbose);
        assert_eq!(OutputLevel::from_flags(true, false), OutputLevel::Quiet);
        assert_eq!(OutputLevel::from_flags(true, true), OutputLevel::Quiet);
    }

    #[test]
    fn test_init_sets_level() {
        init(OutputLevel::Verbose);
        assert_eq!(level(), OutputLevel::Verbose);
        assert!(is_verbose() && !is_quiet());

        init(OutputLevel::Quiet);
        assert_eq!(level(), OutputLevel::Quiet);

        init(OutputLevel::Normal);
        assert_eq!(level(), OutputLevel::Normal);
    }
}
