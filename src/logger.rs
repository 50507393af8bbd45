//! Logging utilities with colored output.
//!
//! Provides the `log!` macro for formatted terminal output with colored
//! `[module]` prefixes. The build is a synchronous batch pipeline, so one
//! line per stage is all the telemetry there is.
//!
//! # Example
//!
//! ```ignore
//! log!("scan"; "{} articles", count);
//! log!("error"; "build failed: {:#}", err);
//! ```

use colored::{ColoredString, Colorize};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    println!("{prefix} {message}");
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_prefix_wraps_module_name() {
        let prefix = colorize_prefix("scan");
        assert!(prefix.to_string().contains("[scan]"));
    }

    #[test]
    fn test_colorize_prefix_error_module() {
        let prefix = colorize_prefix("ERROR");
        assert!(prefix.to_string().contains("[ERROR]"));
    }
}
