//! Abort-with-context primitive for unrecoverable contract violations.
//!
//! Recoverable conditions travel through each crate's error enum. A broken
//! invariant — an out-of-range token, a duplicate registration, a codec
//! default that cannot round-trip — is a programming error: [`panic_at`]
//! prints a banner to stderr, flushes it and aborts the process without
//! unwinding. The [`bug!`](crate::bug) macro forwards the call site.

use std::backtrace::Backtrace;
use std::fmt;
use std::io::Write;
use std::process;

const RED: &str = "\x1b[31m";
const SGR_RESET: &str = "\x1b[0m";

/// Reports a fatal contract violation and aborts.
///
/// Writes a red banner naming the call site, the caller's note and a
/// captured backtrace to stderr, flushes, then calls [`process::abort`].
/// Never unwinds and never returns. Safe to call from any thread: all output
/// goes to stderr and the abort is the only ordering requirement.
pub fn panic_at(file: &str, line: u32, note: fmt::Arguments<'_>) -> ! {
    let stderr = std::io::stderr();
    let mut dst = stderr.lock();
    // Nothing left to report to if stderr itself is gone.
    let _ = writeln!(dst, "{RED}program paniked at \"{file}\":Ln{line}");
    let _ = writeln!(dst, "note: {note}");
    let _ = writeln!(dst, "stacktrace:");
    let _ = writeln!(dst, "{}{SGR_RESET}", Backtrace::force_capture());
    let _ = dst.flush();
    process::abort();
}

/// Aborts with a formatted note and the caller's file and line.
///
/// ```no_run
/// # let token = 7usize; let len = 3usize;
/// if token >= len {
///     kitbag_core::bug!("token {token} is out of range for length {len}");
/// }
/// ```
#[macro_export]
macro_rules! bug {
    ($($arg:tt)*) => {
        $crate::panic::panic_at(file!(), line!(), format_args!($($arg)*))
    };
}
