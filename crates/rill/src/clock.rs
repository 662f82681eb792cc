//! Process CPU clock readings for the end-of-run timing line.
//!
//! The run reports CPU time consumed since process start, not wall-clock
//! time: a run that blocks on a slow input stream accrues little CPU time
//! even as the wall clock races ahead.

use std::time::Duration;

extern "C" {
    // POSIX `clock()`; the `libc` crate does not expose this symbol (nor the
    // `CLOCKS_PER_SEC` macro) on linux_like targets, so we bind it directly.
    fn clock() -> libc::clock_t;
}

// POSIX mandates `CLOCKS_PER_SEC == 1_000_000` for `clock()` regardless of the
// underlying timer resolution.
const CLOCKS_PER_SEC: libc::clock_t = 1_000_000;

/// Returns the CPU time this process has consumed so far.
///
/// Reads the C library's per-process clock; a platform reporting failure
/// (no CPU time available) yields `Duration::ZERO`.
pub fn process_cpu_time() -> Duration {
    // SAFETY: clock() takes no arguments, touches no caller memory, and is
    // specified to return -1 on failure.
    let ticks = unsafe { clock() };
    if ticks < 0 {
        return Duration::ZERO;
    }
    let ticks = ticks as u64;
    let per_sec = CLOCKS_PER_SEC as u64;
    let nanos_per_tick = 1_000_000_000 / per_sec;
    Duration::new(ticks / per_sec, ((ticks % per_sec) * nanos_per_tick) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_time_is_monotonic() {
        let before = process_cpu_time();

        // Burn a little CPU so the counter has a chance to advance.
        let mut total = 0u64;
        for i in 0..2_000_000u64 {
            total = total.wrapping_add(i ^ (i << 3));
        }
        assert_ne!(total, 1); // keep the loop from being optimized out

        let after = process_cpu_time();
        assert!(after >= before);
    }
}
