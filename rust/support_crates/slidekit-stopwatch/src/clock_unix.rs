use libc::{CLOCK_MONOTONIC, clock_gettime, clockid_t, timespec};

#[cfg(any(target_os = "linux", target_os = "android"))]
const COARSE_CLOCK: clockid_t = libc::CLOCK_MONOTONIC_COARSE;

#[cfg(not(any(target_os = "linux", target_os = "android")))]
const COARSE_CLOCK: clockid_t = CLOCK_MONOTONIC;

pub fn precise_seconds() -> f64 {
    read_clock(CLOCK_MONOTONIC)
}

pub fn coarse_seconds() -> f64 {
    read_clock(COARSE_CLOCK)
}

fn read_clock(clock: clockid_t) -> f64 {
    // Monotonic clocks cannot fail with a valid `timespec` pointer.
    let mut ts: timespec = unsafe { std::mem::zeroed() };
    let rc = unsafe { clock_gettime(clock, &mut ts) };
    debug_assert_eq!(rc, 0);
    ts.tv_sec as f64 + ts.tv_nsec as f64 * 1e-9
}
