use std::sync::OnceLock;
use std::time::Instant;

fn origin() -> Instant {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    *ORIGIN.get_or_init(Instant::now)
}

pub fn precise_seconds() -> f64 {
    origin().elapsed().as_secs_f64()
}

pub fn coarse_seconds() -> f64 {
    precise_seconds()
}
