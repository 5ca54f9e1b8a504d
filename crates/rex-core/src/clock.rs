//! Timing and calendar helpers that also work in the browser.
//!
//! `std::time::Instant` and `chrono::Local` panic on `wasm32-unknown-unknown`,
//! so the wasm build reads the JS clock instead.

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use std::time::Instant;

    use chrono::Datelike;

    /// Measures elapsed wall time.
    pub struct Stopwatch(Instant);

    impl Stopwatch {
        pub fn start() -> Self {
            Self(Instant::now())
        }

        pub fn elapsed_ms(&self) -> u64 {
            self.0.elapsed().as_millis() as u64
        }
    }

    /// Current local calendar year.
    pub fn current_year() -> i32 {
        chrono::Local::now().year()
    }
}

#[cfg(target_arch = "wasm32")]
mod imp {
    /// Measures elapsed wall time.
    pub struct Stopwatch(f64);

    impl Stopwatch {
        pub fn start() -> Self {
            Self(js_sys::Date::now())
        }

        pub fn elapsed_ms(&self) -> u64 {
            (js_sys::Date::now() - self.0).max(0.0) as u64
        }
    }

    /// Current local calendar year.
    pub fn current_year() -> i32 {
        js_sys::Date::new_0().get_full_year() as i32
    }
}

pub use imp::{current_year, Stopwatch};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_and_year() {
        let watch = Stopwatch::start();
        assert!(watch.elapsed_ms() < 60_000);
        assert!(current_year() >= 2024);
    }
}
