use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Simple scoped profiler recording cumulative time and call count per section.
pub struct Profiler {
    pub timings: HashMap<&'static str, (Duration, u64)>,
    last_report: Instant,
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            last_report: Instant::now(),
        }
    }

    pub fn finish(&mut self, guard: &ProfilerGuard) {
        let elapsed = guard.start.elapsed();
        let entry = self.timings.entry(guard.name).or_default();
        entry.0 += elapsed;
        entry.1 += 1;
    }

    pub fn report_sorted(&self) -> Vec<(&'static str, Duration, u64)> {
        let mut v: Vec<_> = self.timings.iter().map(|(n, (d, c))| (*n, *d, *c)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }

    pub fn clear(&mut self) {
        self.timings.clear();
        self.last_report = Instant::now();
    }

    pub fn print_and_clear(&mut self) {
        for (name, dur, count) in self.report_sorted() {
            log::info!("{:<20} {:>10?} over {} calls", name, dur, count);
        }
        self.clear();
    }

    /// Report at most once per `period`.
    pub fn print_and_clear_every(&mut self, period: Duration) {
        if self.last_report.elapsed() >= period {
            self.print_and_clear();
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ProfilerGuard {
    name: &'static str,
    start: Instant,
}

/// Start a profiling section. Returns a guard that will update the global
/// profiler when dropped.
pub fn start(name: &'static str) -> ProfilerGuard {
    ProfilerGuard {
        name,
        start: Instant::now(),
    }
}

#[cfg(feature = "profiling")]
impl Drop for ProfilerGuard {
    fn drop(&mut self) {
        crate::PROFILER.lock().finish(self);
    }
}

/// Macro helper to profile a scope only when the `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _guard = $crate::profiler::start($name);
    };
}
