//! Rendering statistics.

use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

/// Counters accumulated over render calls.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Time spent rendering. Stays zero without the `std` feature.
    pub time: Duration,
    /// Number of views (output images) rendered.
    pub views: usize,
    /// Number of render calls issued, one per mesh.
    pub calls: usize,

    pub objs: Throughput,
    pub prims: Throughput,
    pub verts: Throughput,
    pub frags: Throughput,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

/// Count of items going in and coming out of a pipeline stage.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    pub i: usize,
    pub o: usize,
}

impl Stats {
    /// Returns zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns zeroed stats with a timer running, if `std` is enabled.
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer, adding the time elapsed to `self.time`.
    pub fn finish(self) -> Self {
        Self {
            #[cfg(feature = "std")]
            time: self.start.map_or(self.time, |st| self.time + st.elapsed()),
            #[cfg(feature = "std")]
            start: None,
            ..self
        }
    }
}

impl Display for Stats {
    /// Formats `self` on a single line, such as
    /// `1 views, 2 calls in 1.2ms; objs 2/2, prims 4/3, ...`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { time, views, calls, objs, prims, verts, frags, .. } = self;
        write!(
            f,
            "{views} views, {calls} calls in {time:.1?}; \
             objs {objs}, prims {prims}, verts {verts}, frags {frags}"
        )
    }
}

impl Display for Throughput {
    /// Formats `self` as "in/out".
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.i, self.o)
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.views += other.views;
        self.calls += other.calls;
        self.objs += other.objs;
        self.prims += other.prims;
        self.verts += other.verts;
        self.frags += other.frags;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, rhs: Self) {
        self.i += rhs.i;
        self.o += rhs.o;
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    fn sample() -> Stats {
        Stats {
            time: Duration::from_micros(1500),
            views: 2,
            calls: 3,
            objs: Throughput { i: 3, o: 3 },
            prims: Throughput { i: 6, o: 4 },
            verts: Throughput { i: 12, o: 12 },
            frags: Throughput { i: 900, o: 850 },
            ..Stats::new()
        }
    }

    #[test]
    fn display_is_one_line() {
        assert_eq!(
            format!("{}", sample()),
            "2 views, 3 calls in 1.5ms; \
             objs 3/3, prims 6/4, verts 12/12, frags 900/850"
        );
    }

    #[test]
    fn add_assign_accumulates() {
        let mut st = Stats::new();
        st += sample();
        st += sample();
        assert_eq!(st.views, 4);
        assert_eq!(st.prims, Throughput { i: 12, o: 8 });
        assert_eq!(st.time, Duration::from_millis(3));
    }

    #[test]
    fn finish_without_start_keeps_time() {
        let st = sample().finish();
        assert_eq!(st.time, Duration::from_micros(1500));
    }

    #[cfg(feature = "std")]
    #[test]
    fn finish_stops_timer() {
        let st = Stats::start().finish();
        assert!(st.start.is_none());
    }
}
