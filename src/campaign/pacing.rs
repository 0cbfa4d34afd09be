//! Send pacing — rolling-window rate limit plus a minimum inter-send gap.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::PacingConfig;

/// Tracks transport attempts and yields the delay until the next send is
/// allowed.
///
/// Pure bookkeeping over caller-supplied timestamps — the dispatcher
/// passes wall-clock time, tests pass a simulated clock. The pacer itself
/// never sleeps.
#[derive(Debug)]
pub struct Pacer {
    config: PacingConfig,
    sends: VecDeque<DateTime<Utc>>,
}

impl Pacer {
    pub fn new(config: PacingConfig) -> Self {
        Self {
            config,
            sends: VecDeque::new(),
        }
    }

    /// Delay from `now` until the next send is allowed. Zero when a send
    /// may proceed immediately.
    pub fn delay_until_allowed(&mut self, now: DateTime<Utc>) -> Duration {
        self.evict(now);
        let mut allowed = now;

        if let Some(last) = self.sends.back() {
            let gap_end = *last + delta_from_std(self.config.inter_send_delay);
            if gap_end > allowed {
                allowed = gap_end;
            }
        }

        if self.sends.len() >= self.config.max_per_window as usize
            && let Some(oldest) = self.sends.front()
        {
            // window full: wait until the oldest recorded send ages out
            let window_end = *oldest + delta_from_std(self.config.window);
            if window_end > allowed {
                allowed = window_end;
            }
        }

        (allowed - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Record a transport attempt at `now`. Skipped contacts are never
    /// recorded — they do not count against the window.
    pub fn record_send(&mut self, now: DateTime<Utc>) {
        self.sends.push_back(now);
    }

    fn evict(&mut self, now: DateTime<Utc>) {
        let horizon = now - delta_from_std(self.config.window);
        while let Some(front) = self.sends.front() {
            if *front <= horizon {
                self.sends.pop_front();
            } else {
                break;
            }
        }
    }
}

fn delta_from_std(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pacer(max_per_window: u32, window_secs: u64, gap_secs: u64) -> Pacer {
        Pacer::new(PacingConfig {
            max_per_window,
            window: Duration::from_secs(window_secs),
            inter_send_delay: Duration::from_secs(gap_secs),
        })
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn first_send_has_no_delay() {
        let mut p = pacer(2, 60, 5);
        assert_eq!(p.delay_until_allowed(at(0)), Duration::ZERO);
    }

    #[test]
    fn inter_send_gap_is_enforced() {
        let mut p = pacer(10, 3600, 5);
        p.record_send(at(0));
        assert_eq!(p.delay_until_allowed(at(1)), Duration::from_secs(4));
        assert_eq!(p.delay_until_allowed(at(5)), Duration::ZERO);
    }

    #[test]
    fn full_window_waits_for_oldest_to_age_out() {
        let mut p = pacer(2, 60, 0);
        p.record_send(at(0));
        p.record_send(at(10));
        // Window holds 2 sends; next allowed when the send at t=0 ages out.
        assert_eq!(p.delay_until_allowed(at(10)), Duration::from_secs(50));
        // After the oldest leaves the window, sends proceed again.
        assert_eq!(p.delay_until_allowed(at(60)), Duration::ZERO);
    }

    #[test]
    fn gap_and_window_combine_to_the_later_bound() {
        let mut p = pacer(2, 60, 30);
        p.record_send(at(0));
        p.record_send(at(30));
        // Window says wait until t=60, gap says t=60 as well.
        assert_eq!(p.delay_until_allowed(at(30)), Duration::from_secs(30));
    }

    #[test]
    fn sends_below_the_cap_only_pay_the_gap() {
        let mut p = pacer(5, 3600, 2);
        p.record_send(at(0));
        p.record_send(at(2));
        assert_eq!(p.delay_until_allowed(at(2)), Duration::from_secs(2));
    }

    #[test]
    fn unrecorded_skips_are_free() {
        let mut p = pacer(1, 60, 10);
        // Nothing recorded: a skip between contacts never delays the next.
        assert_eq!(p.delay_until_allowed(at(0)), Duration::ZERO);
        assert_eq!(p.delay_until_allowed(at(1)), Duration::ZERO);
    }
}
