//! Connectivity diagnostics.

use std::fmt;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PingStatus {
    Ok,
    Slow,
    Lost,
}

impl fmt::Display for PingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PingStatus::Ok => "ok",
            PingStatus::Slow => "slow",
            PingStatus::Lost => "lost",
        };
        f.write_str(s)
    }
}

/// One connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PingResult {
    /// 1-based.
    pub attempt: u32,
    pub status: PingStatus,
    /// Connect time. A lost attempt counts as the full timeout.
    pub time: Duration,
}

impl PingResult {
    /// Classify an attempt from its connect time, `None` when it failed.
    pub fn classify(
        attempt: u32,
        elapsed: Option<Duration>,
        threshold: Duration,
        timeout: Duration,
    ) -> Self {
        let (status, time) = match elapsed {
            None => (PingStatus::Lost, timeout),
            Some(time) if time >= threshold => (PingStatus::Slow, time),
            Some(time) => (PingStatus::Ok, time),
        };
        Self {
            attempt,
            status,
            time,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PingReport {
    results: Vec<PingResult>,
}

impl PingReport {
    pub fn from_results(results: Vec<PingResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[PingResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Mean attempt time, rounded down to the millisecond.
    pub fn average_time(&self) -> Duration {
        if self.results.is_empty() {
            return Duration::ZERO;
        }
        let total: u128 = self.results.iter().map(|r| r.time.as_millis()).sum();
        let mean = total / self.results.len() as u128;
        Duration::from_millis(u64::try_from(mean).unwrap_or(u64::MAX))
    }

    pub fn lost(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == PingStatus::Lost)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingOptions {
    pub port: u16,
    pub attempts: u32,
    pub threshold: Duration,
    pub timeout: Duration,
}

impl Default for PingOptions {
    fn default() -> Self {
        Self {
            port: 443,
            attempts: 5,
            threshold: Duration::from_millis(1000),
            timeout: Duration::from_millis(3000),
        }
    }
}

/// Time `options.attempts` TCP connections to `host`.
///
/// Attempts run one after the other. A host that does not resolve makes
/// every attempt lost.
pub fn ping_service(host: &str, options: &PingOptions) -> PingReport {
    let results = (1..=options.attempts)
        .map(|attempt| {
            let elapsed = connect_time(host, options.port, options.timeout);
            let result =
                PingResult::classify(attempt, elapsed, options.threshold, options.timeout);
            tracing::debug!(
                host,
                attempt,
                status = %result.status,
                time_ms = result.time.as_millis() as u64,
                "ping"
            );
            result
        })
        .collect();
    PingReport { results }
}

fn connect_time(host: &str, port: u16, timeout: Duration) -> Option<Duration> {
    let addr = (host, port).to_socket_addrs().ok()?.next()?;
    let started = Instant::now();
    TcpStream::connect_timeout(&addr, timeout).ok()?;
    Some(started.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    const THRESHOLD: Duration = Duration::from_millis(1000);
    const TIMEOUT: Duration = Duration::from_millis(3000);

    #[test]
    fn classification() {
        let ok = PingResult::classify(1, Some(Duration::from_millis(20)), THRESHOLD, TIMEOUT);
        assert_eq!(ok.status, PingStatus::Ok);

        let slow = PingResult::classify(2, Some(THRESHOLD), THRESHOLD, TIMEOUT);
        assert_eq!(slow.status, PingStatus::Slow);

        let lost = PingResult::classify(3, None, THRESHOLD, TIMEOUT);
        assert_eq!(lost.status, PingStatus::Lost);
        assert_eq!(lost.time, TIMEOUT);
    }

    #[test]
    fn average_counts_lost_attempts_as_timeout() {
        let report = PingReport::from_results(vec![
            PingResult::classify(1, Some(Duration::from_millis(100)), THRESHOLD, TIMEOUT),
            PingResult::classify(2, Some(Duration::from_millis(201)), THRESHOLD, TIMEOUT),
            PingResult::classify(3, None, THRESHOLD, TIMEOUT),
        ]);
        // (100 + 201 + 3000) / 3 = 1100.33
        assert_eq!(report.average_time(), Duration::from_millis(1100));
        assert_eq!(report.lost(), 1);
        assert_eq!(PingReport::default().average_time(), Duration::ZERO);
    }

    #[test]
    fn local_listener_answers() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let options = PingOptions {
            port,
            attempts: 2,
            ..PingOptions::default()
        };

        let report = ping_service("127.0.0.1", &options);

        assert_eq!(report.len(), 2);
        assert_eq!(report.lost(), 0);
        assert_eq!(report.results()[1].attempt, 2);
    }

    #[test]
    fn unresolvable_host_is_lost() {
        let options = PingOptions {
            attempts: 1,
            timeout: Duration::from_millis(200),
            ..PingOptions::default()
        };
        let report = ping_service("host.invalid", &options);
        assert_eq!(report.results()[0].status, PingStatus::Lost);
    }
}
