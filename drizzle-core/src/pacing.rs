//! The real-time pacing driver
//!
//! Once per tick the driver asks the [`System`] for a count, reads that
//! many lines from the input, and re-emits them spread pseudo-randomly
//! across the tick interval, then sleeps to align the next iteration
//! with the tick boundary. Records are emitted in input order; a tick's
//! count is fully determined before any of its records is read.

use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use rand::rngs::SmallRng;
use rand::Rng;

use crate::error::Result;
use crate::system::System;

/// Pacing parameters.
#[derive(Debug, Clone)]
pub struct PacerConfig {
    /// Wall-clock duration of one tick.
    pub interval: Duration,
    /// Stop after this many ticks; 0 means run until the input is
    /// exhausted.
    pub limit: u64,
    /// Prefix each emitted line with an RFC3339 nanosecond UTC
    /// timestamp and a space.
    pub timestamps: bool,
    /// Log a drift warning when a tick overruns its interval by more
    /// than this.
    pub warn: Duration,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            limit: 0,
            timestamps: false,
            warn: Duration::from_secs(1),
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured tick limit was reached.
    TickLimit,
    /// The input stream was exhausted.
    InputExhausted,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Ticks driven, counting a partial final tick.
    pub ticks: u64,
    /// Lines emitted.
    pub emitted: u64,
    pub stopped: StopReason,
}

/// Real-time pacing loop over a [`System`].
pub struct Pacer {
    config: PacerConfig,
    rng: SmallRng,
}

impl Pacer {
    pub fn new(config: PacerConfig, rng: SmallRng) -> Self {
        Self { config, rng }
    }

    /// Drive `system` until the tick limit is reached or `input` is
    /// exhausted. Lines are emitted in input order; input exhaustion
    /// mid-tick emits what was read and terminates cleanly.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        system: &mut System,
        input: &mut R,
        output: &mut W,
    ) -> Result<Summary> {
        let mut t: i64 = 0;
        let mut emitted: u64 = 0;
        let mut line = String::new();

        loop {
            let started = Instant::now();

            if self.config.limit > 0 && t as u64 >= self.config.limit {
                return Ok(Summary { ticks: t as u64, emitted, stopped: StopReason::TickLimit });
            }

            let (n, _) = system.counts(t)?;
            let mut tick_emitted: u64 = 0;

            for _ in 0..n {
                line.clear();
                if input.read_line(&mut line)? == 0 {
                    if system.logging {
                        tracing::info!("tick {} total {}", t, tick_emitted);
                    }
                    return Ok(Summary {
                        ticks: t as u64 + 1,
                        emitted,
                        stopped: StopReason::InputExhausted,
                    });
                }

                self.pause_within_tick(n);
                self.emit(output, &line)?;
                emitted += 1;
                tick_emitted += 1;
            }

            if system.logging {
                tracing::info!("tick {} total {}", t, tick_emitted);
            }

            t += 1;
            self.align(started, t);
        }
    }

    /// Spread the tick's emissions across the interval: each wait is a
    /// uniform sample scaled by `2 * interval / n`.
    fn pause_within_tick(&mut self, n: i64) {
        let bound = 2.0 * self.config.interval.as_secs_f64() / n as f64;
        thread::sleep(Duration::from_secs_f64(bound * self.rng.random::<f64>()));
    }

    fn emit<W: Write>(&self, output: &mut W, line: &str) -> Result<()> {
        if self.config.timestamps {
            write!(output, "{} ", humantime::format_rfc3339_nanos(SystemTime::now()))?;
        }
        output.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            output.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Sleep so the next iteration starts one interval after this one
    /// started. Never sleeps a negative duration; an overrun beyond the
    /// warn threshold is logged and the loop continues at best effort.
    fn align(&self, started: Instant, t: i64) {
        let elapsed = started.elapsed();
        match self.config.interval.checked_sub(elapsed) {
            Some(remaining) => thread::sleep(remaining),
            None => {
                let lag = elapsed - self.config.interval;
                if lag > self.config.warn {
                    tracing::warn!("tick {} lagging by {:?}", t, lag);
                }
            }
        }
    }
}
