//! The system: a set of named arrival sources sharing one tick cycle.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::source::Source;

fn default_cycle_width() -> i64 {
    60
}

fn default_global_scale() -> f64 {
    1.0
}

/// A set of named arrival sources sharing a repeating tick cycle.
///
/// Sources live in a `BTreeMap` so the shared RNG is consumed in a fixed
/// order; with a fixed seed, two runs over the same tick sequence produce
/// identical counts.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct System {
    /// Named arrival sources; every active source contributes to the
    /// aggregate count for a tick.
    #[serde(default)]
    pub sources: BTreeMap<String, Source>,

    /// Modulus for the tick cycle: tick `t` is at cycle position
    /// `t % cycle_width`. Must be positive.
    #[serde(default = "default_cycle_width")]
    pub cycle_width: i64,

    /// Multiplier applied to the aggregate count.
    #[serde(default = "default_global_scale")]
    pub global_scale: f64,

    /// Emit one diagnostic record per active source per tick.
    #[serde(default)]
    pub logging: bool,

    #[serde(skip)]
    rng: Option<SmallRng>,
}

impl System {
    /// Validate and build every source, then bind the shared RNG.
    ///
    /// Must be called exactly once before the first [`System::counts`]
    /// call. Any configuration problem is reported here, before the
    /// first tick.
    pub fn init(&mut self, rng: SmallRng) -> Result<()> {
        if self.cycle_width <= 0 {
            return Err(Error::Config(format!(
                "cycle_width must be positive, got {}",
                self.cycle_width
            )));
        }

        for (name, source) in self.sources.iter_mut() {
            source.init(name)?;
        }

        self.rng = Some(rng);
        Ok(())
    }

    /// Aggregate event count for tick `t`, with the per-source breakdown.
    ///
    /// At each cycle boundary (`t % cycle_width == 0`) every source
    /// re-samples its window first. Sources outside their window are
    /// absent from the breakdown. The total is
    /// `round(global_scale * sum)`.
    pub fn counts(&mut self, t: i64) -> Result<(i64, BTreeMap<String, i64>)> {
        let rng = self
            .rng
            .as_mut()
            .ok_or_else(|| Error::Config("system not initialized".to_string()))?;

        let r = t % self.cycle_width;
        let mut by_source = BTreeMap::new();

        for (name, source) in self.sources.iter_mut() {
            if r == 0 {
                source.reset(self.cycle_width, rng);
            }
            if !source.active(r) {
                continue;
            }

            let n = source.count(t, r, rng)?;
            if self.logging {
                tracing::info!("tick {} source {} count {}", t, name, n);
            }
            *by_source.entry(name.clone()).or_insert(0) += n;
        }

        let total = (self.global_scale * by_source.values().sum::<i64>() as f64).round() as i64;
        Ok((total, by_source))
    }
}
