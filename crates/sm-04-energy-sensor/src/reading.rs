//! Energy reading model and sampling

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// State tag stamped on every reading
pub const MEASURING_STATE: &str = "|measuring⟩";

/// Mean of the simulated energy distribution
const ENERGY_MEAN: f64 = 1.0;
/// Standard deviation of the simulated energy distribution
const ENERGY_STD_DEV: f64 = 0.5;

/// One simulated energy measurement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    /// UNIX seconds
    pub timestamp: i64,
    /// `|N(1, 0.5)|`, never negative
    pub quantum_energy: f64,
    /// Uniform in `[0, 1)`
    pub entanglement_score: f64,
    /// Always half of `quantum_energy`
    pub zero_point_fluctuation: f64,
    /// Always [`MEASURING_STATE`]
    pub quantum_state: String,
    /// Uniform in `[0, 0.2)`
    pub observer_effect: f64,
}

impl EnergyReading {
    /// Sample a reading stamped with the current time
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let quantum_energy = (ENERGY_MEAN + ENERGY_STD_DEV * standard_normal(rng)).abs();
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            quantum_energy,
            entanglement_score: rng.gen::<f64>(),
            zero_point_fluctuation: quantum_energy * 0.5,
            quantum_state: MEASURING_STATE.to_string(),
            observer_effect: rng.gen_range(0.0..0.2),
        }
    }
}

/// Standard normal sample (Box-Muller)
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 in (0, 1] keeps ln finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reading_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let r = EnergyReading::sample(&mut rng);
            assert!(r.quantum_energy >= 0.0 && r.quantum_energy.is_finite());
            assert!((0.0..1.0).contains(&r.entanglement_score));
            assert!((0.0..0.2).contains(&r.observer_effect));
            assert_eq!(r.zero_point_fluctuation, r.quantum_energy * 0.5);
            assert_eq!(r.quantum_state, MEASURING_STATE);
        }
    }

    #[test]
    fn test_normal_sample_is_centered() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let mean = (0..n).map(|_| standard_normal(&mut rng)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean drifted: {mean}");
    }
}
