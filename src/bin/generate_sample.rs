use anyhow::{Context, Result};

use ewaste_explorer::data::model::Row;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `mean ± spread`, never below zero.
    fn around(&mut self, mean: u64, spread: u64) -> u64 {
        let offset = (self.next_f64() * (2 * spread + 1) as f64) as u64;
        (mean + offset).saturating_sub(spread)
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_ewaste.csv".to_string());

    let mut rng = SimpleRng::new(42);

    // Typical weekly volume per category at one collection site.
    let categories = [
        ("Electronics", 100, 40),
        ("Batteries", 50, 25),
        ("Cables", 75, 30),
        ("Appliances", 30, 15),
    ];
    let sites = 6;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let mut rows = 0;
    for _ in 0..sites {
        for &(category, mean, spread) in &categories {
            writer.serialize(Row::new(category, rng.around(mean, spread)))?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} rows ({sites} sites) to {output_path}");
    Ok(())
}
