use anyhow::{Context, Result};
use chrono::{Months, NaiveDate};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Rows the reader is expected to drop, interleaved with the good ones.
const MALFORMED: &[(usize, &[&str])] = &[
    (5, &["not-a-date", "120"]),
    (17, &["1966-06-01T00:00:00", "n/a"]),
    (40, &["1968-05-01T00:00:00"]),
    (63, &["1970-04-01T00:00:00", "310", "extra"]),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(1964, 1, 1).context("invalid start date")?;
    let months = 12 * 12;

    let output_path = "casualty_data.csv";
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut written = 0usize;
    let mut malformed = MALFORMED.iter().peekable();
    for i in 0..months {
        if let Some((_, fields)) = malformed.next_if(|(at, _)| *at == i) {
            writer.write_record(*fields)?;
        }

        let date = start
            .checked_add_months(Months::new(i as u32))
            .context("date out of range")?;
        // Monthly deaths peak in early 1968.
        let signal = gaussian(i as f64, 50.0, 18.0, 1600.0) + 40.0;
        let value = (signal + rng.gauss(0.0, signal * 0.08)).max(0.0).round();

        let stamp = date.format("%Y-%m-%dT00:00:00").to_string();
        writer.write_record([stamp, format!("{value}")])?;
        written += 1;
    }
    writer.flush()?;

    println!(
        "Wrote {written} monthly rows and {} malformed rows to {output_path}",
        MALFORMED.len()
    );
    Ok(())
}
