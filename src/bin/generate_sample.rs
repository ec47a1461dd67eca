use anyhow::{Context, Result};

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Region name → (mean population in thousands, mean temperature °C, cities).
const REGIONS: [(&str, f64, f64, &[&str]); 4] = [
    ("north", 120.0, 4.5, &["Tromso", "Bodo", "Alta"]),
    ("south", 340.0, 17.0, &["Seville", "Malaga", "Cadiz"]),
    ("east", 210.0, 11.0, &["Kyiv", "Lviv", "Odesa"]),
    ("west", 280.0, 12.5, &["Porto", "Braga", "Faro"]),
];

const ROWS_PER_REGION: usize = 25;

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_regions.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(["id", "region", "city", "population", "temperature"])?;

    let mut id = 0u32;
    for round in 0..ROWS_PER_REGION {
        for &(region, population, temperature, cities) in &REGIONS {
            id += 1;
            let pop = rng.gauss(population, population * 0.2).max(1.0).round() as i64;
            let temp = rng.gauss(temperature, 3.0);
            writer.write_record([
                id.to_string(),
                region.to_string(),
                rng.pick(cities).to_string(),
                pop.to_string(),
                format!("{temp:.2}"),
            ])?;
        }

        // A few rows the loader is expected to skip.
        if round == 3 {
            writer.write_record(["900", "north", "Alta", "", "1.25"])?;
            writer.write_record(["901", "south", "Malaga"])?;
            writer.write_record(["902", "east", "Lviv", "many", "9.50"])?;
        }
    }

    writer.flush().with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {id} rows across {} regions (plus 3 malformed) to {output_path}",
        REGIONS.len()
    );
    Ok(())
}
