use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

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

/// Beer–Lambert style absorbance from two preservative concentrations (ppm).
/// Benzoate absorbs mostly near 280 nm, sorbate nearer 260–320 nm.
fn absorbance(benzoate: f64, sorbate: f64, rng: &mut SimpleRng) -> [f64; 3] {
    let noise = |rng: &mut SimpleRng| rng.gauss(0.0, 0.004);
    [
        0.05 + 0.0021 * benzoate + 0.0009 * sorbate + noise(rng),
        0.03 + 0.0006 * benzoate + 0.0012 * sorbate + noise(rng),
        0.02 + 0.0001 * benzoate + 0.0002 * sorbate + noise(rng),
    ]
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

fn write_models(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let features = ["abs_280", "abs_320", "abs_400", "abs_280_320_ratio"];
    let benzoate = json!({
        "kind": "linear",
        "feature_names": features,
        "coefficients": [620.0, -310.0, -40.0, 12.0],
        "intercept": -18.0,
    });
    let sorbate = json!({
        "kind": "ensemble",
        "feature_names": features,
        "members": [
            { "coefficients": [-150.0, 960.0, -80.0, -20.0], "intercept": 5.0 },
            { "coefficients": [-170.0, 1000.0, -60.0, -25.0], "intercept": 0.0 },
        ],
    });

    for (name, model) in [("benzoate_model.json", benzoate), ("sorbate_model.json", sorbate)] {
        let path = dir.join(name);
        let text = serde_json::to_string_pretty(&model)?;
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_absorbance.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating sample CSV")?;
    writer.write_record(["sample_id", "product", "abs_280", "abs_320", "abs_400"])?;

    let products = ["cola", "orange_juice", "ketchup", "pickles"];
    let mut rows = 0;
    for (p, product) in products.iter().enumerate() {
        for i in 0..6 {
            let benzoate = 20.0 + 35.0 * i as f64 + 10.0 * p as f64;
            let sorbate = 40.0 + 50.0 * (5 - i) as f64;
            let [a280, a320, a400] = absorbance(benzoate, sorbate, &mut rng);

            rows += 1;
            writer.write_record([
                format!("S{rows:03}"),
                product.to_string(),
                round4(a280).to_string(),
                round4(a320).to_string(),
                round4(a400).to_string(),
            ])?;
        }
    }
    // One unusable reading so the dropped-row path is visible.
    rows += 1;
    writer.write_record([format!("S{rows:03}"), "blank".into(), "0.5".into(), "0".into(), "0.3".into()])?;
    writer.flush()?;
    println!("Wrote {rows} samples to {output_path}");

    write_models(Path::new("models/regression"))
}
