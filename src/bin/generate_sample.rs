use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;

/// Mean log response of one lithofacies: (GR, RHOB, NPHI, DT, PE, Vshale, Porosity).
struct Facies {
    means: [f64; 7],
    spread: [f64; 7],
}

const FACIES: [Facies; 4] = [
    // 0: shale
    Facies {
        means: [110.0, 2.55, 0.32, 95.0, 3.2, 0.70, 0.08],
        spread: [12.0, 0.04, 0.03, 6.0, 0.3, 0.08, 0.02],
    },
    // 1: clean sand
    Facies {
        means: [40.0, 2.25, 0.22, 85.0, 1.9, 0.15, 0.22],
        spread: [8.0, 0.05, 0.03, 5.0, 0.2, 0.05, 0.03],
    },
    // 2: limestone
    Facies {
        means: [25.0, 2.62, 0.08, 55.0, 5.0, 0.08, 0.06],
        spread: [6.0, 0.03, 0.02, 3.0, 0.3, 0.03, 0.02],
    },
    // 3: shaly sand
    Facies {
        means: [75.0, 2.40, 0.25, 80.0, 2.6, 0.38, 0.14],
        spread: [10.0, 0.05, 0.03, 5.0, 0.3, 0.06, 0.03],
    },
];

#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "DEPTH")]
    depth: f64,
    #[serde(rename = "GR")]
    gr: f64,
    #[serde(rename = "RHOB")]
    rhob: f64,
    #[serde(rename = "NPHI")]
    nphi: f64,
    #[serde(rename = "DT")]
    dt: f64,
    #[serde(rename = "PE")]
    pe: f64,
    #[serde(rename = "Vshale")]
    vshale: Option<f64>,
    #[serde(rename = "Porosity")]
    porosity: Option<f64>,
    #[serde(rename = "Cluster")]
    cluster: usize,
}

const TOP: f64 = 1500.0;
const BOTTOM: f64 = 2500.0;
const STEP: f64 = 0.5;

fn round(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Haraz_5_clustered_with_Vshale_Porosity.csv"));

    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 1.0).context("building noise distribution")?;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let n_samples = ((BOTTOM - TOP) / STEP) as usize + 1;
    let mut cluster = rng.gen_range(0..FACIES.len());
    let mut layer_end = TOP + rng.gen_range(5.0..40.0);

    for i in 0..n_samples {
        let depth = TOP + i as f64 * STEP;
        if depth > layer_end {
            cluster = rng.gen_range(0..FACIES.len());
            layer_end = depth + rng.gen_range(5.0..40.0);
        }

        let facies = &FACIES[cluster];
        let mut v = [0.0; 7];
        for (k, slot) in v.iter_mut().enumerate() {
            *slot = facies.means[k] + facies.spread[k] * noise.sample(&mut rng);
        }

        // Roughly one sample in 400 has no petrophysical estimate.
        let missing = rng.gen_ratio(1, 400);
        writer.serialize(SampleRow {
            depth,
            gr: round(v[0].max(0.0), 2),
            rhob: round(v[1], 3),
            nphi: round(v[2].clamp(0.0, 1.0), 3),
            dt: round(v[3], 2),
            pe: round(v[4].max(0.0), 2),
            vshale: (!missing).then(|| round(v[5].clamp(0.0, 1.0), 4)),
            porosity: (!missing).then(|| round(v[6].clamp(0.0, 1.0), 4)),
            cluster,
        })?;
    }
    writer.flush()?;

    println!("Wrote {n_samples} depth samples to {}", output_path.display());
    Ok(())
}
