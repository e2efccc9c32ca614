//! Demo applicant profiles
//!
//! Keyed by UI labels with category labels, the way the form submits them,
//! so they also exercise label resolution.

use crate::logic::features::RawInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// High limit, low utilisation, always paid on time
    LowRisk,
    /// Low limit, maxed out, several months late
    HighRisk,
}

impl Preset {
    pub fn inputs(&self) -> RawInputs {
        match self {
            Preset::LowRisk => low_risk(),
            Preset::HighRisk => high_risk(),
        }
    }
}

const MONTHS: [&str; 6] = ["Sep", "Agu", "Jul", "Jun", "Mei", "Apr"];

fn with_history(
    mut inputs: RawInputs,
    status: [&str; 6],
    bills: [f64; 6],
    payments: [f64; 6],
) -> RawInputs {
    for (i, month) in MONTHS.iter().enumerate() {
        inputs.insert(format!("Status pembayaran ({})", month), status[i]);
        inputs.insert(format!("Jumlah tagihan ({})", month), bills[i]);
        inputs.insert(format!("Jumlah pembayaran ({})", month), payments[i]);
    }
    inputs
}

pub fn low_risk() -> RawInputs {
    let base = RawInputs::new()
        .with("Limit kredit", 500000.0)
        .with("Jenis kelamin", "Perempuan")
        .with("Pendidikan", "Pascasarjana")
        .with("Status pernikahan", "Menikah")
        .with("Usia", 40i64);

    with_history(base, ["Bayar tepat waktu"; 6], [15000.0; 6], [15000.0; 6])
}

pub fn high_risk() -> RawInputs {
    let base = RawInputs::new()
        .with("Limit kredit", 20000.0)
        .with("Jenis kelamin", "Perempuan")
        .with("Pendidikan", "Sarjana")
        .with("Status pernikahan", "Menikah")
        .with("Usia", 30i64);

    with_history(
        base,
        ["Telat 3 bulan", "Telat 2 bulan", "Telat 2 bulan", "Telat 2 bulan", "Telat 2 bulan", "Telat 2 bulan"],
        [19500.0, 19000.0, 18500.0, 18000.0, 17500.0, 17000.0],
        [0.0; 6],
    )
}
