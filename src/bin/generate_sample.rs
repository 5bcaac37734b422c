use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

const CHANNELS: [&str; 13] = [
    "CO(GT)",
    "PT08.S1(CO)",
    "NMHC(GT)",
    "C6H6(GT)",
    "PT08.S2(NMHC)",
    "NOx(GT)",
    "PT08.S3(NOx)",
    "NO2(GT)",
    "PT08.S4(NO2)",
    "PT08.S5(O3)",
    "T",
    "RH",
    "AH",
];

/// Share of readings replaced by the `-200` sentinel.
const MISSING_RATE: f64 = 0.08;

/// Seeded xoshiro256** generator, so every run writes the same file.
struct NoiseRng {
    s: [u64; 4],
}

impl NoiseRng {
    fn seeded(seed: u64) -> Self {
        let mut x = seed;
        let s = [(); 4].map(|_| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            x
        });
        NoiseRng { s }
    }

    fn next_u64(&mut self) -> u64 {
        let out = self.s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
        out
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Sensor noise: one normal sample with the given spread, centred on zero.
    fn noise(&mut self, spread: f64) -> f64 {
        let u1 = self.uniform().max(1e-15);
        let u2 = self.uniform();
        spread * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

/// Per-channel (base level, daily swing, noise, decimals).
fn channel_profile(idx: usize) -> (f64, f64, f64, usize) {
    match idx {
        0 => (2.1, 1.2, 0.4, 1),         // CO(GT)
        1 => (1100.0, 200.0, 60.0, 0),   // PT08.S1(CO)
        2 => (220.0, 120.0, 40.0, 0),    // NMHC(GT)
        3 => (10.0, 6.0, 1.5, 1),        // C6H6(GT)
        4 => (940.0, 220.0, 50.0, 0),    // PT08.S2(NMHC)
        5 => (240.0, 140.0, 40.0, 0),    // NOx(GT)
        6 => (830.0, -180.0, 50.0, 0),   // PT08.S3(NOx)
        7 => (110.0, 40.0, 12.0, 0),     // NO2(GT)
        8 => (1450.0, 250.0, 70.0, 0),   // PT08.S4(NO2)
        9 => (1020.0, 320.0, 90.0, 0),   // PT08.S5(O3)
        10 => (18.0, 5.0, 1.0, 1),       // T
        11 => (49.0, -12.0, 4.0, 1),     // RH
        _ => (1.0, 0.2, 0.05, 4),        // AH
    }
}

fn decimal_comma(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}").replace('.', ",")
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_air_quality.csv".to_string());

    let mut rng = NoiseRng::seeded(42);

    // Same span as the UCI recording: 10/03/2004 18:00 to 04/04/2005 14:00.
    let start: NaiveDateTime = NaiveDate::from_ymd_opt(2004, 3, 10)
        .and_then(|d| d.and_hms_opt(18, 0, 0))
        .expect("valid start");
    let end: NaiveDateTime = NaiveDate::from_ymd_opt(2005, 4, 4)
        .and_then(|d| d.and_hms_opt(14, 0, 0))
        .expect("valid end");

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&output_path)
        .expect("Failed to create output file");

    let mut header = vec!["Date", "Time"];
    header.extend(CHANNELS);
    header.extend(["", ""]);
    writer.write_record(&header).expect("Failed to write header");

    let mut rows = 0usize;
    let mut missing = 0usize;
    let mut ts = start;
    while ts <= end {
        let hour = ts.hour() as f64;
        // Peaks in the early afternoon, troughs before dawn.
        let daily = (2.0 * std::f64::consts::PI * (hour - 8.0) / 24.0).sin();
        // Warm in July, cold in January.
        let season = -(2.0 * std::f64::consts::PI * (ts.ordinal() as f64 + 10.0) / 365.0).cos();

        let mut record = vec![
            ts.format("%d/%m/%Y").to_string(),
            ts.format("%H.%M.%S").to_string(),
        ];
        for idx in 0..CHANNELS.len() {
            if rng.uniform() < MISSING_RATE {
                record.push("-200".to_string());
                missing += 1;
                continue;
            }
            let (base, swing, noise, decimals) = channel_profile(idx);
            let mut v = base + swing * daily + rng.noise(noise);
            if idx == 10 {
                v += 10.0 * season;
            }
            record.push(decimal_comma(v.max(0.0), decimals));
        }
        record.extend([String::new(), String::new()]);
        writer.write_record(&record).expect("Failed to write row");

        rows += 1;
        ts += Duration::hours(1);
    }

    // The UCI export ends with rows of bare separators.
    for _ in 0..2 {
        writer
            .write_record(vec![""; CHANNELS.len() + 4])
            .expect("Failed to write padding row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {rows} hourly rows ({missing} readings set to -200) to {output_path}");
}
