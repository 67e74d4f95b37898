//! Writes a deterministic `Details.csv` with made-up doctors, using the same
//! columns as the `Details` sheet of `dr_details.xlsx`.
//!
//! Point `data_path` in `dashboard.json` at the output to try the dashboard.

use serde::Serialize;

#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Doctor Name")]
    name: String,
    #[serde(rename = "Specilized")]
    specialization: &'a str,
    #[serde(rename = "City")]
    city: &'a str,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Cost")]
    cost: String,
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

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let first_names = ["Asha", "Rohan", "Meera", "Kabir", "Nisha", "Arjun", "Priya", "Vikram"];
    let last_names = ["Rao", "Menon", "Iyer", "Shah", "Kapoor", "Das"];
    let specializations = ["Endocrinology", "Psychiatry", "Plastic Surgery", "Gynecology", "Urology"];
    let cities = ["Mumbai", "Delhi", "Bengaluru", "Chennai", "Pune"];

    let output_path = "Details.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    let n_rows = 24;
    for i in 0..n_rows {
        let name = format!(
            "Dr. {} {}",
            rng.pick(&first_names),
            rng.pick(&last_names)
        );
        // Every seventh doctor has no reviews yet, like the real sheet.
        let rating = if i % 7 == 6 {
            "No reviews".to_string()
        } else {
            let reviews = 1 + rng.next_u64() % 120;
            format!("{:.1} ({reviews} reviews)", 2.5 + rng.next_f64() * 2.5)
        };
        let cost = format!("₹{}", 500 + (rng.next_u64() % 30) * 100);

        writer.serialize(Row {
            name,
            specialization: rng.pick(&specializations),
            city: rng.pick(&cities),
            rating,
            cost,
        })?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} doctors to {output_path}");
    Ok(())
}
