use std::fs::File;
use std::io::{BufWriter, Write};

const NULL: f64 = -999.25;

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

/// Shale fraction in [0, 1]: smooth alternation of sand and shale beds.
fn shale_fraction(depth: f64) -> f64 {
    let beds = (depth / 23.0).sin() * 0.6 + (depth / 7.3).sin() * 0.4;
    ((beds + 1.0) / 2.0).clamp(0.0, 1.0)
}

fn main() -> std::io::Result<()> {
    let mut rng = SimpleRng::new(42);

    let start = 1500.0_f64;
    let step = 0.25_f64;
    let n_rows = 1201;
    let stop = start + step * (n_rows - 1) as f64;

    let output_path = "sample_well.las";
    let mut out = BufWriter::new(File::create(output_path)?);

    writeln!(out, "~VERSION INFORMATION")?;
    writeln!(out, " VERS.                 2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0")?;
    writeln!(out, " WRAP.                  NO : ONE LINE PER DEPTH STEP")?;
    writeln!(out, "~WELL INFORMATION")?;
    writeln!(out, "#MNEM.UNIT        DATA              DESCRIPTION")?;
    writeln!(out, " STRT.M      {start:>10.4} : START DEPTH")?;
    writeln!(out, " STOP.M      {stop:>10.4} : STOP DEPTH")?;
    writeln!(out, " STEP.M      {step:>10.4} : STEP")?;
    writeln!(out, " NULL.       {NULL:>10.2} : NULL VALUE")?;
    writeln!(out, " COMP.       SYNTHETIC LOGS LTD : COMPANY")?;
    writeln!(out, " WELL.       SAMPLE-1 : WELL")?;
    writeln!(out, " FLD .       DEMO FIELD : FIELD")?;
    writeln!(out, "~CURVE INFORMATION")?;
    writeln!(out, " DEPT.M                  : DEPTH")?;
    writeln!(out, " GRZ .GAPI               : GAMMA RAY")?;
    writeln!(out, " PORD.V/V                : DENSITY POROSITY")?;
    writeln!(out, " ZDEN.G/C3               : BULK DENSITY")?;
    writeln!(out, "~A  DEPT       GRZ       PORD      ZDEN")?;

    let mut n_null = 0usize;
    for i in 0..n_rows {
        let depth = start + step * i as f64;
        let vsh = shale_fraction(depth);

        let mut grz = 25.0 + 105.0 * vsh + rng.gauss(0.0, 3.0);
        let mut pord = (0.28 - 0.2 * vsh + rng.gauss(0.0, 0.01)).max(0.0);
        let mut zden = 2.65 - 1.65 * pord + rng.gauss(0.0, 0.015);

        // A tool gap, a washed-out zone and scattered dropouts.
        if (1600.0..1605.0).contains(&depth) {
            grz = NULL;
        }
        if depth >= 1780.0 {
            zden = NULL;
        }
        if rng.next_f64() < 0.01 {
            pord = NULL;
        }
        if grz == NULL || pord == NULL || zden == NULL {
            n_null += 1;
        }

        writeln!(out, "{depth:>10.4} {grz:>9.3} {pord:>9.4} {zden:>9.4}")?;
    }
    out.flush()?;

    println!(
        "Wrote {n_rows} depth steps ({start:.2} – {stop:.2} m, {n_null} with null samples) to {output_path}"
    );
    Ok(())
}
