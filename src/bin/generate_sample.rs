//! Writes a synthetic set of attrition artifacts (pipeline JSON plus
//! X_train / X_test / y_test Parquet tables) into the given folder, or the
//! current directory when none is given.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
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

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

// ---------------------------------------------------------------------------
// Synthetic employees
// ---------------------------------------------------------------------------

/// (column, mean, std dev, min, max, weight on the standardised value)
const NUMERIC: [(&str, f64, f64, i64, i64, f64); 5] = [
    ("Age", 37.0, 9.0, 18, 60, -0.45),
    ("MonthlyIncome", 6500.0, 4000.0, 1000, 20000, -0.55),
    ("YearsAtCompany", 7.0, 6.0, 0, 40, -0.35),
    ("DistanceFromHome", 9.0, 8.0, 1, 29, 0.30),
    ("JobSatisfaction", 2.7, 1.1, 1, 4, -0.40),
];

/// (column, levels with their weights)
const CATEGORICAL: [(&str, &[(&str, f64)]); 3] = [
    (
        "Department",
        &[("Human Resources", 0.20), ("Research & Development", -0.25), ("Sales", 0.30)],
    ),
    ("MaritalStatus", &[("Divorced", -0.10), ("Married", -0.30), ("Single", 0.55)]),
    ("OverTime", &[("No", -0.60), ("Yes", 0.90)]),
];

const INTERCEPT: f64 = -1.6;

struct Employee {
    numeric: Vec<i64>,
    categorical: Vec<&'static str>,
}

fn generate_employees(n: usize, rng: &mut SimpleRng) -> Vec<Employee> {
    (0..n)
        .map(|_| {
            let numeric = NUMERIC
                .iter()
                .map(|&(_, mean, sd, lo, hi, _)| (rng.gauss(mean, sd).round() as i64).clamp(lo, hi))
                .collect();
            let categorical = CATEGORICAL
                .iter()
                .map(|(_, levels)| {
                    let names: Vec<&'static str> = levels.iter().map(|(l, _)| *l).collect();
                    rng.pick(&names)
                })
                .collect();
            Employee { numeric, categorical }
        })
        .collect()
}

/// Per-column (mean, population std dev) of the numeric features.
fn fit_scaler(employees: &[Employee]) -> Vec<(f64, f64)> {
    let n = employees.len() as f64;
    (0..NUMERIC.len())
        .map(|j| {
            let mean = employees.iter().map(|e| e.numeric[j] as f64).sum::<f64>() / n;
            let var = employees
                .iter()
                .map(|e| (e.numeric[j] as f64 - mean).powi(2))
                .sum::<f64>()
                / n;
            let sd = var.sqrt();
            (mean, if sd > 0.0 { sd } else { 1.0 })
        })
        .collect()
}

fn margin(e: &Employee, scaler: &[(f64, f64)]) -> f64 {
    let numeric: f64 = NUMERIC
        .iter()
        .zip(&e.numeric)
        .zip(scaler)
        .map(|((&(_, _, _, _, _, w), &v), &(mean, sd))| w * (v as f64 - mean) / sd)
        .sum();
    let categorical: f64 = CATEGORICAL
        .iter()
        .zip(&e.categorical)
        .map(|((_, levels), value)| {
            levels
                .iter()
                .find(|(l, _)| l == value)
                .map_or(0.0, |(_, w)| *w)
        })
        .sum();
    INTERCEPT + numeric + categorical
}

fn sample_labels(employees: &[Employee], scaler: &[(f64, f64)], rng: &mut SimpleRng) -> Vec<i64> {
    employees
        .iter()
        .map(|e| {
            let p = 1.0 / (1.0 + (-margin(e, scaler)).exp());
            i64::from(rng.next_f64() < p)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_parquet(path: &Path, batch: &RecordBatch) {
    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).expect("Failed to create writer");
    writer.write(batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn features_batch(employees: &[Employee]) -> RecordBatch {
    let mut fields = Vec::new();
    let mut columns: Vec<ArrayRef> = Vec::new();
    for (j, &(name, ..)) in NUMERIC.iter().enumerate() {
        fields.push(Field::new(name, DataType::Int64, false));
        columns.push(Arc::new(Int64Array::from(
            employees.iter().map(|e| e.numeric[j]).collect::<Vec<_>>(),
        )));
    }
    for (j, (name, _)) in CATEGORICAL.iter().enumerate() {
        fields.push(Field::new(*name, DataType::Utf8, false));
        columns.push(Arc::new(StringArray::from(
            employees.iter().map(|e| e.categorical[j]).collect::<Vec<_>>(),
        )));
    }
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).expect("Failed to create RecordBatch")
}

fn labels_batch(labels: Vec<i64>) -> RecordBatch {
    let schema = Schema::new(vec![Field::new("Attrition", DataType::Int64, false)]);
    RecordBatch::try_new(Arc::new(schema), vec![Arc::new(Int64Array::from(labels))])
        .expect("Failed to create RecordBatch")
}

fn pipeline_json(scaler: &[(f64, f64)]) -> serde_json::Value {
    let numeric_names: Vec<&str> = NUMERIC.iter().map(|c| c.0).collect();
    let categorical_names: Vec<&str> = CATEGORICAL.iter().map(|c| c.0).collect();
    let feature_names_in: Vec<&str> = numeric_names.iter().chain(&categorical_names).copied().collect();
    let categories: Vec<Vec<&str>> = CATEGORICAL
        .iter()
        .map(|(_, levels)| levels.iter().map(|(l, _)| *l).collect())
        .collect();

    let coef: Vec<f64> = NUMERIC
        .iter()
        .map(|c| c.5)
        .chain(CATEGORICAL.iter().flat_map(|(_, levels)| levels.iter().map(|(_, w)| *w)))
        .collect();

    json!({
        "preprocessor": {
            "feature_names_in": feature_names_in,
            "transformers": [
                {
                    "kind": "standard_scaler",
                    "name": "num",
                    "columns": numeric_names,
                    "mean": scaler.iter().map(|s| s.0).collect::<Vec<_>>(),
                    "scale": scaler.iter().map(|s| s.1).collect::<Vec<_>>(),
                },
                {
                    "kind": "one_hot_encoder",
                    "name": "cat",
                    "columns": categorical_names,
                    "categories": categories,
                    "handle_unknown": "ignore",
                },
            ],
            "remainder": "drop",
        },
        "classifier": {
            "coef": [coef],
            "intercept": [INTERCEPT],
            "classes": [0, 1],
        },
    })
}

fn main() {
    let out_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");

    let mut rng = SimpleRng::new(42);
    let train = generate_employees(800, &mut rng);
    let test = generate_employees(200, &mut rng);
    let scaler = fit_scaler(&train);
    let y_test = sample_labels(&test, &scaler, &mut rng);
    let leavers = y_test.iter().filter(|&&y| y == 1).count();

    write_parquet(&out_dir.join("X_train.parquet"), &features_batch(&train));
    write_parquet(&out_dir.join("X_test.parquet"), &features_batch(&test));
    write_parquet(&out_dir.join("y_test.parquet"), &labels_batch(y_test));

    let pipeline = serde_json::to_string_pretty(&pipeline_json(&scaler)).expect("Failed to serialise pipeline");
    std::fs::write(out_dir.join("log_reg_pipeline.json"), pipeline).expect("Failed to write pipeline");

    println!(
        "Wrote {} training and {} test employees ({leavers} leavers) to {}",
        train.len(),
        test.len(),
        out_dir.display()
    );
}
