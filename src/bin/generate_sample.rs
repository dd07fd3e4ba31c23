//! Writes a small, self-consistent artifact set into the current directory:
//! a gradient-boosted model, its column list, and the address catalog (JSON
//! plus a Parquet copy of the addresses).

use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{json, Value};

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Build a balanced split tree over sorted `thresholds` on one feature.
///
/// `leaves` must have `thresholds.len() + 1` values. Nodes are emitted in
/// pre-order so every child index is greater than its parent's.
fn step_tree(feature: usize, thresholds: &[f64], leaves: &[f64]) -> Value {
    fn build(
        feature: usize,
        thresholds: &[f64],
        leaves: &[f64],
        nodes: &mut Vec<Value>,
    ) -> usize {
        let idx = nodes.len();
        if thresholds.is_empty() {
            nodes.push(json!({ "value": leaves[0] }));
            return idx;
        }
        let mid = thresholds.len() / 2;
        nodes.push(Value::Null);
        let left = build(feature, &thresholds[..mid], &leaves[..=mid], nodes);
        let right = build(feature, &thresholds[mid + 1..], &leaves[mid + 1..], nodes);
        nodes[idx] = json!({
            "feature": feature,
            "threshold": thresholds[mid],
            "left": left,
            "right": right,
        });
        idx
    }

    let mut nodes = Vec::new();
    build(feature, thresholds, leaves, &mut nodes);
    json!({ "nodes": nodes })
}

fn write_json(path: &str, value: &Value) {
    let text = serde_json::to_string_pretty(value).expect("Failed to serialize JSON");
    std::fs::write(path, text).expect("Failed to write JSON file");
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let addresses = [
        "Shahran", "Pardis", "Shahrake Qods", "Shahrake Gharb", "North Program Organization",
        "Andisheh", "West Ferdows Boulevard", "Narmak", "Saadat Abad", "Zafar", "Punak",
        "Niavaran",
    ];
    // The last two neighborhoods had no training rows, so the model has no
    // columns for them.
    let trained = &addresses[..addresses.len() - 2];

    let mut columns: Vec<String> = ["Area", "Room", "Parking", "Warehouse", "Elevator"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    columns.extend(trained.iter().map(|a| format!("Address_{a}")));

    let learning_rate = 0.5;
    let mut trees = vec![
        // Area
        step_tree(
            0,
            &[50.0, 70.0, 90.0, 120.0, 160.0, 220.0, 350.0],
            &[-1.6, -1.1, -0.6, -0.2, 0.3, 0.8, 1.3, 1.9],
        ),
        // Room
        step_tree(1, &[0.5, 1.5, 2.5, 3.5], &[-0.4, -0.2, 0.0, 0.2, 0.4]),
        // Parking, Warehouse, Elevator
        step_tree(2, &[0.5], &[-0.12, 0.06]),
        step_tree(3, &[0.5], &[-0.04, 0.02]),
        step_tree(4, &[0.5], &[-0.08, 0.04]),
    ];
    for (i, _) in trained.iter().enumerate() {
        let effect = rng.uniform(-0.9, 1.1);
        trees.push(step_tree(5 + i, &[0.5], &[0.0, effect]));
    }

    let model = json!({
        "kind": "gradient_boosting",
        "base_score": 10.4,
        "learning_rate": learning_rate,
        "trees": trees,
        "feature_names": columns,
    });

    write_json("final_house_price_model.json", &model);
    write_json("model_columns.json", &json!(columns));
    write_json("address_list.json", &json!(addresses));

    // Parquet copy of the catalog
    let schema = Arc::new(Schema::new(vec![Field::new("Address", DataType::Utf8, false)]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(StringArray::from(addresses.to_vec()))],
    )
    .expect("Failed to create RecordBatch");

    let output_path = "address_list.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote model ({} trees, {} columns) and {} addresses ({} without a model column)",
        model["trees"].as_array().map_or(0, Vec::len),
        columns.len(),
        addresses.len(),
        addresses.len() - trained.len()
    );
}
