use std::collections::HashMap;

use super::model::{address_column, AddressCatalog, ColumnSchema, FeatureVector};

pub const AREA_MIN: f64 = 30.0;
pub const AREA_MAX: f64 = 1000.0;
pub const ROOM_CHOICES: [u8; 6] = [0, 1, 2, 3, 4, 5];

// ---------------------------------------------------------------------------
// HouseInputs – raw form values
// ---------------------------------------------------------------------------

/// Raw values collected by the form, before encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseInputs {
    /// Floor area in square meters.
    pub area: f64,
    pub room: u8,
    pub parking: bool,
    pub warehouse: bool,
    pub elevator: bool,
    pub address: String,
}

impl HouseInputs {
    /// Form defaults: 100 m², 2 rooms, every amenity, first catalog address.
    pub fn with_defaults(catalog: &AddressCatalog) -> Self {
        Self {
            area: 100.0,
            room: 2,
            parking: true,
            warehouse: true,
            elevator: true,
            address: catalog.first().unwrap_or_default().to_string(),
        }
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode form inputs into a row laid out exactly like `schema`.
///
/// Every catalog address gets a zeroed one-hot column; the selected one is set
/// to 1 only when the schema knows it. Unknown addresses fall back to the
/// all-zero baseline instead of failing. The seeded row is then re-keyed by
/// the schema: absent columns become 0, extra keys are dropped.
///
/// Called once per chart sample, so it never logs.
pub fn encode(
    inputs: &HouseInputs,
    schema: &ColumnSchema,
    catalog: &AddressCatalog,
) -> FeatureVector {
    let mut seeded: HashMap<String, f64> = HashMap::with_capacity(5 + catalog.len());
    seeded.insert("Area".to_string(), inputs.area);
    seeded.insert("Room".to_string(), f64::from(inputs.room));
    seeded.insert("Parking".to_string(), flag(inputs.parking));
    seeded.insert("Warehouse".to_string(), flag(inputs.warehouse));
    seeded.insert("Elevator".to_string(), flag(inputs.elevator));

    for address in catalog.addresses() {
        seeded.insert(address_column(address), 0.0);
    }

    let selected = address_column(&inputs.address);
    if schema.contains(&selected) {
        seeded.insert(selected, 1.0);
    }

    let values = schema
        .columns()
        .iter()
        .map(|col| seeded.get(col).copied().unwrap_or(0.0))
        .collect();

    FeatureVector::from_parts(schema.columns().to_vec(), values)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn schema(cols: &[&str]) -> ColumnSchema {
        ColumnSchema::new(cols.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn catalog(addrs: &[&str]) -> AddressCatalog {
        AddressCatalog::new(addrs.iter().map(|s| s.to_string()).collect())
    }

    fn standard_schema() -> ColumnSchema {
        schema(&[
            "Area",
            "Room",
            "Parking",
            "Warehouse",
            "Elevator",
            "Address_X",
            "Address_Y",
        ])
    }

    fn inputs(address: &str) -> HouseInputs {
        HouseInputs {
            area: 100.0,
            room: 2,
            parking: true,
            warehouse: false,
            elevator: true,
            address: address.to_string(),
        }
    }

    #[test]
    fn output_matches_schema_order() {
        let schema = standard_schema();
        let v = encode(&inputs("X"), &schema, &catalog(&["X", "Y"]));
        assert_eq!(v.columns(), schema.columns());
        assert_eq!(v.values(), &[100.0, 2.0, 1.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn selected_address_is_exactly_one_hot() {
        let v = encode(&inputs("Y"), &standard_schema(), &catalog(&["X", "Y"]));
        assert_eq!(v.get("Address_X"), Some(0.0));
        assert_eq!(v.get("Address_Y"), Some(1.0));
        let hot = v
            .iter()
            .filter(|(c, val)| c.starts_with("Address_") && *val == 1.0)
            .count();
        assert_eq!(hot, 1);
    }

    #[test]
    fn address_missing_from_schema_falls_back_to_baseline() {
        // "Z" is a catalog address the model never saw.
        let v = encode(&inputs("Z"), &standard_schema(), &catalog(&["X", "Y", "Z"]));
        assert_eq!(v.len(), 7);
        assert_eq!(v.get("Address_X"), Some(0.0));
        assert_eq!(v.get("Address_Y"), Some(0.0));
        assert_eq!(v.get("Address_Z"), None);
    }

    #[test]
    fn schema_columns_absent_from_inputs_are_zero_filled() {
        let schema = schema(&["Elevator", "YearBuilt", "Area", "Address_X"]);
        let v = encode(&inputs("X"), &schema, &catalog(&["X"]));
        assert_eq!(v.columns(), schema.columns());
        assert_eq!(v.values(), &[1.0, 0.0, 100.0, 1.0]);
    }

    #[test]
    fn selected_address_outside_catalog_but_in_schema_is_set() {
        let v = encode(&inputs("Y"), &standard_schema(), &catalog(&["X"]));
        assert_eq!(v.get("Address_Y"), Some(1.0));
    }

    #[test]
    fn area_bounds_encode_unchanged() {
        let schema = standard_schema();
        let catalog = catalog(&["X", "Y"]);
        for area in [AREA_MIN, AREA_MAX] {
            let mut inp = inputs("X");
            inp.area = area;
            let v = encode(&inp, &schema, &catalog);
            assert_eq!(v.get("Area"), Some(area));
            assert_eq!(v.len(), schema.len());
        }
    }

    #[test]
    fn empty_catalog_yields_baseline() {
        let v = encode(&inputs(""), &standard_schema(), &AddressCatalog::default());
        assert_eq!(v.get("Address_X"), Some(0.0));
        assert_eq!(v.get("Address_Y"), Some(0.0));
    }

    #[test]
    fn defaults_pick_first_address() {
        let inp = HouseInputs::with_defaults(&catalog(&["Punak", "Pardis"]));
        assert_eq!(inp.address, "Punak");
        assert_eq!(inp.room, 2);
        assert_eq!(inp.area, 100.0);
        assert!(inp.parking && inp.warehouse && inp.elevator);
    }

    /// Counts records emitted from the encoder module.
    struct EncoderRecords(AtomicUsize);

    impl log::Log for EncoderRecords {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            let encoder_module = module_path!().trim_end_matches("::tests");
            if record.module_path() == Some(encoder_module) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn flush(&self) {}
    }

    static RECORDS: EncoderRecords = EncoderRecords(AtomicUsize::new(0));

    #[test]
    fn unknown_address_encodes_silently() {
        // Ignored if a logger is already installed.
        let _ = log::set_logger(&RECORDS);
        log::set_max_level(log::LevelFilter::Trace);

        let schema = standard_schema();
        let catalog = catalog(&["X", "Y", "Z"]);
        for area in [AREA_MIN, 100.0, AREA_MAX] {
            let mut inp = inputs("Z");
            inp.area = area;
            encode(&inp, &schema, &catalog);
        }
        assert_eq!(RECORDS.0.load(Ordering::SeqCst), 0);
    }
}
