use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ChError;

/// Tuning knobs of the preparation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractionParams {
    /// Linear combination of priority terms, see
    /// [`decode_function`](super::priority_function::decode_function).
    pub priority_function: String,
    /// Recompute the priority of every uncontracted vertex from time to time.
    pub periodic_updates: bool,
    pub show_progress: bool,
}

impl Default for ContractionParams {
    fn default() -> Self {
        ContractionParams {
            priority_function: "E:10_O:50_N:1".to_string(),
            periodic_updates: true,
            show_progress: false,
        }
    }
}

impl ContractionParams {
    pub fn from_json_file(path: &Path) -> Result<ContractionParams, ChError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: ContractionParams =
            serde_json::from_str(r#"{ "priority_function": "E:1_N:2" }"#).unwrap();
        assert_eq!(params.priority_function, "E:1_N:2");
        assert!(params.periodic_updates);
        assert!(!params.show_progress);
    }
}
