use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chart::ChartLabels;

pub const RESULTS_FILE: &str = "results.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub results_path: PathBuf,
    pub labels: ChartLabels,
    /// Characters used by the tallest terminal bar
    pub bar_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from(RESULTS_FILE),
            labels: ChartLabels::default(),
            bar_width: 50,
        }
    }
}
