use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::RecordSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLabels {
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            x_label: "Worker threads used".to_owned(),
            y_label: "Time taken (s)".to_owned(),
            legend_title: "CPU Cores".to_owned(),
        }
    }
}

/// Bars for one `cpu_cores` value, one slot per entry of [`BarChart::threads`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub cpu_cores: u64,
    /// Mean time in seconds, `None` where no record had this (threads, cores) pair
    pub values: Vec<Option<f64>>,
}

/// A grouped bar chart: clusters along `threads`, one bar per series inside each cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub labels: ChartLabels,
    pub threads: Vec<u64>,
    pub series: Vec<Series>,
}

impl BarChart {
    /// Groups records by (`threads`, `cpu_cores`) and takes the mean `time` of each group.
    /// Records missing either derived value are not plotted. Non-finite times are left
    /// out of the mean; a group with no finite time has no bar.
    pub fn from_records(records: &RecordSet, labels: &ChartLabels) -> Self {
        let mut groups: BTreeMap<(u64, u64), (f64, usize)> = BTreeMap::new();
        for record in records.iter() {
            let (Some(threads), Some(cpu_cores)) = (record.threads, record.cpu_cores) else {
                continue;
            };
            let entry = groups.entry((threads, cpu_cores)).or_default();
            if record.time.is_finite() {
                entry.0 += record.time;
                entry.1 += 1;
            }
        }
        debug!("Built {} (threads, cpu_cores) groups", groups.len());

        let threads = groups.keys().map(|x| x.0).sorted().dedup().collect::<Vec<_>>();
        let series = groups
            .keys()
            .map(|x| x.1)
            .sorted()
            .dedup()
            .map(|cpu_cores| Series {
                cpu_cores,
                values: threads
                    .iter()
                    .map(|t| {
                        groups
                            .get(&(*t, cpu_cores))
                            .filter(|(_, count)| *count > 0)
                            .map(|(sum, count)| sum / *count as f64)
                    })
                    .collect(),
            })
            .collect();

        Self {
            labels: labels.clone(),
            threads,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Tallest bar, used to scale renderings
    pub fn max_value(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .copied()
            .reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::record::Record;

    fn record(threads: Option<u64>, cpu_cores: Option<u64>, time: f64) -> Record {
        Record {
            threads,
            cpu_cores,
            ..Record::new("n", time, "0")
        }
    }

    #[test]
    fn mean_of_shared_group() {
        let set = RecordSet::from(vec![
            record(Some(4), Some(2), 5.0),
            record(Some(4), Some(2), 7.0),
        ]);
        let chart = BarChart::from_records(&set, &ChartLabels::default());

        assert_eq!(chart.threads, vec![4]);
        assert_eq!(
            chart.series,
            vec![Series {
                cpu_cores: 2,
                values: vec![Some(6.0)]
            }]
        );
    }

    #[test]
    fn clusters_and_series_are_sorted() {
        let set = RecordSet::from(vec![
            record(Some(8), Some(4), 2.5),
            record(Some(1), Some(2), 9.0),
            record(Some(4), Some(2), 5.0),
            record(Some(8), Some(2), 3.0),
        ]);
        let chart = BarChart::from_records(&set, &ChartLabels::default());

        assert_eq!(chart.threads, vec![1, 4, 8]);
        assert_eq!(
            chart.series,
            vec![
                Series {
                    cpu_cores: 2,
                    values: vec![Some(9.0), Some(5.0), Some(3.0)]
                },
                Series {
                    cpu_cores: 4,
                    values: vec![None, None, Some(2.5)]
                },
            ]
        );
        assert_eq!(chart.max_value(), Some(9.0));
    }

    #[test]
    fn records_with_missing_params_are_not_plotted() {
        let set = RecordSet::from(vec![
            record(None, None, 1.0),
            record(Some(2), None, 1.0),
            record(Some(2), Some(1), 4.0),
        ]);
        let chart = BarChart::from_records(&set, &ChartLabels::default());

        assert_eq!(chart.threads, vec![2]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].values, vec![Some(4.0)]);
    }

    #[test]
    fn non_finite_times_are_skipped() {
        let set = RecordSet::from(vec![
            record(Some(4), Some(2), 5.0),
            record(Some(4), Some(2), f64::NAN),
            record(Some(4), Some(2), 7.0),
            record(Some(8), Some(2), f64::INFINITY),
        ]);
        let chart = BarChart::from_records(&set, &ChartLabels::default());

        assert_eq!(chart.threads, vec![4, 8]);
        assert_eq!(
            chart.series,
            vec![Series {
                cpu_cores: 2,
                values: vec![Some(6.0), None]
            }]
        );
        assert_eq!(chart.max_value(), Some(6.0));
    }

    #[test]
    fn empty_chart() {
        let set = RecordSet::from(vec![record(None, None, 1.0)]);
        let chart = BarChart::from_records(&set, &ChartLabels::default());
        assert!(chart.is_empty());
        assert!(chart.threads.is_empty());
        assert_eq!(chart.max_value(), None);
    }

    #[test]
    fn default_labels() {
        let labels = ChartLabels::default();
        assert_eq!(labels.x_label, "Worker threads used");
        assert_eq!(labels.y_label, "Time taken (s)");
        assert_eq!(labels.legend_title, "CPU Cores");
    }
}
