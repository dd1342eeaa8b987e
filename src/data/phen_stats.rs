use crate::data::phenotypes::StatusLabels;
use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;
use statrs::statistics::Statistics;
use std::{fs::File, path::Path};

#[derive(Serialize, Deserialize)]
pub struct PhenStats {
    num_samples: usize,
    num_cases: usize,
    case_fraction: f64,
    mean: f64,
    variance: f64,
}

impl PhenStats {
    pub fn from_status(status: &StatusLabels) -> Self {
        let num_samples = status.num_samples();
        let num_cases = status.num_cases();
        let indicators = (0..num_samples)
            .map(|i| status.y()[i * 2 + 1] as f64)
            .collect::<Vec<f64>>();
        Self {
            num_samples,
            num_cases,
            case_fraction: num_cases as f64 / num_samples as f64,
            mean: (&indicators).mean(),
            variance: (&indicators).variance(),
        }
    }

    pub fn to_file(&self, path: &Path) {
        to_writer_pretty(File::create(path).unwrap(), self).unwrap();
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_cases(&self) -> usize {
        self.num_cases
    }

    pub fn case_fraction(&self) -> f64 {
        self.case_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::PhenStats;
    use crate::data::phenotypes::PhenotypesBuilder;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn stats_from_status() {
        let phen = PhenotypesBuilder::new()
            .with_classes(&[0, 1, 1, 0])
            .build()
            .unwrap();
        let stats = PhenStats::from_status(phen.status());
        assert_eq!(stats.num_samples(), 4);
        assert_eq!(stats.num_cases(), 2);
        assert_approx_eq!(stats.case_fraction(), 0.5);
        assert_approx_eq!(stats.mean, 0.5);
        // sample variance of [0, 1, 1, 0]
        assert_approx_eq!(stats.variance, 1.0 / 3.0);
    }
}
