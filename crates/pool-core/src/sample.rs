//! The transient d×n grid of individual test outcomes.
//!
//! Storage is column-major: group `j` owns `positives[j*d .. (j+1)*d]`.

use pool_common::{Error, Result};
use pool_math::params::{
    check_group_count, check_group_size, check_prevalence, check_sample_cells,
};
use rand::Rng;

/// One random draw of a grouped population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationSample {
    group_size: usize,
    group_count: usize,
    positives: Vec<bool>,
}

impl PopulationSample {
    /// Draw `d × n` independent Bernoulli(`p`) individuals.
    ///
    /// Each individual gets a uniform draw in `[0, 1)` and is positive iff
    /// the draw is `<= p`. Exactly `d × n` draws are consumed regardless of
    /// the outcome, so a seeded source reproduces the same sample.
    pub fn draw<R: Rng + ?Sized>(d: usize, n: usize, p: f64, rng: &mut R) -> Result<Self> {
        let d = check_group_size(d)?;
        let n = check_group_count(n)?;
        let p = check_prevalence(p)?;
        let cells = check_sample_cells(d, n)?;

        let positives = (0..cells).map(|_| rng.random::<f64>() <= p).collect();

        Ok(PopulationSample {
            group_size: d,
            group_count: n,
            positives,
        })
    }

    /// Build a sample from known outcomes, column-major.
    pub fn from_positives(d: usize, n: usize, positives: Vec<bool>) -> Result<Self> {
        let d = check_group_size(d)?;
        let n = check_group_count(n)?;
        let cells = check_sample_cells(d, n)?;
        if positives.len() != cells {
            return Err(Error::invalid(
                "positives",
                format!("expected {} outcomes for {}x{}, got {}", cells, d, n, positives.len()),
            ));
        }

        Ok(PopulationSample {
            group_size: d,
            group_count: n,
            positives,
        })
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Outcomes for the members of group `j`, or `None` past the last group.
    pub fn group(&self, j: usize) -> Option<&[bool]> {
        let start = j.checked_mul(self.group_size)?;
        self.positives.get(start..start.checked_add(self.group_size)?)
    }

    /// A group tests positive iff any member is positive.
    pub fn group_positive(&self, j: usize) -> Option<bool> {
        self.group(j).map(|group| group.iter().any(|&x| x))
    }

    /// The group positivity vector, length `n`.
    pub fn positivity(&self) -> Vec<bool> {
        self.positives
            .chunks_exact(self.group_size)
            .map(|group| group.iter().any(|&x| x))
            .collect()
    }

    /// Number of groups that test positive.
    pub fn positive_groups(&self) -> usize {
        self.positives
            .chunks_exact(self.group_size)
            .filter(|group| group.iter().any(|&x| x))
            .count()
    }

    /// Number of positive individuals across all groups.
    pub fn positive_individuals(&self) -> usize {
        self.positives.iter().filter(|&&x| x).count()
    }

    /// Screening tests plus individual retests of every positive group.
    pub fn tests_required(&self) -> usize {
        self.group_count + self.group_size * self.positive_groups()
    }
}
