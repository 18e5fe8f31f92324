//! Fallback cohort for runs launched without any process launcher.

use super::comm::{hostname, Cohort};

/// A cohort of one: rank 0 of 1, processor name taken from the hostname.
pub struct SoloCohort {}

impl SoloCohort {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for SoloCohort {
    fn default() -> Self {
        Self::new()
    }
}

impl Cohort for SoloCohort {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn processor_name(&self) -> String {
        hostname()
    }
}
