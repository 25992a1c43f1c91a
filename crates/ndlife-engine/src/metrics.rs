//! Per-step counters for the simulation engine.

/// Counts and timing collected during a single step.
///
/// `births + survivors == population` always holds, and
/// `deaths + survivors` equals the input population.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Cells evaluated: alive cells plus every cell adjacent to one.
    pub candidates: usize,
    /// Dead cells that became alive.
    pub births: usize,
    /// Alive cells that died.
    pub deaths: usize,
    /// Alive cells that stayed alive.
    pub survivors: usize,
    /// Alive cells in the produced generation.
    pub population: usize,
    /// Whether candidates were evaluated on the rayon pool.
    pub parallel: bool,
    /// Wall-clock time for the step, in microseconds.
    pub elapsed_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.candidates, 0);
        assert_eq!(m.population, 0);
        assert!(!m.parallel);
        assert_eq!(m.elapsed_us, 0);
    }
}
