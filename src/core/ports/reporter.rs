//! Progress reporting port

use crate::core::models::StepResult;

/// Receives step lifecycle events from the executor
pub trait Reporter {
    /// A step is about to run
    fn step_started(&mut self, index: usize, name: &str);

    /// A step finished, successfully or not
    fn step_finished(&mut self, index: usize, name: &str, result: &StepResult);
}
