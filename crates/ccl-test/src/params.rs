//! Regression test parameters and operations

use ccl_core::LabelGrid;

/// Regression test parameters
///
/// This structure tracks the state of a regression test: the test name,
/// the index of the current comparison, and every failure seen so far.
/// Comparisons never panic; call [`RegParams::cleanup`] at the end and
/// assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "onepass")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "onepass")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Record a boolean check
    ///
    /// # Arguments
    ///
    /// * `ok` - Outcome of the check
    /// * `what` - Short description used in the failure message
    pub fn check(&mut self, ok: bool, what: &str) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        ok
    }

    /// Compare two grids for exact equality
    ///
    /// # Returns
    ///
    /// `true` if dimensions and every label match, `false` otherwise.
    pub fn compare_grids(&mut self, expected: &LabelGrid, actual: &LabelGrid) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            );
            self.fail(msg);
            return false;
        }

        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);

        if let Some(i) = mismatch {
            let (x, y) = expected.coords(i);
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - label mismatch at ({}, {}): {} vs {}",
                self.test_name,
                self.index,
                x,
                y,
                expected.data()[i],
                actual.data()[i]
            );
            self.fail(msg);
            return false;
        }

        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_grids() {
        let mut rp = RegParams::new("test");
        let a = LabelGrid::from_rows(&[[0, 2], [2, 2]]).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_grids(&a, &b));
        b.set(0, 0, 3).unwrap();
        assert!(!rp.compare_grids(&a, &b));
        assert!(rp.failures()[0].contains("(0, 0)"));
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_check() {
        let mut rp = RegParams::new("test");
        assert!(rp.check(true, "fine"));
        assert!(!rp.check(false, "broken"));
        assert!(!rp.cleanup());
    }
}
