/// Decides which rows each iteration trains on.
///
/// Full-batch schedules hand back `None` so the caller can reuse the original
/// matrices. Mini-batch schedules walk the data in consecutive `batch_size`
/// slices and wrap to row 0 past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSchedule {
    rows: usize,
    batch_size: Option<usize>,
}

impl BatchSchedule {
    /// A `batch_size` covering the whole dataset collapses to full batch.
    pub fn new(rows: usize, batch_size: Option<usize>) -> BatchSchedule {
        let batch_size = batch_size.filter(|&b| b > 0 && b < rows);
        BatchSchedule { rows, batch_size }
    }

    pub fn is_full_batch(&self) -> bool {
        self.batch_size.is_none()
    }

    /// Rows used at iteration `iteration` (0-based).
    pub fn rows_for(&self, iteration: usize) -> Option<Vec<usize>> {
        let b = self.batch_size?;
        let n = self.rows;
        let start = ((iteration % n) * b) % n;
        Some((0..b).map(|k| (start + k) % n).collect())
    }

    pub fn batch_rows(&self) -> usize {
        self.batch_size.unwrap_or(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_batch_yields_none() {
        let s = BatchSchedule::new(10, None);
        assert!(s.is_full_batch());
        assert_eq!(s.rows_for(3), None);
        assert_eq!(s.batch_rows(), 10);
    }

    #[test]
    fn oversized_batch_collapses_to_full() {
        assert!(BatchSchedule::new(10, Some(10)).is_full_batch());
        assert!(BatchSchedule::new(10, Some(64)).is_full_batch());
    }

    #[test]
    fn consecutive_slices() {
        let s = BatchSchedule::new(10, Some(3));
        assert_eq!(s.rows_for(0), Some(vec![0, 1, 2]));
        assert_eq!(s.rows_for(1), Some(vec![3, 4, 5]));
        assert_eq!(s.rows_for(2), Some(vec![6, 7, 8]));
    }

    #[test]
    fn wraps_to_start_of_dataset() {
        let s = BatchSchedule::new(10, Some(3));
        assert_eq!(s.rows_for(3), Some(vec![9, 0, 1]));
        assert_eq!(s.rows_for(4), Some(vec![2, 3, 4]));

        let s = BatchSchedule::new(8, Some(4));
        assert_eq!(s.rows_for(2), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn never_out_of_bounds() {
        let s = BatchSchedule::new(7, Some(5));
        for it in 0..1000 {
            let rows = s.rows_for(it).unwrap();
            assert_eq!(rows.len(), 5);
            assert!(rows.iter().all(|&r| r < 7));
        }
        // Huge iteration counts must not overflow.
        assert!(s.rows_for(usize::MAX).unwrap().iter().all(|&r| r < 7));
    }
}
