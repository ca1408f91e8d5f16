/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub shown: usize,
    /// Cases from the current position to the end of the order. Display only.
    pub remaining: usize,
    pub is_complete: bool,
}
