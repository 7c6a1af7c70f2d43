//! Skip/limit pagination for record listings.

/// `offset` records are skipped, then at most `limit` are returned.
/// A missing or zero `limit` means no limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn new(offset: Option<u64>, limit: Option<u64>) -> Self {
        Self { offset: offset.unwrap_or(0), limit: limit.filter(|&l| l > 0) }
    }

    pub fn all() -> Self { Self::default() }

    /// Convert to `usize` bounds, saturating on narrow targets.
    pub fn normalize(self) -> (usize, usize) {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = self.limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        (skip, take)
    }

    pub fn apply<T, I>(self, iter: I) -> impl Iterator<Item = T>
    where
        I: IntoIterator<Item = T>,
    {
        let (skip, take) = self.normalize();
        iter.into_iter().skip(skip).take(take)
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn zero_limit_means_unbounded() {
        let p = Pagination::new(None, Some(0));
        assert_eq!(p, Pagination::all());
        assert_eq!(p.apply(1..=5).count(), 5);
    }

    #[test]
    fn offset_and_limit_select_a_window() {
        let got: Vec<_> = Pagination::new(Some(1), Some(1)).apply(["a", "b", "c"]).collect();
        assert_eq!(got, vec!["b"]);
    }

    #[test]
    fn offset_past_end_is_empty() {
        assert_eq!(Pagination::new(Some(10), None).apply(0..3).count(), 0);
    }
}
