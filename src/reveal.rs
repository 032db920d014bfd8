// Fade-up targets are revealed the first time they intersect the viewport
// and then dropped from observation.

pub const REVEAL_CLASS: &str = "visible";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(targets: usize) -> Self {
        RevealTracker {
            revealed: vec![false; targets],
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn remaining(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }

    /// Takes `(target index, is intersecting)` pairs from one observer
    /// callback and returns the targets revealed by it. Unknown indices are
    /// ignored.
    pub fn observe<I>(&mut self, entries: I) -> Vec<usize>
    where
        I: IntoIterator<Item = (usize, bool)>,
    {
        let mut newly = Vec::new();
        for (index, intersecting) in entries {
            match self.revealed.get_mut(index) {
                Some(revealed) if intersecting && !*revealed => {
                    *revealed = true;
                    newly.push(index);
                }
                _ => {}
            }
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_once() {
        let mut tracker = RevealTracker::new(3);
        assert_eq!(tracker.observe(vec![(0, true), (1, false)]), vec![0]);
        assert_eq!(tracker.observe(vec![(0, true), (1, true)]), vec![1]);
        assert_eq!(tracker.remaining(), 1);
        assert!(tracker.is_revealed(0));
        assert!(!tracker.is_revealed(2));
    }

    #[test]
    fn leaving_view_does_not_hide() {
        let mut tracker = RevealTracker::new(1);
        tracker.observe(vec![(0, true)]);
        assert!(tracker.observe(vec![(0, false)]).is_empty());
        assert!(tracker.is_revealed(0));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let mut tracker = RevealTracker::new(1);
        assert!(tracker.observe(vec![(5, true)]).is_empty());
        assert!(!tracker.is_revealed(5));
    }
}
