// Navbar gets the `scrolled` class once the page has moved past the hero edge.

pub const SCROLL_THRESHOLD: f64 = 50.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NavbarState {
    scrolled: bool,
}

impl NavbarState {
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feeds the current `scrollY`. Returns the new state only when it
    /// changed, so the caller touches the class list once per crossing.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = scroll_y > SCROLL_THRESHOLD;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}
