// Open/closed state of the mobile navigation menu.

pub const ESCAPE_KEY: &str = "Escape";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Escape closes an open menu. Returns whether the key did anything.
    pub fn on_key(&mut self, key: &str) -> bool {
        if key == ESCAPE_KEY && self.open {
            self.open = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let mut menu = MobileMenu::default();
        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(!menu.toggle());
    }

    #[test]
    fn escape_only_acts_on_open_menu() {
        let mut menu = MobileMenu::default();
        assert!(!menu.on_key("Escape"));
        menu.toggle();
        assert!(!menu.on_key("Enter"));
        assert!(menu.is_open());
        assert!(menu.on_key("Escape"));
        assert!(!menu.is_open());
    }

    #[test]
    fn close_is_idempotent() {
        let mut menu = MobileMenu::default();
        menu.close();
        assert!(!menu.is_open());
        menu.toggle();
        menu.close();
        menu.close();
        assert!(!menu.is_open());
    }
}
