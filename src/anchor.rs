/// Selector to scroll to for an in-page link, if the link has one.
/// A bare `#` is a placeholder link and scrolls nowhere.
pub fn scroll_target(href: &str) -> Option<&str> {
    if href.starts_with('#') && href.len() > 1 {
        Some(href)
    } else {
        None
    }
}
