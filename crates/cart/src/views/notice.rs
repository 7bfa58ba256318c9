//! "Added to cart" notice.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::events::{CartEvent, CartObserver, CartSnapshot, Notice};

/// Notice fragment template.
#[derive(Template)]
#[template(path = "partials/notice.html")]
struct NoticeTemplate<'a> {
    message: &'a str,
}

/// Holds the most recent added-item notice until it expires.
#[derive(Debug, Clone, Default)]
pub struct NoticeBanner {
    current: Option<Notice>,
}

impl NoticeBanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest notice, visible or not.
    #[must_use]
    pub const fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Message to show at `now`, if the notice has not been dismissed.
    #[must_use]
    pub fn visible_at(&self, now: DateTime<Utc>) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|notice| notice.is_visible_at(now))
            .map(|notice| notice.message.as_str())
    }

    /// Render the banner at `now`; empty once the notice has expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_at(&self, now: DateTime<Utc>) -> Result<String, askama::Error> {
        self.visible_at(now)
            .map_or_else(|| Ok(String::new()), |message| NoticeTemplate { message }.render())
    }

    /// Dismiss the current notice early.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl CartObserver for NoticeBanner {
    fn notify(&mut self, event: &CartEvent, _cart: &CartSnapshot<'_>) {
        if let CartEvent::ItemAdded(notice) = event {
            self.current = Some(notice.clone());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_shows_latest_notice_until_expiry() {
        let shown = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let mut banner = NoticeBanner::new();
        assert!(banner.visible_at(shown).is_none());

        let notice = Notice::item_added("Honey", shown, Duration::from_millis(3000));
        banner.notify(&CartEvent::ItemAdded(notice), &CartSnapshot::new(&[]));

        assert_eq!(banner.visible_at(shown), Some("Honey added to cart!"));
        assert!(banner.render_at(shown).unwrap().contains("Honey added to cart!"));

        let later = shown + chrono::Duration::seconds(3);
        assert!(banner.visible_at(later).is_none());
        assert_eq!(banner.render_at(later).unwrap(), "");
        assert!(banner.current().is_some());
    }

    #[test]
    fn test_dismiss() {
        let shown = Utc::now();
        let mut banner = NoticeBanner::new();
        banner.notify(
            &CartEvent::ItemAdded(Notice::item_added("Jam", shown, Duration::from_secs(60))),
            &CartSnapshot::new(&[]),
        );
        banner.dismiss();
        assert!(banner.visible_at(shown).is_none());
    }
}
