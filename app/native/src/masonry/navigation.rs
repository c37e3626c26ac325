//! Item click handling.
//!
//! A click goes to the caller's callback when one is installed. Otherwise an
//! item with a URL is opened in a new browsing context through a
//! [`LinkOpener`], and an item without one is ignored.

use serde::Serialize;

use super::state::Item;
use crate::error::{MasonryError, MasonryResult};

/// Caller-supplied click handler.
pub type ClickCallback = Box<dyn FnMut(&Item) + Send>;

/// Opens a URL outside the grid.
pub trait LinkOpener {
    /// Opens `url` in a new browsing context.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL could not be handed off.
    fn open(&mut self, url: &str) -> MasonryResult<()>;
}

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLinkOpener;

impl SystemLinkOpener {
    #[cfg(target_os = "macos")]
    fn command(url: &str) -> std::process::Command {
        let mut command = std::process::Command::new("/usr/bin/open");
        command.arg(url);
        command
    }

    #[cfg(target_os = "windows")]
    fn command(url: &str) -> std::process::Command {
        let mut command = std::process::Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn command(url: &str) -> std::process::Command {
        let mut command = std::process::Command::new("xdg-open");
        command.arg(url);
        command
    }
}

impl LinkOpener for SystemLinkOpener {
    fn open(&mut self, url: &str) -> MasonryResult<()> {
        match Self::command(url).spawn() {
            Ok(_) => {
                tracing::info!(%url, "masonry: opened item link");
                Ok(())
            }
            Err(err) => {
                tracing::error!(%url, error = %err, "masonry: failed to open item link");
                Err(MasonryError::CommandError(format!("failed to open {url}: {err}")))
            }
        }
    }
}

/// What a click resulted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "url", rename_all = "camelCase")]
pub enum ClickOutcome {
    /// The caller's callback ran.
    Callback,
    /// The item's URL was opened.
    OpenedUrl(String),
    /// No callback and no URL.
    Ignored,
}

/// Dispatches a click on `item`.
///
/// # Errors
///
/// Returns the opener's error when opening the URL fails.
pub fn handle_click(
    item: &Item,
    callback: Option<&mut ClickCallback>,
    opener: &mut dyn LinkOpener,
) -> MasonryResult<ClickOutcome> {
    if let Some(callback) = callback {
        callback(item);
        return Ok(ClickOutcome::Callback);
    }

    match item.url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => {
            opener.open(url)?;
            Ok(ClickOutcome::OpenedUrl(url.to_string()))
        }
        None => Ok(ClickOutcome::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CapturingOpener {
        opened: Vec<String>,
    }

    impl LinkOpener for CapturingOpener {
        fn open(&mut self, url: &str) -> MasonryResult<()> {
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    struct FailingOpener;

    impl LinkOpener for FailingOpener {
        fn open(&mut self, url: &str) -> MasonryResult<()> {
            Err(MasonryError::CommandError(format!("cannot open {url}")))
        }
    }

    #[test]
    fn test_callback_takes_precedence() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);
        let mut callback: ClickCallback = Box::new(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        let mut opener = CapturingOpener::default();
        let item = Item::new(1, 600.0).with_url("https://example.com/post");

        let outcome = handle_click(&item, Some(&mut callback), &mut opener).unwrap();
        assert_eq!(outcome, ClickOutcome::Callback);
        assert_eq!(clicks.load(Ordering::Relaxed), 1);
        assert!(opener.opened.is_empty());
    }

    #[test]
    fn test_url_opens_without_callback() {
        let mut opener = CapturingOpener::default();
        let item = Item::new(1, 600.0).with_url("https://example.com/post");

        let outcome = handle_click(&item, None, &mut opener).unwrap();
        assert_eq!(outcome, ClickOutcome::OpenedUrl("https://example.com/post".into()));
        assert_eq!(opener.opened, vec!["https://example.com/post"]);
    }

    #[test]
    fn test_no_callback_no_url_is_ignored() {
        let mut opener = CapturingOpener::default();
        let outcome = handle_click(&Item::new(1, 600.0), None, &mut opener).unwrap();
        assert_eq!(outcome, ClickOutcome::Ignored);

        let blank = Item::new(2, 600.0).with_url("  ");
        assert_eq!(handle_click(&blank, None, &mut opener).unwrap(), ClickOutcome::Ignored);
        assert!(opener.opened.is_empty());
    }

    #[test]
    fn test_open_failure_is_reported() {
        let item = Item::new(1, 600.0).with_url("https://example.com");
        let err = handle_click(&item, None, &mut FailingOpener).unwrap_err();
        assert!(matches!(err, MasonryError::CommandError(_)));
    }
}
