use crate::error::Result;

/// Fetches a remote registry document as text.
pub trait TextFetcher {
    fn fetch_text(&self, url: &str) -> Result<String>;
}
