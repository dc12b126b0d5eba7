use url::Url;

/// The page address whose query string mirrors the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    base: Url,
    query: String,
}

impl PageLocation {
    pub fn new(base: Url, query: impl Into<String>) -> Self {
        let mut location = Self {
            base,
            query: String::new(),
        };
        location.replace_query(query.into());
        location
    }

    /// Current query string, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn replace_query(&mut self, query: String) {
        self.query = match query.strip_prefix('?') {
            Some(rest) => rest.to_string(),
            None => query,
        };
    }

    /// Shareable link for the current filters.
    pub fn href(&self) -> String {
        let mut url = self.base.clone();
        url.set_query((!self.query.is_empty()).then_some(self.query.as_str()));
        url.to_string()
    }
}

/// Accepts either a full link or a bare query string and returns the query.
pub fn query_from_link(raw: &str) -> String {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => raw.strip_prefix('?').unwrap_or(raw).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://jobs.example/jobs").unwrap()
    }

    #[test]
    fn href_omits_empty_query() {
        let location = PageLocation::new(base(), "");
        assert_eq!(location.href(), "https://jobs.example/jobs");
    }

    #[test]
    fn href_carries_query() {
        let mut location = PageLocation::new(base(), "?search=go");
        assert_eq!(location.query(), "search=go");
        location.replace_query("labels=remote".to_string());
        assert_eq!(location.href(), "https://jobs.example/jobs?labels=remote");
    }

    #[test]
    fn query_is_extracted_from_links() {
        assert_eq!(
            query_from_link("https://jobs.example/jobs?labels=go%2Crust"),
            "labels=go%2Crust"
        );
        assert_eq!(query_from_link("?search=x"), "search=x");
        assert_eq!(query_from_link("search=x"), "search=x");
        assert_eq!(query_from_link("https://jobs.example/jobs"), "");
    }
}
