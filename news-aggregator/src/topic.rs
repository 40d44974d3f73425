/// The subject being aggregated: what counts as on-topic and how to search for it.
#[derive(Debug, Clone)]
pub struct Topic {
    pub name: String,
    /// Relevance keywords, matched case-insensitively as substrings.
    pub keywords: Vec<String>,
    /// Query variants sent to the search endpoint (synonyms and translations).
    pub search_queries: Vec<String>,
    /// Keyword searched once more, site-restricted, when every variant comes back empty.
    pub retry_query: Option<String>,
}

impl Topic {
    pub fn new(name: impl Into<String>, keywords: &[&str], search_queries: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            search_queries: search_queries.iter().map(|q| q.to_string()).collect(),
            retry_query: None,
        }
    }

    pub fn with_retry_query(mut self, query: impl Into<String>) -> Self {
        self.retry_query = Some(query.into());
        self
    }

    /// Drone news in Hong Kong.
    pub fn hong_kong_drones() -> Self {
        Self::new(
            "香港無人機",
            &["無人機", "drone", "無人飛機", "UAV", "無人航空載具"],
            &["香港 無人機", "無人機 香港", "drone Hong Kong", "UAV 香港"],
        )
        .with_retry_query("無人機 香港")
    }

    /// True if the text mentions at least one topic keyword.
    pub fn is_relevant(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| lower.contains(&keyword.to_lowercase()))
    }
}

impl Default for Topic {
    fn default() -> Self {
        Self::hong_kong_drones()
    }
}
