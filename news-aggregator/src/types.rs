use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A normalized news article, whichever source produced it.
///
/// `url` is the identity key: two articles with the same url are the same story.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub title: String,
    pub content: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
        published_at: DateTime<Utc>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            source: source.into(),
            published_at,
            url: url.into(),
            category: None,
        }
    }

    /// Title and content joined the way keyword matching sees them.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// The fixed category taxonomy. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    #[serde(rename = "法規政策")]
    Regulation,
    #[serde(rename = "科技發展")]
    Technology,
    #[serde(rename = "商業應用")]
    Commercial,
    #[serde(rename = "活動事件")]
    Event,
    #[serde(rename = "安全問題")]
    Safety,
    /// Catch-all for relevant articles that match no category keyword.
    #[serde(rename = "其他")]
    Other,
}

impl Category {
    /// Scored categories in declaration order. `Other` is never scored.
    pub const TAXONOMY: [Category; 5] = [
        Category::Regulation,
        Category::Technology,
        Category::Commercial,
        Category::Event,
        Category::Safety,
    ];

    /// Every bucket an output grouping carries, catch-all last.
    pub const ALL: [Category; 6] = [
        Category::Regulation,
        Category::Technology,
        Category::Commercial,
        Category::Event,
        Category::Safety,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Regulation => "法規政策",
            Category::Technology => "科技發展",
            Category::Commercial => "商業應用",
            Category::Event => "活動事件",
            Category::Safety => "安全問題",
            Category::Other => "其他",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Regulation => &[
                "法規", "法律", "條例", "政府", "民航", "飛行許可", "註冊", "執照",
                "regulation", "law", "policy", "government", "aviation", "permit",
                "license", "registration", "CAD", "civil aviation",
            ],
            Category::Technology => &[
                "技術", "開發", "創新", "AI", "人工智慧", "感應器", "相機", "晶片",
                "technology", "development", "innovation", "artificial intelligence",
                "sensor", "camera", "chip", "DJI", "tech", "advanced",
            ],
            Category::Commercial => &[
                "公司", "企業", "市場", "銷售", "投資", "創業", "商務", "經濟",
                "company", "business", "market", "sales", "investment", "startup",
                "commercial", "economy", "corporation", "limited",
            ],
            Category::Event => &[
                "表演", "比賽", "展覽", "活動", "節日", "慶典", "示範", "發布",
                "show", "competition", "exhibition", "event", "festival",
                "demonstration", "race", "contest", "training", "course",
            ],
            Category::Safety => &[
                "安全", "事故", "墜毀", "傷亡", "風險", "隱患", "警告", "違規",
                "safety", "accident", "crash", "incident", "risk", "hazard", "warning",
                "violation", "insurance",
            ],
            Category::Other => &[],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category buckets in taxonomy order, each holding articles in input order.
pub type ClassifiedArticles = BTreeMap<Category, Vec<Article>>;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    /// Upper bound on one adapter call, retries included.
    pub call_timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36".to_string(),
            timeout_seconds: 10,
            max_retries: 1,
            retry_delay_seconds: 1,
            call_timeout_seconds: 25,
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    pub fn call_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.call_timeout_seconds)
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub cache_freshness: Duration,
    pub search_window_days: i64,
    pub feed_window_days: i64,
    pub search_result_limit: usize,
    pub feed_entry_cap: usize,
    pub fetch: FetchConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            cache_freshness: Duration::minutes(30),
            search_window_days: 3,
            feed_window_days: 7,
            search_result_limit: 10,
            feed_entry_cap: 20,
            fetch: FetchConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone)]
pub struct ParsedEntry {
    pub url: String,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ParsedEntry {
    /// Best plain-text body: summary first, then full content.
    pub fn body(&self) -> String {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.content.as_deref())
            .unwrap_or("")
            .to_string()
    }
}

/// One article teaser lifted out of an HTML listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageHit {
    pub title: String,
    pub content: String,
    pub link: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Timed out after {seconds}s fetching {url}")]
    Timeout { url: String, seconds: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
