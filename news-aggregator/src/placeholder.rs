use crate::types::Article;
use chrono::{DateTime, Utc};

/// Built-in articles served when every source comes back empty, stamped with `now`.
pub fn placeholder_articles(now: DateTime<Utc>) -> Vec<Article> {
    vec![
        Article::new(
            "香港無人機表演秀吸引數萬觀眾",
            "昨晚在維多利亞港舉行的無人機表演吸引了超過三萬名觀眾駐足觀看，成為本年度最受矚目的科技藝術表演之一。",
            "HK News Daily",
            now,
            "https://example.com/news/drone-show-hong-kong",
        ),
        Article::new(
            "政府發布新的無人機飛行法規",
            "為了確保航空安全，政府今日發布了新的無人機飛行法規，要求所有重量超過250克的無人機必須進行註冊。",
            "Gov HK",
            now,
            "https://example.com/news/drone-regulation-hong-kong",
        ),
        Article::new(
            "本地公司開發新型農業無人機",
            "一家位於科學園的初創公司開發了一款專門用於農業監測的無人機，可以精確監測作物生長狀況。",
            "Tech HK",
            now,
            "https://example.com/news/agriculture-drone-hong-kong",
        ),
    ]
}
