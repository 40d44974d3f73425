use crate::topic::Topic;
use crate::types::{Article, Category, ClassifiedArticles};
use tracing::debug;

/// Assigns each article to one category by counting distinct keyword hits.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    topic: Topic,
}

impl Classifier {
    pub fn new(topic: Topic) -> Self {
        Self { topic }
    }

    /// Pure function of the article's title and content.
    ///
    /// Off-topic articles go straight to [`Category::Other`]. Otherwise the category with
    /// the most distinct keyword hits wins, earlier categories winning ties, and a relevant
    /// article with no hits at all lands in [`Category::Other`].
    pub fn classify(&self, article: &Article) -> Category {
        let text = article.full_text().to_lowercase();

        if !self.topic.is_relevant(&text) {
            return Category::Other;
        }

        let mut best = Category::Other;
        let mut best_score = 0;

        for category in Category::TAXONOMY {
            let score = score(&text, category);
            if score > best_score {
                best_score = score;
                best = category;
            }
        }

        best
    }

    /// Group articles by category. Every category is present, empty or not, and each
    /// bucket keeps input order.
    pub fn classify_all(&self, articles: Vec<Article>) -> ClassifiedArticles {
        let mut classified: ClassifiedArticles =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

        for article in articles {
            let category = self.classify(&article);
            debug!("Classified '{}' as {}", article.title, category);
            classified
                .entry(category)
                .or_default()
                .push(article.with_category(category));
        }

        classified
    }
}

/// Number of the category's keywords found in already-lowercased text.
fn score(lower_text: &str, category: Category) -> usize {
    category
        .keywords()
        .iter()
        .filter(|keyword| lower_text.contains(&keyword.to_lowercase()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(title: &str, content: &str) -> Article {
        Article::new(title, content, "Test", Utc::now(), format!("https://example.com/{}", title))
    }

    #[test]
    fn test_regulation() {
        let classifier = Classifier::default();
        let a = article("政府發布無人機飛行新法規", "民航處今日宣布新的無人機註冊和飛行許可要求");
        assert_eq!(classifier.classify(&a), Category::Regulation);
    }

    #[test]
    fn test_technology() {
        let classifier = Classifier::default();
        let a = article("新型AI無人機技術突破", "本地初創公司開發了帶有人工智慧晶片的新型無人機");
        assert_eq!(classifier.classify(&a), Category::Technology);
    }

    #[test]
    fn test_commercial() {
        let classifier = Classifier::default();
        let a = article("無人機公司獲得千萬美元投資", "一家專注於商用無人機解決方案的公司獲得B輪融資");
        assert_eq!(classifier.classify(&a), Category::Commercial);
    }

    #[test]
    fn test_event() {
        let classifier = Classifier::default();
        let a = article("香港無人機表演節", "維多利亞港將舉辦大型無人機燈光表演活動");
        assert_eq!(classifier.classify(&a), Category::Event);
    }

    #[test]
    fn test_safety() {
        let classifier = Classifier::default();
        let a = article("無人機墜毀造成交通癱瘓", "一架無人機在鬧市墜毀，導致嚴重交通意外");
        assert_eq!(classifier.classify(&a), Category::Safety);
    }

    #[test]
    fn test_relevant_without_hits_is_other() {
        let classifier = Classifier::default();
        let a = article("無人機天氣限制", "天氣條件對無人機飛行的影響分析");
        assert_eq!(classifier.classify(&a), Category::Other);
    }

    #[test]
    fn test_off_topic_is_other_despite_keyword_hits() {
        let classifier = Classifier::default();
        let a = article("政府發布新法規", "民航處宣布註冊和執照要求");
        assert_eq!(classifier.classify(&a), Category::Other);
    }

    #[test]
    fn test_tie_keeps_earlier_category() {
        let classifier = Classifier::default();
        // one Regulation hit (政府) and one Technology hit (相機)
        let a = article("無人機 政府", "相機");
        assert_eq!(classifier.classify(&a), Category::Regulation);
    }

    #[test]
    fn test_single_hit_beats_catch_all() {
        let classifier = Classifier::default();
        let a = article("drone", "insurance");
        assert_eq!(classifier.classify(&a), Category::Safety);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let classifier = Classifier::default();
        // 安全 repeated three times vs two distinct Regulation keywords
        let a = article("無人機 安全 安全 安全", "政府 法規");
        assert_eq!(classifier.classify(&a), Category::Regulation);
    }

    #[test]
    fn test_classify_is_stable() {
        let classifier = Classifier::default();
        let a = article("無人機公司獲得投資", "");
        assert_eq!(classifier.classify(&a), classifier.classify(&a));
    }

    #[test]
    fn test_classify_all_keeps_every_bucket() {
        let classifier = Classifier::default();
        let articles = vec![
            article("政府發布無人機飛行新法規", "民航處今日宣布新的無人機註冊和飛行許可要求").with_id(1),
            article("新型AI無人機技術突破", "本地初創公司開發了帶有人工智慧晶片的新型無人機").with_id(2),
            article("無人機與天氣", "天氣條件對無人機飛行的影響研究，無人機在不同天氣下的性能表現").with_id(3),
        ];

        let classified = classifier.classify_all(articles);

        assert_eq!(classified.len(), Category::ALL.len());
        assert_eq!(classified[&Category::Regulation][0].id, Some(1));
        assert_eq!(classified[&Category::Technology][0].id, Some(2));
        assert_eq!(classified[&Category::Other][0].id, Some(3));
        assert!(classified[&Category::Commercial].is_empty());
        assert!(classified[&Category::Event].is_empty());
        assert!(classified[&Category::Safety].is_empty());
        assert_eq!(classified[&Category::Other][0].category, Some(Category::Other));
    }

    #[test]
    fn test_classified_json_uses_labels() {
        let classified = Classifier::default().classify_all(Vec::new());
        let value = serde_json::to_value(&classified).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 6);
        assert!(value.get("法規政策").is_some());
        assert!(value.get("其他").is_some());
    }
}
