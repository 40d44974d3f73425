/// Text helpers shared by the parsers
pub mod text {
    /// Tags that end a line of text; inline tags such as `<b>` join their neighbours.
    const BLOCK_TAGS: &[&str] = &[
        "p", "br", "div", "li", "ul", "ol", "tr", "td", "th", "table", "blockquote",
        "section", "article", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    ];

    /// Extract clean text content from an HTML fragment
    pub fn extract_text_from_html(html: &str) -> String {
        // feed summaries only need tags dropped, not a full HTML parse
        let mut text = String::with_capacity(html.len());
        let mut tag: Option<String> = None;

        for c in html.chars() {
            if let Some(name) = tag.as_mut() {
                if c == '>' {
                    if is_block_tag(name) {
                        text.push(' ');
                    }
                    tag = None;
                } else {
                    name.push(c);
                }
            } else if c == '<' {
                tag = Some(String::new());
            } else {
                text.push(c);
            }
        }

        collapse_whitespace(&text)
    }

    fn is_block_tag(tag: &str) -> bool {
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        BLOCK_TAGS.contains(&name.as_str())
    }

    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// URL utilities
pub mod url {
    use ::url::Url;

    /// Resolve a possibly relative link against a base URL
    pub fn resolve(base: &Url, href: &str) -> Option<String> {
        base.join(href.trim()).ok().map(|u| u.to_string())
    }
}
