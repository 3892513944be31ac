use regex::Regex;

/// Entities YouTube emits in `textDisplay`. `&amp;` goes last so that an
/// escaped entity is only unwrapped one level per pass.
const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#039;", "'"),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

/// Cleans comment text before classification: drops URLs and HTML, decodes
/// entities, lowercases and squeezes whitespace.
pub struct TextNormalizer {
    url_regex: Regex,
    tag_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            url_regex: Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("url pattern is valid"),
            tag_regex: Regex::new(r"</?[A-Za-z!][^<>]*>").expect("tag pattern is valid"),
            whitespace_regex: Regex::new(r"\s+").expect("whitespace pattern is valid"),
        }
    }

    /// Runs cleaning passes until the text stops changing, which makes the
    /// result a fixed point: normalizing it again is a no-op.
    ///
    /// After the first pass the text is lowercase, so any later change
    /// strictly shortens it and the loop always ends.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.pass(text);
        loop {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn pass(&self, text: &str) -> String {
        // tags first: a URL match would otherwise run through `">` and the anchor text
        let no_tags = self.tag_regex.replace_all(text, " ");
        let no_urls = self.url_regex.replace_all(&no_tags, " ");

        let mut decoded = no_urls.into_owned();
        for (entity, replacement) in ENTITIES {
            if decoded.contains(entity) {
                decoded = decoded.replace(entity, replacement);
            }
        }

        let lowercase = decoded.to_lowercase();
        self.whitespace_regex
            .replace_all(&lowercase, " ")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_url_and_lowercases() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("¿Cuánto cuesta? http://x.com"),
            "¿cuánto cuesta?"
        );
        assert_eq!(
            normalizer.normalize("Mira www.tienda.com/promo YA"),
            "mira ya"
        );
    }

    #[test]
    fn test_strips_tags_and_decodes_entities() {
        let normalizer = TextNormalizer::new();
        let input = r#"Great <a href="https://www.youtube.com/watch?v=x&amp;t=10">0:10</a><br>Tom &amp; Jerry&#39;s &quot;best&quot;"#;
        assert_eq!(normalizer.normalize(input), r#"great 0:10 tom & jerry's "best""#);
    }

    #[test]
    fn test_plain_comparisons_survive() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("3 < 5 &gt; 2"), "3 < 5 > 2");
    }

    fn escaped(levels: usize, text: &str) -> String {
        text.replace('&', &format!("&{}", "amp;".repeat(levels)))
    }

    #[test]
    fn test_is_idempotent() {
        let normalizer = TextNormalizer::new();
        let deep = escaped(9, "&lt;b&gt;x");
        let deeper = escaped(40, "&lt;i&gt;Hola&lt;/i&gt; &amp; adiós");
        let inputs = [
            "¿Cuánto cuesta? http://x.com",
            "  MUCHAS&nbsp;&nbsp;Gracias!!  ",
            "&amp;lt;b&amp;gt;bold&amp;lt;/b&amp;gt;",
            "<b>Hola</b>   <i>mundo</i>",
            "",
            "ya normalizado",
            deep.as_str(),
            deeper.as_str(),
        ];
        for input in inputs {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_unwraps_any_escape_depth() {
        let normalizer = TextNormalizer::new();
        let deep = escaped(9, "&lt;b&gt;x");
        assert!(deep.starts_with("&amp;amp;amp;amp;amp;amp;amp;amp;amp;lt;"));
        assert_eq!(normalizer.normalize(&deep), "x");
        assert_eq!(
            normalizer.normalize(&escaped(40, "&lt;i&gt;Hola&lt;/i&gt; &amp; adiós")),
            "hola & adiós"
        );
    }

    #[test]
    fn test_empty_result() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("https://only.a/link"), "");
        assert_eq!(normalizer.normalize("   "), "");
    }
}
