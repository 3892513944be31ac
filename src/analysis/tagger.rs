/// Purchase-intent keywords. Accented and plain spellings are both listed
/// because viewers type either.
pub const DEFAULT_LEAD_KEYWORDS: &[&str] = &[
    "precio",
    "precios",
    "costo",
    "cuesta",
    "cuánto",
    "cuanto",
    "comprar",
    "compra",
    "venden",
    "vende",
    "venta",
    "envío",
    "envio",
    "pago",
    "link",
    "enlace",
    "info",
    "informes",
    "interesa",
    "cotización",
    "cotizacion",
    "price",
    "buy",
    "cost",
];

pub const DEFAULT_QUESTION_KEYWORDS: &[&str] = &[
    "?",
    "¿",
    "cómo",
    "como puedo",
    "cuándo",
    "cuando",
    "dónde",
    "donde",
    "por qué",
    "duda",
    "pregunta",
    "alguien sabe",
    "how",
    "what",
    "where",
    "why",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags {
    pub is_lead: bool,
    pub is_question: bool,
}

/// Case-insensitive substring matching against two keyword sets.
#[derive(Debug, Clone)]
pub struct KeywordTagger {
    lead_keywords: Vec<String>,
    question_keywords: Vec<String>,
}

impl Default for KeywordTagger {
    fn default() -> Self {
        Self::new(DEFAULT_LEAD_KEYWORDS, DEFAULT_QUESTION_KEYWORDS)
    }
}

impl KeywordTagger {
    pub fn new<L, Q>(lead_keywords: &[L], question_keywords: &[Q]) -> Self
    where
        L: AsRef<str>,
        Q: AsRef<str>,
    {
        Self {
            lead_keywords: prepare(lead_keywords),
            question_keywords: prepare(question_keywords),
        }
    }

    /// Uses the configured overrides where present, defaults otherwise.
    pub fn from_overrides(leads: Option<&[String]>, questions: Option<&[String]>) -> Self {
        let leads = match leads {
            Some(keywords) => prepare(keywords),
            None => prepare(DEFAULT_LEAD_KEYWORDS),
        };
        let questions = match questions {
            Some(keywords) => prepare(keywords),
            None => prepare(DEFAULT_QUESTION_KEYWORDS),
        };
        Self {
            lead_keywords: leads,
            question_keywords: questions,
        }
    }

    pub fn tag(&self, text: &str) -> Tags {
        let text = text.to_lowercase();
        Tags {
            is_lead: contains_any(&text, &self.lead_keywords),
            is_question: contains_any(&text, &self.question_keywords),
        }
    }

    pub fn lead_keywords(&self) -> &[String] {
        &self.lead_keywords
    }

    pub fn question_keywords(&self) -> &[String] {
        &self.question_keywords
    }
}

fn prepare<K: AsRef<str>>(keywords: &[K]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}
