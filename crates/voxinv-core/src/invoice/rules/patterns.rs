//! Rule tables for transcript extraction.
//!
//! Every cascade is an ordered table built once on first use and never
//! mutated afterwards. Order is significant: amount rules are scanned in
//! declaration order, and the first name rule that matches wins.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::invoice::Language;

/// Version of the vocabulary and pattern tables below.
pub const RULESET_VERSION: &str = "1.0.0";

/// Characters whose presence marks a transcript as Hindi.
///
/// Independent vowels and consonants plus the letters of the conjuncts
/// क्ष, त्र and ज्ञ (which brings in the virama).
pub const HINDI_DETECTION_CHARS: &str =
    "अआइईउऊएऐओऔकखगघचछजझटठडढणतथदधनपफबभमयरलवशषसहक्षत्रज्ञ";

/// Magnitude word for "hundred".
pub const HUNDRED_WORD: &str = "सौ";

/// Accepted spellings of the magnitude word for "thousand".
pub const THOUSAND_WORDS: [&str; 2] = ["हज़ार", "हजार"];

/// English service vocabulary, in match order.
pub const SERVICE_VOCABULARY_EN: &[&str] = &[
    "web design",
    "website",
    "ui/ux",
    "consulting",
    "development",
    "programming",
    "design",
    "marketing",
    "seo",
    "maintenance",
    "software",
    "app",
    "application",
    "mobile app",
    "e-commerce",
    "logo design",
    "graphic design",
    "content writing",
    "translation",
];

/// Hindi service vocabulary, in match order.
pub const SERVICE_VOCABULARY_HI: &[&str] = &[
    "वेब डिज़ाइन",
    "वेबसाइट",
    "वेब साइट",
    "परामर्श",
    "सलाह",
    "विकास",
    "डिज़ाइन",
    "डिजाइन",
    "प्रोग्रामिंग",
    "सॉफ्टवेयर",
    "एप्लिकेशन",
    "ऐप",
    "मोबाइल ऐप",
    "ई-कॉमर्स",
    "लोगो डिज़ाइन",
    "ग्राफिक डिज़ाइन",
    "कंटेंट राइटिंग",
    "अनुवाद",
    "मार्केटिंग",
    "एसईओ",
    "रखरखाव",
    "मेंटेनेंस",
    "सेवा",
    "काम",
    "प्रोजेक्ट",
];

/// Maximum phrases taken from the generic service patterns.
pub const SERVICE_FALLBACK_LIMIT: usize = 2;

/// A named step of a pattern cascade. Group 1 holds the captured value.
#[derive(Debug)]
pub struct PatternRule {
    /// Short identifier, reported in logs and match metadata.
    pub name: &'static str,
    /// Compiled pattern.
    pub regex: Regex,
}

impl PatternRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

// Latin name: a letter, then letters and spaces, as short as possible.
const LATIN_NAME: &str = r"([a-z][a-z\s]*?)";

// Devanagari name: letters, vowel signs, nukta, virama and spaces.
const DEVANAGARI_NAME: &str =
    r"([\x{0901}-\x{0903}\x{0905}-\x{0939}\x{093C}\x{093E}-\x{094D}\s]+?)";

// Words that end an English name when they follow it.
const SERVICE_WORDS: &str = "web|design|consulting|project|software|development|service";

const CREATE_INVOICE_FOR: &str = r"\b(?:create|make)\s+(?:an?\s+)?invoice\s+for\s+";

fn english_name_rules() -> Vec<PatternRule> {
    let terminated = |anchor: &str| {
        format!(
            r"(?i){anchor}{LATIN_NAME}(?:\s*(?:[,.]|$)|\s+(?:{SERVICE_WORDS}|\$|[0-9]))"
        )
    };

    vec![
        PatternRule::new(
            "create_for_for",
            &format!(r"(?i){CREATE_INVOICE_FOR}{LATIN_NAME}\s+for\s+"),
        ),
        PatternRule::new(
            "create_for_service",
            &format!(r"(?i){CREATE_INVOICE_FOR}{LATIN_NAME}\s+(?:{SERVICE_WORDS})"),
        ),
        PatternRule::new(
            "create_for_dollar",
            &format!(r"(?i){CREATE_INVOICE_FOR}{LATIN_NAME}\s+\$"),
        ),
        PatternRule::new(
            "create_for_digit",
            &format!(r"(?i){CREATE_INVOICE_FOR}{LATIN_NAME}\s+[0-9]"),
        ),
        PatternRule::new("for_for", &format!(r"(?i)\bfor\s+{LATIN_NAME}\s+for\s+")),
        PatternRule::new(
            "for_service",
            &format!(r"(?i)\bfor\s+{LATIN_NAME}\s+(?:{SERVICE_WORDS})"),
        ),
        PatternRule::new("for_dollar", &format!(r"(?i)\bfor\s+{LATIN_NAME}\s+\$")),
        PatternRule::new("for_digit", &format!(r"(?i)\bfor\s+{LATIN_NAME}\s+[0-9]")),
        PatternRule::new("invoice_for", &terminated(r"\binvoice\s+for\s+")),
        PatternRule::new("client", &terminated(r"\bclient\s+")),
        PatternRule::new("customer", &terminated(r"\bcustomer\s+")),
    ]
}

fn hindi_name_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new("ke_liye", &format!(r"{DEVANAGARI_NAME} के लिए")),
        PatternRule::new("grahak", &format!(r"ग्राहक {DEVANAGARI_NAME}(?:[,.।]|$)")),
        PatternRule::new("client", &format!(r"क्लाइंट {DEVANAGARI_NAME}(?:[,.।]|$)")),
        PatternRule::new(
            "latin_ke_liye_service",
            &format!(r"(?i){LATIN_NAME} के लिए\s+(?:वेब|डिज़ाइन|सॉफ्टवेयर|विकास|सेवा)"),
        ),
        PatternRule::new("latin_ka_chalan", &format!(r"(?i){LATIN_NAME} का चालान")),
        PatternRule::new(
            "latin_ke_liye_amount",
            &format!(r"(?i){LATIN_NAME} के लिए\s+(?:[0-9]|\$)"),
        ),
    ]
}

lazy_static! {
    pub static ref HINDI_CHAR_SET: HashSet<char> = HINDI_DETECTION_CHARS.chars().collect();

    // Amount cascade. "[\d,]" is Unicode-aware, so Devanagari digits also
    // match the Latin-keyed rules.
    pub static ref AMOUNT_RULES: Vec<PatternRule> = vec![
        PatternRule::new("dollar_sign", r"(?i)\$([\d,]+\.?\d*)"),
        PatternRule::new("dollar_word", r"(?i)([\d,]+) dollars?"),
        PatternRule::new("rupee_word", r"(?i)([\d,]+) rupees?"),
        PatternRule::new("hindi_dollar", r"(?i)([\d,]+) डॉलर"),
        PatternRule::new("hindi_rupee", r"(?i)([\d,]+) रुपए"),
        PatternRule::new("hindi_rupee_alt", r"(?i)([\d,]+) रुपये"),
        PatternRule::new("hundred", r"(?i)(\d+) सौ"),
        PatternRule::new("thousand_nukta", r"(?i)(\d+) हज़ार"),
        PatternRule::new("thousand", r"(?i)(\d+) हजार"),
        PatternRule::new("devanagari_dollar", r"(?i)([०-९,]+) डॉलर"),
        PatternRule::new("devanagari_rupee", r"(?i)([०-९,]+) रुपए"),
    ];

    pub static ref NAME_RULES_EN: Vec<PatternRule> = english_name_rules();

    pub static ref NAME_RULES_HI: Vec<PatternRule> = hindi_name_rules();

    pub static ref SERVICE_FALLBACK_EN: Vec<PatternRule> = vec![
        PatternRule::new("service", r"(?i)(\w+\s*\w*) service"),
        PatternRule::new("work", r"(?i)(\w+\s*\w*) work"),
        PatternRule::new("project", r"(?i)(\w+\s*\w*) project"),
    ];

    pub static ref SERVICE_FALLBACK_HI: Vec<PatternRule> = vec![
        PatternRule::new("ki_seva", r"(.*?) की सेवा"),
        PatternRule::new("ka_kaam", r"(.*?) का काम"),
        PatternRule::new("project", r"(.*?) प्रोजेक्ट"),
    ];
}

/// Name cascade for a language.
pub fn name_rules(language: Language) -> &'static [PatternRule] {
    match language {
        Language::English => &NAME_RULES_EN,
        Language::Hindi => &NAME_RULES_HI,
    }
}

/// Service vocabulary for a language.
pub fn service_vocabulary(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => SERVICE_VOCABULARY_EN,
        Language::Hindi => SERVICE_VOCABULARY_HI,
    }
}

/// Generic service patterns for a language.
pub fn service_fallbacks(language: Language) -> &'static [PatternRule] {
    match language {
        Language::English => &SERVICE_FALLBACK_EN,
        Language::Hindi => &SERVICE_FALLBACK_HI,
    }
}
