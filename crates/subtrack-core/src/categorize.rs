//! Keyword-based service categorization
//!
//! Maps a free-text service name (and optional description) to a spending
//! category using an ordered, static keyword table. Matching is case-insensitive
//! substring containment. Categories are scanned in declaration order and the
//! first keyword hit wins, so a name that matches keywords in two categories
//! always resolves to the category declared first.
//!
//! Confidence is banded by where the match was found:
//! - service name: [0.85, 0.95)
//! - description: [0.70, 0.80)
//! - no match: 0.5 ("Other")
//! - malformed input: 0.3 ("Other")
//!
//! The position inside a band is derived from a SHA-256 digest of the matched
//! text, so identical inputs always produce identical results.

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::models::{CategoryMatch, SubscriptionRecord};

/// Fallback category label
pub const OTHER_CATEGORY: &str = "Other";

const UNMATCHED_CONFIDENCE: f64 = 0.5;
const MALFORMED_CONFIDENCE: f64 = 0.3;

/// Lower bound of the confidence band for service-name matches
pub const NAME_CONFIDENCE_FLOOR: f64 = 0.85;
/// Lower bound of the confidence band for description matches
pub const DESCRIPTION_CONFIDENCE_FLOOR: f64 = 0.70;

/// Width of the jitter added to a band floor. Kept below 0.1 so the result
/// stays strictly under the band ceiling after float rounding.
const BAND_SPREAD: f64 = 0.099;

/// Ordered category → keywords table
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Entertainment",
        &[
            "netflix", "spotify", "hulu", "disney", "disney+", "youtube", "yt",
            "prime video", "amazon prime", "apple music", "apple tv", "apple tv+",
            "music", "video", "stream", "streaming", "showmax", "dstv",
            "paramount", "paramount+", "hbo", "hbo max", "peacock", "tidal",
            "soundcloud", "vimeo", "plex",
        ],
    ),
    (
        "Gaming",
        &[
            "xbox", "xbox live", "xbox game pass", "playstation", "ps plus",
            "playstation plus", "nintendo", "switch online", "nintendo switch",
            "steam", "epic games", "origin", "ubisoft", "ea play", "game pass",
            "gaming", "twitch", "discord nitro", "riot games",
        ],
    ),
    (
        "Productivity",
        &[
            "adobe", "adobe creative cloud", "office", "microsoft office",
            "microsoft 365", "office 365", "google workspace", "g suite",
            "slack", "zoom", "notion", "asana", "trello", "monday", "monday.com",
            "jira", "confluence", "canva", "figma", "dropbox business",
            "evernote", "todoist", "github", "gitlab", "bitbucket", "jetbrains",
            "visual studio", "vs code", "webstorm", "phpstorm", "intellij",
        ],
    ),
    (
        "Cloud",
        &[
            "aws", "amazon web services", "azure", "microsoft azure",
            "google cloud", "gcp", "dropbox", "icloud", "onedrive", "one drive",
            "hosting", "digitalocean", "digital ocean", "linode", "heroku",
            "vercel", "netlify", "cloudflare",
        ],
    ),
    (
        "Fitness",
        &[
            "gym", "fitness", "peloton", "strava", "myfitnesspal", "my fitness pal",
            "fitbit", "health", "yoga", "workout", "crossfit", "cross fit",
            "classpass", "class pass", "nike training", "nike", "24 hour fitness",
            "planet fitness", "la fitness", "gold's gym", "anytime fitness",
        ],
    ),
    (
        "Finance",
        &[
            "bank", "banking", "credit", "investment", "trading", "finance",
            "accounting", "quickbooks", "mint", "ynab", "you need a budget",
            "personal capital", "robinhood", "coinbase", "paypal",
        ],
    ),
    (
        "Social",
        &[
            "twitter", "x premium", "x", "facebook", "meta", "instagram",
            "linkedin", "linkedin premium", "tiktok", "tik tok", "social",
            "dating", "tinder", "bumble", "match", "match.com", "hinge",
        ],
    ),
    (
        "Education",
        &[
            "udemy", "coursera", "skillshare", "skill share", "masterclass",
            "master class", "linkedin learning", "pluralsight", "datacamp",
            "data camp", "codecademy", "code academy", "duolingo", "learning",
            "course", "tutorial", "khan academy",
        ],
    ),
    (
        "News",
        &[
            "newspaper", "news", "medium", "substack", "times", "new york times",
            "post", "washington post", "journal", "wall street journal",
            "economist", "the economist", "atlantic", "the atlantic",
            "new yorker", "the new yorker", "bloomberg",
        ],
    ),
];

/// Keyword → subcategory refinements
const SUBCATEGORIES: &[(&str, &str)] = &[
    ("netflix", "Streaming"),
    ("spotify", "Music"),
    ("youtube", "Video"),
    ("adobe", "Design"),
    ("office", "Office Suite"),
    ("zoom", "Communication"),
    ("slack", "Communication"),
    ("aws", "Infrastructure"),
    ("dropbox", "Storage"),
    ("gym", "Fitness"),
];

/// Categorize a service by name, falling back to its description
pub fn categorize(service_name: &str, description: Option<&str>) -> CategoryMatch {
    let name_lower = service_name.to_lowercase();
    if let Some((category, keyword)) = find_keyword(&name_lower) {
        debug!(
            "Name '{}' matched keyword '{}' → {}",
            service_name, keyword, category
        );
        return matched(category, keyword, &name_lower, NAME_CONFIDENCE_FLOOR);
    }

    if let Some(description) = description {
        let desc_lower = description.to_lowercase();
        if let Some((category, keyword)) = find_keyword(&desc_lower) {
            debug!(
                "Description for '{}' matched keyword '{}' → {}",
                service_name, keyword, category
            );
            return matched(category, keyword, &desc_lower, DESCRIPTION_CONFIDENCE_FLOOR);
        }
    }

    fallback(UNMATCHED_CONFIDENCE)
}

/// Categorize raw JSON values as they arrive from the API.
///
/// A name that is present but not a string is malformed and yields the
/// low-confidence fallback. A non-string description is ignored.
pub fn categorize_value(service_name: &Value, description: Option<&Value>) -> CategoryMatch {
    let name = match service_name {
        Value::String(s) => s.as_str(),
        Value::Null => "",
        other => {
            debug!("Malformed service name for categorization: {}", other);
            return fallback(MALFORMED_CONFIDENCE);
        }
    };

    categorize(name, description.and_then(Value::as_str))
}

/// Category label for a record: its upstream label if it has one, otherwise
/// the categorizer's estimate
pub fn record_category(record: &SubscriptionRecord) -> String {
    match record.category.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => categorize(&record.name, record.description.as_deref()).category,
    }
}

/// First (category, keyword) whose keyword is a substring of `text`
fn find_keyword(text: &str) -> Option<(&'static str, &'static str)> {
    if text.is_empty() {
        return None;
    }

    CATEGORY_KEYWORDS.iter().find_map(|(category, keywords)| {
        keywords
            .iter()
            .find(|keyword| text.contains(*keyword))
            .map(|keyword| (*category, *keyword))
    })
}

fn matched(category: &str, keyword: &str, text: &str, floor: f64) -> CategoryMatch {
    let subcategory = SUBCATEGORIES
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, sub)| sub.to_string());

    CategoryMatch {
        category: category.to_string(),
        confidence: floor + band_offset(text) * BAND_SPREAD,
        subcategory,
    }
}

fn fallback(confidence: f64) -> CategoryMatch {
    CategoryMatch {
        category: OTHER_CATEGORY.to_string(),
        confidence,
        subcategory: None,
    }
}

/// Stable value in [0, 1) derived from the text
fn band_offset(text: &str) -> f64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    // Top 53 bits fit exactly in an f64 mantissa
    (u64::from_be_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64
}
