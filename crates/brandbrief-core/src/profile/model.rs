//! Profile domain model.
//!
//! The profile is the one structured description of a business that every
//! content-generation module consumes. It is persisted as a whole JSON
//! document, one per owning user; member names on the wire are camelCase and
//! enum values are kebab-case to match the stored document shape.

use serde::{Deserialize, Serialize};

/// How the business primarily makes money.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessModel {
    Product,
    Service,
    Hybrid,
    InfoProduct,
    Saas,
}

impl Default for BusinessModel {
    fn default() -> Self {
        BusinessModel::Product
    }
}

impl BusinessModel {
    /// Wire value, as it appears in stored documents and compiled prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessModel::Product => "product",
            BusinessModel::Service => "service",
            BusinessModel::Hybrid => "hybrid",
            BusinessModel::InfoProduct => "info-product",
            BusinessModel::Saas => "saas",
        }
    }
}

/// Voice the brand speaks in.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BrandTone {
    Friendly,
    Formal,
    Luxury,
    Playful,
    Empathetic,
}

impl Default for BrandTone {
    fn default() -> Self {
        BrandTone::Friendly
    }
}

impl BrandTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrandTone::Friendly => "friendly",
            BrandTone::Formal => "formal",
            BrandTone::Luxury => "luxury",
            BrandTone::Playful => "playful",
            BrandTone::Empathetic => "empathetic",
        }
    }
}

/// Language the generated content should be written in.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LanguagePreference {
    English,
    Hindi,
    Hinglish,
}

impl Default for LanguagePreference {
    fn default() -> Self {
        LanguagePreference::Hinglish
    }
}

impl LanguagePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguagePreference::English => "english",
            LanguagePreference::Hindi => "hindi",
            LanguagePreference::Hinglish => "hinglish",
        }
    }
}

/// Preferred length and shape of generated copy.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WritingStyle {
    Short,
    Medium,
    Long,
    Storytelling,
}

impl Default for WritingStyle {
    fn default() -> Self {
        WritingStyle::Short
    }
}

impl WritingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            WritingStyle::Short => "short",
            WritingStyle::Medium => "medium",
            WritingStyle::Long => "long",
            WritingStyle::Storytelling => "storytelling",
        }
    }
}

/// How heavily emoji should appear in generated copy.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EmojiPreference {
    NoEmojis,
    FewEmojis,
    EmojiHeavy,
}

impl Default for EmojiPreference {
    fn default() -> Self {
        EmojiPreference::FewEmojis
    }
}

impl EmojiPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiPreference::NoEmojis => "no-emojis",
            EmojiPreference::FewEmojis => "few-emojis",
            EmojiPreference::EmojiHeavy => "emoji-heavy",
        }
    }
}

/// One product or service line item within a profile's offerings.
///
/// The id is unique within a profile and stable across edits; a removed
/// offer's id is never handed out again in the same session.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Offer {
    pub id: String,
    pub name: String,
    pub short_description: String,
    /// Free text, e.g. "₹999" or "Starts at ₹1,499"
    pub price_text: String,
    pub category: Option<String>,
    pub is_best_seller: bool,
}

impl Offer {
    /// Whether this offer counts as a completion signal: any of name,
    /// description, or price is filled in.
    pub fn has_signal(&self) -> bool {
        super::is_filled(&self.name)
            || super::is_filled(&self.short_description)
            || super::is_filled(&self.price_text)
    }
}

/// The full structured business-description document, one per user.
///
/// Every scalar field is present with a default value from the moment the
/// profile is materialized; the wizard mutates it field by field and the
/// store persists it as a whole-document snapshot.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    // Basics
    pub business_name: String,
    pub tagline: String,
    pub short_description: String,
    pub industry: String,
    pub business_model: BusinessModel,
    pub location_city: String,
    pub location_country: String,
    pub website_url: String,
    pub whatsapp_number: String,
    pub instagram_handle: String,

    // Offerings (stored under the document's historical "products" key)
    #[serde(rename = "products", deserialize_with = "offers_or_empty")]
    pub offers: Vec<Offer>,

    // Audience & voice
    pub target_audience: String,
    pub main_pain_points: String,
    pub dream_outcome: String,
    pub brand_tone: BrandTone,
    pub language_preference: LanguagePreference,
    pub writing_style: WritingStyle,
    pub emoji_preference: EmojiPreference,

    // Policies & guardrails
    pub shipping_summary: String,
    pub return_policy_summary: String,
    pub refund_policy_summary: String,
    pub payment_methods: String,
    pub service_hours: String,
    /// Global content rules the generator must always follow
    pub policy_text: String,
    pub policy_url: String,

    // Extras: opaque pass-through collections, not read by the compiler
    pub testimonials: Vec<serde_json::Value>,
    pub faq_items: Vec<serde_json::Value>,
}

impl Profile {
    /// Rebuilds a profile from a stored document.
    ///
    /// The default profile is unioned with the stored members: anything
    /// structurally missing falls back to its default, and a `products`
    /// member that is not array-shaped is coerced to an empty sequence. An
    /// unreadable document degrades to the default profile rather than
    /// failing the load.
    pub fn from_document(document: serde_json::Value) -> Self {
        match serde_json::from_value(document) {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!("stored profile document is unreadable, using defaults: {err}");
                Self::default()
            }
        }
    }
}

/// Accepts any JSON shape for the offers collection, keeping well-formed
/// array entries and treating everything else as empty.
fn offers_or_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Offer>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
