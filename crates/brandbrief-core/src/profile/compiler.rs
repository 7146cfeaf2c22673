//! Profile-to-prompt compilation.
//!
//! Turns a profile into the single text block that every module embeds in
//! its generation prompt. The output is byte-stable: the same profile value
//! always compiles to identical text, and the compiler performs no I/O.

use super::is_filled;
use super::model::Profile;

/// Compiles a profile into prompt-embeddable text.
///
/// Field ordering is fixed. Identity, contact, and audience/voice lines fall
/// back to a literal `N/A` when empty; the location line is omitted when both
/// city and country are blank; policy lines are emitted only when non-empty.
pub fn compile(profile: &Profile) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("Business name: {}", or_na(&profile.business_name)));
    parts.push(format!("Tagline: {}", or_na(&profile.tagline)));
    parts.push(format!(
        "Short description: {}",
        or_na(&profile.short_description)
    ));
    parts.push(format!("Industry: {}", or_na(&profile.industry)));
    parts.push(format!(
        "Business model: {}",
        profile.business_model.as_str()
    ));

    let location = [
        profile.location_city.as_str(),
        profile.location_country.as_str(),
    ]
    .into_iter()
    .filter(|part| is_filled(part))
    .collect::<Vec<_>>()
    .join(", ");
    if !location.is_empty() {
        parts.push(format!("Location: {location}"));
    }

    parts.push(format!("Website: {}", or_na(&profile.website_url)));
    parts.push(format!("WhatsApp: {}", or_na(&profile.whatsapp_number)));
    parts.push(format!("Instagram: {}", or_na(&profile.instagram_handle)));

    if !profile.offers.is_empty() {
        parts.push("Key offers:".to_string());
        for (index, offer) in profile.offers.iter().enumerate() {
            let mut fields: Vec<String> = Vec::new();
            if is_filled(&offer.name) {
                fields.push(format!("Name: {}", offer.name));
            }
            if is_filled(&offer.price_text) {
                fields.push(format!("Price: {}", offer.price_text));
            }
            if is_filled(&offer.short_description) {
                fields.push(format!("Desc: {}", offer.short_description));
            }
            if let Some(category) = &offer.category {
                if is_filled(category) {
                    fields.push(format!("Category: {category}"));
                }
            }
            if offer.is_best_seller {
                fields.push("Bestseller: yes".to_string());
            }
            parts.push(format!("  - Offer {}: {}", index + 1, fields.join(" | ")));
        }
    }

    parts.push(format!(
        "Target audience: {}",
        or_na(&profile.target_audience)
    ));
    parts.push(format!("Pain points: {}", or_na(&profile.main_pain_points)));
    parts.push(format!("Dream outcome: {}", or_na(&profile.dream_outcome)));
    parts.push(format!("Brand tone: {}", profile.brand_tone.as_str()));
    parts.push(format!(
        "Language preference: {}",
        profile.language_preference.as_str()
    ));
    parts.push(format!(
        "Writing style: {}",
        profile.writing_style.as_str()
    ));
    parts.push(format!(
        "Emoji preference: {}",
        profile.emoji_preference.as_str()
    ));

    push_policy(&mut parts, "Shipping", &profile.shipping_summary);
    push_policy(&mut parts, "Returns", &profile.return_policy_summary);
    push_policy(&mut parts, "Refunds", &profile.refund_policy_summary);
    push_policy(&mut parts, "Payment methods", &profile.payment_methods);
    push_policy(&mut parts, "Service hours", &profile.service_hours);
    push_policy(&mut parts, "Content rules", &profile.policy_text);
    push_policy(&mut parts, "Policy URL", &profile.policy_url);

    parts.join("\n")
}

fn or_na(value: &str) -> &str {
    if is_filled(value) { value } else { "N/A" }
}

fn push_policy(parts: &mut Vec<String>, label: &str, value: &str) {
    if is_filled(value) {
        parts.push(format!("{label}: {value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::Offer;

    #[test]
    fn test_compile_is_deterministic() {
        let mut profile = Profile::default();
        profile.business_name = "Acme Candles".to_string();
        profile.offers.push(Offer {
            id: "o1".to_string(),
            name: "Lavender jar".to_string(),
            price_text: "₹499".to_string(),
            ..Offer::default()
        });
        assert_eq!(compile(&profile), compile(&profile));
    }

    #[test]
    fn test_empty_fields_fall_back_to_na() {
        let text = compile(&Profile::default());
        assert!(text.contains("Business name: N/A"));
        assert!(text.contains("Tagline: N/A"));
        assert!(text.contains("Website: N/A"));
        // Enum fields always hold a declared value
        assert!(text.contains("Business model: product"));
        assert!(text.contains("Brand tone: friendly"));
    }

    #[test]
    fn test_location_line_omitted_when_blank() {
        let text = compile(&Profile::default());
        assert!(!text.contains("Location:"));
    }

    #[test]
    fn test_location_joined_with_comma() {
        let mut profile = Profile::default();
        profile.location_city = "Jaipur".to_string();
        profile.location_country = "India".to_string();
        assert!(compile(&profile).contains("Location: Jaipur, India"));

        profile.location_city.clear();
        assert!(compile(&profile).contains("Location: India"));
    }

    #[test]
    fn test_offer_with_only_name_has_no_separator_artifacts() {
        let mut profile = Profile::default();
        profile.offers.push(Offer {
            id: "o1".to_string(),
            name: "Lavender jar".to_string(),
            ..Offer::default()
        });

        let text = compile(&profile);
        assert!(text.contains("Key offers:"));
        assert!(text.contains("  - Offer 1: Name: Lavender jar"));
        assert!(!text.contains("| |"));
        assert!(!text.contains("Lavender jar |"));
    }

    #[test]
    fn test_offer_line_joins_fields_in_order() {
        let mut profile = Profile::default();
        profile.offers.push(Offer {
            id: "o1".to_string(),
            name: "Glow serum".to_string(),
            short_description: "Vitamin C serum".to_string(),
            price_text: "₹1,299".to_string(),
            category: Some("Skincare".to_string()),
            is_best_seller: true,
        });

        let text = compile(&profile);
        assert!(text.contains(
            "  - Offer 1: Name: Glow serum | Price: ₹1,299 | Desc: Vitamin C serum | Category: Skincare | Bestseller: yes"
        ));
    }

    #[test]
    fn test_offers_header_omitted_when_empty() {
        assert!(!compile(&Profile::default()).contains("Key offers:"));
    }

    #[test]
    fn test_policy_lines_omitted_not_na() {
        let mut profile = Profile::default();
        profile.shipping_summary = "Ships in 3-7 days".to_string();

        let text = compile(&profile);
        assert!(text.contains("Shipping: Ships in 3-7 days"));
        assert!(!text.contains("Returns:"));
        assert!(!text.contains("Policy URL:"));
    }

    #[test]
    fn test_policy_block_renders_all_filled_lines() {
        let mut profile = Profile::default();
        profile.return_policy_summary = "7-day exchange only".to_string();
        profile.payment_methods = "UPI, cards, COD".to_string();
        profile.policy_text = "No medical claims".to_string();
        profile.policy_url = "https://example.com/policy".to_string();

        let text = compile(&profile);
        assert!(text.contains("Returns: 7-day exchange only"));
        assert!(text.contains("Payment methods: UPI, cards, COD"));
        assert!(text.contains("Content rules: No medical claims"));
        assert!(text.contains("Policy URL: https://example.com/policy"));
    }
}
