//! Profile completion scoring.
//!
//! A pure, cheap function over a profile used by every completion UI render
//! and by the usable-profile gate in front of the generation modules.

use super::is_filled;
use super::model::Profile;
use serde::Serialize;

/// Completion score for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub percent: u8,
    pub filled: usize,
    pub total: usize,
}

impl Completion {
    /// The downstream gate: a profile is usable as soon as at least one
    /// signal is present. Deliberately a much lower bar than 100%.
    pub fn is_usable(&self) -> bool {
        self.percent > 0
    }
}

/// Scores a profile against the fixed list of important fields.
///
/// `total` is the 17 important free-text fields plus one point for "has at
/// least one qualifying offer". Deterministic and side-effect-free,
/// O(fields + offers).
pub fn completion(profile: &Profile) -> Completion {
    let important: [&str; 17] = [
        &profile.business_name,
        &profile.short_description,
        &profile.industry,
        &profile.location_city,
        &profile.location_country,
        &profile.website_url,
        &profile.whatsapp_number,
        &profile.instagram_handle,
        &profile.target_audience,
        &profile.main_pain_points,
        &profile.dream_outcome,
        &profile.shipping_summary,
        &profile.return_policy_summary,
        &profile.refund_policy_summary,
        &profile.payment_methods,
        &profile.service_hours,
        &profile.policy_text,
    ];

    let total = important.len() + 1;
    let mut filled = important.iter().filter(|value| is_filled(value)).count();

    if profile.offers.iter().any(|offer| offer.has_signal()) {
        filled += 1;
    }

    let percent = if total == 0 {
        0
    } else {
        ((filled as f64 / total as f64) * 100.0).round() as u8
    };

    Completion {
        percent,
        filled,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::Offer;

    #[test]
    fn test_empty_profile_scores_zero() {
        let score = completion(&Profile::default());
        assert_eq!(score.percent, 0);
        assert_eq!(score.filled, 0);
        assert_eq!(score.total, 18);
        assert!(!score.is_usable());
    }

    #[test]
    fn test_whitespace_only_fields_do_not_count() {
        let mut profile = Profile::default();
        profile.business_name = "   ".to_string();
        assert_eq!(completion(&profile).percent, 0);
    }

    #[test]
    fn test_three_basics_score_seventeen_percent() {
        let mut profile = Profile::default();
        profile.business_name = "Acme".to_string();
        profile.short_description = "desc".to_string();
        profile.industry = "retail".to_string();

        let score = completion(&profile);
        assert_eq!(score.filled, 3);
        assert_eq!(score.percent, 17); // round(3/18 * 100)
        assert!(score.is_usable());
    }

    #[test]
    fn test_full_profile_scores_one_hundred() {
        let mut profile = Profile::default();
        for field in [
            &mut profile.business_name,
            &mut profile.short_description,
            &mut profile.industry,
            &mut profile.location_city,
            &mut profile.location_country,
            &mut profile.website_url,
            &mut profile.whatsapp_number,
            &mut profile.instagram_handle,
            &mut profile.target_audience,
            &mut profile.main_pain_points,
            &mut profile.dream_outcome,
            &mut profile.shipping_summary,
            &mut profile.return_policy_summary,
            &mut profile.refund_policy_summary,
            &mut profile.payment_methods,
            &mut profile.service_hours,
            &mut profile.policy_text,
        ] {
            *field = "filled".to_string();
        }
        profile.offers.push(Offer {
            id: "o1".to_string(),
            name: "Widget".to_string(),
            ..Offer::default()
        });

        let score = completion(&profile);
        assert_eq!(score.filled, 18);
        assert_eq!(score.percent, 100);
    }

    #[test]
    fn test_offer_with_only_price_counts_as_signal() {
        let mut profile = Profile::default();
        profile.offers.push(Offer {
            id: "o1".to_string(),
            price_text: "₹999".to_string(),
            ..Offer::default()
        });
        assert_eq!(completion(&profile).filled, 1);
    }

    #[test]
    fn test_blank_offers_are_not_a_signal() {
        let mut profile = Profile::default();
        profile.offers.push(Offer {
            id: "o1".to_string(),
            ..Offer::default()
        });
        assert_eq!(completion(&profile).percent, 0);
    }
}
