//! Registered content-generation modules.
//!
//! Dispatch is a registered table, not a branch: adding a module means
//! registering one more handler value here. The set is closed at compile
//! time and shared for the lifetime of the process.

use super::model::{ModuleInfo, PromptModule, optional_str, required_str};
use crate::error::Result;
use serde_json::Value;
use std::sync::OnceLock;

/// Replies to a customer message in the brand's voice.
struct ReplyAssistant;

impl PromptModule for ReplyAssistant {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: "reply-assistant",
            name: "Customer Reply Assistant",
            description: "Generate perfect customer replies based on your business profile.",
        }
    }

    fn build_prompt(&self, profile_text: &str, input: &Value) -> Result<String> {
        let customer_message = required_str(input, "customerMessage")?;
        let scenario =
            optional_str(input, "scenario").unwrap_or_else(|| "general".to_string());

        Ok(format!(
            "You are an AI assistant for this business:\n\n\
             {profile_text}\n\n\
             Customer message:\n\
             \"{customer_message}\"\n\n\
             Scenario: {scenario}\n\n\
             Rules:\n\
             - Follow brand tone and language from the profile.\n\
             - Follow pricing and policy details strictly.\n\
             - Be clear, polite, and aligned with the brand.\n\n\
             Write ONLY the reply text, nothing else."
        ))
    }
}

/// Homepage copy, about section, and more.
struct WebsiteContent;

impl PromptModule for WebsiteContent {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: "website-content",
            name: "Website Content Studio",
            description: "Homepage copy, about section, and more.",
        }
    }

    fn build_prompt(&self, profile_text: &str, _input: &Value) -> Result<String> {
        Ok(format!(
            "Using the business profile below, generate website homepage copy.\n\n\
             Business profile:\n\
             {profile_text}\n\n\
             Write:\n\
             1. Hero headline\n\
             2. Subheadline\n\
             3. Short About section\n\
             4. Why choose us (bullet points)\n\
             5. Brief product/service overview"
        ))
    }
}

/// Campaign messages for offers and launches.
struct WhatsappBroadcast;

impl PromptModule for WhatsappBroadcast {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: "whatsapp-broadcast",
            name: "WhatsApp Broadcast Generator",
            description: "Campaign messages for offers and launches.",
        }
    }

    fn build_prompt(&self, profile_text: &str, input: &Value) -> Result<String> {
        let campaign_goal = required_str(input, "campaignGoal")?;
        let offer_details = optional_str(input, "offerDetails")
            .unwrap_or_else(|| "use the key offers from the profile".to_string());

        Ok(format!(
            "Using the business profile below, write a WhatsApp broadcast message.\n\n\
             Business profile:\n\
             {profile_text}\n\n\
             Campaign goal: {campaign_goal}\n\
             Offer details: {offer_details}\n\n\
             Rules:\n\
             - Follow brand tone, language and emoji preference from the profile.\n\
             - Keep it short enough to read in one scroll.\n\
             - End with one clear call to action."
        ))
    }
}

/// Scroll-stopping captions tailored to the brand.
struct InstagramCaptions;

impl PromptModule for InstagramCaptions {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: "instagram-captions",
            name: "Instagram Caption Studio",
            description: "Scroll-stopping captions tailored to your brand.",
        }
    }

    fn build_prompt(&self, profile_text: &str, input: &Value) -> Result<String> {
        let topic = required_str(input, "topic")?;
        let call_to_action = optional_str(input, "callToAction")
            .unwrap_or_else(|| "choose one that fits the brand".to_string());

        Ok(format!(
            "Using the business profile below, write 3 Instagram caption options.\n\n\
             Business profile:\n\
             {profile_text}\n\n\
             Post topic: {topic}\n\
             Call to action: {call_to_action}\n\n\
             Rules:\n\
             - Follow brand tone, language, writing style and emoji preference from the profile.\n\
             - Hook the reader in the first line.\n\
             - At most 5 relevant hashtags, no hashtag walls."
        ))
    }
}

/// SEO-friendly, convincing product descriptions.
struct ProductDescriptions;

impl PromptModule for ProductDescriptions {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: "product-descriptions",
            name: "Product Description Maker",
            description: "SEO-friendly, convincing product descriptions.",
        }
    }

    fn build_prompt(&self, profile_text: &str, input: &Value) -> Result<String> {
        let product_name = required_str(input, "productName")?;
        let key_features = optional_str(input, "keyFeatures")
            .unwrap_or_else(|| "infer from the profile's offers".to_string());

        Ok(format!(
            "Using the business profile below, write an SEO-friendly product description.\n\n\
             Business profile:\n\
             {profile_text}\n\n\
             Product: {product_name}\n\
             Key features: {key_features}\n\n\
             Rules:\n\
             - Follow brand tone and language from the profile.\n\
             - Lead with the outcome for the buyer, then the details.\n\
             - Follow pricing and policy details strictly."
        ))
    }
}

/// DM and call scripts that convert.
struct SalesScripts;

impl PromptModule for SalesScripts {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: "sales-scripts",
            name: "Sales Script Writer",
            description: "DM and call scripts that convert.",
        }
    }

    fn build_prompt(&self, profile_text: &str, input: &Value) -> Result<String> {
        let sales_context = required_str(input, "salesContext")?;
        let channel =
            optional_str(input, "channel").unwrap_or_else(|| "WhatsApp DM".to_string());

        Ok(format!(
            "Using the business profile below, write a sales script.\n\n\
             Business profile:\n\
             {profile_text}\n\n\
             Sales context: {sales_context}\n\
             Channel: {channel}\n\n\
             Rules:\n\
             - Follow brand tone and language from the profile.\n\
             - Speak to the main pain points and lead to the dream outcome.\n\
             - Never promise anything the policies do not back."
        ))
    }
}

/// Polite, effective review request templates.
struct ReviewRequests;

impl PromptModule for ReviewRequests {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: "review-requests",
            name: "Review Request Messages",
            description: "Polite, effective review request templates.",
        }
    }

    fn build_prompt(&self, profile_text: &str, input: &Value) -> Result<String> {
        let customer_name =
            optional_str(input, "customerName").unwrap_or_else(|| "the customer".to_string());

        Ok(format!(
            "Using the business profile below, write a polite review request message.\n\n\
             Business profile:\n\
             {profile_text}\n\n\
             Address it to: {customer_name}\n\n\
             Rules:\n\
             - Follow brand tone and language from the profile.\n\
             - Keep it short, warm and easy to act on.\n\
             - Thank them for their purchase before asking."
        ))
    }
}

/// Bios for WhatsApp, Instagram, and the website.
struct AboutBio;

impl PromptModule for AboutBio {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: "about-bio",
            name: "About & Bio Writer",
            description: "Bios for WhatsApp, Instagram, and your site.",
        }
    }

    fn build_prompt(&self, profile_text: &str, input: &Value) -> Result<String> {
        let platform = required_str(input, "platform")?;

        Ok(format!(
            "Using the business profile below, write an about/bio text.\n\n\
             Business profile:\n\
             {profile_text}\n\n\
             Platform: {platform}\n\n\
             Rules:\n\
             - Follow brand tone and language from the profile.\n\
             - Fit the platform's usual length limits.\n\
             - Say what the business does and who it serves."
        ))
    }
}

/// The closed set of registered modules.
pub struct ModuleRegistry {
    modules: Vec<Box<dyn PromptModule>>,
}

/// Static storage for the registry (initialized once).
static REGISTRY: OnceLock<ModuleRegistry> = OnceLock::new();

impl ModuleRegistry {
    fn new() -> Self {
        Self {
            modules: vec![
                Box::new(ReplyAssistant),
                Box::new(WebsiteContent),
                Box::new(WhatsappBroadcast),
                Box::new(InstagramCaptions),
                Box::new(ProductDescriptions),
                Box::new(SalesScripts),
                Box::new(ReviewRequests),
                Box::new(AboutBio),
            ],
        }
    }

    /// Returns the process-wide registry, initialized on first access.
    pub fn global() -> &'static ModuleRegistry {
        REGISTRY.get_or_init(ModuleRegistry::new)
    }

    /// Looks up a handler by module identifier.
    pub fn get(&self, module_id: &str) -> Result<&dyn PromptModule> {
        self.modules
            .iter()
            .map(|module| module.as_ref())
            .find(|module| module.info().id == module_id)
            .ok_or_else(|| crate::error::BriefError::unknown_module(module_id))
    }

    /// Metadata for every registered module, in registration order.
    pub fn infos(&self) -> Vec<ModuleInfo> {
        self.modules.iter().map(|module| module.info()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PROFILE_TEXT: &str = "Business name: Acme\nBrand tone: friendly";

    #[test]
    fn test_registry_holds_all_modules() {
        let infos = ModuleRegistry::global().infos();
        assert_eq!(infos.len(), 8);
        let ids: Vec<&str> = infos.iter().map(|info| info.id).collect();
        assert!(ids.contains(&"reply-assistant"));
        assert!(ids.contains(&"about-bio"));
    }

    #[test]
    fn test_unknown_module() {
        let err = ModuleRegistry::global()
            .get("not-a-real-module")
            .err()
            .unwrap();
        assert!(err.is_validation());
        assert!(err.to_string().contains("not-a-real-module"));
    }

    #[test]
    fn test_reply_assistant_requires_customer_message() {
        let module = ModuleRegistry::global().get("reply-assistant").unwrap();
        let err = module.build_prompt(PROFILE_TEXT, &json!({})).unwrap_err();
        assert!(err.to_string().contains("customerMessage"));
    }

    #[test]
    fn test_reply_assistant_prompt_embeds_profile_and_message() {
        let module = ModuleRegistry::global().get("reply-assistant").unwrap();
        let prompt = module
            .build_prompt(
                PROFILE_TEXT,
                &json!({"customerMessage": "Is COD available?"}),
            )
            .unwrap();
        assert!(prompt.contains(PROFILE_TEXT));
        assert!(prompt.contains("\"Is COD available?\""));
        assert!(prompt.contains("Scenario: general")); // default scenario
    }

    #[test]
    fn test_reply_assistant_scenario_override() {
        let module = ModuleRegistry::global().get("reply-assistant").unwrap();
        let prompt = module
            .build_prompt(
                PROFILE_TEXT,
                &json!({"customerMessage": "Where is my order?", "scenario": "delivery"}),
            )
            .unwrap();
        assert!(prompt.contains("Scenario: delivery"));
    }

    #[test]
    fn test_website_content_needs_no_input() {
        let module = ModuleRegistry::global().get("website-content").unwrap();
        let prompt = module.build_prompt(PROFILE_TEXT, &json!({})).unwrap();
        assert!(prompt.contains("Hero headline"));
        assert!(prompt.contains(PROFILE_TEXT));
    }

    #[test]
    fn test_required_inputs_per_module() {
        let cases = [
            ("whatsapp-broadcast", "campaignGoal"),
            ("instagram-captions", "topic"),
            ("product-descriptions", "productName"),
            ("sales-scripts", "salesContext"),
            ("about-bio", "platform"),
        ];
        for (id, field) in cases {
            let module = ModuleRegistry::global().get(id).unwrap();
            let err = module.build_prompt(PROFILE_TEXT, &json!({})).unwrap_err();
            assert!(
                err.to_string().contains(field),
                "{id} should require {field}"
            );
        }
    }

    #[test]
    fn test_review_requests_has_no_required_input() {
        let module = ModuleRegistry::global().get("review-requests").unwrap();
        let prompt = module.build_prompt(PROFILE_TEXT, &json!({})).unwrap();
        assert!(prompt.contains("Address it to: the customer"));

        let named = module
            .build_prompt(PROFILE_TEXT, &json!({"customerName": "Priya"}))
            .unwrap();
        assert!(named.contains("Address it to: Priya"));
    }
}
