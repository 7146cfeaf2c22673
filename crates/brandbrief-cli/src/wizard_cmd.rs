//! Interactive profile intake wizard.
//!
//! Drives the core `WizardSession` state machine from the terminal: the four
//! steps in order, guard-gated Next, free jumps via the step picker, and
//! save-on-demand. Every answer writes through to the device cache, so a
//! quit-without-save resumes exactly where the user left off.

use anyhow::{Result, anyhow};
use brandbrief_application::ProfileUseCase;
use brandbrief_core::cache::DeviceCache;
use brandbrief_core::identity::IdentityResolver;
use brandbrief_core::profile::model::{
    BrandTone, BusinessModel, EmojiPreference, LanguagePreference, WritingStyle,
};
use brandbrief_core::profile::{Profile, ProfileStore, completion};
use brandbrief_core::wizard::{WizardSession, WizardStep};
use brandbrief_infrastructure::{DirProfileStore, JsonFileDeviceCache, SingleUserIdentityResolver};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::path::Path;
use std::sync::Arc;
use strum::IntoEnumIterator;

pub async fn run(base_dir: Option<&Path>) -> Result<()> {
    let cache: Arc<dyn DeviceCache> = Arc::new(JsonFileDeviceCache::new(base_dir)?);
    let store: Arc<dyn ProfileStore> = Arc::new(DirProfileStore::new(base_dir).await?);
    let identity: Arc<dyn IdentityResolver> = Arc::new(SingleUserIdentityResolver::default());

    let user = identity
        .current_user(None)
        .await
        .ok_or_else(|| anyhow!("no local user identity"))?;

    // Cache-first load so the wizard opens with the latest known state.
    let usecase =
        ProfileUseCase::new(identity.clone(), store.clone()).with_cache(cache.clone());
    let profile = usecase.load(None).await?;

    let mut session = WizardSession::new(profile, cache);
    let theme = ColorfulTheme::default();

    println!("Brandbrief profile wizard. Answers are kept locally as you type;");
    println!("pick \"Save profile\" to publish them.");

    loop {
        let score = completion(session.profile());
        println!();
        println!(
            "Step {} of 4: {}  ·  profile {}% complete ({}/{} key details filled)",
            session.step().index() + 1,
            session.step().label(),
            score.percent,
            score.filled,
            score.total
        );

        edit_step(&mut session, &theme)?;

        match navigation(&mut session, &theme)? {
            Navigation::Continue => {}
            Navigation::Save => match session.save(store.as_ref(), &user).await {
                Ok(_) => println!("Saved."),
                Err(err) => {
                    println!("Save failed ({err}). Your edits are kept locally; try again later.");
                }
            },
            Navigation::Exit => break,
        }
    }

    Ok(())
}

enum Navigation {
    Continue,
    Save,
    Exit,
}

fn navigation(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<Navigation> {
    let mut items: Vec<&str> = Vec::new();
    if session.step().next().is_some() {
        items.push("Next step");
    }
    if session.step().previous().is_some() {
        items.push("Previous step");
    }
    items.extend(["Jump to a step", "Save profile", "Exit wizard"]);

    let index = Select::with_theme(theme)
        .with_prompt("What next?")
        .items(&items)
        .default(0)
        .interact()?;

    match items[index] {
        "Next step" => {
            if let Err(err) = session.advance() {
                println!("{err}");
            }
            Ok(Navigation::Continue)
        }
        "Previous step" => {
            session.back();
            Ok(Navigation::Continue)
        }
        "Jump to a step" => {
            let labels: Vec<&str> = WizardStep::iter().map(WizardStep::label).collect();
            let picked = Select::with_theme(theme)
                .with_prompt("Jump to")
                .items(&labels)
                .default(session.step().index())
                .interact()?;
            if let Some(step) = WizardStep::from_index(picked) {
                session.jump(step);
            }
            Ok(Navigation::Continue)
        }
        "Save profile" => Ok(Navigation::Save),
        _ => Ok(Navigation::Exit),
    }
}

fn edit_step(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<()> {
    match session.step() {
        WizardStep::Basics => edit_basics(session, theme),
        WizardStep::Offerings => edit_offerings(session, theme),
        WizardStep::AudienceVoice => edit_audience(session, theme),
        WizardStep::Policies => edit_policies(session, theme),
    }
}

fn edit_basics(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<()> {
    prompt_field(session, theme, "Business name", |p| &p.business_name, |p, v| {
        p.business_name = v
    })?;
    prompt_field(session, theme, "Tagline (one-line hook)", |p| &p.tagline, |p, v| {
        p.tagline = v
    })?;
    prompt_field(
        session,
        theme,
        "Short description",
        |p| &p.short_description,
        |p, v| p.short_description = v,
    )?;
    prompt_field(session, theme, "Industry", |p| &p.industry, |p, v| {
        p.industry = v
    })?;

    let model = prompt_enum(
        theme,
        "Business model",
        &[
            (BusinessModel::Product, "Product"),
            (BusinessModel::Service, "Service"),
            (BusinessModel::Hybrid, "Hybrid"),
            (BusinessModel::InfoProduct, "Info-product"),
            (BusinessModel::Saas, "SaaS"),
        ],
        session.profile().business_model,
    )?;
    session.edit(|p| p.business_model = model);

    prompt_field(session, theme, "City", |p| &p.location_city, |p, v| {
        p.location_city = v
    })?;
    prompt_field(session, theme, "Country", |p| &p.location_country, |p, v| {
        p.location_country = v
    })?;
    prompt_field(
        session,
        theme,
        "Website (optional)",
        |p| &p.website_url,
        |p, v| p.website_url = v,
    )?;
    prompt_field(
        session,
        theme,
        "WhatsApp number (optional)",
        |p| &p.whatsapp_number,
        |p, v| p.whatsapp_number = v,
    )?;
    prompt_field(
        session,
        theme,
        "Instagram handle (optional, without @)",
        |p| &p.instagram_handle,
        |p, v| p.instagram_handle = v,
    )?;
    Ok(())
}

fn edit_offerings(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<()> {
    println!("Add key products or services with pricing. Optional, but it makes");
    println!("replies and sales copy a lot more accurate.");

    loop {
        let offers = &session.profile().offers;
        if offers.is_empty() {
            println!("No offers yet.");
        } else {
            for (index, offer) in offers.iter().enumerate() {
                let name = if offer.name.is_empty() {
                    "(unnamed)"
                } else {
                    &offer.name
                };
                println!("  {}. {} {}", index + 1, name, offer.price_text);
            }
        }

        let mut items: Vec<&str> = Vec::new();
        if offers.len() < brandbrief_core::wizard::MAX_OFFERS {
            items.push("Add an offer");
        }
        if !offers.is_empty() {
            items.push("Edit an offer");
            items.push("Remove an offer");
        }
        items.push("Done with offerings");

        let index = Select::with_theme(theme)
            .with_prompt("Offerings")
            .items(&items)
            .default(items.len() - 1)
            .interact()?;

        match items[index] {
            "Add an offer" => {
                let id = session.add_offer().map_err(|err| anyhow!("{err}"))?;
                edit_one_offer(session, theme, &id)?;
            }
            "Edit an offer" => {
                if let Some(id) = pick_offer(session, theme)? {
                    edit_one_offer(session, theme, &id)?;
                }
            }
            "Remove an offer" => {
                if let Some(id) = pick_offer(session, theme)? {
                    session.remove_offer(&id).map_err(|err| anyhow!("{err}"))?;
                }
            }
            _ => return Ok(()),
        }
    }
}

fn pick_offer(session: &WizardSession, theme: &ColorfulTheme) -> Result<Option<String>> {
    let offers = &session.profile().offers;
    let labels: Vec<String> = offers
        .iter()
        .enumerate()
        .map(|(index, offer)| {
            if offer.name.is_empty() {
                format!("Item {}", index + 1)
            } else {
                offer.name.clone()
            }
        })
        .collect();
    if labels.is_empty() {
        return Ok(None);
    }

    let index = Select::with_theme(theme)
        .with_prompt("Which offer?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Some(offers[index].id.clone()))
}

fn edit_one_offer(session: &mut WizardSession, theme: &ColorfulTheme, id: &str) -> Result<()> {
    let current = session
        .profile()
        .offers
        .iter()
        .find(|offer| offer.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("offer disappeared mid-edit"))?;

    let name: String = Input::with_theme(theme)
        .with_prompt("Name")
        .with_initial_text(current.name)
        .allow_empty(true)
        .interact_text()?;
    let price: String = Input::with_theme(theme)
        .with_prompt("Price / range (e.g. ₹999 or Starts at ₹1,499)")
        .with_initial_text(current.price_text)
        .allow_empty(true)
        .interact_text()?;
    let description: String = Input::with_theme(theme)
        .with_prompt("Short description")
        .with_initial_text(current.short_description)
        .allow_empty(true)
        .interact_text()?;
    let category: String = Input::with_theme(theme)
        .with_prompt("Category (optional)")
        .with_initial_text(current.category.unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let best_seller = Confirm::with_theme(theme)
        .with_prompt("Mark as bestseller?")
        .default(current.is_best_seller)
        .interact()?;

    session
        .edit_offer(id, |offer| {
            offer.name = name;
            offer.price_text = price;
            offer.short_description = description;
            offer.category = if category.trim().is_empty() {
                None
            } else {
                Some(category)
            };
            offer.is_best_seller = best_seller;
        })
        .map_err(|err| anyhow!("{err}"))?;
    Ok(())
}

fn edit_audience(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<()> {
    prompt_field(
        session,
        theme,
        "Target audience (who are you mainly selling to?)",
        |p| &p.target_audience,
        |p, v| p.target_audience = v,
    )?;
    prompt_field(
        session,
        theme,
        "Main pain points (comma separated)",
        |p| &p.main_pain_points,
        |p, v| p.main_pain_points = v,
    )?;
    prompt_field(
        session,
        theme,
        "Dream outcome for them",
        |p| &p.dream_outcome,
        |p, v| p.dream_outcome = v,
    )?;

    let tone = prompt_enum(
        theme,
        "Brand tone",
        &[
            (BrandTone::Friendly, "Friendly"),
            (BrandTone::Formal, "Formal"),
            (BrandTone::Luxury, "Luxury"),
            (BrandTone::Playful, "Playful"),
            (BrandTone::Empathetic, "Empathetic"),
        ],
        session.profile().brand_tone,
    )?;
    session.edit(|p| p.brand_tone = tone);

    let language = prompt_enum(
        theme,
        "Language",
        &[
            (LanguagePreference::Hinglish, "Hinglish"),
            (LanguagePreference::English, "English"),
            (LanguagePreference::Hindi, "Hindi"),
        ],
        session.profile().language_preference,
    )?;
    session.edit(|p| p.language_preference = language);

    let style = prompt_enum(
        theme,
        "Writing style",
        &[
            (WritingStyle::Short, "Short"),
            (WritingStyle::Medium, "Medium"),
            (WritingStyle::Long, "Long"),
            (WritingStyle::Storytelling, "Storytelling"),
        ],
        session.profile().writing_style,
    )?;
    session.edit(|p| p.writing_style = style);

    let emoji = prompt_enum(
        theme,
        "Emoji usage",
        &[
            (EmojiPreference::NoEmojis, "No emojis"),
            (EmojiPreference::FewEmojis, "Few emojis"),
            (EmojiPreference::EmojiHeavy, "Emoji heavy"),
        ],
        session.profile().emoji_preference,
    )?;
    session.edit(|p| p.emoji_preference = emoji);
    Ok(())
}

fn edit_policies(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<()> {
    println!("Optional, but extremely useful for accurate replies about shipping,");
    println!("returns, refunds and payments.");

    prompt_field(
        session,
        theme,
        "Shipping summary",
        |p| &p.shipping_summary,
        |p, v| p.shipping_summary = v,
    )?;
    prompt_field(
        session,
        theme,
        "Return policy summary",
        |p| &p.return_policy_summary,
        |p, v| p.return_policy_summary = v,
    )?;
    prompt_field(
        session,
        theme,
        "Refund policy summary",
        |p| &p.refund_policy_summary,
        |p, v| p.refund_policy_summary = v,
    )?;
    prompt_field(
        session,
        theme,
        "Payment methods (UPI, cards, netbanking, COD...)",
        |p| &p.payment_methods,
        |p, v| p.payment_methods = v,
    )?;
    prompt_field(
        session,
        theme,
        "Service hours (e.g. Mon-Sat, 10am-7pm IST)",
        |p| &p.service_hours,
        |p, v| p.service_hours = v,
    )?;
    prompt_field(
        session,
        theme,
        "Global content / policy rules the generator must always follow",
        |p| &p.policy_text,
        |p, v| p.policy_text = v,
    )?;
    prompt_field(
        session,
        theme,
        "Policy URL (optional)",
        |p| &p.policy_url,
        |p, v| p.policy_url = v,
    )?;
    Ok(())
}

fn prompt_field(
    session: &mut WizardSession,
    theme: &ColorfulTheme,
    label: &str,
    get: fn(&Profile) -> &String,
    set: fn(&mut Profile, String),
) -> Result<()> {
    let current = get(session.profile()).clone();
    let value: String = Input::with_theme(theme)
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    session.edit(|profile| set(profile, value));
    Ok(())
}

fn prompt_enum<T: Copy + PartialEq>(
    theme: &ColorfulTheme,
    label: &str,
    options: &[(T, &str)],
    current: T,
) -> Result<T> {
    let labels: Vec<&str> = options.iter().map(|(_, label)| *label).collect();
    let default = options
        .iter()
        .position(|(value, _)| *value == current)
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt(label)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[index].0)
}
