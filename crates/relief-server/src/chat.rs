//! Canned chatbot responses for the operations dashboard.
//!
//! The bot recognizes a handful of intents by substring match against
//! the lowercased message and answers from the live store. This is
//! presentation glue, not an NLP system; anything unrecognized falls
//! back to a help message.

use relief_engine::ReliefStore;
use relief_types::{Disaster, DisasterStatus, ResourceHub, ResourceKind};

/// Produce a response for a free-text message.
pub fn respond(store: &ReliefStore, message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("all disasters") || lower.contains("list disasters") {
        return list_disasters(store);
    }
    if lower.contains("all hubs") || lower.contains("list hubs") || lower.contains("resource hubs")
    {
        return list_hubs(store);
    }
    if let Some(place) = place_after(&lower, &["resources in ", "resources at ", "resource in ", "resource at "]) {
        return resources_at(store, place);
    }
    if let Some(place) = place_after(&lower, &["disaster in ", "disaster at "]) {
        return disaster_at(store, place);
    }
    if lower.contains("request resource") || lower.contains("how to request") {
        return String::from(
            "To request resources, please use the Resource Management section of the \
             dashboard or contact your regional command center.",
        );
    }
    if lower.contains("contact support") || lower.contains("emergency contact") {
        return String::from(
            "For emergency support, contact the National Emergency Helpline at 112 or \
             your local command center.",
        );
    }
    if lower.contains("disaster") || lower.contains("emergency") {
        return disaster_overview(store);
    }
    if lower.contains("resource") || lower.contains("supply") {
        return resource_overview(store);
    }
    if lower.contains("help") || lower.contains("status") {
        return String::from(
            "I can provide information about:\n- Active disasters and their severity\n\
             - Resource hub availability\n- Allocation status and delivery times\n\
             - Risk predictions for different cities",
        );
    }

    String::from(
        "Sorry, I didn't understand that. You can ask about: active disasters, \
         resource hubs, resource availability, disaster status by city, or how to \
         request help.",
    )
}

/// The trailing place name after the first matching prefix, if any.
fn place_after<'a>(lower: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    for prefix in prefixes {
        if let Some(position) = lower.find(prefix) {
            let place = lower
                .get(position.saturating_add(prefix.len())..)
                .unwrap_or("")
                .trim()
                .trim_end_matches(['?', '.', '!']);
            if !place.is_empty() {
                return Some(place);
            }
        }
    }
    None
}

/// One line per active disaster, with city, type, and severity.
fn list_disasters(store: &ReliefStore) -> String {
    if store.disasters.is_empty() {
        return String::from("There are currently no active disasters.");
    }
    let lines: Vec<String> = store
        .disasters
        .values()
        .map(|d| {
            let city = store.city_or_placeholder(&d.city_id);
            format!(
                "- {} in {} ({}, severity {})",
                d.name, city.name, d.kind, d.severity
            )
        })
        .collect();
    format!("Active disasters:\n{}", lines.join("\n"))
}

/// One line per hub, with location and capacity label.
fn list_hubs(store: &ReliefStore) -> String {
    let lines: Vec<String> = store
        .hubs
        .values()
        .map(|h| {
            let capacity = h.capacity_status.as_deref().unwrap_or("unknown");
            format!("- {} ({}): {capacity} capacity", h.name, h.location)
        })
        .collect();
    format!("Resource hubs:\n{}", lines.join("\n"))
}

/// Stock levels for the hub in or named like `place`.
///
/// A known city answers from its local hub only; the hub-name fallback
/// applies when the place is not a city at all.
fn resources_at(store: &ReliefStore, place: &str) -> String {
    if let Some(city) = store.cities.values().find(|c| c.name.to_lowercase() == place) {
        return match store
            .hubs
            .values()
            .find(|h| h.location.to_lowercase() == place)
        {
            Some(hub) => hub_stock_lines(hub),
            None => format!("No resource hub found in {}.", city.name),
        };
    }
    match store
        .hubs
        .values()
        .find(|h| h.name.to_lowercase().contains(place))
    {
        Some(hub) => hub_stock_lines(hub),
        None => format!("No resource hub or city found matching '{place}'."),
    }
}

/// Per-kind availability listing for one hub.
fn hub_stock_lines(hub: &ResourceHub) -> String {
    let lines: Vec<String> = ResourceKind::ALL
        .iter()
        .map(|&kind| format!("{}: {}", kind.display_name(), hub.available(kind)))
        .collect();
    format!("{} ({}) resources:\n{}", hub.name, hub.location, lines.join("\n"))
}

/// Status of the disaster affecting the named city, if any.
fn disaster_at(store: &ReliefStore, place: &str) -> String {
    let Some(city) = store.cities.values().find(|c| c.name.to_lowercase() == place) else {
        return format!("City '{place}' not found.");
    };
    match store.disasters.values().find(|d| d.city_id == city.id) {
        Some(disaster) => format!(
            "Disaster in {}: {} ({}, severity {}). Affected population: {}.",
            city.name, disaster.name, disaster.kind, disaster.severity,
            disaster.affected_population
        ),
        None => format!("No active disaster reported in {}.", city.name),
    }
}

/// Generic summary when the user mentions disasters without a city.
fn disaster_overview(store: &ReliefStore) -> String {
    let active = store
        .disasters
        .values()
        .filter(|d| d.status == DisasterStatus::Active)
        .count();
    let worst: Option<&Disaster> = store.disasters.values().max_by_key(|d| d.severity);
    match worst {
        Some(disaster) => {
            let city = store.city_or_placeholder(&disaster.city_id);
            format!(
                "Currently, we have {active} active disasters. The most critical is in \
                 {} with severity level {}.",
                city.name, disaster.severity
            )
        }
        None => String::from("Currently, we have no active disasters."),
    }
}

/// Generic summary when the user mentions resources without a place.
fn resource_overview(store: &ReliefStore) -> String {
    let busiest = store.hubs.values().max_by_key(|h| {
        ResourceKind::ALL
            .iter()
            .map(|&kind| u64::from(h.available(kind)))
            .sum::<u64>()
    });
    match busiest {
        Some(hub) => format!(
            "Our resource hubs have food kits, medical supplies, tents, and water \
             packets available. {} has the highest capacity currently.",
            hub.name
        ),
        None => String::from("No resource hubs are currently registered."),
    }
}
