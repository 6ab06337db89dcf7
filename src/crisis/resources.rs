// Built-in crisis resources (national hotlines and text lines)

use super::types::CrisisResource;

/// Number of resources disclosed for medium severity
pub const MEDIUM_RESOURCE_COUNT: usize = 3;

/// Fresh copy of the built-in resource list, in display order
pub fn builtin_resources() -> Vec<CrisisResource> {
    vec![
        resource(
            "988 Suicide & Crisis Lifeline",
            "988",
            "Free, confidential support for people in distress",
            true,
            "https://988lifeline.org",
        ),
        resource(
            "Crisis Text Line",
            "Text HOME to 741741",
            "Text-based crisis support with trained counselors",
            true,
            "https://www.crisistextline.org",
        ),
        resource(
            "National Sexual Assault Hotline",
            "1-800-656-4673",
            "Support for survivors of sexual assault",
            true,
            "https://www.rainn.org",
        ),
        resource(
            "National Domestic Violence Hotline",
            "1-800-799-7233",
            "Support for those experiencing domestic violence",
            true,
            "https://www.thehotline.org",
        ),
        resource(
            "National Eating Disorders Association",
            "1-800-931-2237",
            "Support for eating disorders and body image issues",
            false,
            "https://www.nationaleatingdisorders.org",
        ),
    ]
}

fn resource(
    name: &str,
    contact: &str,
    description: &str,
    available_24x7: bool,
    website: &str,
) -> CrisisResource {
    CrisisResource {
        name: name.to_string(),
        contact: contact.to_string(),
        description: description.to_string(),
        available_24x7,
        website: Some(website.to_string()),
    }
}
