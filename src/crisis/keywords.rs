// Built-in crisis keyword table
//
// Order matters: matches are reported in table order and ties on the
// highest severity resolve to the earliest entry.

use super::types::{Category, CrisisKeyword, Severity};

type KeywordRow = (&'static str, Severity, Category, &'static str);

const BUILTIN_KEYWORDS: &[KeywordRow] = &[
    // Self-harm and suicide
    (
        "kill myself",
        Severity::Critical,
        Category::Suicide,
        "It sounds like you're going through something really painful. You don't have to face this alone.",
    ),
    (
        "suicide",
        Severity::Critical,
        Category::Suicide,
        "I'm really concerned about you. Your life matters, and there are people who want to help.",
    ),
    (
        "suicidal",
        Severity::Critical,
        Category::Suicide,
        "It sounds like you're in a really dark place right now. Please reach out for support - you deserve help.",
    ),
    (
        "end it all",
        Severity::Critical,
        Category::Suicide,
        "I'm hearing that you're in tremendous pain. There are people who care and want to support you through this.",
    ),
    (
        "don't want to live",
        Severity::Critical,
        Category::Suicide,
        "It sounds like you're struggling with some really heavy feelings. You don't have to carry this burden alone.",
    ),
    (
        "better off dead",
        Severity::Critical,
        Category::Suicide,
        "I'm really worried about what you're going through. Your life has value, even when it doesn't feel that way.",
    ),
    (
        "hurt myself",
        Severity::High,
        Category::SelfHarm,
        "It sounds like you're in a lot of pain right now. There are healthier ways to cope, and people who can help you find them.",
    ),
    (
        "self harm",
        Severity::High,
        Category::SelfHarm,
        "I hear that you're struggling with some intense emotions. You deserve support in finding safer ways to cope.",
    ),
    (
        "cutting myself",
        Severity::High,
        Category::SelfHarm,
        "It sounds like you're dealing with overwhelming feelings. There are people who understand and want to help.",
    ),
    (
        "want to die",
        Severity::Critical,
        Category::Suicide,
        "I'm deeply concerned about you. These feelings are serious, but they don't have to be permanent. Please reach out for help.",
    ),
    (
        "no reason to live",
        Severity::Critical,
        Category::Suicide,
        "It sounds like you're feeling hopeless right now. These feelings are real, but they can change with support.",
    ),
    // Severe distress
    (
        "can't go on",
        Severity::High,
        Category::SevereDistress,
        "It sounds like you're feeling overwhelmed. Taking things one moment at a time is okay - you don't have to figure everything out right now.",
    ),
    (
        "breaking down",
        Severity::Medium,
        Category::SevereDistress,
        "It sounds like you're under a lot of pressure. Remember that it's okay to not be okay sometimes.",
    ),
    (
        "losing my mind",
        Severity::Medium,
        Category::SevereDistress,
        "I hear that you're feeling overwhelmed. What you're experiencing is a response to stress - it doesn't mean you're losing anything.",
    ),
    (
        "can't take it anymore",
        Severity::High,
        Category::SevereDistress,
        "It sounds like you're at your limit. It's okay to step back and ask for help - you don't have to handle everything alone.",
    ),
    (
        "giving up",
        Severity::High,
        Category::SevereDistress,
        "I hear that you're feeling exhausted and discouraged. It's okay to rest - giving up on everything and taking a break are different things.",
    ),
    // Abuse
    (
        "abuse",
        Severity::High,
        Category::Abuse,
        "It sounds like you might be experiencing something really difficult. You don't deserve to be treated this way, and support is available.",
    ),
    (
        "abusive",
        Severity::High,
        Category::Abuse,
        "I hear that you're dealing with a harmful situation. You deserve to be treated with respect and kindness.",
    ),
    (
        "being hurt",
        Severity::High,
        Category::Abuse,
        "It sounds like you might be in a concerning situation. Your safety matters, and there are people who can help.",
    ),
    // Violence
    (
        "hurt someone",
        Severity::High,
        Category::Violence,
        "It sounds like you're experiencing some intense anger or frustration. These feelings are valid, and there are ways to work through them safely.",
    ),
    (
        "kill someone",
        Severity::Critical,
        Category::Violence,
        "I'm hearing that you're experiencing very intense feelings. It's important to talk to someone who can help you process these emotions safely.",
    ),
    // Eating disorders
    (
        "starving myself",
        Severity::High,
        Category::EatingDisorder,
        "It sounds like you might be struggling with your relationship with food. You deserve to nourish yourself, and support is available.",
    ),
    (
        "make myself throw up",
        Severity::High,
        Category::EatingDisorder,
        "I hear that you're dealing with difficult feelings about your body or food. There are healthier ways to cope, and people who can help.",
    ),
    (
        "eating disorder",
        Severity::High,
        Category::EatingDisorder,
        "It sounds like you're struggling with food or body image. These challenges are real, and recovery is possible with support.",
    ),
    // Substances
    (
        "overdose",
        Severity::Critical,
        Category::Substance,
        "I'm very concerned about what you're sharing. If you've taken something or are considering it, please seek immediate medical help.",
    ),
    (
        "pills to end it",
        Severity::Critical,
        Category::Substance,
        "I'm deeply worried about you. Please reach out for immediate help - your life matters.",
    ),
];

/// Fresh copy of the built-in keyword table
pub fn builtin_keywords() -> Vec<CrisisKeyword> {
    BUILTIN_KEYWORDS
        .iter()
        .map(|&(keyword, severity, category, message)| {
            CrisisKeyword::new(keyword, severity, message, category)
        })
        .collect()
}
