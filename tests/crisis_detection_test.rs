// Integration tests for crisis detection
//
// Exercises the built-in keyword table end to end: empty input, case and
// whitespace insensitivity, the max-severity rule, message selection,
// resource disclosure, and runtime keyword extension.

use secret_stress::crisis::{
    builtin_resources, Category, CrisisDetector, CrisisKeyword, Severity,
};

fn keyword_message(detector: &CrisisDetector, phrase: &str) -> String {
    detector
        .keywords()
        .into_iter()
        .find(|k| k.keyword == phrase)
        .map(|k| k.message)
        .unwrap_or_else(|| panic!("missing built-in keyword {}", phrase))
}

#[test]
fn test_empty_and_whitespace_input() {
    let detector = CrisisDetector::new();

    for text in ["", "   ", "\n\t  \r\n"] {
        let assessment = detector.detect_crisis(text);
        assert_eq!(assessment.severity, Severity::None);
        assert!(assessment.matched_keywords.is_empty());
        assert_eq!(assessment.response_message, "");
        assert!(!assessment.show_resources);
        assert!(!detector.contains_crisis_keywords(text));
    }
}

#[test]
fn test_suicide_anywhere_is_critical() {
    let detector = CrisisDetector::new();

    for text in ["suicide", "thinking about SUICIDE again", "xxsuicidexx", "Suicide."] {
        let assessment = detector.detect_crisis(text);
        assert_eq!(assessment.severity, Severity::Critical, "text: {}", text);
        assert!(assessment
            .matched_keywords
            .iter()
            .any(|k| k.keyword == "suicide" && k.severity == Severity::Critical));
    }
}

#[test]
fn test_case_insensitivity() {
    let detector = CrisisDetector::new();

    let upper = detector.detect_crisis("I feel like I want to DIE");
    let lower = detector.detect_crisis("i feel like i want to die");

    assert_eq!(upper.severity, lower.severity);
    assert_eq!(upper.matched_keywords, lower.matched_keywords);
    assert_eq!(upper.severity, Severity::Critical);
}

#[test]
fn test_appending_critical_never_lowers_severity() {
    let detector = CrisisDetector::new();

    for base in [
        "",
        "exams are hard",
        "I feel like I'm breaking down",
        "sometimes I want to hurt myself",
        "I want to end it all",
    ] {
        let before = detector.highest_severity(base);
        let after = detector.highest_severity(&format!("{} and I think about suicide", base));
        assert!(after >= before);
        assert_eq!(after, Severity::Critical);
    }
}

#[test]
fn test_show_resources_per_level() {
    let mut detector = CrisisDetector::new();
    detector
        .add_keyword(CrisisKeyword::new(
            "rough week",
            Severity::Low,
            "low message",
            Category::SevereDistress,
        ))
        .unwrap();

    let none = detector.detect_crisis("just a normal day at school");
    let low = detector.detect_crisis("it's been a rough week");
    let medium = detector.detect_crisis("I'm breaking down over finals");
    let high = detector.detect_crisis("I can't take it anymore");
    let critical = detector.detect_crisis("I'm better off dead");

    assert_eq!(none.severity, Severity::None);
    assert!(!none.show_resources);
    assert_eq!(low.severity, Severity::Low);
    assert!(!low.show_resources);
    assert_eq!(medium.severity, Severity::Medium);
    assert!(!medium.show_resources);
    assert_eq!(high.severity, Severity::High);
    assert!(high.show_resources);
    assert_eq!(critical.severity, Severity::Critical);
    assert!(critical.show_resources);
}

#[test]
fn test_contains_agrees_with_detect() {
    let detector = CrisisDetector::new();

    for text in [
        "",
        "nothing to see here",
        "I've been so stressed about exams lately",
        "I keep losing my mind",
        "abusive relationship and I'm giving up",
        "overdose, suicide, self harm",
        "KILL    MYSELF",
    ] {
        let assessment = detector.detect_crisis(text);
        assert_eq!(
            detector.contains_crisis_keywords(text),
            !assessment.matched_keywords.is_empty(),
            "text: {}",
            text
        );
    }
}

#[test]
fn test_matches_keep_table_order_without_dedup() {
    let detector = CrisisDetector::new();

    // Reported in table order, not text order
    let assessment = detector.detect_crisis("an abusive home, and the abuse is constant");
    let phrases: Vec<&str> = assessment
        .matched_keywords
        .iter()
        .map(|k| k.keyword.as_str())
        .collect();
    assert_eq!(phrases, vec!["abuse", "abusive"]);
    assert_eq!(assessment.response_message, keyword_message(&detector, "abuse"));
}

#[test]
fn test_relevant_resources_by_severity() {
    let mut detector = CrisisDetector::new();
    detector
        .add_keyword(CrisisKeyword::new("meh", Severity::Low, "m", Category::SevereDistress))
        .unwrap();
    let all = builtin_resources();

    let none = detector.detect_crisis("fine");
    assert!(detector.relevant_resources(&none).is_empty());

    let low = detector.detect_crisis("meh");
    assert!(detector.relevant_resources(&low).is_empty());

    let medium = detector.detect_crisis("breaking down");
    assert_eq!(detector.relevant_resources(&medium), all[..3].to_vec());

    let high = detector.detect_crisis("eating disorder");
    assert_eq!(detector.relevant_resources(&high), all);

    let critical = detector.detect_crisis("overdose");
    assert_eq!(detector.relevant_resources(&critical), all);
}

#[test]
fn test_exam_stress_has_no_matches() {
    let detector = CrisisDetector::new();

    let assessment = detector.detect_crisis("I've been so stressed about exams lately");
    assert_eq!(assessment.severity, Severity::None);
    assert!(assessment.matched_keywords.is_empty());
    assert_eq!(assessment.response_message, "");
}

#[test]
fn test_hurting_myself_phrase() {
    let detector = CrisisDetector::new();

    // Substring matching only: "hurting myself" does not contain "hurt myself"
    assert_eq!(
        detector.highest_severity("sometimes I think about hurting myself when it gets bad"),
        Severity::None
    );

    let assessment = detector.detect_crisis("sometimes I want to hurt myself when it gets bad");
    assert_eq!(assessment.severity, Severity::High);
    assert!(assessment.show_resources);
    assert_eq!(assessment.matched_keywords.len(), 1);
    assert_eq!(assessment.matched_keywords[0].keyword, "hurt myself");
    assert_eq!(
        assessment.response_message,
        keyword_message(&detector, "hurt myself")
    );
}

#[test]
fn test_max_rule_picks_critical_message() {
    let detector = CrisisDetector::new();

    let assessment =
        detector.detect_crisis("I'm breaking down and I keep thinking about suicide");
    assert_eq!(assessment.severity, Severity::Critical);
    assert_eq!(assessment.matched_keywords.len(), 2);
    assert_eq!(assessment.response_message, keyword_message(&detector, "suicide"));
    assert_ne!(
        assessment.response_message,
        keyword_message(&detector, "breaking down")
    );
}

#[test]
fn test_added_keyword_matches_in_same_process() {
    let mut detector = CrisisDetector::new();
    let before = detector.keywords().len();

    detector
        .add_keyword(CrisisKeyword::new(
            "xyzzy",
            Severity::Low,
            "m",
            Category::SevereDistress,
        ))
        .unwrap();

    let assessment = detector.detect_crisis("xyzzy");
    assert_eq!(assessment.matched_keywords.len(), 1);
    assert_eq!(assessment.matched_keywords[0].keyword, "xyzzy");
    assert_eq!(assessment.severity, Severity::Low);
    assert_eq!(assessment.response_message, "m");
    assert_eq!(detector.keywords().len(), before + 1);

    // A fresh detector is unaffected
    assert!(!CrisisDetector::new().contains_crisis_keywords("xyzzy"));
}

#[test]
fn test_copies_are_defensive() {
    let detector = CrisisDetector::new();

    let mut keywords = detector.keywords();
    keywords.clear();
    let mut resources = detector.all_resources();
    resources.clear();

    assert_eq!(detector.keywords().len(), 26);
    assert_eq!(detector.all_resources().len(), 5);
}

#[test]
fn test_unicode_and_long_input() {
    let detector = CrisisDetector::new();

    let assessment = detector.detect_crisis("Ünïcödé 🙂 text with CAN'T GO ON inside");
    assert_eq!(assessment.severity, Severity::High);

    // Lowercasing never folds accents, so "ç" is not "c"
    assert_eq!(detector.highest_severity("ÇAN'T GO ON"), Severity::None);

    let long = format!("{} giving up", "calm words ".repeat(10_000));
    assert_eq!(detector.highest_severity(&long), Severity::High);
}

#[test]
fn test_concurrent_readers() {
    let detector = std::sync::Arc::new(CrisisDetector::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let detector = std::sync::Arc::clone(&detector);
            std::thread::spawn(move || {
                let text = if i % 2 == 0 { "suicide" } else { "fine" };
                detector.highest_severity(text)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let severity = handle.join().unwrap();
        let expected = if i % 2 == 0 { Severity::Critical } else { Severity::None };
        assert_eq!(severity, expected);
    }
}
