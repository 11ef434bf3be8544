//! Deterministic baseline suggestions — fixed local rules inspected against
//! the document, produced on every request independent of remote-call
//! success. Remote suggestions are concatenated after these, never instead
//! of them.

use crate::models::cv::CvDocument;
use crate::models::presentation::Language;
use crate::models::suggestion::{Priority, Suggestion, SuggestionType};

/// A description that opens with one of these reads as an achievement;
/// anything else triggers the rewrite-the-opening suggestion.
/// Matched case-insensitively against the first word.
pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "architected",
    "automated",
    "built",
    "created",
    "delivered",
    "designed",
    "developed",
    "drove",
    "established",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "optimized",
    "owned",
    "reduced",
    "shipped",
    "spearheaded",
];

const MIN_SUMMARY_LEN: usize = 50;
const SHORT_SUMMARY_LEN: usize = 20;
const MIN_TECHNICAL_SKILLS: usize = 5;

/// Quantified impact means at least one digit or a percent sign.
pub fn has_quantified_impact(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit()) || text.contains('%')
}

pub fn starts_with_action_verb(text: &str) -> bool {
    let first_word = text
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()));
    match first_word {
        Some(word) if !word.is_empty() => ACTION_VERBS
            .iter()
            .any(|verb| verb.eq_ignore_ascii_case(word)),
        _ => false,
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

struct Rule {
    kind: SuggestionType,
    title: &'static str,
    description: &'static str,
    priority: Priority,
}

fn enhance_summary_rule(language: Language) -> Rule {
    match language {
        Language::En => Rule {
            kind: SuggestionType::Improvement,
            title: "Enhance your professional summary",
            description: "The summary is short or does not mention years of experience. \
                          State how long you have worked and what you deliver.",
            priority: Priority::Medium,
        },
        Language::Ar => Rule {
            kind: SuggestionType::Improvement,
            title: "حسّن ملخصك المهني",
            description: "الملخص قصير أو لا يذكر سنوات الخبرة. أضف مدة خبرتك وما تقدمه من قيمة.",
            priority: Priority::Medium,
        },
    }
}

fn quantify_rule(language: Language) -> Rule {
    match language {
        Language::En => Rule {
            kind: SuggestionType::Improvement,
            title: "Add quantified achievements",
            description: "This description has no numbers or percentages. Screening software \
                          and recruiters both look for measurable impact.",
            priority: Priority::High,
        },
        Language::Ar => Rule {
            kind: SuggestionType::Improvement,
            title: "أضف إنجازات رقمية",
            description: "هذا الوصف لا يحتوي على أرقام أو نسب مئوية. أنظمة الفرز والمسؤولون عن \
                          التوظيف يبحثون عن أثر قابل للقياس.",
            priority: Priority::High,
        },
    }
}

fn action_verb_rule(language: Language) -> Rule {
    match language {
        Language::En => Rule {
            kind: SuggestionType::Format,
            title: "Start with a strong action verb",
            description: "Open the description with an achievement verb such as Led, Built, \
                          or Delivered instead of a passive phrase.",
            priority: Priority::Medium,
        },
        Language::Ar => Rule {
            kind: SuggestionType::Format,
            title: "ابدأ بفعل قوي",
            description: "ابدأ الوصف بفعل إنجاز قوي مثل قاد أو طوّر أو أطلق بدلًا من صيغة سلبية.",
            priority: Priority::Medium,
        },
    }
}

fn more_skills_rule(language: Language) -> Rule {
    match language {
        Language::En => Rule {
            kind: SuggestionType::Keyword,
            title: "Add more technical skills",
            description: "Fewer than five technical skills are listed. More role-relevant \
                          skills give keyword matching more to work with.",
            priority: Priority::Medium,
        },
        Language::Ar => Rule {
            kind: SuggestionType::Keyword,
            title: "أضف مهارات تقنية إضافية",
            description: "عدد المهارات التقنية المدرجة أقل من خمس. المزيد من المهارات ذات الصلة \
                          يمنح مطابقة الكلمات المفتاحية فرصة أكبر.",
            priority: Priority::Medium,
        },
    }
}

fn add_summary_rule(language: Language) -> Rule {
    match language {
        Language::En => Rule {
            kind: SuggestionType::Improvement,
            title: "Add a professional summary",
            description: "The CV has no meaningful summary. A two-sentence introduction is the \
                          first thing both software and people read.",
            priority: Priority::High,
        },
        Language::Ar => Rule {
            kind: SuggestionType::Improvement,
            title: "أضف ملخصًا مهنيًا",
            description: "لا تحتوي السيرة على ملخص كافٍ. فقرة من جملتين تعرّف بخبرتك هي أول ما \
                          تقرأه الأنظمة والأشخاص.",
            priority: Priority::High,
        },
    }
}

fn summary_clause(language: Language) -> &'static str {
    match language {
        Language::En => " Backed by years of hands-on experience delivering measurable results.",
        Language::Ar => " مدعومًا بسنوات من الخبرة العملية في تحقيق نتائج ملموسة.",
    }
}

fn quantify_clause(language: Language) -> &'static str {
    match language {
        Language::En => ", achieving measurable improvements across key metrics",
        Language::Ar => "، مع تحقيق تحسينات قابلة للقياس في المؤشرات الأساسية",
    }
}

fn template_summary(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Experienced professional with a track record of delivering measurable results. \
             Skilled at cross-functional collaboration and continuous improvement."
        }
        Language::Ar => {
            "محترف ذو خبرة وسجل حافل في تحقيق نتائج قابلة للقياس، ومهارة في التعاون بين الفرق \
             والتحسين المستمر."
        }
    }
}

fn action_prefix(language: Language) -> &'static str {
    match language {
        Language::En => "Led ",
        Language::Ar => "قاد ",
    }
}

fn skill_placeholders(language: Language) -> &'static str {
    match language {
        Language::En => "[Add skill], [Add skill], [Add skill]",
        Language::Ar => "[أضف مهارة]، [أضف مهارة]، [أضف مهارة]",
    }
}

fn make(rule: Rule, section: &str, field_path: String, original: String, suggested: String) -> Suggestion {
    Suggestion {
        id: String::new(), // renumbered by the caller after concatenation
        kind: rule.kind,
        title: rule.title.to_string(),
        description: rule.description.to_string(),
        section: section.to_string(),
        applied: false,
        field_path: Some(field_path),
        original_text: Some(original),
        suggested_text: Some(suggested),
        priority: rule.priority,
    }
}

/// Inspects the document with the fixed rules and returns the baseline
/// suggestion set. Ids are left empty; callers renumber after merging in any
/// remote suggestions.
pub fn heuristic_suggestions(doc: &CvDocument, language: Language) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let summary = doc.personal_info.summary.trim();

    if !summary.is_empty()
        && (summary.chars().count() < MIN_SUMMARY_LEN || !summary.contains("years"))
    {
        suggestions.push(make(
            enhance_summary_rule(language),
            "personalInfo",
            "personalInfo.summary".to_string(),
            summary.to_string(),
            format!("{summary}{}", summary_clause(language)),
        ));
    }

    for (index, entry) in doc.experience.iter().enumerate() {
        let description = entry.description.trim();
        if description.is_empty() {
            continue;
        }
        let field_path = format!("experience.{index}.description");
        if !has_quantified_impact(description) {
            suggestions.push(make(
                quantify_rule(language),
                "experience",
                field_path.clone(),
                description.to_string(),
                format!("{description}{}", quantify_clause(language)),
            ));
        }
        if !starts_with_action_verb(description) {
            suggestions.push(make(
                action_verb_rule(language),
                "experience",
                field_path,
                description.to_string(),
                format!("{}{}", action_prefix(language), lowercase_first(description)),
            ));
        }
    }

    if doc.skills.technical.len() < MIN_TECHNICAL_SKILLS {
        let original = doc.skills.technical.join(", ");
        let suggested = if original.is_empty() {
            skill_placeholders(language).to_string()
        } else {
            format!("{original}, {}", skill_placeholders(language))
        };
        suggestions.push(make(
            more_skills_rule(language),
            "skills",
            "skills.technical".to_string(),
            original,
            suggested,
        ));
    }

    if summary.chars().count() < SHORT_SUMMARY_LEN {
        suggestions.push(make(
            add_summary_rule(language),
            "personalInfo",
            "personalInfo.summary".to_string(),
            summary.to_string(),
            template_summary(language).to_string(),
        ));
    }

    suggestions
}
