//! Localized strings for the two supported languages. Arabic strings are
//! used verbatim when `language=ar`; everything else falls back to English.
//!
//! No ambient locale state: callers pass the `Language` they were handed.

use crate::models::presentation::Language;

/// Default display label for a built-in section, used when the user has not
/// set a `sectionNames` override. Custom sections always carry their own
/// title, so they have no entry here.
pub fn default_section_label(language: Language, key: &str) -> Option<&'static str> {
    let label = match (language, key) {
        (Language::En, "personalInfo") => "Personal Information",
        (Language::En, "experience") => "Experience",
        (Language::En, "education") => "Education",
        (Language::En, "skills") => "Skills",
        (Language::Ar, "personalInfo") => "المعلومات الشخصية",
        (Language::Ar, "experience") => "الخبرة العملية",
        (Language::Ar, "education") => "التعليم",
        (Language::Ar, "skills") => "المهارات",
        _ => return None,
    };
    Some(label)
}

/// Overall feedback line of the fixed fallback ATS analysis.
pub fn fallback_analysis_feedback(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Your CV has a solid foundation. Add quantified achievements and role-specific \
             keywords to improve compatibility with applicant tracking systems."
        }
        Language::Ar => {
            "سيرتك الذاتية تمتلك أساسًا جيدًا. أضف إنجازات قابلة للقياس وكلمات مفتاحية \
             مرتبطة بالوظيفة لتحسين التوافق مع أنظمة تتبع المتقدمين."
        }
    }
}

/// Strengths listed by the fixed fallback ATS analysis.
pub fn fallback_analysis_strengths(language: Language) -> Vec<String> {
    let items: [&str; 2] = match language {
        Language::En => [
            "Clear section structure",
            "Consistent formatting throughout the document",
        ],
        Language::Ar => ["هيكل أقسام واضح", "تنسيق متناسق في كامل المستند"],
    };
    items.iter().map(|s| s.to_string()).collect()
}

/// Priority advice listed by the fixed fallback ATS analysis.
pub fn fallback_analysis_advice(language: Language) -> Vec<String> {
    let items: [&str; 3] = match language {
        Language::En => [
            "Quantify achievements with numbers and percentages",
            "Mirror keywords from the target job description",
            "Keep formatting simple so parsers read every section",
        ],
        Language::Ar => [
            "عبّر عن إنجازاتك بأرقام ونسب مئوية",
            "استخدم الكلمات المفتاحية الواردة في الوصف الوظيفي المستهدف",
            "حافظ على تنسيق بسيط حتى تقرأ أنظمة الفرز كل الأقسام",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

/// Names of the fixed categories in the fallback ATS analysis.
pub fn fallback_category_feedback(language: Language) -> [(&'static str, &'static str); 3] {
    match language {
        Language::En => [
            ("formatting", "Formatting parses cleanly in common ATS software."),
            ("keywords", "Add more role-specific keywords to strengthen matching."),
            ("content", "Descriptions would benefit from quantified impact."),
        ],
        Language::Ar => [
            ("formatting", "التنسيق قابل للقراءة في أنظمة تتبع المتقدمين الشائعة."),
            ("keywords", "أضف مزيدًا من الكلمات المفتاحية الخاصة بالوظيفة لتقوية المطابقة."),
            ("content", "ستستفيد الأوصاف من إبراز الأثر بأرقام ملموسة."),
        ],
    }
}

/// Message returned with suggestion reports when the remote call failed and
/// only the built-in review rules contributed.
pub fn heuristics_only_feedback(language: Language) -> &'static str {
    match language {
        Language::En => {
            "AI suggestions are temporarily unavailable — showing recommendations \
             from the built-in review rules."
        }
        Language::Ar => {
            "اقتراحات الذكاء الاصطناعي غير متاحة مؤقتًا — تُعرض التوصيات \
             المستندة إلى قواعد المراجعة المدمجة."
        }
    }
}
