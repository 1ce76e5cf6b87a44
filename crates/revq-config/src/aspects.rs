//! Built-in evaluation aspects.

use revq_core::entities::Aspect;

/// Three five-point Likert questions used when no `[[aspects]]` are configured.
#[must_use]
pub fn default_aspects() -> Vec<Aspect> {
    vec![
        Aspect::new(
            "Aspect 1",
            "How relevant is the research problem addressed?",
            &["1 - Very low", "2 - Low", "3 - Neutral", "4 - High", "5 - Very high"],
        ),
        Aspect::new(
            "Aspect 2",
            "How clear is the methodology presented?",
            &["1 - Very poor", "2 - Poor", "3 - Fair", "4 - Good", "5 - Excellent"],
        ),
        Aspect::new(
            "Aspect 3",
            "How novel is the article's contribution?",
            &[
                "1 - Not novel",
                "2 - Slightly novel",
                "3 - Neutral",
                "4 - Novel",
                "5 - Highly novel",
            ],
        ),
    ]
}
