//! Draft prompt and sampling constants.
//!
//! The prompt is written in Arabic because the drafts are sent to Arabic
//! speakers; tone names stay in English so the model can match them to the
//! per-tone rules listed in the prompt.

use super::types::MessageTone;

pub const MODEL: &str = "gemini-3-flash-preview";
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.9;

/// Per-tone style rule appended to the shared requirements.
fn tone_rule(tone: MessageTone) -> &'static str {
    match tone {
        MessageTone::Professional => "اجعلها رسمية ومهذبة.",
        MessageTone::Friendly => "اجعلها ودودة ودافئة.",
        MessageTone::Funny => "اجعلها ممتعة وخفيفة الظل.",
        MessageTone::Short => "اجعلها مباشرة ومختصرة جداً.",
    }
}

/// Build the instruction for a WhatsApp draft about `topic` in `tone`.
pub fn build_draft_prompt(topic: &str, tone: MessageTone) -> String {
    format!(
        "أريد كتابة رسالة واتساب باللغة العربية.\n\
         الموضوع: {topic}\n\
         الأسلوب (Tone): {tone}\n\
         \n\
         المتطلبات:\n\
         - يجب أن تكون الرسالة قصيرة ومناسبة للواتساب.\n\
         - لا تضف أي نص خارج الرسالة.\n\
         - استخدم الإيموجي المناسب بشكل بسيط.\n\
         - {rule}\n",
        topic = topic.trim(),
        tone = tone.as_str(),
        rule = tone_rule(tone),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_topic_and_tone() {
        let prompt = build_draft_prompt("  طلب عرض سعر  ", MessageTone::Professional);
        assert!(prompt.contains("الموضوع: طلب عرض سعر\n"));
        assert!(prompt.contains("(Tone): professional"));
        assert!(prompt.contains("رسمية"));
    }

    #[test]
    fn each_tone_has_its_own_rule() {
        let rules: Vec<_> = MessageTone::ALL.iter().map(|t| tone_rule(*t)).collect();
        for (i, a) in rules.iter().enumerate() {
            for b in &rules[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn prompt_forbids_extra_commentary() {
        let prompt = build_draft_prompt("تحية صباحية", MessageTone::Short);
        assert!(prompt.contains("لا تضف أي نص خارج الرسالة"));
        assert!(prompt.contains("الإيموجي"));
    }
}
