//! # Prompt Assembly
//!
//! Pure construction of the multimodal prompt sent to the model provider:
//! one leading text part carrying the instructions, the serialized knowledge
//! base, and the diagnosis request, followed by one inline part per accepted
//! attachment.

use crate::attachment::Attachment;

/// Shown in place of the knowledge base section when the feed yields no
/// usable case records.
pub const KB_EMPTY_FALLBACK: &str = "No knowledge base entries available.";

/// One content part of a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    Inline { media_type: String, data: Vec<u8> },
}

/// Assembles the ordered content parts for one diagnosis request.
pub fn build_prompt(
    system_instructions: &str,
    equipment: &str,
    symptom: &str,
    kb_text: &str,
    attachments: &[Attachment],
) -> Vec<PromptPart> {
    let kb_section = if kb_text.trim().is_empty() {
        KB_EMPTY_FALLBACK
    } else {
        kb_text
    };

    let mut text = format!(
        "{system_instructions}\n\n\
         **Related Knowledge Base Information:**\n\
         {kb_section}\n\n\
         **Diagnosis Request:**\n\
         Equipment: {equipment}\n\
         Fault Symptom: {symptom}"
    );

    if !attachments.is_empty() {
        let names: Vec<&str> = attachments.iter().map(|a| a.file_name.as_str()).collect();
        text.push_str(&format!(
            "\n\nAttached files ({}): {}",
            attachments.len(),
            names.join(", ")
        ));
    }

    let mut parts = vec![PromptPart::Text(text)];
    for attachment in attachments {
        parts.push(PromptPart::Inline {
            media_type: attachment.media_type.clone(),
            data: attachment.data.clone(),
        });
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str, media_type: &str) -> Attachment {
        Attachment {
            file_name: name.to_string(),
            media_type: media_type.to_string(),
            data: vec![1, 2, 3],
        }
    }

    #[test]
    fn single_text_part_without_attachments() {
        let parts = build_prompt("You are an expert.", "Pump A", "Vibration", "KB LINE", &[]);
        assert_eq!(parts.len(), 1);
        let PromptPart::Text(text) = &parts[0] else {
            panic!("expected leading text part");
        };
        assert!(text.starts_with("You are an expert."));
        assert!(text.contains("KB LINE"));
        assert!(text.contains("Equipment: Pump A"));
        assert!(text.contains("Fault Symptom: Vibration"));
        assert!(!text.contains("Attached files"));
    }

    #[test]
    fn empty_kb_uses_fallback_text() {
        let parts = build_prompt("sys", "Pump A", "Vibration", "  ", &[]);
        let PromptPart::Text(text) = &parts[0] else {
            panic!("expected leading text part");
        };
        assert!(text.contains(KB_EMPTY_FALLBACK));
    }

    #[test]
    fn attachments_become_inline_parts_in_order() {
        let attachments = vec![
            attachment("photo.png", "image/png"),
            attachment("manual.pdf", "application/pdf"),
        ];
        let parts = build_prompt("sys", "Pump A", "Vibration", "kb", &attachments);
        assert_eq!(parts.len(), 3);

        let PromptPart::Text(text) = &parts[0] else {
            panic!("expected leading text part");
        };
        assert!(text.contains("Attached files (2): photo.png, manual.pdf"));

        assert_eq!(
            parts[1],
            PromptPart::Inline {
                media_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            }
        );
        let PromptPart::Inline { media_type, .. } = &parts[2] else {
            panic!("expected inline part");
        };
        assert_eq!(media_type, "application/pdf");
    }
}
