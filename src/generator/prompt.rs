//! generator::prompt
//!
//! Prompt construction.
//!
//! The property lists shown to the generator are rendered from the
//! sanitizer's rule tables, so the prompt never offers a key the sanitizer
//! would drop.

use std::fmt::Write;

use serde_json::{json, Value};

use super::traits::{ChatMessage, ChatRequest};
use super::{GenerationRequest, GenerationSettings};
use crate::core::types::InputType;
use crate::sanitize::rules::{self, SYSTEM_KEYS, TOP_LEVEL};

const PREAMBLE: &str = "\
You help people fill out long document forms. Your job is to turn a raw form \
field name or intent into a clear question that the person filling out the \
form can answer. You must ALWAYS return valid JSON with at least the \
display_name field.

FORMATTING RULES:
1. Questions are clear and direct and start with a question word (What, When, Who, How, Does, Will)
2. Name the party the question is about (the buyer, the seller, the tenant) instead of \"your client\"
3. Only add a description if the question needs clarification
4. Width is in grid units 1-12; most fields are 6 or 12
5. Placeholders show realistic example input";

/// The system prompt: rules, permitted properties, and field context.
pub fn system_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::from(PREAMBLE);

    prompt.push_str("\n\nIMPORTANT - Only use these EXACT properties (no other properties allowed):\n");
    for rule in TOP_LEVEL {
        let _ = writeln!(prompt, "- {}: {}", rule.key, rule.hint);
    }

    prompt.push('\n');
    prompt.push_str(&special_input_section(request.field_type));

    let _ = write!(
        prompt,
        "\nNever set these properties: {}.\n\nField Type: {}\nGroup Type: {}\nSource Field Names: {}",
        SYSTEM_KEYS.join(", "),
        request.field_type,
        request.group_type,
        request.pdf_context.join(", ")
    );
    prompt
}

fn special_input_section(field_type: InputType) -> String {
    let Some(rule) = rules::special_input_rule(field_type) else {
        return format!("Do not use special_input for {} fields.\n", field_type);
    };

    let mut section = format!(
        "For special_input on {} fields, ONLY use these exact properties:\n",
        field_type.as_str().to_uppercase()
    );
    for field in rule.fields {
        let _ = writeln!(section, "- {}.{}: {}", rule.kind, field.key, field.hint);
    }
    section
}

fn example_reply(field_type: InputType) -> Value {
    match field_type {
        InputType::Text => json!({
            "display_name": "What is the buyer's phone number?",
            "width": 6,
            "placeholder": "(555) 123-4567",
            "special_input": { "text": { "phone": true } }
        }),
        InputType::Checkbox => json!({
            "display_name": "Does the buyer agree to the inspection terms?",
            "width": 12,
            "special_input": { "checkbox": { "asRadio": true, "horizontal": 2 } }
        }),
        InputType::Radio => json!({
            "display_name": "How will the buyer finance this purchase?",
            "width": 12,
            "special_input": { "radio": { "layout": "grid", "columns": 2 } }
        }),
        _ => json!({ "display_name": "Who is signing for the seller?", "width": 12 }),
    }
}

/// The user prompt: the intent and an example reply for the field type.
pub fn user_prompt(request: &GenerationRequest) -> String {
    let example = serde_json::to_string_pretty(&example_reply(request.field_type))
        .unwrap_or_default();
    format!(
        "User Intent: \"{}\"\n\n\
         TASK: Transform this into a question that gathers the information for this field.\n\
         Make it clear who the information is about.\n\n\
         Return ONLY a JSON object using the permitted properties.\n\n\
         Example valid response:\n{}",
        request.intent, example
    )
}

/// Assemble the full chat request.
pub fn build_request(request: &GenerationRequest, settings: &GenerationSettings) -> ChatRequest {
    ChatRequest {
        model: settings.model.clone(),
        messages: vec![
            ChatMessage::system(system_prompt(request)),
            ChatMessage::user(user_prompt(request)),
        ],
        max_completion_tokens: settings.max_completion_tokens,
    }
}
