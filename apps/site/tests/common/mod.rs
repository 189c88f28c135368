//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::ResponseTemplate;

/// A summary payload that passes validation.
pub fn summary_json() -> Value {
    json!({
        "title": "Staff Platform Engineer",
        "tagline": "Builds calm, reliable infrastructure.",
        "summary": "Engineer with a decade of platform work.",
        "whatIDo": "I lead platform teams\nand ship developer tooling.",
        "featured": ["one", "two", "three", "four", "five"],
        "coreCompetencies": ["rust", "aws", "observability", "mentoring"],
        "values": ["ownership", "clarity", "care"],
        "highlights": ["cut deploy time 80%", "led 12 engineers", "99.99% uptime"],
        "skills": {
            "leadership": ["hiring", "coaching", "planning"],
            "technical": ["rust", "go", "terraform"]
        }
    })
}

/// Chat-completion response whose first choice carries `content` serialised as JSON text.
pub fn chat_reply(content: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content.to_string() } }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 80 }
    }))
}
