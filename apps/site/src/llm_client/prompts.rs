// Shared prompt fragments. Each caller keeps its own prompts.rs alongside it.

/// Appended to every user prompt so the model stays inside the requested key set.
pub const JSON_KEYS_ONLY: &str = "Return a single JSON object containing exactly these keys \
    and nothing else. Do NOT wrap it in markdown code fences.";

/// Joins prompt lines with newlines, the layout every caller uses.
pub fn build_prompt(lines: &[&str]) -> String {
    lines.join("\n")
}
