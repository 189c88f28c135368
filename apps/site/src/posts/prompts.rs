pub const GENERATE_SYSTEM: &str = "You are an editor. Respond with valid JSON only. No markdown.";

pub const GENERATE_KEYS: &[&str] = &[
    "Generate JSON for a blog post based on the content below.",
    "Return keys:",
    "- title: concise professional title",
    "- excerpt: 1-2 sentence summary (max 200 chars)",
    "- tags: array of 3-7 short tags",
    "- slug: kebab-case slug",
];
