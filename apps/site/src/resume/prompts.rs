pub const SUMMARY_SYSTEM: &str =
    "You are a professional resume summarizer. Respond with valid JSON only.";

/// Key list shown to the model. Bounds mirror the validation in `resume::summary`.
pub const SUMMARY_KEYS: &[&str] = &[
    "Summarize the following resume README into JSON with these keys:",
    "- title: professional title",
    "- tagline: single-sentence statement",
    "- summary: 1-2 sentence overview",
    "- whatIDo: one-paragraph summary",
    "- featured: array of 5 concise bullet strings",
    "- coreCompetencies: array of 4-8 concise items",
    "- skills: object with leadership (3-10 items) and technical (3-12 items)",
    "- values: array of 3-6 leadership values",
    "- highlights: array of 3-8 measurable outcomes or differentiators",
    "Keep tone professional, confident, and concise.",
];
