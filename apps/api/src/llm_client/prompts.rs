// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it and builds on these.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Audience framing shared by every career prompt.
pub const AUDIENCE_INSTRUCTION: &str = "\
    The reader is a student in India choosing a career path. \
    Quote salaries in Indian Rupees (INR) as plain integers per year. \
    Keep every percentage-like field an integer between 0 and 100.";
