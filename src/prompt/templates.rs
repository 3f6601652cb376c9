//! Prompt texts sent to the routing model

/// System prompt for every routing request
pub const SYSTEM_PROMPT: &str = "You are an MCP tool router.
Respond ONLY in valid JSON.
Do not explain anything.
Do not output text outside JSON.
Do not invent tools.

Output format:
{\"tool\": \"<tool_name>\", \"arguments\": {...}}

If no tool is needed, use:
{\"tool\": \"none\", \"arguments\": {}}";

/// User prompt for the primary routing request
pub fn routing_prompt(catalog_text: &str, user_text: &str) -> String {
    format!(
        "Available tools:\n{}\n\nUser request: {}\n\nRespond with JSON only.",
        catalog_text, user_text
    )
}

/// User prompt for the single repair request
pub fn correction_prompt(invalid_output: &str, reason: &str, catalog_text: &str) -> String {
    format!(
        "Your previous output was invalid JSON:\n{}\n\nProblem: {}\n\nAvailable tools:\n{}\n\n\
         Respond with ONLY valid JSON in this exact format: {{\"tool\": \"<tool_name>\", \"arguments\": {{}}}}",
        invalid_output, reason, catalog_text
    )
}
