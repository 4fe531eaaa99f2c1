// Prompt constants for the LLM-backed entity tagger.

/// System prompt for entity tagging: JSON only, verbatim spans only.
pub const ENTITY_TAG_SYSTEM: &str = "\
You are a precise named-entity tagger for resumes. \
You MUST respond with valid JSON only. \
Do NOT include any text outside the JSON object. \
Do NOT use markdown code fences. \
Copy every entity text VERBATIM from the input; never normalise, translate, or invent spans.";

pub const ENTITY_TAG_PROMPT_TEMPLATE: &str = r#"Tag the named entities in the resume text below.

RESUME TEXT:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "entities": [
    {"text": "exact substring of the resume", "label": "PERSON" | "ORG" | "GPE" | "DATE"}
  ]
}

RULES:
- List entities in the order they first appear in the text.
- PERSON is a human name; the candidate's own name usually comes first.
- Return {"entities": []} if there are none."#;
