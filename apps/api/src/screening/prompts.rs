// All LLM prompt constants for the Screening module.

/// Worked example embedded in the analysis prompt to anchor the reply shape.
/// Running it back through the verdict parser must recover the same verdict.
pub const ANALYSIS_EXAMPLE: &str = r#"{
  "classification": "Relevant",
  "score": 85,
  "reasoning": ["Strong experience with Python and Flask matches requirements.", "5+ years of experience aligns with the senior role.", "Degree in Computer Science is as specified."]
}"#;

/// Analysis prompt template.
/// Replace `{example}`, `{jd_text}` and `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume based on the provided job description.
Your task is to provide a detailed analysis in JSON format.
The JSON object must contain three keys:
1. "classification": A single word, either "Relevant" or "Irrelevant".
2. "score": An integer between 0 and 100 representing the compatibility percentage.
3. "reasoning": An array of short strings (bullet points) explaining the score and classification. Provide 2-3 key reasons.

Example Response:
{example}

---
Job Description:
{jd_text}
---
Resume:
{resume_text}
---
JSON Analysis:"#;
