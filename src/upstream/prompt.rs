use crate::api::request::EvaluationRequest;

const SYSTEM_PROMPT: &str = "
You are an instructional feedback assistant for a college-level course.
Your job is to evaluate a learner's response against a learning objective and explicit criteria.

Rules:
- Be supportive, neutral, and precise.
- Do not reveal chain-of-thought.
- Do not mention being an AI.
- Return ONLY valid JSON.
- Do NOT include markdown or extra text.
";

// Field names and verdict values are parsed by the browser client, keep them in sync.
const RESPONSE_FORMAT: &str = r#"Evaluate the response.

Return ONLY JSON with exactly these fields:
{
  "verdict": "Correct" | "Not quite right" | "Incorrect",
  "summary": "1–3 sentences referencing the learning objective or criteria",
  "criteria_feedback": [
    {
      "criterion": "string",
      "met": true | false,
      "comment": "brief explanation"
    }
  ],
  "next_step": "one concrete suggestion for improvement"
}
"#;

/// System instructions and user content sent to the model as two messages.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    pub fn for_request(request: &EvaluationRequest) -> Self {
        PromptPair {
            system: SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(request),
        }
    }
}

fn build_user_prompt(request: &EvaluationRequest) -> String {
    format!(
        "\nLearning objective:\n{}\n\nEvaluation criteria:\n{}\n\nLearner response:\n{}\n\n{}",
        request.learning_objective,
        numbered_criteria(&request.criteria),
        request.response_text,
        RESPONSE_FORMAT
    )
}

/// One `"<n>. <criterion>"` line per criterion, counting from 1.
fn numbered_criteria(criteria: &[String]) -> String {
    criteria
        .iter()
        .enumerate()
        .map(|(i, criterion)| format!("{}. {}", i + 1, criterion))
        .collect::<Vec<_>>()
        .join("\n")
}
