//! Optional reasoning layer on top of the identification tool.
//!
//! Two paths, picked at call time: the direct path runs the pipeline and
//! returns its report as-is; the enhanced path additionally hands the
//! ranked candidates to the Claude CLI for a verdict. Any failure on the
//! enhanced path falls back to the direct result, so callers always get a
//! well-formed answer.

use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{LyrseekError, Result};
use crate::pipeline::{MatchReport, Pipeline};

/// Which backend produced the final answer
pub const BACKEND_DIRECT: &str = "direct";
pub const BACKEND_CLAUDE: &str = "claude";

/// Outcome of one snippet run
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// "direct" when the tool answered alone, "claude" when the agent
    /// reviewed the candidates
    pub backend: String,
    pub result: MatchReport,
    /// Agent's one-line reasoning, when the enhanced path ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
}

/// Response schema the agent is asked to produce
#[derive(Debug, Clone, Deserialize)]
struct AgentVerdict {
    /// Index into the ranked candidate list (0 = pipeline's best), or null
    /// to keep the pipeline's ranking
    #[serde(default)]
    best_index: Option<usize>,
    #[serde(default)]
    reasoning: Option<String>,
}

const VERDICT_PROMPT: &str = r#"A lyrics-identification tool scanned the web for a song matching a
transcribed snippet. The snippet may contain transcription errors; prefer the
candidate whose matched fragment reads like the snippet, not just the highest
score.

Snippet: {{snippet}}

Ranked candidates (JSON):
{{candidates}}

Respond ONLY with JSON, no other text:
{
  "best_index": 0,
  "reasoning": "One line explaining the pick"
}

Use null for best_index to keep the tool's own ranking."#;

/// Run identification for a snippet, delegating the final verdict to the
/// Claude CLI when it is available.
pub fn run(pipeline: &Pipeline, snippet: &str, max_pages: usize, use_agent: bool) -> RunOutcome {
    let report = pipeline.identify(snippet, max_pages);

    if !use_agent || report.best.is_none() || !check_claude() {
        return RunOutcome {
            backend: BACKEND_DIRECT.to_string(),
            result: report,
            verdict: None,
        };
    }

    match review_candidates(snippet, &report) {
        Ok((result, verdict)) => RunOutcome {
            backend: BACKEND_CLAUDE.to_string(),
            result,
            verdict,
        },
        // Enhanced path is best-effort; the direct answer stands
        Err(_) => RunOutcome {
            backend: BACKEND_DIRECT.to_string(),
            result: report,
            verdict: None,
        },
    }
}

/// Ask the agent to review the ranked candidates and possibly promote one
fn review_candidates(snippet: &str, report: &MatchReport) -> Result<(MatchReport, Option<String>)> {
    let candidates_json = serde_json::to_string_pretty(report)?;
    let prompt = VERDICT_PROMPT
        .replace("{{snippet}}", snippet)
        .replace("{{candidates}}", &candidates_json);

    let system_prompt = "You are a song identification assistant. Respond only with valid JSON \
         matching the schema provided. Do not include any text before or after the JSON.";

    let output = Command::new("claude")
        .args([
            "-p",
            "--output-format",
            "json",
            "--max-turns",
            "1",
            "--system-prompt",
            system_prompt,
            &prompt,
        ])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LyrseekError::ClaudeFailed(stderr.to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let wrapper: serde_json::Value = serde_json::from_str(&stdout)?;
    let result_text = wrapper["result"]
        .as_str()
        .ok_or_else(|| LyrseekError::ClaudeFailed("No result in response".into()))?;

    let verdict: AgentVerdict = serde_json::from_str(&strip_code_fencing(result_text))
        .map_err(|e| LyrseekError::ClaudeFailed(format!("Failed to parse verdict: {}", e)))?;

    Ok((apply_verdict(report, &verdict), verdict.reasoning))
}

/// Rebuild the report with the agent's pick promoted to best
fn apply_verdict(report: &MatchReport, verdict: &AgentVerdict) -> MatchReport {
    let Some(index) = verdict.best_index else {
        return report.clone();
    };
    if index == 0 {
        return report.clone();
    }

    // Flatten back to a ranked list, promote, and re-split
    let mut ranked: Vec<_> = report
        .best
        .iter()
        .chain(report.alternatives.iter())
        .cloned()
        .collect();
    if index >= ranked.len() {
        return report.clone();
    }
    let promoted = ranked.remove(index);
    ranked.insert(0, promoted);

    MatchReport {
        best: ranked.first().cloned(),
        alternatives: ranked.into_iter().skip(1).collect(),
    }
}

/// Strip markdown code fencing from a string (e.g., ```json ... ```)
fn strip_code_fencing(s: &str) -> String {
    let trimmed = s.trim();
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
        return after.trim().to_string();
    }
    trimmed.to_string()
}

/// Check if the Claude CLI is available
pub fn check_claude() -> bool {
    Command::new("claude")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MatchSummary;

    fn summary(title: &str, score: f64) -> MatchSummary {
        MatchSummary {
            title: title.to_string(),
            artist: None,
            url: format!("https://genius.com/{}", title),
            score,
            fragment: None,
        }
    }

    #[test]
    fn test_strip_code_fencing() {
        assert_eq!(strip_code_fencing("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fencing("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(
            strip_code_fencing("Here it is:\n```\n{\"a\": 1}\n```"),
            "{\"a\": 1}"
        );
    }

    #[test]
    fn test_apply_verdict_promotes_alternative() {
        let report = MatchReport {
            best: Some(summary("a", 90.0)),
            alternatives: vec![summary("b", 80.0), summary("c", 70.0)],
        };
        let verdict = AgentVerdict {
            best_index: Some(2),
            reasoning: None,
        };
        let updated = apply_verdict(&report, &verdict);
        assert_eq!(updated.best.unwrap().title, "c");
        assert_eq!(updated.alternatives[0].title, "a");
        assert_eq!(updated.alternatives[1].title, "b");
    }

    #[test]
    fn test_apply_verdict_null_keeps_ranking() {
        let report = MatchReport {
            best: Some(summary("a", 90.0)),
            alternatives: vec![summary("b", 80.0)],
        };
        let verdict = AgentVerdict {
            best_index: None,
            reasoning: Some("keep".into()),
        };
        let updated = apply_verdict(&report, &verdict);
        assert_eq!(updated.best.unwrap().title, "a");
    }

    #[test]
    fn test_apply_verdict_out_of_range() {
        let report = MatchReport {
            best: Some(summary("a", 90.0)),
            alternatives: vec![],
        };
        let verdict = AgentVerdict {
            best_index: Some(5),
            reasoning: None,
        };
        let updated = apply_verdict(&report, &verdict);
        assert_eq!(updated.best.unwrap().title, "a");
    }
}
