//! Request file loading

use anyhow::{Context, Result};
use qa_eval_domain::EvaluationRequest;
use std::path::Path;

/// Format of a request file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the format from the file extension; anything not YAML is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse a list of requests from a string
pub fn parse_requests(content: &str, format: InputFormat) -> Result<Vec<EvaluationRequest>> {
    let requests = match format {
        InputFormat::Json => {
            serde_json::from_str(content).context("Failed to parse JSON request list")?
        }
        InputFormat::Yaml => {
            serde_yaml::from_str(content).context("Failed to parse YAML request list")?
        }
    };
    Ok(requests)
}

/// Read a list of requests from a JSON or YAML file
pub fn load_requests(path: &Path) -> Result<Vec<EvaluationRequest>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;

    parse_requests(&content, InputFormat::from_path(path))
        .with_context(|| format!("Invalid request file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.yaml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("requests")), InputFormat::Json);
    }

    #[test]
    fn test_parse_json_requests() {
        let content = r#"[
            {"question": "Q1", "answer": "A1"},
            {"question": "Q2", "answer": "A2", "groundTruth": "G2", "retrievedContext": ["p1", "p2"]}
        ]"#;

        let requests = parse_requests(content, InputFormat::Json).unwrap();

        assert_eq!(requests.len(), 2);
        assert!(!requests[0].has_retrieved_context());
        assert_eq!(requests[1].ground_truth.as_deref(), Some("G2"));
        assert_eq!(requests[1].retrieved_context.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_parse_yaml_requests() {
        let content = "\
- question: What is Rust?
  answer: A systems language.
- question: What is Tokio?
  answer: An async runtime.
  retrievedContext:
    - Tokio is a runtime for asynchronous Rust.
";

        let requests = parse_requests(content, InputFormat::Yaml).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].question, "What is Rust?");
        assert!(requests[1].has_retrieved_context());
    }

    #[test]
    fn test_parse_rejects_missing_answer() {
        let result = parse_requests(r#"[{"question": "Q"}]"#, InputFormat::Json);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_fails_with_path() {
        let err = load_requests(Path::new("/nonexistent/requests.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/requests.json"));
    }
}
