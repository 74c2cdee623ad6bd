//! LLM prompt engineering for contradiction analysis

use doccheck_domain::DocumentCorpus;

/// Builds the contradiction-analysis prompt for a corpus
pub struct PromptBuilder<'a> {
    corpus: &'a DocumentCorpus,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(corpus: &'a DocumentCorpus) -> Self {
        Self { corpus }
    }

    /// Build the complete analysis prompt
    ///
    /// The result depends only on the corpus: same filenames, same order and
    /// same text always give a byte-identical prompt.
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.estimated_len());

        // 1. Role and task
        prompt.push_str(INTRODUCTION);

        // 2. Every document, in corpus order
        for (filename, text) in self.corpus.iter() {
            prompt.push_str("--- Document: ");
            prompt.push_str(filename);
            prompt.push_str(" ---\n");
            prompt.push_str(text);
            prompt.push_str(DOCUMENT_CLOSER);
        }

        // 3. Output format
        prompt.push_str(OUTPUT_INSTRUCTIONS);

        prompt
    }

    fn estimated_len(&self) -> usize {
        let documents: usize = self
            .corpus
            .iter()
            .map(|(name, text)| name.len() + text.len() + 20 + DOCUMENT_CLOSER.len())
            .sum();
        INTRODUCTION.len() + documents + OUTPUT_INSTRUCTIONS.len()
    }
}

const INTRODUCTION: &str = "You are an expert document analysis agent. Your task is to find contradictions between the following documents.\n\n";

const DOCUMENT_CLOSER: &str = "\n----------------------------------\n\n";

const OUTPUT_INSTRUCTIONS: &str = r#"
Analyze the documents above and identify any contradictions. For each contradiction you find, provide a response in a JSON object with the following structure:
{
  "contradictions": [
    {
      "id": an integer index starting from 1,
      "type": "A short, descriptive category of the conflict (e.g., 'Time Conflict', 'Policy Conflict')",
      "severity": "Rate the severity on a scale of 'Low', 'Medium', or 'High'",
      "description": "A one-sentence summary of the contradiction.",
      "details": "A detailed explanation quoting the conflicting parts from the documents.",
      "sources": ["filename1.ext", "filename2.ext"],
      "suggestion": "A clear, actionable suggestion to resolve the conflict.",
      "confidence": a float between 0.0 and 1.0 indicating your confidence in this finding
    }
  ]
}
If you find no contradictions, return an empty list: {"contradictions": []}.
Only return the JSON object, with no other text before or after it.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> DocumentCorpus {
        [("a.txt", "Meeting is at 3pm"), ("b.txt", "Meeting is at 4pm")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_prompt_layout() {
        let corpus = corpus();
        let prompt = PromptBuilder::new(&corpus).build();

        let expected_documents = "--- Document: a.txt ---\nMeeting is at 3pm\n----------------------------------\n\n\
                                  --- Document: b.txt ---\nMeeting is at 4pm\n----------------------------------\n\n";

        assert!(prompt.starts_with(INTRODUCTION));
        assert!(prompt.ends_with(OUTPUT_INSTRUCTIONS));
        assert_eq!(
            &prompt[INTRODUCTION.len()..prompt.len() - OUTPUT_INSTRUCTIONS.len()],
            expected_documents
        );
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let first = PromptBuilder::new(&corpus()).build();
        let second = PromptBuilder::new(&corpus()).build();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_prompt_follows_corpus_order() {
        let reversed: DocumentCorpus = [("b.txt", "Meeting is at 4pm"), ("a.txt", "Meeting is at 3pm")]
            .into_iter()
            .collect();
        let prompt = PromptBuilder::new(&reversed).build();

        let b = prompt.find("--- Document: b.txt ---").unwrap();
        let a = prompt.find("--- Document: a.txt ---").unwrap();
        assert!(b < a);
        assert_ne!(prompt, PromptBuilder::new(&corpus()).build());
    }

    #[test]
    fn test_prompt_includes_schema_and_rule() {
        let prompt = PromptBuilder::new(&corpus()).build();
        for field in ["\"id\"", "\"type\"", "\"severity\"", "\"description\"", "\"details\"", "\"sources\"", "\"suggestion\"", "\"confidence\""] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.contains(r#"{"contradictions": []}"#));
        assert!(prompt.contains("Only return the JSON object, with no other text before or after it."));
    }

    #[test]
    fn test_estimated_len_covers_prompt() {
        let corpus = corpus();
        let builder = PromptBuilder::new(&corpus);
        assert!(builder.estimated_len() >= builder.build().len());
    }
}
