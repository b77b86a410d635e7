use std::fmt::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::candidates::Candidate;
use crate::sampler::{self, IndexSource, Selection};

/// Sent instead of a recommendation when the candidate list is empty.
pub const PLACEHOLDER: &str = ":thinking_face:";

const HEADER: &str = "@here そろそろお昼にしませんか？今日のオススメは\n";
const FENCE: &str = "```";

/// Message layout: mention and intro line, then the picks inside a code fence.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    header: String,
    fence: String,
}

impl MessageTemplate {
    pub fn new() -> Self {
        Self {
            header: HEADER.to_string(),
            fence: FENCE.to_string(),
        }
    }

    /// Descriptions are inserted verbatim, one per line.
    pub fn render(&self, selection: &Selection) -> Result<String> {
        let mut out = String::with_capacity(self.header.len() + 2 * self.fence.len());
        out.push_str(&self.header);
        out.push_str(&self.fence);
        for candidate in selection.values() {
            writeln!(out, "{}", candidate.description).context("Failed to render message")?;
        }
        out.push_str(&self.fence);
        Ok(out)
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the message text for one run.
pub fn compose<S: IndexSource>(
    candidates: &[Candidate],
    source: &mut S,
    template: &MessageTemplate,
) -> Result<String> {
    if candidates.is_empty() {
        info!("Candidate list is empty, sending placeholder");
        return Ok(PLACEHOLDER.to_string());
    }

    let selection = sampler::select(candidates, source);
    template.render(&selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::testing::FixedSource;

    fn list(items: &[&str]) -> Vec<Candidate> {
        items.iter().map(|s| Candidate::new(*s)).collect()
    }

    #[test]
    fn test_single_pick_layout() {
        let candidates = list(&["A", "B", "C"]);
        let mut source = FixedSource::new(vec![0]);
        let text = compose(&candidates, &mut source, &MessageTemplate::new()).unwrap();

        assert_eq!(
            text,
            "@here そろそろお昼にしませんか？今日のオススメは\n```A\n```"
        );
        assert!(!text.contains('B'));
        assert!(!text.contains('C'));
    }

    #[test]
    fn test_three_picks_each_on_own_line() {
        let names: Vec<String> = (0..12).map(|i| format!("shop{i}")).collect();
        let candidates: Vec<Candidate> = names.iter().map(Candidate::new).collect();
        let mut source = FixedSource::new(vec![11, 3, 7]);
        let text = compose(&candidates, &mut source, &MessageTemplate::new()).unwrap();

        let block = text.split_once("```").unwrap().1;
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.contains(&"shop11"));
        assert!(lines.contains(&"shop3"));
        assert!(lines.contains(&"shop7"));
        assert_eq!(lines[3], "```");
    }

    #[test]
    fn test_empty_list_uses_placeholder_without_sampling() {
        let mut source = FixedSource::new(vec![0]);
        let text = compose(&[], &mut source, &MessageTemplate::new()).unwrap();

        assert_eq!(text, ":thinking_face:");
        assert_eq!(source.calls, 0);
    }

    #[test]
    fn test_empty_selection_renders_bare_template() {
        let text = MessageTemplate::new().render(&Selection::new()).unwrap();
        assert_eq!(text, "@here そろそろお昼にしませんか？今日のオススメは\n``````");
    }

    #[test]
    fn test_description_not_escaped() {
        let candidates = list(&["<b>&\"うどん\"</b>"]);
        let mut source = FixedSource::new(vec![0]);
        let text = compose(&candidates, &mut source, &MessageTemplate::new()).unwrap();
        assert!(text.contains("```<b>&\"うどん\"</b>\n```"));
    }
}
