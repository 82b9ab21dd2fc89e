//! Boundary to the host editor.

use std::collections::VecDeque;

/// Label of one free-text value requested from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub label: String,
    /// Text the input starts with
    pub initial: Option<String>,
}

impl Prompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            initial: None,
        }
    }

    pub fn with_initial(mut self, initial: Option<String>) -> Self {
        self.initial = initial;
        self
    }
}

/// Operations the host editor provides
pub trait EditorAdapter {
    /// Selected text, `None` when nothing is selected
    fn selection(&self) -> Option<String>;

    /// Replace the current selection with `text`
    fn replace_selection(&mut self, text: &str);

    /// Ask the user for one value per prompt, in order.
    /// `None` means the user cancelled.
    fn prompt_inputs(&mut self, prompts: &[Prompt]) -> Option<Vec<String>>;
}

/// Editor that keeps its selection in memory.
///
/// Prompts are answered from a queue of canned replies; an empty queue
/// behaves like a cancelled prompt.
#[derive(Debug, Clone, Default)]
pub struct MemoryEditor {
    selection: String,
    replies: VecDeque<Vec<String>>,
    prompts_seen: Vec<Vec<Prompt>>,
    commits: usize,
}

impl MemoryEditor {
    pub fn new(selection: impl Into<String>) -> Self {
        Self {
            selection: selection.into(),
            ..Self::default()
        }
    }

    /// Queue the answer to the next prompt
    pub fn reply<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies
            .push_back(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn text(&self) -> &str {
        &self.selection
    }

    /// Number of times the selection was replaced
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Prompts shown so far, in order
    pub fn prompts_seen(&self) -> &[Vec<Prompt>] {
        &self.prompts_seen
    }
}

impl EditorAdapter for MemoryEditor {
    fn selection(&self) -> Option<String> {
        (!self.selection.is_empty()).then(|| self.selection.clone())
    }

    fn replace_selection(&mut self, text: &str) {
        self.selection = text.to_owned();
        self.commits += 1;
    }

    fn prompt_inputs(&mut self, prompts: &[Prompt]) -> Option<Vec<String>> {
        self.prompts_seen.push(prompts.to_vec());
        let mut values = self.replies.pop_front()?;
        values.resize(prompts.len(), String::new());
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_none() {
        let editor = MemoryEditor::new("");
        assert_eq!(editor.selection(), None);
        assert_eq!(MemoryEditor::new("x").selection().as_deref(), Some("x"));
    }

    #[test]
    fn test_replace_counts_commits() {
        let mut editor = MemoryEditor::new("a");
        editor.replace_selection("b");
        assert_eq!(editor.text(), "b");
        assert_eq!(editor.commits(), 1);
    }

    #[test]
    fn test_prompt_replies_in_order() {
        let mut editor = MemoryEditor::new("a").reply(["one"]).reply(["x", "y", "z"]);
        let prompts = [Prompt::new("A"), Prompt::new("B")];

        assert_eq!(
            editor.prompt_inputs(&prompts),
            Some(vec!["one".to_owned(), String::new()])
        );
        assert_eq!(
            editor.prompt_inputs(&prompts[..1]),
            Some(vec!["x".to_owned()])
        );
        assert_eq!(editor.prompt_inputs(&prompts), None);
        assert_eq!(editor.prompts_seen().len(), 3);
    }
}
