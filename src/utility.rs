//! Editor utilities and the session that runs them.

use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::editor::{EditorAdapter, Prompt};
use crate::error::Result;
use crate::functions;
use crate::mixer;
use crate::processor::expand;
use crate::transform::{self, Substitution};

/// What running a utility did to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The selection was replaced, or session state changed
    Applied,
    /// Nothing to do, the editor was not touched
    Unchanged,
    /// The user cancelled or left a required input empty
    Cancelled,
}

fn commit<E: EditorAdapter + ?Sized>(editor: &mut E, old: &str, new: &str) -> Outcome {
    if old == new {
        return Outcome::Unchanged;
    }
    editor.replace_selection(new);
    Outcome::Applied
}

/// Regex substitution over the selection
pub fn pattern_substitute<E: EditorAdapter + ?Sized>(
    editor: &mut E,
    substitution: &Substitution,
) -> Outcome {
    let Some(selection) = editor.selection() else {
        return Outcome::Unchanged;
    };
    let output = substitution.apply(&selection);
    commit(editor, &selection, &output)
}

/// Replace the selection with `f(selection)`
pub fn whole_text_transform<E, F>(editor: &mut E, f: F) -> Result<Outcome>
where
    E: EditorAdapter + ?Sized,
    F: FnOnce(&str) -> Result<String>,
{
    let Some(selection) = editor.selection() else {
        return Ok(Outcome::Unchanged);
    };
    let output = f(&selection)?;
    Ok(commit(editor, &selection, &output))
}

/// Replace every line of the selection with `f(line)`
pub fn per_line_transform<E, F>(editor: &mut E, f: F) -> Outcome
where
    E: EditorAdapter + ?Sized,
    F: FnMut(&str) -> String,
{
    let Some(selection) = editor.selection() else {
        return Outcome::Unchanged;
    };
    let output = selection.split('\n').map(f).collect::<Vec<_>>().join("\n");
    commit(editor, &selection, &output)
}

/// Replace the lines of the selection with `f(lines)`
pub fn line_array_transform<E, F>(editor: &mut E, f: F) -> Outcome
where
    E: EditorAdapter + ?Sized,
    F: FnOnce(Vec<String>) -> Vec<String>,
{
    let Some(selection) = editor.selection() else {
        return Outcome::Unchanged;
    };
    let lines = selection.split('\n').map(str::to_owned).collect();
    let output = f(lines).join("\n");
    commit(editor, &selection, &output)
}

/// Put `f(selection)` in front of the selection, or at the cursor when
/// nothing is selected
pub fn insert_at_start<E, F>(editor: &mut E, f: F) -> Outcome
where
    E: EditorAdapter + ?Sized,
    F: FnOnce(&str) -> String,
{
    let selection = editor.selection().unwrap_or_default();
    let inserted = f(&selection);
    editor.replace_selection(&format!("{inserted}{selection}"));
    Outcome::Applied
}

/// Put `f(selection)` after the selection, or at the cursor when nothing is
/// selected
pub fn insert_at_end<E, F>(editor: &mut E, f: F) -> Outcome
where
    E: EditorAdapter + ?Sized,
    F: FnOnce(&str) -> String,
{
    let selection = editor.selection().unwrap_or_default();
    let inserted = f(&selection);
    editor.replace_selection(&format!("{selection}{inserted}"));
    Outcome::Applied
}

macro_rules! utilities {
    ($($variant:ident => $id:literal,)+) => {
        /// A command the host can bind
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Utility {
            $($variant,)+
        }

        impl Utility {
            pub const ALL: &'static [Utility] = &[$(Utility::$variant,)+];

            /// Command identifier
            pub fn id(self) -> &'static str {
                match self {
                    $(Utility::$variant => $id,)+
                }
            }
        }
    };
}

utilities! {
    TogglePanel => "toggle-panel",
    Capitalize => "capitalize",
    CamelCase => "camel-case",
    SpaceByUpper => "space-by-upper",
    ReverseAssignment => "reverse-assignment",
    UnixToWinSlash => "unix-to-win-slash",
    WinToUnixSlash => "win-to-unix-slash",
    SingleToDoubleSlash => "single-to-double-slash",
    DoubleToSingleSlash => "double-to-single-slash",
    UrlEncode => "url-encode",
    UrlDecode => "url-decode",
    Regnize => "regnize",
    HeaderToBookmark => "header-to-bookmark",
    Mixer => "mixer",
    RemoveDuplicatedLines => "remove-duplicated-lines",
    RemoveEmptyLines => "remove-empty-lines",
    JoinLines => "join-lines",
    SplitLines => "split-lines",
    SortNumericallyAscending => "sort-numerically-ascending",
    IndentOneSpace => "indent-one-space",
    OutdentOneSpace => "outdent-one-space",
    InsertIsoDate => "insert-iso-date",
    InsertIsoTimeDate => "insert-iso-timedate",
    InsertUuid => "insert-uuid",
    InsertTextAtEnd => "insert-text-at-end",
    InsertTextAtStart => "insert-text-at-start",
}

impl FromStr for Utility {
    type Err = UnknownUtility;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Utility::ALL
            .iter()
            .copied()
            .find(|utility| utility.id() == s)
            .ok_or_else(|| UnknownUtility(s.to_owned()))
    }
}

impl fmt::Display for Utility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown utility `{0}`")]
pub struct UnknownUtility(pub String);

/// Per-editor state the utilities share
pub struct Session<E> {
    editor: E,
    config: Config,
    panel_visible: bool,
}

impl<E: EditorAdapter> Session<E> {
    pub fn new(editor: E, config: Config) -> Self {
        Self {
            editor,
            config,
            panel_visible: false,
        }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn into_editor(self) -> E {
        self.editor
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Counter value the first `\c` of an expression produces
    fn selection_number(&self) -> u64 {
        self.config.first_selection_number
    }

    /// Run a utility against the editor.
    /// On error the selection is left unchanged.
    pub fn run(&mut self, utility: Utility) -> Result<Outcome> {
        tracing::debug!(%utility, "running utility");
        let result = self.dispatch(utility);
        match &result {
            Ok(outcome) => tracing::debug!(%utility, ?outcome, "utility finished"),
            Err(err) => tracing::warn!(%utility, %err, "utility failed"),
        }
        result
    }

    fn dispatch(&mut self, utility: Utility) -> Result<Outcome> {
        let editor = &mut self.editor;
        let outcome = match utility {
            Utility::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                Outcome::Applied
            }
            Utility::Capitalize => pattern_substitute(editor, &transform::CAPITALIZE),
            Utility::CamelCase => pattern_substitute(editor, &transform::CAMEL_CASE),
            Utility::SpaceByUpper => pattern_substitute(editor, &transform::SPACE_BY_UPPER),
            Utility::ReverseAssignment => {
                pattern_substitute(editor, &transform::REVERSE_ASSIGNMENT)
            }
            Utility::UnixToWinSlash => pattern_substitute(editor, &transform::UNIX_TO_WIN_SLASH),
            Utility::WinToUnixSlash => pattern_substitute(editor, &transform::WIN_TO_UNIX_SLASH),
            Utility::SingleToDoubleSlash => {
                pattern_substitute(editor, &transform::SINGLE_TO_DOUBLE_SLASH)
            }
            Utility::DoubleToSingleSlash => {
                pattern_substitute(editor, &transform::DOUBLE_TO_SINGLE_SLASH)
            }
            Utility::UrlEncode => {
                whole_text_transform(editor, |text| Ok(transform::url_encode(text)))?
            }
            Utility::UrlDecode => whole_text_transform(editor, transform::url_decode)?,
            Utility::Regnize => {
                whole_text_transform(editor, |text| Ok(functions::regnize(text, true)))?
            }
            Utility::HeaderToBookmark => {
                whole_text_transform(editor, |text| Ok(transform::header_to_bookmark(text)))?
            }
            Utility::Mixer => return self.mixer(),
            Utility::RemoveDuplicatedLines => {
                line_array_transform(editor, transform::remove_duplicated_lines)
            }
            Utility::RemoveEmptyLines => {
                line_array_transform(editor, transform::remove_empty_lines)
            }
            Utility::JoinLines => return Ok(self.lines_with_expression(transform::join_lines)),
            Utility::SplitLines => return Ok(self.lines_with_expression(transform::split_lines)),
            Utility::SortNumericallyAscending => {
                line_array_transform(editor, transform::sort_numerically_ascending)
            }
            Utility::IndentOneSpace => per_line_transform(editor, transform::indent_one_space),
            Utility::OutdentOneSpace => per_line_transform(editor, transform::outdent_one_space),
            Utility::InsertIsoDate => insert_at_end(editor, |_| functions::iso_date()),
            Utility::InsertIsoTimeDate => insert_at_end(editor, |_| functions::iso_time_date()),
            Utility::InsertUuid => insert_at_end(editor, |_| functions::uuid_v4()),
            Utility::InsertTextAtEnd => return Ok(self.insert_expression(Edge::End)),
            Utility::InsertTextAtStart => return Ok(self.insert_expression(Edge::Start)),
        };
        Ok(outcome)
    }

    /// Ask for `prompts`; `None` when cancelled or any answer is empty
    fn ask(&mut self, prompts: &[Prompt]) -> Option<Vec<String>> {
        let inputs = self.editor.prompt_inputs(prompts)?;
        if inputs.len() < prompts.len() || inputs.iter().any(String::is_empty) {
            return None;
        }
        Some(inputs)
    }

    fn mixer(&mut self) -> Result<Outcome> {
        if self.editor.selection().is_none() {
            return Ok(Outcome::Unchanged);
        }

        let defaults = &self.config.mixer;
        let prompts = [
            Prompt::new("Start Section Line Pattern").with_initial(defaults.start_pattern.clone()),
            Prompt::new("End Section Line Pattern").with_initial(defaults.end_pattern.clone()),
            Prompt::new("Mixer").with_initial(defaults.template.clone()),
        ];
        let Some(inputs) = self.ask(&prompts) else {
            return Ok(Outcome::Cancelled);
        };

        whole_text_transform(&mut self.editor, |text| {
            mixer::mix(text, &inputs[0], &inputs[1], &inputs[2])
        })
    }

    fn lines_with_expression(
        &mut self,
        f: fn(Vec<String>, &str, u64, &str) -> Vec<String>,
    ) -> Outcome {
        let Some(selection) = self.editor.selection() else {
            return Outcome::Unchanged;
        };
        let Some(inputs) = self.ask(&[Prompt::new("Expression")]) else {
            return Outcome::Cancelled;
        };

        let selection_number = self.selection_number();
        line_array_transform(&mut self.editor, |lines| {
            f(lines, &inputs[0], selection_number, &selection)
        })
    }

    fn insert_expression(&mut self, edge: Edge) -> Outcome {
        let Some(inputs) = self.ask(&[Prompt::new("Expression")]) else {
            return Outcome::Cancelled;
        };

        let selection_number = self.selection_number();
        let expand_input = |selection: &str| expand(&inputs[0], selection_number, selection);
        match edge {
            Edge::Start => insert_at_start(&mut self.editor, expand_input),
            Edge::End => insert_at_end(&mut self.editor, expand_input),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Start,
    End,
}
