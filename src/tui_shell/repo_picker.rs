use super::*;
use crate::section::RepoOption;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum PickerOutcome {
    Pending,
    Cancelled,
    Selected { value: String, is_custom: bool },
}

/// Repository chooser: origin, upstream, all repositories, or a typed
/// `owner/name`.
#[derive(Debug)]
pub(super) struct RepoPicker {
    pub(super) options: Vec<RepoOption>,
    pub(super) cursor: usize,
    /// Set while the user types a custom repository.
    pub(super) custom: Option<Input>,
    /// Repo in effect when the picker opened.
    pub(super) current: String,
}

impl RepoPicker {
    /// The cursor starts on the option matching `current`, or on the last
    /// entry (all repositories) when none does.
    pub(super) fn new(options: Vec<RepoOption>, current: &str) -> Self {
        let cursor = options
            .iter()
            .position(|o| o.value == current)
            .unwrap_or(options.len().saturating_sub(1));
        Self {
            options,
            cursor,
            custom: None,
            current: current.to_string(),
        }
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        if let Some(input) = self.custom.as_mut() {
            return match key.code {
                KeyCode::Esc => {
                    self.custom = None;
                    PickerOutcome::Pending
                }
                KeyCode::Enter => {
                    let value = input.buf.trim().to_string();
                    if value.is_empty() {
                        self.custom = None;
                        return PickerOutcome::Pending;
                    }
                    PickerOutcome::Selected {
                        value,
                        is_custom: true,
                    }
                }
                KeyCode::Backspace => {
                    input.backspace();
                    PickerOutcome::Pending
                }
                KeyCode::Left => {
                    input.move_left();
                    PickerOutcome::Pending
                }
                KeyCode::Right => {
                    input.move_right();
                    PickerOutcome::Pending
                }
                KeyCode::Char(c) if !c.is_whitespace() => {
                    input.insert_char(c);
                    PickerOutcome::Pending
                }
                _ => PickerOutcome::Pending,
            };
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => PickerOutcome::Cancelled,
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                PickerOutcome::Pending
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.options.len() {
                    self.cursor += 1;
                }
                PickerOutcome::Pending
            }
            KeyCode::Char('c') => {
                self.custom = Some(Input::default());
                PickerOutcome::Pending
            }
            KeyCode::Enter => match self.options.get(self.cursor) {
                Some(opt) => PickerOutcome::Selected {
                    value: opt.value.clone(),
                    is_custom: false,
                },
                None => PickerOutcome::Cancelled,
            },
            _ => PickerOutcome::Pending,
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/repo_picker_tests.rs"]
mod tests;
