#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

use tui_textarea::Input;

use crate::domain::models::TextArea;

/// Keyboard focus over the fields of one form, plus the editor bound to the
/// focused field. The form does not own the record: callers copy
/// `value()` back into it after every edit.
pub struct Form<F: Copy + PartialEq + 'static> {
    fields: &'static [F],
    focus: usize,
    masked: Option<F>,
    pub editor: tui_textarea::TextArea<'static>,
}

impl<F: Copy + PartialEq + 'static> Form<F> {
    pub fn new(fields: &'static [F], masked: Option<F>) -> Form<F> {
        return Form {
            fields,
            focus: 0,
            masked,
            editor: TextArea::field("", "", None),
        };
    }

    pub fn focused(&self) -> F {
        return self.fields[self.focus];
    }

    /// Moves focus to `field` and loads `value` into the editor.
    pub fn focus(&mut self, field: F, label: &str, value: &str) {
        if let Some(idx) = self.fields.iter().position(|f| return *f == field) {
            self.focus = idx;
        }

        let mut mask = None;
        if self.masked == Some(field) {
            mask = Some('•');
        }

        self.editor = TextArea::field(label, value, mask);
    }

    pub fn next_field(&self) -> F {
        return self.fields[(self.focus + 1) % self.fields.len()];
    }

    pub fn previous_field(&self) -> F {
        let len = self.fields.len();
        return self.fields[(self.focus + len - 1) % len];
    }

    /// Feeds a key to the editor. Returns true when the text changed.
    pub fn input(&mut self, input: Input) -> bool {
        return self.editor.input(input);
    }

    pub fn value(&self) -> String {
        return self.editor.lines().join("\n");
    }
}
