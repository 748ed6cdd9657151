//! A tiny field-focused form model shared by every editing modal.

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Select(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            kind: FieldKind::Text,
        }
    }

    pub fn select(label: &'static str, options: Vec<String>, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            kind: FieldKind::Select(options),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
    pub busy: bool,
}

impl FormState {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            fields,
            focus: 0,
            error: None,
            busy: false,
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type into the focused field. Select fields ignore typed text.
    pub fn input(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind == FieldKind::Text {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind == FieldKind::Text {
                field.value.pop();
            }
        }
    }

    /// Cycle the focused select field through its options.
    pub fn cycle(&mut self, forward: bool) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if let FieldKind::Select(options) = &field.kind {
                if options.is_empty() {
                    return;
                }
                let current = options.iter().position(|o| *o == field.value);
                let next = match (current, forward) {
                    (Some(i), true) => (i + 1) % options.len(),
                    (Some(i), false) => (i + options.len() - 1) % options.len(),
                    (None, _) => 0,
                };
                field.value = options[next].clone();
            }
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::new(
            "Test",
            vec![
                FormField::text("Name", ""),
                FormField::select(
                    "Kind",
                    vec!["A".to_string(), "B".to_string(), "C".to_string()],
                    "B",
                ),
            ],
        )
    }

    #[test]
    fn typing_targets_only_text_fields() {
        let mut f = form();
        f.input('x');
        f.input('y');
        assert_eq!(f.value(0), "xy");
        f.backspace();
        assert_eq!(f.value(0), "x");

        f.focus_next();
        f.input('z');
        assert_eq!(f.value(1), "B");
    }

    #[test]
    fn select_cycles_and_wraps() {
        let mut f = form();
        f.focus = 1;
        f.cycle(true);
        assert_eq!(f.value(1), "C");
        f.cycle(true);
        assert_eq!(f.value(1), "A");
        f.cycle(false);
        assert_eq!(f.value(1), "C");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut f = form();
        f.focus_prev();
        assert_eq!(f.focus, 1);
        f.focus_next();
        assert_eq!(f.focus, 0);
    }
}
