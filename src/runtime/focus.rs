/// What currently receives keys: one of the field widgets or the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    Submit,
}

/// Wrapping focus order over `fields` widgets followed by the submit button.
#[derive(Debug, Clone)]
pub struct FocusRing {
    fields: usize,
    current: Focus,
}

impl FocusRing {
    pub fn new(fields: usize) -> Self {
        let current = if fields == 0 {
            Focus::Submit
        } else {
            Focus::Field(0)
        };
        Self { fields, current }
    }

    pub fn current(&self) -> Focus {
        self.current
    }

    pub fn focused_field(&self) -> Option<usize> {
        match self.current {
            Focus::Field(index) => Some(index),
            Focus::Submit => None,
        }
    }

    pub fn is_submit(&self) -> bool {
        self.current == Focus::Submit
    }

    pub fn first(&mut self) {
        *self = Self::new(self.fields);
    }

    pub fn next(&mut self) {
        self.move_by(1);
    }

    pub fn prev(&mut self) {
        self.move_by(-1);
    }

    fn move_by(&mut self, delta: isize) {
        // Slot `fields` is the submit button.
        let slots = self.fields as isize + 1;
        let position = match self.current {
            Focus::Field(index) => index as isize,
            Focus::Submit => self.fields as isize,
        };
        let next = (position + delta).rem_euclid(slots) as usize;
        self.current = if next == self.fields {
            Focus::Submit
        } else {
            Focus::Field(next)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{Focus, FocusRing};

    #[test]
    fn next_wraps_through_submit() {
        let mut ring = FocusRing::new(2);
        ring.next();
        assert_eq!(ring.current(), Focus::Field(1));
        ring.next();
        assert_eq!(ring.current(), Focus::Submit);
        ring.next();
        assert_eq!(ring.current(), Focus::Field(0));
    }

    #[test]
    fn prev_from_first_field_lands_on_submit() {
        let mut ring = FocusRing::new(3);
        ring.prev();
        assert!(ring.is_submit());
        ring.prev();
        assert_eq!(ring.focused_field(), Some(2));
    }

    #[test]
    fn empty_form_only_has_submit() {
        let mut ring = FocusRing::new(0);
        assert!(ring.is_submit());
        ring.next();
        assert!(ring.is_submit());
    }
}
