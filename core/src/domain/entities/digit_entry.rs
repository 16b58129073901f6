//! Digit-entry aggregator for per-slot OTP input.

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Fixed-size ordered sequence of single-digit slots with a focus cursor.
///
/// Accumulates per-position single-character inputs into a full code,
/// auto-advancing focus the way a row of one-character text boxes behaves:
/// typing moves forward, clearing a slot (backspace) moves back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitEntry {
    slots: [Option<char>; CODE_LENGTH],
    focus: usize,
}

impl Default for DigitEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitEntry {
    /// Creates an empty entry with focus on the first slot.
    pub fn new() -> Self {
        Self {
            slots: [None; CODE_LENGTH],
            focus: 0,
        }
    }

    /// Applies a raw input value to the slot at `index`.
    ///
    /// Multi-character values keep only the last character (paste-like
    /// overwrite). Non-digit characters are rejected and leave the slot
    /// unchanged. An empty value clears the slot (backspace).
    ///
    /// Returns `true` if, after this mutation, all slots are filled.
    pub fn set_digit(&mut self, index: usize, value: &str) -> bool {
        if index >= CODE_LENGTH {
            return false;
        }

        match value.chars().last() {
            None => {
                self.slots[index] = None;
                if index > 0 {
                    self.focus = index - 1;
                }
            }
            Some(c) if c.is_ascii_digit() => {
                self.slots[index] = Some(c);
                if index < CODE_LENGTH - 1 {
                    self.focus = index + 1;
                }
            }
            Some(_) => return false,
        }

        self.is_complete()
    }

    /// Concatenation of all filled slots, in order.
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// True once every slot holds a digit.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Index of the slot that should currently hold input focus.
    pub fn focus_index(&self) -> usize {
        self.focus
    }

    /// Clears all slots and returns focus to the first slot.
    pub fn clear(&mut self) {
        self.slots = [None; CODE_LENGTH];
        self.focus = 0;
    }
}
