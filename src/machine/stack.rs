use std::ops::Deref;

/// Integer stack. Reads go through `Deref` to a slice, bottom first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stack(Vec<i64>);

impl Stack {
    pub fn push(&mut self, val: i64) {
        self.0.push(val);
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.0.pop()
    }

    /// Pops `(top, second)`, or leaves the stack alone if it holds fewer than two.
    pub fn pop_pair(&mut self) -> Option<(i64, i64)> {
        let pair = self.peek_pair()?;
        self.0.truncate(self.0.len() - 2);
        Some(pair)
    }

    pub fn peek_pair(&self) -> Option<(i64, i64)> {
        match self.0.as_slice() {
            [.., second, top] => Some((*top, *second)),
            _ => None,
        }
    }

    pub fn top_mut(&mut self) -> Option<&mut i64> {
        self.0.last_mut()
    }
}

impl Deref for Stack {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for Stack {
    fn from(items: Vec<i64>) -> Self {
        Self(items)
    }
}
