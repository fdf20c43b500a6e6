/// Bindings introduced by running constructs, innermost last. A `do ... loop`
/// encloses a frame binding `i` for as long as its body runs, so nested
/// loops shadow the outer index and nothing survives the loop.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Environment {
    frames: Vec<(String, i64)>,
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.frames
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, val)| *val)
    }

    /// Rebinds the innermost frame named `name`, if there is one.
    pub fn set(&mut self, name: &str, val: i64) {
        if let Some(frame) = self.frames.iter_mut().rev().find(|(bound, _)| bound == name) {
            frame.1 = val;
        }
    }

    pub fn enclose(&mut self, name: &str, val: i64) {
        self.frames.push((name.to_owned(), val));
    }

    pub fn unenclose(&mut self) {
        self.frames.pop();
    }
}
