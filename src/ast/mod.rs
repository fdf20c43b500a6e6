use std::fmt::{Display, Formatter};

/// A single evaluable unit. Bodies nest recursively as whole programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Push(i64),
    Call(String),
    Define {
        name: String,
        body: Program,
    },
    Conditional {
        consequence: Program,
        alternative: Option<Program>,
    },
    Loop {
        body: Program,
    },
    Variable(String),
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Push(n) => write!(f, "{}", n),
            Self::Call(name) => write!(f, "{}", name),
            Self::Define { name, body } => write!(f, ": {}{} ;", name, Spaced(body)),
            Self::Conditional {
                consequence,
                alternative,
            } => {
                write!(f, "if{}", Spaced(consequence))?;
                if let Some(alt) = alternative {
                    write!(f, " else{}", Spaced(alt))?;
                }
                write!(f, " then")
            }
            Self::Loop { body } => write!(f, "do{} loop", Spaced(body)),
            Self::Variable(name) => write!(f, "variable {}", name),
        }
    }
}

/// Renders a body with a leading space, or nothing when it is empty.
struct Spaced<'a>(&'a Program);

impl Display for Spaced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.0.nodes.is_empty() {
            Ok(())
        } else {
            write!(f, " {}", self.0)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub nodes: Vec<Node>,
}

impl Program {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl From<Vec<Node>> for Program {
    fn from(nodes: Vec<Node>) -> Self {
        Self::new(nodes)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}
