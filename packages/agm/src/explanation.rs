use std::fmt::Display;

use termtree::Tree;

/// A sink for the steps an operation takes.
///
/// Steps and descriptions are passed as closures so that they are only
/// rendered when someone is going to read them (see [`DiscardedExplanation`]).
pub trait Explain {
    fn step<S: Into<String>>(&mut self, step: impl FnOnce() -> S);

    fn subexplanation<S: Into<String>>(&mut self, description: impl FnOnce() -> S) -> &mut Self;

    fn with_subexplanation<S: Into<String>, T>(
        &mut self,
        description: impl FnOnce() -> S,
        function: impl FnOnce(&mut Self) -> T,
    ) -> T {
        function(self.subexplanation(description))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExplanationComponent {
    Step(String),
    Explanation(Explanation),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Explanation {
    description: String,
    components: Vec<ExplanationComponent>,
}

impl Explanation {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            components: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All steps of this explanation and its subexplanations, depth first.
    pub fn steps(&self) -> Vec<&str> {
        let mut steps = vec![];

        for component in &self.components {
            match component {
                ExplanationComponent::Step(step) => steps.push(step.as_str()),
                ExplanationComponent::Explanation(explanation) => {
                    steps.push(explanation.description.as_str());
                    steps.extend(explanation.steps());
                }
            }
        }

        steps
    }

    pub fn get_tree(&self) -> Tree<String> {
        let mut leaves = vec![];

        for component in &self.components {
            match component {
                ExplanationComponent::Step(step) => {
                    leaves.push(Tree::new(step.clone()));
                }
                ExplanationComponent::Explanation(explanation) => {
                    leaves.push(explanation.get_tree());
                }
            }
        }

        Tree::new(self.description.clone()).with_leaves(leaves)
    }
}

impl Explain for Explanation {
    fn step<S: Into<String>>(&mut self, step: impl FnOnce() -> S) {
        let step = ExplanationComponent::Step(step().into());

        if self.components.last() != Some(&step) {
            self.components.push(step);
        }
    }

    fn subexplanation<S: Into<String>>(&mut self, description: impl FnOnce() -> S) -> &mut Self {
        self.components
            .push(ExplanationComponent::Explanation(Explanation::new(
                description(),
            )));

        match self.components.last_mut() {
            Some(ExplanationComponent::Explanation(explanation)) => explanation,
            _ => unreachable!("A subexplanation was just pushed"),
        }
    }
}

impl Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.get_tree())
    }
}

/// An [`Explain`] implementation that drops every step without rendering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardedExplanation;

impl Explain for DiscardedExplanation {
    fn step<S: Into<String>>(&mut self, _: impl FnOnce() -> S) {}

    fn subexplanation<S: Into<String>>(&mut self, _: impl FnOnce() -> S) -> &mut Self {
        self
    }
}
