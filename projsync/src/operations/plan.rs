//! Plan types for explorer events.
//!
//! A plan describes which manifest operations an event calls for, without
//! performing them. The dispatcher decides scope for each step and then
//! applies what remains.

use super::canonical::CanonicalOperation;

/// A single operation in a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    /// The manifest operation.
    pub operation: CanonicalOperation,

    /// The operation names a directory whose descendants must be added
    /// once the operation itself has been applied.
    pub expand: bool,
}

/// A complete plan for one explorer event.
///
/// Plans include a description, the steps in the order they must be
/// applied, and any warnings that should be communicated to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// A human-readable description of the event.
    pub description: String,

    /// The steps to perform.
    pub steps: Vec<PlanStep>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("create /proj/a.swift");
    /// assert_eq!(plan.description, "create /proj/a.swift");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an operation to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::operations::{CanonicalOperation, OperationPlan};
    /// use projsync::TrackedPath;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_operation(CanonicalOperation::DeleteFile(TrackedPath::new("/proj/a.swift")));
    ///
    /// assert_eq!(plan.len(), 1);
    /// assert!(!plan.steps[0].expand);
    /// ```
    #[must_use]
    pub fn add_operation(mut self, operation: CanonicalOperation) -> Self {
        self.steps.push(PlanStep {
            operation,
            expand: false,
        });
        self
    }

    /// Adds an operation whose directory must be materialized afterwards.
    #[must_use]
    pub fn add_expanding(mut self, operation: CanonicalOperation) -> Self {
        self.steps.push(PlanStep {
            operation,
            expand: true,
        });
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Iterates over the planned operations in order.
    pub fn operations(&self) -> impl Iterator<Item = &CanonicalOperation> {
        self.steps.iter().map(|s| &s.operation)
    }

    /// Checks if the plan has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the number of steps in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}
