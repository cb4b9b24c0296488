use std::fmt;

use serde::Serialize;

use crate::model::{ItemId, ItemKind};

/// A cash-flow linkage that could not be resolved to a value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LinkageIssue {
    /// The link names an item that does not exist (or is of the wrong kind)
    MissingTarget {
        item: ItemId,
        target_type: ItemKind,
        target_id: ItemId,
    },
    /// The target exists but has no value before the run starts
    UnresolvedTarget { item: ItemId, target_id: ItemId },
    /// Items that derive from each other, in link order
    Cycle { path: Vec<ItemId> },
}

impl fmt::Display for LinkageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkageIssue::MissingTarget {
                item,
                target_type,
                target_id,
            } => write!(
                f,
                "cash flow {item} links to {} {target_id}, which does not exist",
                target_type.label()
            ),
            LinkageIssue::UnresolvedTarget { item, target_id } => write!(
                f,
                "cash flow {item} links to {target_id}, which has no value before the projection starts"
            ),
            LinkageIssue::Cycle { path } => {
                write!(f, "cash flows derive from each other: ")?;
                for (i, id) in path.iter().enumerate() {
                    if i > 0 {
                        write!(f, " -> ")?;
                    }
                    write!(f, "{id}")?;
                }
                if let Some(first) = path.first() {
                    write!(f, " -> {first}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LinkageIssue {}

/// Errors that stop a projection before the first year is simulated
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    NegativeYears(i32),
    /// Two stored items, or two explicit accounts, share a name
    DuplicateName(String),
    /// Two items share an id within one id space
    ///
    /// Assets and liabilities each have their own space; income and expense
    /// items share one.
    DuplicateId { kind: ItemKind, id: ItemId },
    /// Raised only when strict linkage is enabled
    UnresolvableLinkage(LinkageIssue),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::NegativeYears(years) => {
                write!(f, "projection length must not be negative (got {years})")
            }
            ProjectionError::DuplicateName(name) => {
                write!(f, "account name {name:?} is used more than once")
            }
            ProjectionError::DuplicateId { kind, id } => {
                write!(f, "{} id {id} is used more than once", kind.label())
            }
            ProjectionError::UnresolvableLinkage(issue) => write!(f, "{issue}"),
        }
    }
}

impl std::error::Error for ProjectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectionError::UnresolvableLinkage(issue) => Some(issue),
            _ => None,
        }
    }
}

impl From<LinkageIssue> for ProjectionError {
    fn from(issue: LinkageIssue) -> Self {
        ProjectionError::UnresolvableLinkage(issue)
    }
}

/// Errors raised while assembling a request with the builder DSL
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A cash flow links to a name that no item of the target kind uses
    UnknownLinkTarget {
        item: String,
        target_type: ItemKind,
        target: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownLinkTarget {
                item,
                target_type,
                target,
            } => write!(
                f,
                "cash flow {item:?} links to unknown {} {target:?}",
                target_type.label()
            ),
        }
    }
}

impl std::error::Error for BuildError {}

pub type Result<T> = std::result::Result<T, ProjectionError>;
