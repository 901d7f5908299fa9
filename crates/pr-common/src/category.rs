//! Output document categories.
//!
//! A category names one of the eight sections of an emitted document. Enum
//! order is load-bearing: it is both the buffer index inside the relay and
//! the order in which sections appear in a drained document.

use serde::{Deserialize, Serialize};

/// The eight output categories of a provenance document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Activities (tasks, disclosed activities).
    Activity,
    /// Agents (machine descriptors, disclosed agents).
    Agent,
    /// Entities (inodes, packets, paths, arguments, ...).
    Entity,
    /// Free-form log messages.
    Message,
    /// `used` relations (entity to activity).
    Used,
    /// `wasGeneratedBy` relations (activity to entity).
    Generated,
    /// `wasInformedBy` relations (activity to activity).
    Informed,
    /// `wasDerivedFrom` relations (entity to entity).
    Derived,
}

impl Category {
    /// Number of categories, and of relay buffers.
    pub const COUNT: usize = 8;

    /// All categories in document order.
    pub fn all() -> &'static [Category; Category::COUNT] {
        &[
            Category::Activity,
            Category::Agent,
            Category::Entity,
            Category::Message,
            Category::Used,
            Category::Generated,
            Category::Informed,
            Category::Derived,
        ]
    }

    /// Buffer index of this category.
    pub fn index(self) -> usize {
        self as usize
    }

    /// JSON section name in the output document.
    pub fn section(self) -> &'static str {
        match self {
            Category::Activity => "activity",
            Category::Agent => "agent",
            Category::Entity => "entity",
            Category::Message => "message",
            Category::Used => "used",
            Category::Generated => "wasGeneratedBy",
            Category::Informed => "wasInformedBy",
            Category::Derived => "wasDerivedFrom",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Activity => write!(f, "activity"),
            Category::Agent => write!(f, "agent"),
            Category::Entity => write!(f, "entity"),
            Category::Message => write!(f, "message"),
            Category::Used => write!(f, "used"),
            Category::Generated => write!(f, "generated"),
            Category::Informed => write!(f, "informed"),
            Category::Derived => write!(f, "derived"),
        }
    }
}
