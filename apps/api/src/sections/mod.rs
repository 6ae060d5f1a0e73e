//! Section Classifier: projects a loosely-typed record into ordered render directives.
//!
//! Nothing here mutates its input or consults ambient state: the descriptor list is a
//! pure function of the record.

pub mod classifier;
pub mod contact;
pub mod descriptor;
pub mod labels;
pub mod presence;

pub use classifier::classify;
pub use descriptor::SectionDescriptor;
