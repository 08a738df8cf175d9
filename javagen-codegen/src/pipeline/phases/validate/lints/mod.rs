//! Built-in lints for code model validation.

mod discriminator;
mod duplicate_model;
mod duplicate_operation;
mod empty_description;
mod paging_item;
mod unbranded_lro;
mod unresolved_reference;

pub use discriminator::DiscriminatorLint;
pub use duplicate_model::DuplicateModelLint;
pub use duplicate_operation::DuplicateOperationLint;
pub use empty_description::EmptyDescriptionLint;
pub use paging_item::PagingItemLint;
pub use unbranded_lro::UnbrandedLroLint;
pub use unresolved_reference::UnresolvedReferenceLint;
