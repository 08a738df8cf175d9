//! Java syntax builders.
//!
//! These nodes describe Java declarations and render to
//! [`CodeFragment`](javagen_codegen::builder::CodeFragment)s through the
//! [`Renderable`](javagen_codegen::builder::Renderable) trait. A [`JavaFile`]
//! assembles them into a compilation unit; a [`JavaContext`] tracks the
//! imports of the file being built.

mod annotation;
mod block;
mod class;
mod context;
mod file;
mod javadoc;
mod member;
mod modifiers;

pub use annotation::JavaAnnotation;
pub use block::JavaBlock;
pub use class::{JavaClass, JavaEnumConstant, JavaKind, JavaMember};
pub use context::JavaContext;
pub use file::JavaFile;
pub use javadoc::JavaJavadoc;
pub use member::{JavaField, JavaMethod};
pub use modifiers::JavaModifiers;
