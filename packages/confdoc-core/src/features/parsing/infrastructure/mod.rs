//! Parsing infrastructure

pub mod build_constraints;
pub mod comments;
pub mod go_parser;
pub mod linker;
pub mod source_walker;

pub use build_constraints::{find_go_build_line, BuildConstraint, ConstraintError};
pub use go_parser::{GoDeclarationParser, SpanExt};
pub use linker::{default_package_name, link, PackageUnits};
pub use source_walker::{discover_package_dirs, package_id, read_module_path, PackageDir};
