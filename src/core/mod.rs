pub mod analyzer;
pub mod graph;
pub mod metadata;
pub mod scanner;

pub use analyzer::{Analysis, DependencyAnalyzer, PackageDependencies};
pub use graph::{DependencyEdge, DependencyGraph, GraphBuilder, NodeOrigin, PackageGraph, PackageNode};
pub use metadata::{MetadataResolver, MetadataTable, PackageInfo, UNCATEGORIZED};
pub use scanner::{FileScanner, PackageScan, PackageSources, SkippedPackage};
