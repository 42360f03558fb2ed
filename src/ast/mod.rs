/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Expr` and `Stmt` sum types and the top-level `Program`
/// - expressions: Node structs for the expression variants
/// - statements: Node structs for the statement variants, match arms and patterns
/// - printer: Canonical text rendering used for debugging and round-trip tests
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
