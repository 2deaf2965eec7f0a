pub mod r3_ast;
pub mod serializer;
