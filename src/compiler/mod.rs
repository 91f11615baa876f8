mod session;

pub use session::SchemaCompiler;
