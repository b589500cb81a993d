//! OpenAPI document loading

pub mod file_loader;

pub use file_loader::FileOpenApiLoader;
