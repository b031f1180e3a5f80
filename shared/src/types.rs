/// Crate-wide result type. Every layer propagates `anyhow` errors up to `main`.
pub type Result<T> = anyhow::Result<T>;
