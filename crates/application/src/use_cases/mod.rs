pub mod bulk_resolve;
pub mod resolve_line;

pub use bulk_resolve::BulkResolveUseCase;
pub use resolve_line::ResolveLineUseCase;
