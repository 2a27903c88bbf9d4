/*!
 * Authorization context extractor
 *
 * Responsibility:
 * - Give handlers the verified claims of the current request (AuthCtx)
 * - axum plumbing lives in core, the type in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use self::types::AuthCtx;
