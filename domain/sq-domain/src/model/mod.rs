//! ドメインモデル（値オブジェクト）。

pub mod exit_codes;
mod invocation;
mod runtime_outcome;

pub use invocation::*;
pub use runtime_outcome::*;
