//! 駆動側ポート（入力インターフェース）。

mod bootstrap_use_case;

pub use bootstrap_use_case::*;
