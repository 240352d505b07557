//! ポート定義（driving = 入力、driven = 出力）。

pub mod driven;
pub mod driving;
