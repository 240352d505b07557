//! Squirrel Setup ドメイン層
//!
//! ブートストラップ判定の中核。外部依存ゼロでRust標準ライブラリのみ使用。
//! ヘキサゴナルアーキテクチャの最内層。

pub mod error; // ドメインエラー定義
pub mod model; // ドメインモデル（値オブジェクト）
pub mod port;  // ポート（driving/driven）

pub use error::DomainError; // エラー型を再エクスポート
