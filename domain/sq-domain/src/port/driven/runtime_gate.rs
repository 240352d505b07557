//! ランタイム前提条件ゲートポート

use crate::model::RuntimeInstallOutcome;

/// 前提ランタイムの検出とインストール。
pub trait RuntimeGate {
    /// ランタイムが導入済みか
    fn is_runtime_present(&self) -> bool;

    /// ランタイムをインストールする（quietで対話抑止）
    fn install(&self, quiet: bool) -> RuntimeInstallOutcome;
}
