//! ブートストラップ用ユースケースポート

use crate::model::InvocationContext;
use std::path::PathBuf;

/// ブートストラップ実行要求
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    /// 分類済みの起動コンテキスト
    pub context: InvocationContext,
    /// 現在の実行イメージのパス（降格再起動に使用）
    pub image_path: PathBuf,
}

/// ブートストラップ判定シーケンス全体。
/// 返値はプロセス終了コード。再開不能な一回限りの実行で、
/// 失敗時の再試行は呼び出されたコラボレータか手動再実行の責務。
pub trait BootstrapUseCase {
    fn run(&self, request: BootstrapRequest) -> i32;
}
