//! ドメインエラー型
//!
//! 標準ライブラリのみ使用（外部エラーハンドリングクレートなし）

use std::fmt;

/// ドメイン層のエラー型
/// 各バリアントは特定の失敗シナリオを表現
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// レジストリアクセス失敗（権限不足など）
    RegistryAccessDenied(String),

    /// 必要な環境変数が未設定
    EnvironmentMissing(String),

    /// プロセス起動失敗
    ProcessLaunchFailed(String),

    /// 更新エンジンのペイロードが見つからない
    PayloadNotFound(String),

    /// ファイルI/Oエラー
    IoError(String),

    /// 不明なエラー
    Unknown(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryAccessDenied(msg) => {
                write!(f, "Registry access denied: {}", msg)
            }
            Self::EnvironmentMissing(var) => {
                write!(f, "Required environment variable missing: {}", var)
            }
            Self::ProcessLaunchFailed(msg) => {
                write!(f, "Process launch failed: {}", msg)
            }
            Self::PayloadNotFound(msg) => {
                write!(f, "Update payload not found: {}", msg)
            }
            Self::IoError(msg) => {
                write!(f, "IO error: {}", msg)
            }
            Self::Unknown(msg) => {
                write!(f, "Unknown error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
