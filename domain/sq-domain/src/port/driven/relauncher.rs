//! 自己再起動ポート

use std::path::Path;

/// 現在の実行イメージを非昇格コンテキストで再起動する。
/// fire-and-forget: 呼び出し側は直後に終了する。
pub trait SelfRelauncher {
    fn relaunch(&self, image_path: &Path, args: &str);
}
