//! 更新エンジンハンドオフポート

/// 更新エンジンを展開・実行し、その終了ステータスを返す。
/// 返値はそのままプロセス終了コードになる。
pub trait UpdateHandoff {
    fn extract_and_run(&self, args: &str, is_elevated_relaunch: bool) -> i32;
}
