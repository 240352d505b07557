//! 診断ログポート

/// プロセス全体の診断シンク。ベストエフォートであり、
/// 記録の失敗が制御フローへ影響することはない。
pub trait SetupLogger {
    /// メッセージを記録する。`show_notification` が真の場合は
    /// 加えてブロッキングな通知（ユーザー確認待ち）を表示する。
    fn record(&self, show_notification: bool, message: &str);
}
