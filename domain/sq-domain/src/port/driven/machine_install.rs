//! マシンワイドインストール調整ポート

/// マシンワイドインストールの判定と実施。
pub trait MachineInstallCoordinator {
    /// このマシンでサイレントインストールすべきか（高速終了の述語）
    fn should_silent_install(&self) -> bool;

    /// マシンワイドのプロビジョニングを実施（0 = 成功）。
    /// 非0はそのままプロセス終了コードになり、ユーザー単位への
    /// フォールバックは行われない。
    fn perform_setup(&self) -> i32;
}
