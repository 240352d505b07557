//! プラットフォーム互換性ゲートポート

/// OSが前提ランタイムを導入可能な最低バージョンを満たすか。
/// このゲートはサイレントモードでも抑止されない。
pub trait PlatformGate {
    fn meets_minimum_os(&self) -> bool;
}
