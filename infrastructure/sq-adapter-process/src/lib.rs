//! プロセスアダプタ（降格再起動・更新エンジンハンドオフ）。

mod handoff;
mod relauncher;

pub use handoff::UpdateRunner;
pub use relauncher::ShellTokenRelauncher;
