//! 駆動ポート（出力インターフェース）。
//!
//! ブートストラップが外部に求める機能を定義する。
//! インフラ層のアダプタが実装する。

mod elevation_probe;
mod machine_install;
mod platform_gate;
mod relauncher;
mod runtime_gate;
mod setup_logger;
mod update_handoff;

pub use elevation_probe::*;
pub use machine_install::*;
pub use platform_gate::*;
pub use relauncher::*;
pub use runtime_gate::*;
pub use setup_logger::*;
pub use update_handoff::*;
