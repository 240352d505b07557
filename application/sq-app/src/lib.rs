//! sq-app: ブートストラップ用ユースケース（アプリ層）。

mod bootstrap;

pub use bootstrap::{BootstrapDeps, BootstrapService};
