//! sq-composition: セットアップ実行ファイル向けのコンポジションルート。
//! ドメイン／アプリケーション／各種アダプタをここで配線し、apps/* は
//! このクレートだけに依存する。

pub mod logger;

use logger::FileSetupLogger;
use sq_adapter_machine::MachineInstallAdapter;
use sq_adapter_platform::{OsVersionGate, TokenElevationProbe};
use sq_adapter_process::{ShellTokenRelauncher, UpdateRunner};
use sq_adapter_runtime::DotNetRuntimeGate;
use sq_app::{BootstrapDeps, BootstrapService};
use sq_domain::model::InvocationContext;
use sq_domain::port::driving::{BootstrapRequest, BootstrapUseCase};
use std::path::PathBuf;

// apps/* が内側レイヤーの型に触れる必要がある場合は、ここから辿れるようにする。
// （apps が sq-domain 等を直接依存しないため）
pub use sq_adapter_platform::harden_dll_search_path;
pub use sq_app as app;
pub use sq_domain as domain;
pub use sq_ui_common as ui_common;

/// セットアップ1回分のランタイム。アダプタ群を束ね、
/// ブートストラップ判定列を実行して終了コードを返す。
pub struct SetupRuntime {
    logger: FileSetupLogger,
}

impl SetupRuntime {
    pub fn new() -> Self {
        Self {
            logger: FileSetupLogger::new(),
        }
    }

    /// 生のコマンドライン文字列からブートストラップを実行する。
    /// 返値はそのままプロセス終了コードにすること。
    pub fn bootstrap(&self, raw_args: &str) -> i32 {
        let image_path = self.resolve_image_path();

        let elevation = TokenElevationProbe::new();
        let platform = OsVersionGate::new();
        let machine = MachineInstallAdapter::from_image(&image_path);
        let runtime = DotNetRuntimeGate::next_to_image(&image_path);
        let relauncher = ShellTokenRelauncher::new();
        let handoff = UpdateRunner::next_to_image(&image_path);

        let service = BootstrapService::new(BootstrapDeps {
            machine: &machine,
            elevation: &elevation,
            platform: &platform,
            runtime: &runtime,
            relauncher: &relauncher,
            handoff: &handoff,
            logger: &self.logger,
        });

        service.run(BootstrapRequest {
            context: InvocationContext::classify(raw_args),
            image_path,
        })
    }

    fn resolve_image_path(&self) -> PathBuf {
        match std::env::current_exe() {
            Ok(path) => path,
            Err(err) => {
                use sq_domain::port::driven::SetupLogger;
                // イメージパスなしでも判定列は進められる（降格再起動のみ失敗しうる）
                self.logger
                    .record(false, &format!("Failed to resolve setup image path: {err}"));
                PathBuf::new()
            }
        }
    }
}

impl Default for SetupRuntime {
    fn default() -> Self {
        Self::new()
    }
}
