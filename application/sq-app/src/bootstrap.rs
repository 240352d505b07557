//! ブートストラップ判定ステートマシン（アプリ層）。
//!
//! 一回限りの再開不能な判定列。各ステージは継続か終了コードの
//! どちらかを返し、ドライバループが順序どおりに合成する。
//! 順序と短絡が正しさのすべて: 分岐を一つ誤ると二重プロンプト、
//! 過剰権限での実行、依存の無言スキップのいずれかが起きる。

use sq_domain::model::{exit_codes, InvocationContext, RuntimeInstallOutcome};
use sq_domain::port::driven::{
    ElevationProbe, MachineInstallCoordinator, PlatformGate, RuntimeGate, SelfRelauncher,
    SetupLogger, UpdateHandoff,
};
use sq_domain::port::driving::{BootstrapRequest, BootstrapUseCase};

/// ブートストラップが依存する駆動ポート一式
pub struct BootstrapDeps<'a> {
    pub machine: &'a dyn MachineInstallCoordinator,
    pub elevation: &'a dyn ElevationProbe,
    pub platform: &'a dyn PlatformGate,
    pub runtime: &'a dyn RuntimeGate,
    pub relauncher: &'a dyn SelfRelauncher,
    pub handoff: &'a dyn UpdateHandoff,
    pub logger: &'a dyn SetupLogger,
}

pub struct BootstrapService<'a> {
    deps: BootstrapDeps<'a>,
}

/// 評価順に並んだ判定ステージ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    FastExitCheck,
    ElevationAndRouting,
    CompatibilityGate,
    PrerequisiteCheck,
    Deescalation,
    Handoff,
}

/// ステージの結果: 次へ進むか、終了コードを確定するか。
enum StageResult {
    Continue,
    Exit(i32),
}

/// ステージ間を流れる導出フラグ。起動コンテキスト自体は不変で、
/// 伝播は共有バッファの書き換えではなくフラグの蓄積で表す。
struct BootstrapState {
    /// 下流の対話を抑止するか
    quiet: bool,
    /// 合成引数に --silent を付与するか
    force_silent: bool,
    /// 昇格状態（ElevationAndRouting で一度だけ計算）
    elevated: bool,
}

impl<'a> BootstrapService<'a> {
    pub fn new(deps: BootstrapDeps<'a>) -> Self {
        Self { deps }
    }

    fn run_stage(
        &self,
        stage: Stage,
        request: &BootstrapRequest,
        state: &mut BootstrapState,
    ) -> StageResult {
        match stage {
            Stage::FastExitCheck => self.fast_exit_check(request, state),
            Stage::ElevationAndRouting => self.elevation_and_routing(request, state),
            Stage::CompatibilityGate => self.compatibility_gate(state),
            Stage::PrerequisiteCheck => self.prerequisite_check(state),
            Stage::Deescalation => self.deescalation(request, state),
            Stage::Handoff => self.handoff(request, state),
        }
    }

    /// インストール済みなら何にも触れず即終了する短絡パス。
    fn fast_exit_check(
        &self,
        request: &BootstrapRequest,
        state: &mut BootstrapState,
    ) -> StageResult {
        if !request.context.check_install_requested() {
            return StageResult::Continue;
        }
        if !self.deps.machine.should_silent_install() {
            self.deps.logger.record(false, "Already installed");
            return StageResult::Exit(exit_codes::SUCCESS);
        }
        // 以降のステージとハンドオフ先をサイレントにする
        state.quiet = true;
        state.force_silent = true;
        StageResult::Continue
    }

    /// 昇格検出とマシンワイド／ユーザー単位の振り分け。
    /// マシンインストール失敗は致命的で、ユーザー単位への
    /// フォールバックはしない。
    fn elevation_and_routing(
        &self,
        request: &BootstrapRequest,
        state: &mut BootstrapState,
    ) -> StageResult {
        state.elevated = self.deps.elevation.is_elevated();
        let explicit = request.context.explicit_machine_install_requested();

        if !explicit && !state.elevated {
            self.deps.logger.record(false, "Want standard install");
            return StageResult::Continue;
        }

        self.deps.logger.record(false, "Want machine install");
        let code = self.deps.machine.perform_setup();
        if code != exit_codes::SUCCESS {
            return StageResult::Exit(code);
        }
        state.quiet = true;
        if explicit {
            state.force_silent = true;
            self.deps.logger.record(
                false,
                "Machine-wide installation was successful! Users will see the app once they log out / log in again.",
            );
        }
        StageResult::Continue
    }

    /// OS最低バージョンゲート。quietでも通知は抑止されない。
    fn compatibility_gate(&self, _state: &mut BootstrapState) -> StageResult {
        if self.deps.platform.meets_minimum_os() {
            return StageResult::Continue;
        }
        self.deps.logger.record(
            true,
            "This program cannot run on Windows XP or before; it requires a later version of Windows.",
        );
        StageResult::Exit(exit_codes::GENERIC_FAILURE)
    }

    /// 前提ランタイムの導入。導入済みならスキップ、
    /// 「別経路で充足」は成功だがハンドオフには進まない。
    fn prerequisite_check(&self, state: &mut BootstrapState) -> StageResult {
        if self.deps.runtime.is_runtime_present() {
            return StageResult::Continue;
        }
        match self.deps.runtime.install(state.quiet) {
            RuntimeInstallOutcome::InstalledOk => StageResult::Continue,
            RuntimeInstallOutcome::AlreadySatisfied => {
                self.deps
                    .logger
                    .record(false, "Runtime already satisfied, nothing further to do");
                StageResult::Exit(exit_codes::SUCCESS)
            }
            RuntimeInstallOutcome::Failed(code) => {
                self.deps.logger.record(
                    true,
                    "Failed to install the .NET Framework, try installing .NET 4.5 or higher manually",
                );
                StageResult::Exit(code)
            }
        }
    }

    /// 昇格済みなら非昇格で自分を再起動して終了する。
    /// 昇格したまま実機処理へ進むと、元の非昇格ユーザーにとって
    /// 不正な所有権・権限で成果物が残るため許されない。
    fn deescalation(&self, request: &BootstrapRequest, state: &mut BootstrapState) -> StageResult {
        if !state.elevated {
            return StageResult::Continue;
        }
        // 再起動側は対話を済ませた後なので常にサイレントで引き継ぐ
        let args = request.context.composed_args(true);
        self.deps.logger.record(
            false,
            &format!(
                "we are UAC elevated, so restart {}, {}",
                request.image_path.display(),
                args
            ),
        );
        self.deps.relauncher.relaunch(&request.image_path, &args);
        StageResult::Exit(exit_codes::SUCCESS)
    }

    /// 更新エンジンへの最終ハンドオフ。返値がそのまま終了コード。
    fn handoff(&self, request: &BootstrapRequest, state: &mut BootstrapState) -> StageResult {
        let args = request.context.composed_args(state.force_silent);
        StageResult::Exit(self.deps.handoff.extract_and_run(&args, false))
    }
}

impl BootstrapUseCase for BootstrapService<'_> {
    fn run(&self, request: BootstrapRequest) -> i32 {
        self.deps.logger.record(
            false,
            &format!("Start up installer: {}", request.context.raw()),
        );

        const STAGES: [Stage; 6] = [
            Stage::FastExitCheck,
            Stage::ElevationAndRouting,
            Stage::CompatibilityGate,
            Stage::PrerequisiteCheck,
            Stage::Deescalation,
            Stage::Handoff,
        ];

        let mut state = BootstrapState {
            quiet: request.context.quiet_requested(),
            force_silent: false,
            elevated: false,
        };

        for stage in STAGES {
            if let StageResult::Exit(code) = self.run_stage(stage, &request, &mut state) {
                return code;
            }
        }

        // Handoff は必ず Exit を返すためここには到達しない
        exit_codes::SUCCESS
    }
}
