//! ランタイム前提条件ゲートアダプタ（.NET Framework 4.5以降）。
//!
//! 検出は NDP レジストリの Release 値、インストールは実行イメージの
//! 隣に同梱された再頒布可能パッケージの起動で行う。

use sq_domain::error::DomainError;
use sq_domain::model::RuntimeInstallOutcome;
use sq_domain::port::driven::RuntimeGate;
use std::path::{Path, PathBuf};

/// .NET Framework 4.5 の Release 値の下限
#[cfg(target_os = "windows")]
const NET45_RELEASE: u32 = 378_389;

/// 同梱する再頒布可能パッケージのファイル名
const REDIST_FILE_NAME: &str = "DotNetInstaller.exe";

/// インストーラ終了コード: 再起動が必要（成功扱い）
const EXIT_REBOOT_REQUIRED: i32 = 3010;
/// インストーラ終了コード: 別バージョンが導入済み
const EXIT_ALREADY_INSTALLED: i32 = 1638;

/// .NET Framework 前提条件ゲート
#[derive(Debug)]
pub struct DotNetRuntimeGate {
    /// 再頒布可能パッケージを探すディレクトリ（通常は実行イメージの親）
    redist_dir: PathBuf,
}

impl DotNetRuntimeGate {
    pub fn new(redist_dir: impl Into<PathBuf>) -> Self {
        Self {
            redist_dir: redist_dir.into(),
        }
    }

    /// 実行イメージのパスからゲートを構築する
    pub fn next_to_image(image_path: &Path) -> Self {
        let dir = image_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::new(dir)
    }

    fn redist_path(&self) -> PathBuf {
        self.redist_dir.join(REDIST_FILE_NAME)
    }

    /// quiet設定に応じたインストーラ引数
    fn installer_args(quiet: bool) -> [&'static str; 2] {
        if quiet {
            ["/q", "/norestart"]
        } else {
            ["/passive", "/norestart"]
        }
    }

    fn run_installer(&self, quiet: bool) -> Result<i32, DomainError> {
        let redist = self.redist_path();
        if !redist.is_file() {
            return Err(DomainError::PayloadNotFound(
                redist.to_string_lossy().into_owned(),
            ));
        }
        let status = std::process::Command::new(&redist)
            .args(Self::installer_args(quiet))
            .status()
            .map_err(|e| {
                DomainError::ProcessLaunchFailed(format!("{}: {e}", redist.display()))
            })?;
        Ok(status.code().unwrap_or(exit_fallback()))
    }
}

fn exit_fallback() -> i32 {
    // シグナル等でコードが取れない場合は汎用失敗にする
    sq_domain::model::exit_codes::GENERIC_FAILURE
}

impl RuntimeGate for DotNetRuntimeGate {
    fn is_runtime_present(&self) -> bool {
        #[cfg(target_os = "windows")]
        {
            windows_ndp::release_value().is_some_and(|v| v >= NET45_RELEASE)
        }
        #[cfg(not(target_os = "windows"))]
        {
            // 非Windowsビルドは開発用。前提条件は常に充足とみなす。
            true
        }
    }

    fn install(&self, quiet: bool) -> RuntimeInstallOutcome {
        // 起動直前の再プローブ。別経路（グループポリシー配布等）で
        // 既に充足していれば、何もせず「充足済み」を報告する。
        if self.is_runtime_present() {
            return RuntimeInstallOutcome::AlreadySatisfied;
        }
        match self.run_installer(quiet) {
            Ok(0) | Ok(EXIT_REBOOT_REQUIRED) => RuntimeInstallOutcome::InstalledOk,
            Ok(EXIT_ALREADY_INSTALLED) => RuntimeInstallOutcome::AlreadySatisfied,
            Ok(code) => RuntimeInstallOutcome::Failed(code),
            Err(_) => RuntimeInstallOutcome::Failed(exit_fallback()),
        }
    }
}

#[cfg(target_os = "windows")]
mod windows_ndp {
    use windows::core::w;
    use windows::Win32::System::Registry::{
        RegGetValueW, HKEY_LOCAL_MACHINE, RRF_RT_REG_DWORD,
    };

    /// HKLM の NDP v4 Full キーから Release 値を読む
    pub fn release_value() -> Option<u32> {
        unsafe {
            let mut data = 0u32;
            let mut size = std::mem::size_of::<u32>() as u32;
            let status = RegGetValueW(
                HKEY_LOCAL_MACHINE,
                w!("SOFTWARE\\Microsoft\\NET Framework Setup\\NDP\\v4\\Full"),
                w!("Release"),
                RRF_RT_REG_DWORD,
                None,
                Some(&mut data as *mut _ as *mut _),
                Some(&mut size),
            );
            if status.is_ok() {
                Some(data)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installer_args_follow_quiet_intent() {
        assert_eq!(DotNetRuntimeGate::installer_args(true), ["/q", "/norestart"]);
        assert_eq!(
            DotNetRuntimeGate::installer_args(false),
            ["/passive", "/norestart"]
        );
    }

    #[test]
    fn redist_is_resolved_next_to_image() {
        let gate = DotNetRuntimeGate::next_to_image(Path::new("/opt/app/Setup.exe"));
        assert_eq!(gate.redist_path(), PathBuf::from("/opt/app/DotNetInstaller.exe"));
    }

    #[test]
    fn missing_redist_is_reported_as_payload_not_found() {
        let gate = DotNetRuntimeGate::new("/nonexistent-dir");
        match gate.run_installer(true) {
            Err(DomainError::PayloadNotFound(path)) => {
                assert!(path.contains(REDIST_FILE_NAME));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
