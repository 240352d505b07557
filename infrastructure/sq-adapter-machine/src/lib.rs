//! マシンワイドインストール調整アダプタ。
//!
//! perform_setup はセットアップイメージを %ProgramData% 配下へ配置し、
//! HKLM の Run 値に `Setup.exe --checkInstall` を登録する。以後は各
//! ユーザーのログオン時にサイレントでユーザー単位インストールが走る。
//! should_silent_install はそのプロビジョニングが存在し、かつ現在の
//! ユーザーにまだ展開されていないときに真を返す。

use sq_domain::error::DomainError;
use sq_domain::model::exit_codes;
use sq_domain::port::driven::MachineInstallCoordinator;
use std::path::{Path, PathBuf};

/// 配置先・レジストリ名に使うアプリケーション名と、
/// 現在のセットアップイメージのパス。
#[derive(Debug)]
pub struct MachineInstallAdapter {
    app_name: String,
    image_path: PathBuf,
}

impl MachineInstallAdapter {
    pub fn new(app_name: impl Into<String>, image_path: impl Into<PathBuf>) -> Self {
        Self {
            app_name: app_name.into(),
            image_path: image_path.into(),
        }
    }

    /// 実行イメージのファイル名からアプリ名を導出して構築する
    pub fn from_image(image_path: &Path) -> Self {
        let app_name = derive_app_name(image_path);
        Self::new(app_name, image_path)
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// マシンワイドの配置先ディレクトリ
    fn machine_dir(&self) -> Result<PathBuf, DomainError> {
        let base = std::env::var_os("ProgramData")
            .ok_or_else(|| DomainError::EnvironmentMissing("ProgramData".into()))?;
        Ok(PathBuf::from(base).join(&self.app_name))
    }

    /// 現在のユーザーに展開済みか（%LOCALAPPDATA%\<app> の有無）
    fn user_install_present(&self) -> bool {
        std::env::var_os("LOCALAPPDATA")
            .map(|base| PathBuf::from(base).join(&self.app_name).is_dir())
            .unwrap_or(false)
    }

    /// Run 値に登録するコマンドライン
    fn run_value_command(&self, staged_setup: &Path) -> String {
        format!("\"{}\" --checkInstall", staged_setup.display())
    }

    fn provision(&self) -> Result<(), DomainError> {
        let machine_dir = self.machine_dir()?;
        std::fs::create_dir_all(&machine_dir)?;

        let staged_setup = machine_dir.join("Setup.exe");
        if self.image_path != staged_setup {
            std::fs::copy(&self.image_path, &staged_setup).map_err(|e| {
                DomainError::IoError(format!(
                    "copy {} -> {}: {e}",
                    self.image_path.display(),
                    staged_setup.display()
                ))
            })?;
        }

        let run_name = self.run_value_name();
        let run_command = self.run_value_command(&staged_setup);
        #[cfg(target_os = "windows")]
        {
            windows_run_key::set_run_value(&run_name, &run_command)?;
        }
        #[cfg(not(target_os = "windows"))]
        {
            let _ = (run_name, run_command); // 非Windows用の未使用警告抑制
        }
        Ok(())
    }

    fn run_value_name(&self) -> String {
        format!("{}Setup", self.app_name)
    }

    fn machine_provisioning_present(&self) -> bool {
        #[cfg(target_os = "windows")]
        {
            windows_run_key::run_value_exists(&self.run_value_name())
        }
        #[cfg(not(target_os = "windows"))]
        {
            self.machine_dir()
                .map(|dir| dir.join("Setup.exe").is_file())
                .unwrap_or(false)
        }
    }
}

impl MachineInstallCoordinator for MachineInstallAdapter {
    fn should_silent_install(&self) -> bool {
        self.machine_provisioning_present() && !self.user_install_present()
    }

    fn perform_setup(&self) -> i32 {
        match self.provision() {
            Ok(()) => exit_codes::SUCCESS,
            Err(_) => exit_codes::GENERIC_FAILURE,
        }
    }
}

/// イメージのファイル名ステムからアプリ名を得る。
/// "Setup" そのものは識別に使えないため既定名に落とす。
fn derive_app_name(image_path: &Path) -> String {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let trimmed = stem.trim_end_matches("Setup").trim_end_matches('-');
    if trimmed.is_empty() {
        "SquirrelApp".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(target_os = "windows")]
mod windows_run_key {
    use sq_domain::error::DomainError;
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows::core::{w, PCWSTR};
    use windows::Win32::System::Registry::{
        RegGetValueW, RegSetKeyValueW, HKEY_LOCAL_MACHINE, REG_SZ, RRF_RT_REG_SZ,
    };

    const RUN_KEY: PCWSTR = w!("SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Run");

    fn wstr(s: &str) -> Vec<u16> {
        OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
    }

    pub fn run_value_exists(name: &str) -> bool {
        let name_w = wstr(name);
        unsafe {
            let mut size = 0u32;
            RegGetValueW(
                HKEY_LOCAL_MACHINE,
                RUN_KEY,
                PCWSTR(name_w.as_ptr()),
                RRF_RT_REG_SZ,
                None,
                None,
                Some(&mut size),
            )
            .is_ok()
        }
    }

    pub fn set_run_value(name: &str, command: &str) -> Result<(), DomainError> {
        let name_w = wstr(name);
        let command_w = wstr(command);
        unsafe {
            let status = RegSetKeyValueW(
                HKEY_LOCAL_MACHINE,
                RUN_KEY,
                PCWSTR(name_w.as_ptr()),
                REG_SZ.0,
                Some(command_w.as_ptr() as *const _),
                (command_w.len() * 2) as u32,
            );
            if status.is_ok() {
                Ok(())
            } else {
                Err(DomainError::RegistryAccessDenied(format!(
                    "Run value {name}: {:?}",
                    status
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_derived_from_image_stem() {
        assert_eq!(derive_app_name(Path::new("C:\\tmp\\MyAppSetup.exe")), "MyApp");
        assert_eq!(derive_app_name(Path::new("/tmp/MyApp-Setup.exe")), "MyApp");
    }

    #[test]
    fn bare_setup_image_falls_back_to_default_name() {
        assert_eq!(derive_app_name(Path::new("Setup.exe")), "SquirrelApp");
    }

    #[test]
    fn run_value_command_quotes_path_and_requests_check_install() {
        let adapter = MachineInstallAdapter::new("MyApp", "/tmp/Setup.exe");
        let cmd = adapter.run_value_command(Path::new("C:\\ProgramData\\MyApp\\Setup.exe"));
        assert_eq!(cmd, "\"C:\\ProgramData\\MyApp\\Setup.exe\" --checkInstall");
    }

    #[test]
    fn missing_program_data_is_an_environment_error() {
        let adapter = MachineInstallAdapter::new("MyApp", "/tmp/Setup.exe");
        if std::env::var_os("ProgramData").is_none() {
            assert!(matches!(
                adapter.machine_dir(),
                Err(DomainError::EnvironmentMissing(_))
            ));
        }
    }
}
