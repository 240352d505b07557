//! プラットフォーム補助アダプタ（DLL探索強化・昇格プローブ・OSゲート）。
//!
//! 配線は composition に集約し、このクレートは OS 固有補助のみを提供する。

use sq_domain::port::driven::{ElevationProbe, PlatformGate};

/// DLL探索パスをシステムディレクトリに固定する。
///
/// カレントディレクトリ経由のDLLハイジャック緩和。ロギングを含む
/// あらゆる処理が補助ライブラリを読み込みうるため、プロセスの
/// 最初の仕事としてロガー構築より前に呼ぶこと。失敗しても続行する
/// （古い環境ではAPI自体が存在しない）。
pub fn harden_dll_search_path() {
    #[cfg(target_os = "windows")]
    {
        use windows::Win32::System::LibraryLoader::{
            SetDefaultDllDirectories, LOAD_LIBRARY_SEARCH_SYSTEM32,
        };

        unsafe {
            let _ = SetDefaultDllDirectories(LOAD_LIBRARY_SEARCH_SYSTEM32);
        }
    }
}

/// プロセストークンの昇格状態プローブ
#[derive(Debug, Default)]
pub struct TokenElevationProbe;

impl TokenElevationProbe {
    pub fn new() -> Self {
        Self
    }
}

impl ElevationProbe for TokenElevationProbe {
    fn is_elevated(&self) -> bool {
        #[cfg(target_os = "windows")]
        {
            windows_token::check_elevated()
        }
        #[cfg(not(target_os = "windows"))]
        {
            false
        }
    }
}

/// OS最低バージョンゲート（Vista以降を要求）
#[derive(Debug, Default)]
pub struct OsVersionGate;

impl OsVersionGate {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformGate for OsVersionGate {
    fn meets_minimum_os(&self) -> bool {
        #[cfg(target_os = "windows")]
        {
            windows_version::at_least_vista()
        }
        #[cfg(not(target_os = "windows"))]
        {
            // 非Windowsビルドは開発用。ゲートで落とさない。
            true
        }
    }
}

#[cfg(target_os = "windows")]
mod windows_token {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::Security::{
        GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY,
    };
    use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    pub fn check_elevated() -> bool {
        unsafe {
            let mut token = windows::Win32::Foundation::HANDLE::default();
            if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token).is_err() {
                return false;
            }

            let mut elevation = TOKEN_ELEVATION::default();
            let mut return_length = 0u32;
            let result = GetTokenInformation(
                token,
                TokenElevation,
                Some(&mut elevation as *mut _ as *mut _),
                std::mem::size_of::<TOKEN_ELEVATION>() as u32,
                &mut return_length,
            );

            let _ = CloseHandle(token);
            result.is_ok() && elevation.TokenIsElevated != 0
        }
    }
}

#[cfg(target_os = "windows")]
mod windows_version {
    use windows::Win32::System::SystemInformation::{GetVersionExW, OSVERSIONINFOW};

    pub fn at_least_vista() -> bool {
        unsafe {
            let mut info = OSVERSIONINFOW {
                dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
                ..Default::default()
            };
            if GetVersionExW(&mut info).is_err() {
                // バージョンすら取れない環境は前提を満たさないとみなす
                return false;
            }
            info.dwMajorVersion >= 6
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sq_domain::port::driven::{ElevationProbe, PlatformGate};

    #[test]
    fn elevation_probe_is_pure_and_stable() {
        let probe = TokenElevationProbe::new();
        // 昇格状態はプロセス生存中に変化しない
        assert_eq!(probe.is_elevated(), probe.is_elevated());
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn non_windows_build_passes_os_gate() {
        assert!(OsVersionGate::new().meets_minimum_os());
    }
}
