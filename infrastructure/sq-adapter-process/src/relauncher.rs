//! 降格再起動アダプタ。
//!
//! 昇格プロセスからシェル（explorer）のトークンを複製して自分を
//! 再起動することで、再起動後のプロセスをログオンユーザーの通常
//! 権限に落とす。シェルトークンが取れない環境では通常のスポーンに
//! フォールバックする。

use sq_domain::port::driven::SelfRelauncher;
use std::path::Path;

/// シェルトークン経由の自己再起動
#[derive(Debug, Default)]
pub struct ShellTokenRelauncher;

impl ShellTokenRelauncher {
    pub fn new() -> Self {
        Self
    }
}

impl SelfRelauncher for ShellTokenRelauncher {
    fn relaunch(&self, image_path: &Path, args: &str) {
        #[cfg(target_os = "windows")]
        {
            if windows_shell_token::launch_as_shell_user(image_path, args) {
                return;
            }
        }
        // フォールバック: 権限はそのままだが再起動自体は果たす
        spawn_detached(image_path, args);
    }
}

/// 引数文字列を空白で分割してデタッチ起動する。
/// fire-and-forget のため結果は捨てる。
fn spawn_detached(image_path: &Path, args: &str) {
    let mut cmd = std::process::Command::new(image_path);
    cmd.args(args.split_whitespace());
    let _ = cmd.spawn();
}

#[cfg(target_os = "windows")]
mod windows_shell_token {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use windows::core::{PCWSTR, PWSTR};
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::Security::{
        DuplicateTokenEx, SecurityImpersonation, TokenPrimary, TOKEN_ACCESS_MASK,
        TOKEN_ASSIGN_PRIMARY, TOKEN_DUPLICATE, TOKEN_QUERY,
    };
    use windows::Win32::System::Threading::{
        CreateProcessWithTokenW, OpenProcess, OpenProcessToken, CREATE_PROCESS_LOGON_FLAGS,
        PROCESS_CREATION_FLAGS, PROCESS_INFORMATION, PROCESS_QUERY_LIMITED_INFORMATION,
        STARTUPINFOW,
    };
    use windows::Win32::UI::WindowsAndMessaging::{GetShellWindow, GetWindowThreadProcessId};

    fn wstr(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(std::iter::once(0)).collect()
    }

    /// シェルプロセスのトークンで image を起動する。成功で true。
    pub fn launch_as_shell_user(image_path: &Path, args: &str) -> bool {
        unsafe {
            let shell_hwnd = GetShellWindow();
            if shell_hwnd.0.is_null() {
                return false;
            }

            let mut shell_pid = 0u32;
            GetWindowThreadProcessId(shell_hwnd, Some(&mut shell_pid));
            if shell_pid == 0 {
                return false;
            }

            let Ok(shell_process) =
                OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false.into(), shell_pid)
            else {
                return false;
            };

            let mut shell_token = HANDLE::default();
            let token_ok =
                OpenProcessToken(shell_process, TOKEN_DUPLICATE | TOKEN_QUERY, &mut shell_token)
                    .is_ok();
            let _ = CloseHandle(shell_process);
            if !token_ok {
                return false;
            }

            let mut primary = HANDLE::default();
            let dup_ok = DuplicateTokenEx(
                shell_token,
                TOKEN_ACCESS_MASK(TOKEN_QUERY.0 | TOKEN_DUPLICATE.0 | TOKEN_ASSIGN_PRIMARY.0),
                None,
                SecurityImpersonation,
                TokenPrimary,
                &mut primary,
            )
            .is_ok();
            let _ = CloseHandle(shell_token);
            if !dup_ok {
                return false;
            }

            // コマンドラインは "image" + 引数。バッファは可変で渡す。
            let command = format!("\"{}\" {}", image_path.display(), args);
            let mut command_w = wstr(OsStr::new(command.trim_end()));
            let image_w = wstr(image_path.as_os_str());

            let startup = STARTUPINFOW {
                cb: std::mem::size_of::<STARTUPINFOW>() as u32,
                ..Default::default()
            };
            let mut process_info = PROCESS_INFORMATION::default();

            let launched = CreateProcessWithTokenW(
                primary,
                CREATE_PROCESS_LOGON_FLAGS(0),
                PCWSTR(image_w.as_ptr()),
                Some(PWSTR(command_w.as_mut_ptr())),
                PROCESS_CREATION_FLAGS(0),
                None,
                None,
                &startup,
                &mut process_info,
            )
            .is_ok();

            let _ = CloseHandle(primary);
            if launched {
                let _ = CloseHandle(process_info.hProcess);
                let _ = CloseHandle(process_info.hThread);
            }
            launched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn fallback_spawn_tolerates_missing_image() {
        // fire-and-forget のため見えない失敗で済むことだけを確認
        let relauncher = ShellTokenRelauncher::new();
        relauncher.relaunch(Path::new("/nonexistent/Setup.exe"), "--silent");
    }
}
