//! ネイティブMessageBox補助（Windowsのみ、他はstderr）

#[cfg(windows)]
mod win_flags {
    use windows::Win32::UI::WindowsAndMessaging::{MESSAGEBOX_STYLE, MB_ICONERROR, MB_OK};

    pub const BLOCKING: MESSAGEBOX_STYLE = MESSAGEBOX_STYLE(MB_OK.0 | MB_ICONERROR.0);
}

#[cfg(windows)]
fn show_message_box(title: &str, msg: &str) {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::UI::WindowsAndMessaging::MessageBoxW;

    let title_w: Vec<u16> = OsStr::new(title)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let text_w: Vec<u16> = OsStr::new(msg)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    unsafe {
        let _ = MessageBoxW(
            None,
            PCWSTR(text_w.as_ptr()),
            PCWSTR(title_w.as_ptr()),
            win_flags::BLOCKING,
        );
    }
}

/// ユーザーが確認するまでブロックする通知を表示する。
/// コンソールがない実行形態を前提とし、非Windowsビルドではstderrに出す。
pub fn show_blocking_notification(title: &str, msg: &str) {
    #[cfg(windows)]
    {
        show_message_box(title, msg);
    }
    #[cfg(not(windows))]
    {
        eprintln!("{}: {}", title, msg);
    }
}
