//! 起動引数の分類（純粋、プロセスごとに一度だけ実行）。

/// インストール済みチェックを有効化するトークン
pub const TOKEN_CHECK_INSTALL: &str = "--checkInstall";
/// 初期サイレント意図を示すトークン
pub const TOKEN_QUIET: &str = "-s";
/// マシンワイドインストールを明示するトークン
pub const TOKEN_MACHINE_INSTALL: &str = "--machine";
/// 下流へ強制サイレントを継承させるトークン
pub const TOKEN_FORCED_SILENT: &str = "--silent";

/// 生のコマンドライン文字列と、そこから一度だけ導出した意図フラグ。
///
/// 分類は大文字小文字を区別する部分一致（位置・順序は不問、未知の
/// トークンは無視）。フラグは分類後に変化しない。下流への引数伝播は
/// 共有バッファの書き換えではなく `composed_args` による再構成で行う。
///
/// なお `-s` は `--silent` にも部分一致する。再起動された
/// プロセスがサイレント意図を引き継ぐのはこの性質による。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    raw: String,
    check_install_requested: bool,
    quiet_requested: bool,
    explicit_machine_install_requested: bool,
}

impl InvocationContext {
    /// 生文字列を一度だけ分類する。空文字列は「既定のユーザー単位
    /// インストール」を意味する有効な入力。
    pub fn classify(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let check_install_requested = raw.contains(TOKEN_CHECK_INSTALL);
        let quiet_requested = raw.contains(TOKEN_QUIET);
        let explicit_machine_install_requested = raw.contains(TOKEN_MACHINE_INSTALL);
        Self {
            raw,
            check_install_requested,
            quiet_requested,
            explicit_machine_install_requested,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn check_install_requested(&self) -> bool {
        self.check_install_requested
    }

    pub fn quiet_requested(&self) -> bool {
        self.quiet_requested
    }

    pub fn explicit_machine_install_requested(&self) -> bool {
        self.explicit_machine_install_requested
    }

    /// コラボレータへ渡す引数表現を合成する。
    /// 強制サイレントが積まれている場合のみ `--silent` を付与。
    pub fn composed_args(&self, force_silent: bool) -> String {
        if !force_silent {
            return self.raw.clone();
        }
        if self.raw.is_empty() {
            TOKEN_FORCED_SILENT.to_string()
        } else {
            format!("{} {}", self.raw, TOKEN_FORCED_SILENT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_invocation_sets_no_flags() {
        let ctx = InvocationContext::classify("");
        assert!(!ctx.check_install_requested());
        assert!(!ctx.quiet_requested());
        assert!(!ctx.explicit_machine_install_requested());
    }

    #[test]
    fn tokens_match_in_any_order_and_position() {
        let ctx = InvocationContext::classify("foo --machine bar --checkInstall -s baz");
        assert!(ctx.check_install_requested());
        assert!(ctx.quiet_requested());
        assert!(ctx.explicit_machine_install_requested());
    }

    #[test]
    fn unrecognized_tokens_are_ignored_not_rejected() {
        let ctx = InvocationContext::classify("--frobnicate --whatever");
        assert!(!ctx.check_install_requested());
        assert!(!ctx.explicit_machine_install_requested());
    }

    #[test]
    fn classification_is_case_sensitive() {
        let ctx = InvocationContext::classify("--CHECKINSTALL --MACHINE");
        assert!(!ctx.check_install_requested());
        assert!(!ctx.explicit_machine_install_requested());
    }

    #[test]
    fn silent_token_implies_quiet_on_reclassification() {
        // 再起動後のプロセスは "--silent" 入りの引数を受け取り、
        // "-s" 部分一致によってサイレント意図を引き継ぐ。
        let relaunched = InvocationContext::classify("--machine --silent");
        assert!(relaunched.quiet_requested());
    }

    #[test]
    fn composed_args_appends_silent_flag_only_when_forced() {
        let ctx = InvocationContext::classify("--machine");
        assert_eq!(ctx.composed_args(false), "--machine");
        assert_eq!(ctx.composed_args(true), "--machine --silent");
    }

    #[test]
    fn composed_args_on_empty_invocation() {
        let ctx = InvocationContext::classify("");
        assert_eq!(ctx.composed_args(false), "");
        assert_eq!(ctx.composed_args(true), "--silent");
    }
}
