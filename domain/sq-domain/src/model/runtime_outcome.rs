//! ランタイム前提条件インストールの三値結果。

/// 前提ランタイムのインストール試行の結果。
///
/// 「導入済みにつき何もしなかった」は成功コードの流用ではなく
/// 明示のバリアントで表す。`AlreadySatisfied` を受けた側は
/// ハンドオフへ進まず正常終了する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeInstallOutcome {
    /// 新規にインストールし成功。後続ステージへ進んでよい。
    InstalledOk,
    /// 別経路で充足済み。追加作業なし、ハンドオフ不要。
    AlreadySatisfied,
    /// インストール失敗。コードはそのままプロセス終了コードになる。
    Failed(i32),
}
