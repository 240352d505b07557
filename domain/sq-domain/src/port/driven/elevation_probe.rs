//! 昇格状態プローブポート

/// 現在のプロセストークンが昇格済みかを返す。
/// 純粋なクエリで副作用なし、ブロックしないこと。
/// 昇格状態はプロセス生存中に変化しないため、呼び出し側は
/// 一度だけ計算して使い回す。
pub trait ElevationProbe {
    fn is_elevated(&self) -> bool;
}
