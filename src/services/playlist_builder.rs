//! 题单构建 - 业务能力层
//!
//! 按难度配比从题库无放回抽题，再整体打乱

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use tracing::debug;

use crate::models::{InterviewMix, Playlist, QuestionBank};

/// 构建本场面试的题单
///
/// 每个难度抽取 `min(期望数量, 可用数量)` 道不重复的题目，拼接后统一洗牌，
/// 使不同难度交错出现。随机源由调用方注入，测试中可以固定种子。
pub fn build_playlist<R: Rng + ?Sized>(
    mix: &InterviewMix,
    bank: &QuestionBank,
    rng: &mut R,
) -> Playlist {
    let mut selected = Vec::with_capacity(mix.requested_total());

    for (difficulty, count) in mix.iter() {
        let Some(pool) = bank.pool(difficulty) else {
            debug!("题库中没有 {} 难度，跳过", difficulty);
            continue;
        };

        let take = count.min(pool.len());
        if take < count {
            debug!(
                "{} 难度只有 {} 道题，少于期望的 {} 道，全部使用",
                difficulty,
                pool.len(),
                count
            );
        }

        selected.extend(pool.choose_multiple(rng, take).cloned());
    }

    selected.shuffle(rng);
    Playlist::new(selected)
}
