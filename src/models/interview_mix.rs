use serde::Deserialize;
use std::collections::BTreeMap;

use super::question::Difficulty;

/// 每个难度要抽取的题目数量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewMix {
    counts: BTreeMap<Difficulty, usize>,
}

impl Default for InterviewMix {
    fn default() -> Self {
        Self::new([
            (Difficulty::Easy, 2),
            (Difficulty::Medium, 2),
            (Difficulty::Hard, 1),
        ])
    }
}

impl InterviewMix {
    pub fn new(counts: impl IntoIterator<Item = (Difficulty, usize)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// 按难度顺序遍历配比
    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, usize)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }

    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.counts.get(&difficulty).copied().unwrap_or(0)
    }

    /// 期望的题目总数
    pub fn requested_total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// `interview.toml` 的文件结构
///
/// ```toml
/// easy = 2
/// medium = 2
/// hard = 1
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterviewMixFile {
    pub easy: Option<usize>,
    pub medium: Option<usize>,
    pub hard: Option<usize>,
}

impl From<InterviewMixFile> for InterviewMix {
    /// 文件中未列出的难度沿用默认配比
    fn from(file: InterviewMixFile) -> Self {
        let default = InterviewMix::default();
        InterviewMix::new([
            (
                Difficulty::Easy,
                file.easy.unwrap_or(default.count(Difficulty::Easy)),
            ),
            (
                Difficulty::Medium,
                file.medium.unwrap_or(default.count(Difficulty::Medium)),
            ),
            (
                Difficulty::Hard,
                file.hard.unwrap_or(default.count(Difficulty::Hard)),
            ),
        ])
    }
}
