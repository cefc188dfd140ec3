use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 题目难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 全部难度（题库文件中的固定顺序）
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 题库文件中的键名
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// 从题库键名解析难度（精确匹配，忽略大小写）
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 面试题
///
/// 不可变，身份由其在本场面试题单中的位置决定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_text: String,
    pub correct_formula: String,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(
        question_text: impl Into<String>,
        correct_formula: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            question_text: question_text.into(),
            correct_formula: correct_formula.into(),
            difficulty,
        }
    }
}

/// 题库文件里的单条记录（难度由所在的键决定）
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub question_text: String,
    pub correct_formula: String,
}

/// 按难度分组的静态题库，加载一次后只读
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    pools: BTreeMap<Difficulty, Vec<Question>>,
}

impl QuestionBank {
    /// 空题库（文件缺失时的兜底）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 添加一组题目
    pub fn with_pool(mut self, difficulty: Difficulty, questions: Vec<Question>) -> Self {
        self.pools.entry(difficulty).or_default().extend(questions);
        self
    }

    /// 某个难度下的题目
    pub fn pool(&self, difficulty: Difficulty) -> Option<&[Question]> {
        self.pools.get(&difficulty).map(Vec::as_slice)
    }

    /// 题目总数
    pub fn total(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// 本场面试的题单，构建后不再修改
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    questions: Vec<Question>,
}

impl Playlist {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl From<Vec<Question>> for Playlist {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}
