use serde::{Deserialize, Serialize};

/// 发言角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Assistant => "assistant",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 对话记录中的一条发言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// 面试对话记录
///
/// 只追加，不修改、不删除。
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content);
    }

    fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn {
            role,
            content: content.into(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// 从 `start` 开始的新发言（供界面增量渲染）
    pub fn since(&self, start: usize) -> &[Turn] {
        self.turns.get(start..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// 渲染为 `role: content` 逐行文本，用于生成总结
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_order() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("**Question 1 of 1:** Sum A1:A3");
        transcript.push_user("=SUM(A1:A3)");
        assert_eq!(
            transcript.render(),
            "assistant: **Question 1 of 1:** Sum A1:A3\nuser: =SUM(A1:A3)"
        );
    }

    #[test]
    fn test_since_out_of_range_is_empty() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        assert_eq!(transcript.since(0).len(), 1);
        assert!(transcript.since(1).is_empty());
        assert!(transcript.since(7).is_empty());
    }
}
