//! # Excel Interviewer
//!
//! 一个基于 LLM 评分的 Excel 模拟面试程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP 客户端，只暴露能力
//! - `ChatEndpoint` - 唯一访问模型接口的地方，提供 complete() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `response_extractor` - 从模型输出中提取 JSON 判定
//! - `GradingService` - 评判作答、生成总结
//! - `build_playlist` - 按难度配比抽题
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一场面试"的状态机
//! - `InterviewPhase` - 阶段与可用操作
//! - `InterviewSession` - 出题 → 评分 → 前移 → 总结
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/console_app` - 终端交互循环，管理资源和记录落盘
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChatCompletion, ChatEndpoint};
pub use models::{Difficulty, InterviewMix, Playlist, Question, QuestionBank, Transcript};
pub use orchestrator::App;
pub use services::{build_playlist, GradingService};
pub use workflow::{AnswerFeedback, InterviewPhase, InterviewSession};
