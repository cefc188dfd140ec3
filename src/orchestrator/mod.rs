//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责资源初始化和交互调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! console_app (终端交互循环)
//!     ↓
//! workflow::InterviewSession (一场面试的状态机)
//!     ↓
//! services (能力层：grading / playlist / extractor)
//!     ↓
//! infrastructure (基础设施：ChatEndpoint)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有题库和模型端点
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做输入翻译和输出渲染，不做阶段判断

pub mod console_app;

pub use console_app::{App, ShellCommand};
