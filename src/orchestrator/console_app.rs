//! 终端面试程序 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源初始化和交互循环。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建模型端点、加载题库和难度配比
//! 2. **交互循环**：逐行读取输入，翻译成状态机操作
//! 3. **增量渲染**：每次操作后只输出新增的面试官发言
//! 4. **记录落盘**：面试结束后写出完整对话记录
//! 5. **重新开始**：结束后重新抽题，开始新的一场
//!
//! ## 设计特点
//!
//! - **无业务逻辑**：阶段判断全部委托给 `InterviewSession`
//! - **资源所有者**：唯一持有题库和评分服务的模块
//! - **输入输出可替换**：`run_with` 接受任意异步读写端，便于测试

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::ChatEndpoint;
use crate::models::{load_interview_mix, load_question_bank, InterviewMix, QuestionBank, Role};
use crate::services::{build_playlist, GradingService};
use crate::utils::logging::{log_playlist_built, log_startup, write_transcript_log};
use crate::workflow::{InterviewAction, InterviewPhase, InterviewSession};

/// 一行输入对应的指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Start,
    Answer(String),
    Next,
    Restart,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    /// 解析一行输入
    ///
    /// 作答阶段除了 `quit` 以外的整行都视为答案；其他阶段识别命令词，
    /// 无法识别的输入仍按作答提交，由状态机给出提示。
    pub fn parse(line: &str, phase: InterviewPhase) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ShellCommand::Empty;
        }

        let keyword = trimmed.to_ascii_lowercase();
        if keyword == "quit" || keyword == "exit" {
            return ShellCommand::Quit;
        }

        if phase == InterviewPhase::Evaluating {
            return ShellCommand::Answer(trimmed.to_string());
        }

        match keyword.as_str() {
            "start" => ShellCommand::Start,
            "next" => ShellCommand::Next,
            "restart" => ShellCommand::Restart,
            "help" => ShellCommand::Help,
            _ => ShellCommand::Answer(trimmed.to_string()),
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    bank: QuestionBank,
    mix: InterviewMix,
    grader: GradingService,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let endpoint = ChatEndpoint::new(config.endpoint())?;
        let grader =
            GradingService::new(Arc::new(endpoint)).with_verbose_logging(config.verbose_logging);

        info!("\n📁 正在加载题库和难度配比...");
        let bank = load_question_bank(Path::new(&config.question_bank_path)).await;
        let mix = load_interview_mix(Path::new(&config.interview_mix_path)).await;
        info!("✓ 题库共 {} 道题", bank.total());

        Ok(Self::from_parts(config, bank, mix, grader))
    }

    /// 用现成的组件组装应用
    pub fn from_parts(
        config: Config,
        bank: QuestionBank,
        mix: InterviewMix,
        grader: GradingService,
    ) -> Self {
        Self {
            config,
            bank,
            mix,
            grader,
        }
    }

    /// 抽题并创建一场新的面试
    pub fn new_session(&self) -> InterviewSession {
        let playlist = build_playlist(&self.mix, &self.bank, &mut rand::rng());
        log_playlist_built(playlist.len(), self.mix.requested_total());
        InterviewSession::new(playlist, self.grader.clone())
    }

    /// 在标准输入输出上运行
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with(stdin, stdout).await
    }

    /// 运行交互循环
    pub async fn run_with<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut screen = Screen::new(self.new_session());

        screen.welcome(&mut writer).await?;

        loop {
            screen.prompt(&mut writer).await?;

            let Some(line) = lines.next_line().await? else {
                info!("输入结束，退出");
                break;
            };

            let mut feedback = None;
            match ShellCommand::parse(&line, screen.session.phase()) {
                ShellCommand::Empty => continue,
                ShellCommand::Quit => {
                    info!("👋 用户退出");
                    break;
                }
                ShellCommand::Help => {
                    screen.hint(&mut writer).await?;
                    continue;
                }
                ShellCommand::Start => screen.session.start().await,
                ShellCommand::Next => screen.session.advance_to_next_question().await,
                ShellCommand::Answer(text) => {
                    feedback = Some(screen.session.submit_answer(&text).await);
                }
                ShellCommand::Restart => {
                    if screen.session.phase().allows(InterviewAction::Restart) {
                        screen = Screen::new(self.new_session());
                        screen.welcome(&mut writer).await?;
                        continue;
                    }
                    warn!("面试尚未结束，忽略重新开始请求");
                }
            }

            let spoken = screen.render(&mut writer).await?;

            // 未进入评分的作答不会产生新发言，直接展示返回的提示
            if let Some(feedback) = feedback.filter(|_| spoken == 0) {
                say(&mut writer, &feedback.content).await?;
            }

            if screen.session.is_finished() && !screen.log_written {
                self.save_transcript(&screen.session);
                screen.log_written = true;
            }

            screen.hint(&mut writer).await?;
        }

        writer.flush().await?;
        Ok(())
    }

    fn save_transcript(&self, session: &InterviewSession) {
        if let Err(e) = write_transcript_log(&self.config.output_log_file, session.transcript()) {
            warn!("⚠️ 面试记录写入失败: {}", e);
        }
    }
}

/// 一场面试在终端上的显示状态
struct Screen {
    session: InterviewSession,
    rendered: usize,
    log_written: bool,
}

impl Screen {
    fn new(session: InterviewSession) -> Self {
        Self {
            session,
            rendered: 0,
            log_written: false,
        }
    }

    async fn welcome<W: AsyncWrite + Unpin>(&mut self, writer: &mut W) -> Result<()> {
        say(writer, &self.session.welcome_message()).await?;
        self.hint(writer).await
    }

    /// 只输出上次渲染之后新增的面试官发言，候选人的输入已经在屏幕上
    ///
    /// 返回本次输出的发言条数。
    async fn render<W: AsyncWrite + Unpin>(&mut self, writer: &mut W) -> Result<usize> {
        let start = self.rendered;
        self.rendered = self.session.transcript().len();

        let mut spoken = 0;
        for turn in self.session.transcript().since(start) {
            if turn.role == Role::Assistant {
                say(writer, &turn.content).await?;
                spoken += 1;
            }
        }
        Ok(spoken)
    }

    async fn hint<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> Result<()> {
        let text = match self.session.phase() {
            InterviewPhase::Introduction => "[type 'start' to begin, 'quit' to exit]",
            InterviewPhase::AskingQuestion => "[type 'next' for the next question]",
            InterviewPhase::Evaluating => "[type your answer, e.g. =SUM(A1:A10)]",
            InterviewPhase::Conclusion => "[type 'restart' for a new interview, 'quit' to exit]",
        };
        writer.write_all(format!("{}\n", text).as_bytes()).await?;
        Ok(())
    }

    async fn prompt<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(b"> ").await?;
        writer.flush().await?;
        Ok(())
    }
}

/// 输出一条面试官发言
async fn say<W: AsyncWrite + Unpin>(writer: &mut W, content: &str) -> Result<()> {
    let text = format!("\nInterviewer: {}\n", content);
    writer.write_all(text.as_bytes()).await?;
    Ok(())
}
