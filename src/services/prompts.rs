//! 提示词与固定文案
//!
//! 所有发给模型的提示词和展示给候选人的固定文案都集中在这里

use crate::models::{ChatMessage, Transcript};

/// 面试结束时的告别语
pub const CONCLUSION_MESSAGE: &str = "That was the last question! Thank you for completing the interview. Generating your performance summary now...";

/// 非作答阶段收到输入时的提示
pub const OUT_OF_TURN_MESSAGE: &str = "Let's move to the next question.";

/// 总结报告的标题
pub const SUMMARY_HEADING: &str = "### Performance Summary";

const EVALUATION_SYSTEM_PROMPT: &str = r#"You are an expert Excel interviewer named Excellytix AI. Your persona is helpful and encouraging. Your primary goal is to evaluate a candidate's answer and provide one of two responses based on its correctness.

1.  **Analyze the user's answer.** Intelligently determine if it is functionally correct. It does not need to be an exact match.
2.  **If the answer is correct:** Your JSON response MUST be `{"is_correct": true, "explanation": "<Your words of praise and positive feedback on why their answer is a good one.>"}`.
3.  **If the answer is incorrect:** Your JSON response MUST be `{"is_correct": false, "explanation": "<A gentle, encouraging hint to guide the user toward the solution. DO NOT reveal the full answer in the hint.>"}`.
4.  **You must follow the thinking and formatting rules:**
    - First, reason step-by-step inside a `<think>` block.
    - After the `<think>` block, respond with ONLY the valid JSON object.
    - Do not wrap the JSON object in Markdown code blocks like ```json."#;

const SUMMARY_SYSTEM_PROMPT: &str = "You are a senior hiring manager. Your task is to write a concise performance summary based on an interview transcript. Identify key strengths and areas for development. Address the candidate directly in your summary. Be encouraging but professional.";

/// 开场欢迎语（由界面展示，不写入对话记录）
pub fn welcome_message(total_questions: usize) -> String {
    format!(
        "Welcome to the Excellytix AI Mock Interview! The interview will consist of \
         {} questions. Please press 'Start Interview' when you are ready.",
        total_questions
    )
}

/// 题目文本，带上 1-based 序号和总数
pub fn question_prompt(index: usize, total: usize, question_text: &str) -> String {
    format!("**Question {} of {}:** {}", index + 1, total, question_text)
}

/// 总结报告在对话记录中的完整内容
pub fn summary_turn(summary: &str) -> String {
    format!("{}\n\n{}", SUMMARY_HEADING, summary)
}

/// 构建评分用的消息
///
/// 正确时要求模型给出表扬，错误时给出不泄露答案的提示。
pub fn evaluation_messages(
    question: &str,
    user_answer: &str,
    correct_answer: &str,
) -> Vec<ChatMessage> {
    let user_message = format!(
        r#"Please evaluate the following candidate response. Remember to respond with praise if correct, or a hint if incorrect.

- The interview question was: "{}"
- For your reference, a correct answer is: "{}"
- The candidate's submitted answer is: "{}"

Begin your thinking process now."#,
        question, correct_answer, user_answer
    );

    vec![
        ChatMessage::system(EVALUATION_SYSTEM_PROMPT),
        ChatMessage::user(user_message),
    ]
}

/// 构建总结用的消息
pub fn summary_messages(transcript: &Transcript) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Please generate a performance summary based on the following transcript:\n\n{}",
            transcript.render()
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRole;

    #[test]
    fn test_question_prompt_is_one_based() {
        assert_eq!(
            question_prompt(0, 5, "Sum A1:A10"),
            "**Question 1 of 5:** Sum A1:A10"
        );
    }

    #[test]
    fn test_evaluation_messages_carry_all_three_values() {
        let messages = evaluation_messages("Sum A1:A10", "=SUM(A1:A10)", "=SUM(A1:A10)");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.contains("\"is_correct\""));
        assert!(messages[0].content.contains("<think>"));
        assert_eq!(messages[1].role, ChatRole::User);
        assert!(messages[1].content.contains("The interview question was: \"Sum A1:A10\""));
        assert!(messages[1]
            .content
            .contains("The candidate's submitted answer is: \"=SUM(A1:A10)\""));
    }

    #[test]
    fn test_summary_messages_embed_rendered_transcript() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("Q1");
        transcript.push_user("A1");
        let messages = summary_messages(&transcript);
        assert!(messages[0].content.contains("hiring manager"));
        assert!(messages[1].content.ends_with("assistant: Q1\nuser: A1"));
    }

    #[test]
    fn test_welcome_mentions_question_count() {
        assert!(welcome_message(3).contains("consist of 3 questions"));
    }
}
