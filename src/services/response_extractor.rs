//! 模型输出解析 - 业务能力层
//!
//! 只负责"从任意模型输出中取出 JSON 并校验评判结构"，不关心网络和流程

use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::verdict::{ParsedVerdict, Verdict, DEFAULT_EXPLANATION};

/// 推理块的结束标记
pub const REASONING_END_MARKER: &str = "</think>";

/// 去掉推理块，只保留结束标记之后的部分
///
/// 没有结束标记时返回整段文本。结果已去掉首尾空白。
pub fn strip_reasoning(raw: &str) -> &str {
    match raw.split_once(REASONING_END_MARKER) {
        Some((_, tail)) => tail.trim(),
        None => raw.trim(),
    }
}

/// 从模型原始输出中提取 JSON 载荷
///
/// 1. 去掉 `</think>` 之前的推理内容
/// 2. 取第一个 `{` 到最后一个 `}` 之间的内容（不识别嵌套）
/// 3. 找不到时原样返回去掉空白后的文本，由下游解析失败来表示提取失败
///
/// 对任何输入都不会 panic。
pub fn extract_json_payload(raw: &str) -> String {
    let clean_part = strip_reasoning(raw);

    match (clean_part.find('{'), clean_part.rfind('}')) {
        (Some(start), Some(end)) if end > start => clean_part[start..=end].to_string(),
        _ => {
            warn!(
                "⚠️ 未能在模型输出中找到 JSON 对象: {}",
                crate::utils::logging::truncate_text(clean_part, 200)
            );
            clean_part.to_string()
        }
    }
}

/// 评判结果的 JSON 结构
///
/// `is_correct` 缺失时视为 false；`explanation` 必须存在且为字符串。
#[derive(Debug, Deserialize)]
struct VerdictPayload {
    #[serde(default)]
    is_correct: bool,
    explanation: String,
}

/// 解析提取后的载荷并做结构校验
pub fn parse_verdict(payload: &str) -> ParsedVerdict {
    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            return ParsedVerdict::ExtractionFailure {
                reason: format!("不是合法的 JSON: {}", e),
            }
        }
    };

    if !value.is_object() {
        return ParsedVerdict::ExtractionFailure {
            reason: "顶层不是 JSON 对象".to_string(),
        };
    }

    match serde_json::from_value::<VerdictPayload>(value) {
        Ok(parsed) => {
            let explanation = if parsed.explanation.trim().is_empty() {
                DEFAULT_EXPLANATION.to_string()
            } else {
                parsed.explanation
            };
            debug!("解析评判结果成功: is_correct={}", parsed.is_correct);
            ParsedVerdict::Valid(Verdict::new(parsed.is_correct, explanation))
        }
        Err(e) => ParsedVerdict::ExtractionFailure {
            reason: format!("字段不符合预期: {}", e),
        },
    }
}

/// 提取 + 校验，一步得到评判结果
pub fn parse_model_output(raw: &str) -> ParsedVerdict {
    parse_verdict(&extract_json_payload(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_plain_json_passes_through() {
        let raw = r#"{"is_correct": true, "explanation": "Great use of SUM."}"#;
        assert_eq!(extract_json_payload(raw), raw);
    }

    #[test]
    fn test_reasoning_block_and_prose_are_removed() {
        let raw = "<think>The user wrote {maybe} SUM... let me check</think>\n\
                   Here is my verdict: {\"is_correct\": false, \"explanation\": \"Check the range.\"} Thanks!";
        let payload = extract_json_payload(raw);
        let value: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(
            value,
            json!({"is_correct": false, "explanation": "Check the range."})
        );
    }

    #[test]
    fn test_markdown_fence_is_removed() {
        let raw = "```json\n{\"is_correct\": true, \"explanation\": \"Nice\"}\n```";
        let value: Value = serde_json::from_str(&extract_json_payload(raw)).unwrap();
        assert_eq!(value["explanation"], "Nice");
    }

    #[test]
    fn test_nested_object_survives_extraction() {
        let expected = json!({
            "is_correct": true,
            "explanation": "Correct {exactly}",
            "meta": {"confidence": 0.9, "tags": ["sum", "range"]}
        });
        let raw = format!(
            "<think>reasoning with }} stray braces {{</think>prefix {} suffix",
            expected
        );
        let value: Value = serde_json::from_str(&extract_json_payload(&raw)).unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_object_survives_any_brace_free_wrapping() {
        let payloads = [
            json!({}),
            json!({"is_correct": false, "explanation": "Try a range."}),
            json!({"explanation": "Use {curly} text", "is_correct": true}),
            json!({"a": {"b": {"c": [1, 2, {"d": null}]}}, "explanation": "deep"}),
            json!({"explanation": "多字节 ✓ 文本", "score": 0.5}),
        ];
        let prefixes = [
            "",
            "Sure! ",
            "```json\n",
            "<think>has { and } inside</think>",
            "<think>x</think>\n\nVerdict:\n",
        ];
        let suffixes = ["", " Thanks!", "\n```", "\n\n(end of answer)"];

        for payload in &payloads {
            for prefix in prefixes {
                for suffix in suffixes {
                    let raw = format!("{}{}{}", prefix, payload, suffix);
                    let extracted = extract_json_payload(&raw);
                    let value: Value = serde_json::from_str(&extracted)
                        .unwrap_or_else(|e| panic!("{:?} -> {:?}: {}", raw, extracted, e));
                    assert_eq!(&value, payload, "raw: {:?}", raw);
                }
            }
        }
    }

    #[test]
    fn test_only_first_marker_is_split() {
        let raw = "<think>a</think>{\"explanation\": \"x </think> y\"}";
        assert_eq!(
            extract_json_payload(raw),
            "{\"explanation\": \"x </think> y\"}"
        );
    }

    #[test]
    fn test_no_braces_returns_trimmed_input() {
        assert_eq!(extract_json_payload("no braces here"), "no braces here");
        assert_eq!(extract_json_payload("  no braces here \n"), "no braces here");
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        assert_eq!(extract_json_payload(""), "");
        assert_eq!(extract_json_payload("}{"), "}{");
        assert_eq!(extract_json_payload("{"), "{");
        assert_eq!(extract_json_payload("</think>"), "");
        assert_eq!(extract_json_payload("答案是 {} 吗"), "{}");
        assert_eq!(extract_json_payload("<think>unterminated {"), "<think>unterminated {");
    }

    #[test]
    fn test_parse_valid_verdict() {
        let parsed = parse_model_output(
            "<think>ok</think>{\"is_correct\": true, \"explanation\": \"Well done!\"}",
        );
        assert_eq!(parsed, ParsedVerdict::Valid(Verdict::new(true, "Well done!")));
    }

    #[test]
    fn test_missing_is_correct_defaults_to_false() {
        let parsed = parse_verdict(r#"{"explanation": "Try using a range."}"#);
        assert_eq!(
            parsed,
            ParsedVerdict::Valid(Verdict::new(false, "Try using a range."))
        );
    }

    #[test]
    fn test_blank_explanation_gets_default() {
        let parsed = parse_verdict(r#"{"is_correct": true, "explanation": "  "}"#);
        assert_eq!(
            parsed,
            ParsedVerdict::Valid(Verdict::new(true, DEFAULT_EXPLANATION))
        );
    }

    #[test]
    fn test_schema_violations_are_extraction_failures() {
        for payload in [
            "no braces here",
            r#"{"is_correct": true}"#,
            r#"{"is_correct": "yes", "explanation": "x"}"#,
            r#"{"is_correct": true, "explanation": 42}"#,
            r#"[true, "x"]"#,
            "{not json}",
        ] {
            let parsed = parse_verdict(payload);
            assert!(
                matches!(parsed, ParsedVerdict::ExtractionFailure { .. }),
                "payload should fail: {}",
                payload
            );
            assert_eq!(parsed.into_verdict(), Verdict::evaluation_error());
        }
    }
}
