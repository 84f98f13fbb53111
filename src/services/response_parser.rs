//! 模型输出解析 - 业务能力层
//!
//! 只负责把一段原始文本变成一道通过校验的 `Question`，没有副作用。

use regex::Regex;
use serde_json::Value as JsonValue;

use crate::error::{ParseError, SchemaViolation};
use crate::models::Question;

/// 响应解析器
///
/// 构造时编译好正则，之后 `parse` 只做计算，同一输入总得到同一结果。
#[derive(Debug, Clone)]
pub struct ResponseParser {
    leading_fence: Regex,
    trailing_fence: Regex,
    json_span: Regex,
}

impl ResponseParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            leading_fence: Regex::new(r"^```json")?,
            trailing_fence: Regex::new(r"```$")?,
            // 贪婪匹配：从第一个 `{` 到最后一个 `}`。
            // 模型若输出多个 JSON 对象，整段会解码失败，这里不支持多对象输出。
            json_span: Regex::new(r"(?s)\{.*\}")?,
        })
    }

    /// 解析模型原始输出
    ///
    /// 依次处理：空文本 → 去掉 ```` ```json ```` 围栏 → 截取 `{...}` → 解码 → 结构校验。
    /// `correct_index` 不做范围检查。
    pub fn parse(&self, raw_text: &str) -> Result<Question, ParseError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyResponse);
        }

        let text = self.leading_fence.replace(text, "");
        let text = self.trailing_fence.replace(&text, "");

        let span = self
            .json_span
            .find(&text)
            .ok_or_else(|| ParseError::NoJsonFound {
                text: text.to_string(),
            })?
            .as_str();

        let data: JsonValue =
            serde_json::from_str(span).map_err(|e| ParseError::MalformedJson {
                message: e.to_string(),
            })?;

        validate_schema(&data).map_err(ParseError::Schema)
    }
}

fn validate_schema(data: &JsonValue) -> Result<Question, SchemaViolation> {
    let obj = data.as_object().ok_or(SchemaViolation::NotAnObject)?;

    let question = obj
        .get("question")
        .ok_or(SchemaViolation::MissingField("question"))?;
    let choices = obj
        .get("choices")
        .ok_or(SchemaViolation::MissingField("choices"))?;
    let correct_index = obj
        .get("correct_index")
        .ok_or(SchemaViolation::MissingField("correct_index"))?;

    let text = question.as_str().ok_or(SchemaViolation::WrongType {
        field: "question",
        expected: "字符串",
    })?;

    let choices = choices.as_array().ok_or(SchemaViolation::WrongType {
        field: "choices",
        expected: "字符串数组",
    })?;
    if choices.len() != 4 {
        return Err(SchemaViolation::WrongChoiceCount(choices.len()));
    }
    let choices: Vec<String> = choices
        .iter()
        .map(|c| c.as_str().map(str::to_string))
        .collect::<Option<_>>()
        .ok_or(SchemaViolation::WrongType {
            field: "choices",
            expected: "字符串数组",
        })?;
    let choices: [String; 4] = choices
        .try_into()
        .map_err(|v: Vec<String>| SchemaViolation::WrongChoiceCount(v.len()))?;

    // 超出 i64 的正整数走 u64 分支；小数、字符串等非整数一律拒绝
    let correct_index = correct_index
        .as_i64()
        .map(i128::from)
        .or_else(|| correct_index.as_u64().map(i128::from))
        .ok_or(SchemaViolation::WrongType {
            field: "correct_index",
            expected: "整数",
        })?;

    Ok(Question::new(text, choices, correct_index))
}
