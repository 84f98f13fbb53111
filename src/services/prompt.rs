//! 出题提示词模板
//!
//! 模板语法与常见的格式化字符串一致：`{subject}` / `{difficulty}` 为占位符，
//! `{{` 和 `}}` 表示字面量花括号。模板在构造时解析一次，渲染不会失败。

use crate::error::ConfigError;

/// 内置出题提示词
pub const QUIZ_PROMPT: &str = r#"
Generate ONE multiple-choice quiz question about the following subject:

Subject: {subject}
Difficulty: {difficulty}

Rules:
- Provide exactly 4 answer choices
- Only one answer is correct
- Do NOT explain the answer
- Return JSON ONLY in this format:

{{
  "question": "...",
  "choices": ["A", "B", "C", "D"],
  "correct_index": 0
}}
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Subject,
    Difficulty,
}

/// 解析后的提示词模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// 解析模板，两个占位符都必须出现
    pub fn new(template: &str) -> Result<Self, ConfigError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(ConfigError::InvalidPromptTemplate(
                                    "占位符缺少右花括号".to_string(),
                                ))
                            }
                        }
                    }
                    let segment = match name.as_str() {
                        "subject" => Segment::Subject,
                        "difficulty" => Segment::Difficulty,
                        other => {
                            return Err(ConfigError::InvalidPromptTemplate(format!(
                                "未知占位符 {{{}}}",
                                other
                            )))
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' => {
                    return Err(ConfigError::InvalidPromptTemplate(
                        "出现未配对的右花括号，字面量请写成 }}".to_string(),
                    ))
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        for (slot, name) in [(Segment::Subject, "subject"), (Segment::Difficulty, "difficulty")] {
            if !segments.contains(&slot) {
                return Err(ConfigError::InvalidPromptTemplate(format!(
                    "缺少占位符 {{{}}}",
                    name
                )));
            }
        }

        Ok(Self { segments })
    }

    /// 代入学科和难度
    pub fn render(&self, subject: &str, difficulty: &str) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Subject => subject,
                Segment::Difficulty => difficulty,
            })
            .collect()
    }
}
