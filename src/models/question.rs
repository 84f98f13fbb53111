use serde::Serialize;

/// 一道选择题
///
/// 构造后不可修改。`correct_index` 原样保留模型给出的整数（覆盖 i64 和 u64 的全部取值），
/// 不保证落在 `[0, 3]` 内，判分时越界视为无正确答案。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    choices: [String; 4],
    correct_index: i128,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        choices: [String; 4],
        correct_index: impl Into<i128>,
    ) -> Self {
        Self {
            text: text.into(),
            choices,
            correct_index: correct_index.into(),
        }
    }

    /// 题干
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 四个选项，顺序与模型输出一致
    pub fn choices(&self) -> &[String; 4] {
        &self.choices
    }

    pub fn correct_index(&self) -> i128 {
        self.correct_index
    }

    /// 正确选项的文本；索引越界时返回 None
    pub fn correct_choice(&self) -> Option<&str> {
        usize::try_from(self.correct_index)
            .ok()
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }

    /// 判断 0-based 的作答是否正确
    pub fn is_correct(&self, answer: usize) -> bool {
        usize::try_from(self.correct_index).map_or(false, |i| i == answer && i < self.choices.len())
    }
}
