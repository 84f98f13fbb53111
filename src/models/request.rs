/// 默认难度
pub const DEFAULT_DIFFICULTY: &str = "medium";
/// 默认重试次数
pub const DEFAULT_RETRIES: u32 = 3;

/// 一次出题请求
///
/// 每次调用现场构造，不持久化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub subject: String,
    pub difficulty: String,
    retries: u32,
}

impl GenerationRequest {
    /// 使用默认难度和重试次数创建请求
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            retries: DEFAULT_RETRIES,
        }
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// 设置重试次数，0 按 1 处理
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries.max(1);
        self
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = GenerationRequest::new("history");
        assert_eq!(req.subject, "history");
        assert_eq!(req.difficulty, "medium");
        assert_eq!(req.retries(), 3);
    }

    #[test]
    fn test_zero_retries_clamped_to_one() {
        let req = GenerationRequest::new("math").with_retries(0);
        assert_eq!(req.retries(), 1);
    }
}
