//! 测验会话
//!
//! 记录"第几题、答了什么、得了几分"，不关心题目从哪来、怎么显示。

use crate::models::Question;

/// 得分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// 百分比得分，总数为 0 时为 0
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

/// 测验会话
///
/// 题目按位置保存，每题一个作答槽位（None 表示未作答）。
/// 前后翻页不会清除已有作答。
#[derive(Debug, Clone)]
pub struct QuizSession {
    subject: String,
    total: usize,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    current: usize,
}

impl QuizSession {
    pub fn new(subject: impl Into<String>, total: usize) -> Self {
        Self {
            subject: subject.into(),
            total,
            questions: Vec::with_capacity(total),
            answers: vec![None; total],
            current: 0,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// 计划的题目总数
    pub fn total(&self) -> usize {
        self.total
    }

    /// 已加载的题目
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 追加一道已生成的题目，超出计划总数时返回 false
    pub fn push_question(&mut self, question: Question) -> bool {
        if self.questions.len() >= self.total {
            return false;
        }
        self.questions.push(question);
        true
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// 当前题目（尚未加载时为 None）
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// 为当前题目作答（0-based），选项越界或题目未加载时返回 false
    pub fn answer_current(&mut self, choice: usize) -> bool {
        let valid = self
            .current()
            .map_or(false, |question| choice < question.choices().len());
        if valid {
            self.answers[self.current] = Some(choice);
        }
        valid
    }

    /// 第 index 题的作答
    pub fn answer_of(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total
    }

    /// 前进一题，已在最后一题时返回 false
    pub fn go_forward(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// 后退一题，已在第一题时返回 false
    pub fn go_back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// 统计得分；未作答或正确答案索引越界的题目不计分
    pub fn score(&self) -> Score {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| answer.map_or(false, |a| question.is_correct(a)))
            .count();
        Score {
            correct,
            total: self.total,
        }
    }
}
