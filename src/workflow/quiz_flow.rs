//! 终端测验流程 - 流程层
//!
//! 流程顺序：
//! 1. 询问学科和题目数量
//! 2. 逐题生成 → 显示 → 作答 → 判分（一题完全结束后才生成下一题）
//! 3. 输出最终得分
//!
//! 出题失败（重试耗尽）直接结束测验，不带着缺失的题目继续。

use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::{error, info};

use crate::clients::ModelClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{GenerationRequest, Question};
use crate::services::QuestionGenerator;
use crate::utils::logging::log_final_score;
use crate::workflow::quiz_session::QuizSession;

/// 终端测验
pub struct TerminalQuiz<'a, C> {
    generator: &'a QuestionGenerator<C>,
    difficulty: String,
    retries: u32,
    default_count: usize,
}

impl<'a, C: ModelClient> TerminalQuiz<'a, C> {
    pub fn new(generator: &'a QuestionGenerator<C>, config: &Config) -> Self {
        Self {
            generator,
            difficulty: config.difficulty.clone(),
            retries: config.max_retries,
            default_count: config.default_question_count,
        }
    }

    /// 运行一次完整测验，返回结束时的会话
    pub async fn run<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> AppResult<QuizSession> {
        let subject = self.ask_subject(input, output)?;
        let count = self.ask_count(input, output)?;
        info!("开始测验: 学科 {}, 共 {} 题", subject, count);

        let request = GenerationRequest::new(subject.as_str())
            .with_difficulty(self.difficulty.as_str())
            .with_retries(self.retries);
        let mut session = QuizSession::new(subject.as_str(), count);

        for index in 0..count {
            writeln!(output, "\n正在生成第 {}/{} 题...", index + 1, count)?;
            let question = self.generator.generate(&request).await.map_err(|e| {
                error!("[第 {} 题] 出题失败: {}", index + 1, e);
                e
            })?;

            show_question(output, index, count, &question)?;
            let choice = ask_answer(input, output)?;
            show_result(output, &question, choice)?;

            session.push_question(question);
            session.answer_current(choice);
            session.go_forward();
        }

        let score = session.score();
        writeln!(
            output,
            "\n{}",
            format!(
                "最终得分: {}/{} ({:.0}%)",
                score.correct,
                score.total,
                score.percentage()
            )
            .yellow()
            .bold()
        )?;
        log_final_score(session.subject(), score.correct, score.total);

        Ok(session)
    }

    fn ask_subject<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> AppResult<String> {
        loop {
            let line = prompt_line(input, output, "请输入测验学科: ")?;
            if !line.is_empty() {
                return Ok(line);
            }
            writeln!(output, "{}", "学科不能为空。".red())?;
        }
    }

    fn ask_count<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> AppResult<usize> {
        let prompt = format!("题目数量 [{}]: ", self.default_count);
        loop {
            let line = prompt_line(input, output, &prompt)?;
            if line.is_empty() {
                return Ok(self.default_count);
            }
            match line.parse::<usize>() {
                Ok(n) if n > 0 => return Ok(n),
                Ok(_) => writeln!(output, "{}", "题目数量必须为正数。".red())?,
                Err(_) => writeln!(output, "{}", "题目数量必须是整数。".red())?,
            }
        }
    }
}

/// 读取一行并去掉首尾空白；输入结束视为错误
fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> AppResult<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "输入已结束").into());
    }
    Ok(line.trim().to_string())
}

fn show_question<W: Write>(
    output: &mut W,
    index: usize,
    total: usize,
    question: &Question,
) -> AppResult<()> {
    writeln!(output, "\n{} / {}", index + 1, total)?;
    writeln!(output, "{}\n", question.text().cyan().bold())?;
    for (i, choice) in question.choices().iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, choice)?;
    }
    Ok(())
}

/// 读取作答，返回 0-based 选项
fn ask_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> AppResult<usize> {
    loop {
        let line = prompt_line(input, output, "\n你的答案 (1-4): ")?;
        match line.parse::<usize>() {
            Ok(n @ 1..=4) => return Ok(n - 1),
            _ => writeln!(output, "{}", "请输入 1 到 4 之间的数字。".red())?,
        }
    }
}

fn show_result<W: Write>(output: &mut W, question: &Question, choice: usize) -> AppResult<()> {
    if question.is_correct(choice) {
        writeln!(output, "{}", "✔ 回答正确！".green())?;
    } else {
        match question.correct_choice() {
            Some(correct) => writeln!(output, "{} 正确答案: {}", "✘ 回答错误".red(), correct)?,
            None => writeln!(
                output,
                "{} 模型给出的正确答案索引无效 ({})",
                "✘ 回答错误".red(),
                question.correct_index()
            )?,
        }
    }
    Ok(())
}
