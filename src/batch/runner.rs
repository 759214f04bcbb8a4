//! # 批量执行器
//!
//! 并行执行批量计算任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;
use qensmodels::{QensError, Result};

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 单个任务处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如文件已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (任务标识, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(id, err) => {
                self.failed += 1;
                self.failures.push((id, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，jobs = 0 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理任务列表，结果顺序与输入一致
    pub fn run<T, F>(&self, items: Vec<T>, processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, "Evaluating");
        let failed_count = AtomicUsize::new(0);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| QensError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);
                    if let ProcessResult::Failed(_, _) = &result {
                        let failed = failed_count.fetch_add(1, Ordering::Relaxed) + 1;
                        pb.set_message(format!("Evaluating ({} failed)", failed));
                    }
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}
