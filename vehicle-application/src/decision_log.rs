use std::sync::{Arc, Mutex, PoisonError};

/// 单次请求的决策记录
///
/// 处理器在校验与执行过程中记录“为什么这样处理”的说明（例如默认值的填充），
/// 随响应一起返回给调用方，不做持久化。克隆共享同一份记录，追加顺序即返回顺序。
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    notes: Arc<Mutex<Vec<String>>>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条决策说明
    pub fn record(&self, note: impl Into<String>) {
        let note = note.into();
        tracing::debug!(decision = %note, "decision recorded");
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(note);
    }

    /// 当前全部记录的副本
    pub fn snapshot(&self) -> Vec<String> {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
