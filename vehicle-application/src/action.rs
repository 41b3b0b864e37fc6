use serde::{Deserialize, Serialize};
use std::fmt;

/// 请求类别：写操作（命令）或只读操作（查询）
///
/// 命令与查询各自拥有独立的名称空间，同名不会互相覆盖。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Command,
    Query,
}

impl ActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Command => "command",
            ActionKind::Query => "query",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
