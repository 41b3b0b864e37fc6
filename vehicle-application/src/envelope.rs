//! 请求信封
//!
//! 传输层把原始请求体与“调用方提供的字段”（例如路径中的 ID）一起交给调度器。
//! 解码时先把请求体解析为 JSON 对象（空请求体视为 `{}`），再用调用方字段覆盖同名键，
//! 最后反序列化为处理器的请求类型。请求体因此无法伪造路径中的 ID。
//!
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
enum Body {
    #[default]
    Empty,
    Raw(Vec<u8>),
    Json(Value),
}

#[derive(Debug, Clone, Default)]
pub struct RequestEnvelope {
    body: Body,
    fields: Map<String, Value>,
}

impl RequestEnvelope {
    /// 无请求体、无附加字段
    pub fn empty() -> Self {
        Self::default()
    }

    /// 以原始字节作为请求体
    pub fn from_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: Body::Raw(body.into()),
            fields: Map::new(),
        }
    }

    /// 以已解析的 JSON 作为请求体
    pub fn from_value(value: Value) -> Self {
        Self {
            body: Body::Json(value),
            fields: Map::new(),
        }
    }

    /// 附加一个调用方字段，优先级高于请求体中的同名字段
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub(crate) fn decode<T>(&self) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let mut object = match &self.body {
            Body::Empty => Map::new(),
            Body::Raw(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Map::new(),
            Body::Raw(bytes) => {
                let value: Value = serde_json::from_slice(bytes)
                    .map_err(|e| AppError::malformed(format!("invalid JSON body: {e}")))?;
                into_object(value)?
            }
            Body::Json(value) => into_object(value.clone())?,
        };

        for (key, value) in &self.fields {
            object.insert(key.clone(), value.clone());
        }

        serde_json::from_value(Value::Object(object)).map_err(|e| AppError::malformed(e.to_string()))
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(AppError::malformed(format!(
            "request body must be a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
