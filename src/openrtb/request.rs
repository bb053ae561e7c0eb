// src/openrtb/request.rs

use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{BidError, MissingField};

/// OpenRTB BidRequest 结构体，只保留竞价评估用到的字段，其余字段解析时忽略。
///
/// device 保留原始 JSON，类型不对的字段在评估时作为缺失的上下文报告，而不是解码失败。
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BidRequest {
    #[serde(default)]
    pub id: Option<String>,

    /// 广告展示请求列表
    #[serde(default)]
    pub imp: Option<Vec<Impression>>,

    /// 设备信息（原始 JSON）
    #[serde(default)]
    pub device: Option<Value>,
}

/// 单个广告展示机会
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Impression {
    /// 原始 JSON 值，是否为空由校验器判断
    #[serde(default)]
    pub id: Option<Value>,

    /// 不是对象的 banner 视为缺失
    #[serde(default, deserialize_with = "lenient_banner")]
    pub banner: Option<Banner>,

    /// 原始 JSON 值，允许数字或数字字符串
    #[serde(default)]
    pub bidfloor: Option<Value>,

    /// banner.format 渲染后的 "WxH" 列表，首次访问时计算并缓存
    #[serde(skip)]
    dimensions: OnceCell<Vec<String>>,
}

/// Banner 信息，w / h 只作为存在性标记，不参与比较
#[derive(Debug, Clone, Default)]
pub struct Banner {
    pub w: Option<Value>,
    pub h: Option<Value>,
    /// banner.format 不是数组时为 None；数组中不是对象的元素被忽略
    pub format: Option<Vec<Format>>,
}

/// 单个尺寸，w / h 保留原始标量
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    pub w: Value,
    pub h: Value,
}

impl BidRequest {
    /// 使用 simd-json 解码请求体（会就地修改缓冲区）
    pub fn from_slice(body: &mut [u8]) -> Result<Self, BidError> {
        simd_json::serde::from_slice(body).map_err(|e| BidError::MalformedPayload(e.to_string()))
    }

    /// imp 必须存在且非空
    pub fn impressions(&self) -> Result<&[Impression], BidError> {
        match self.imp.as_deref() {
            Some(imps) if !imps.is_empty() => Ok(imps),
            _ => Err(BidError::MissingField(MissingField::Imp)),
        }
    }

    fn device(&self) -> Result<&Map<String, Value>, BidError> {
        self.device
            .as_ref()
            .and_then(Value::as_object)
            .ok_or(BidError::MissingContext("device"))
    }

    pub fn device_os(&self) -> Result<&str, BidError> {
        self.device()?
            .get("os")
            .and_then(Value::as_str)
            .ok_or(BidError::MissingContext("device.os"))
    }

    pub fn device_country(&self) -> Result<&str, BidError> {
        self.device()?
            .get("geo")
            .and_then(Value::as_object)
            .ok_or(BidError::MissingContext("device.geo"))?
            .get("country")
            .and_then(Value::as_str)
            .ok_or(BidError::MissingContext("device.geo.country"))
    }
}

impl Impression {
    /// id 为空的判定：缺失、null、""、"0"、0、false、空数组或空对象
    pub fn has_id(&self) -> bool {
        self.id.as_ref().is_some_and(|id| !is_empty_value(id))
    }

    pub fn has_banner_size(&self) -> bool {
        self.banner
            .as_ref()
            .is_some_and(|banner| banner.w.is_some() && banner.h.is_some())
    }

    /// 底价，缺失时为 0；非数字或负数返回 InvalidValue
    pub fn bid_floor(&self) -> Result<f64, BidError> {
        let Some(raw) = self.bidfloor.as_ref() else {
            return Ok(0.0);
        };
        let floor = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match floor {
            Some(f) if f.is_finite() && f >= 0.0 => Ok(f),
            _ => Err(BidError::invalid_bid_floor()),
        }
    }

    /// 只包含能渲染成 "WxH" 的尺寸
    pub fn format_dimensions(&self) -> &[String] {
        self.dimensions.get_or_init(|| {
            self.banner
                .as_ref()
                .and_then(|banner| banner.format.as_ref())
                .map(|formats| formats.iter().filter_map(Format::dimension).collect())
                .unwrap_or_default()
        })
    }
}

impl Banner {
    fn from_value(value: &Value) -> Option<Self> {
        let banner = value.as_object()?;
        let present = |key: &str| banner.get(key).filter(|v| !v.is_null()).cloned();
        let format = banner.get("format").and_then(Value::as_array).map(|formats| {
            formats
                .iter()
                .filter_map(Value::as_object)
                .map(|f| Format {
                    w: f.get("w").cloned().unwrap_or(Value::Null),
                    h: f.get("h").cloned().unwrap_or(Value::Null),
                })
                .collect()
        });
        Some(Self {
            w: present("w"),
            h: present("h"),
            format,
        })
    }
}

impl Format {
    /// 数字和字符串按原样拼接成 "WxH"，其它类型返回 None
    pub fn dimension(&self) -> Option<String> {
        Some(format!("{}x{}", render_scalar(&self.w)?, render_scalar(&self.h)?))
    }
}

fn lenient_banner<'de, D>(deserializer: D) -> Result<Option<Banner>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Banner::from_value))
}

/// 整数值的浮点数不带小数部分，300.0 渲染为 "300"
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        Value::Number(n) => {
            let f = n.as_f64()?;
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", f as i64))
            } else {
                Some(f.to_string())
            }
        }
        _ => None,
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
